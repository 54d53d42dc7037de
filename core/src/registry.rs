//! Classifier registry: interaction kind → rule name → [`RuleClassifier`].
//!
//! Rule classifiers are registered per interaction kind with a builder and
//! frozen into an immutable [`ClassifierRegistry`]. The two-level lookup replaces
//! any runtime casting: the interaction kind picks an [`InteractionClassifier`],
//! the rule name picks a boxed predicate, and the predicate validates its own
//! typed inputs.
//!
//! # Example
//!
//! ```
//! use tutor::{ClassifierRegistry, Number, RegistryBuilder, SingleInputClassifier};
//!
//! let registry = RegistryBuilder::new()
//!     .interaction("Slider", |rules| {
//!         rules.rule(
//!             "IsAbove",
//!             SingleInputClassifier::<Number, Number>::new("x", |a, x| a.0 > x.0),
//!         )
//!     })
//!     .build();
//!
//! let slider = registry.get_interaction_classifier("Slider").unwrap();
//! assert!(slider.get_rule_classifier("IsAbove").is_some());
//! assert!(slider.get_rule_classifier("IsBelow").is_none());
//!
//! let core = ClassifierRegistry::with_core_interactions();
//! assert!(core.contains("NumericInput"));
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::{ConfigurationError, RuleClassifier};

// ═══════════════════════════════════════════════════════════════════════════════
// InteractionClassifier
// ═══════════════════════════════════════════════════════════════════════════════

/// Every rule classifier available to one interaction kind.
pub struct InteractionClassifier {
    kind: String,
    rules: HashMap<String, Box<dyn RuleClassifier>>,
}

impl InteractionClassifier {
    /// The interaction kind (e.g. `"NumericInput"`).
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Resolve a rule name. Unknown names are `None`, never an error.
    #[must_use]
    pub fn get_rule_classifier(&self, rule_type: &str) -> Option<&dyn RuleClassifier> {
        self.rules.get(rule_type).map(Box::as_ref)
    }

    /// Resolve a rule name, turning "not found" into a configuration error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownRule`] listing the registered rules.
    pub fn resolve(&self, rule_type: &str) -> Result<&dyn RuleClassifier, ConfigurationError> {
        self.get_rule_classifier(rule_type)
            .ok_or_else(|| ConfigurationError::UnknownRule {
                interaction: self.kind.clone(),
                rule: rule_type.to_owned(),
                available: self.rule_types().into_iter().map(str::to_owned).collect(),
            })
    }

    /// Registered rule names, sorted.
    #[must_use]
    pub fn rule_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` for interactions without rules (e.g. `Continue`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for InteractionClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionClassifier")
            .field("kind", &self.kind)
            .field("rules", &self.rule_types())
            .finish()
    }
}

/// Collects the rules of one interaction kind inside [`RegistryBuilder::interaction`].
pub struct InteractionClassifierBuilder {
    kind: String,
    rules: HashMap<String, Box<dyn RuleClassifier>>,
}

impl InteractionClassifierBuilder {
    fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            rules: HashMap::new(),
        }
    }

    /// Register a classifier under `rule_type`. A later registration replaces an earlier one.
    #[must_use]
    pub fn rule(mut self, rule_type: &str, classifier: impl RuleClassifier + 'static) -> Self {
        self.rules.insert(rule_type.to_owned(), Box::new(classifier));
        self
    }

    fn build(self) -> InteractionClassifier {
        InteractionClassifier {
            kind: self.kind,
            rules: self.rules,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════════════

/// Builder for constructing a [`ClassifierRegistry`].
///
/// The registry is immutable after [`build()`](Self::build); no runtime
/// registration is possible.
#[derive(Default)]
pub struct RegistryBuilder {
    interactions: HashMap<String, InteractionClassifier>,
}

impl RegistryBuilder {
    /// Create a new empty registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rules of one interaction kind.
    ///
    /// Registering the same kind twice extends its rule set.
    #[must_use]
    pub fn interaction(
        mut self,
        kind: &str,
        rules: impl FnOnce(InteractionClassifierBuilder) -> InteractionClassifierBuilder,
    ) -> Self {
        let mut seed = InteractionClassifierBuilder::new(kind);
        if let Some(existing) = self.interactions.remove(kind) {
            seed.rules = existing.rules;
        }
        let built = rules(seed).build();
        self.interactions.insert(kind.to_owned(), built);
        self
    }

    /// Freeze the registry. No further registration is possible.
    #[must_use]
    pub fn build(self) -> ClassifierRegistry {
        ClassifierRegistry {
            interactions: self.interactions,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════════

/// Immutable map from interaction kind to its [`InteractionClassifier`].
///
/// `Send + Sync`; share it behind an `Arc` across sessions.
pub struct ClassifierRegistry {
    interactions: HashMap<String, InteractionClassifier>,
}

impl ClassifierRegistry {
    /// A registry holding every built-in interaction.
    ///
    /// See [`register_core_interactions`](crate::register_core_interactions).
    #[must_use]
    pub fn with_core_interactions() -> Self {
        crate::register_core_interactions(RegistryBuilder::new()).build()
    }

    /// Look up an interaction kind. Unknown kinds are `None`.
    #[must_use]
    pub fn get_interaction_classifier(&self, kind: &str) -> Option<&InteractionClassifier> {
        self.interactions.get(kind)
    }

    /// Look up an interaction kind, turning "not found" into a configuration error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownInteraction`] listing registered kinds.
    pub fn resolve(&self, kind: &str) -> Result<&InteractionClassifier, ConfigurationError> {
        self.get_interaction_classifier(kind)
            .ok_or_else(|| ConfigurationError::UnknownInteraction {
                kind: kind.to_owned(),
                available: self
                    .interaction_kinds()
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            })
    }

    /// Returns `true` if the interaction kind is registered.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.interactions.contains_key(kind)
    }

    /// Registered interaction kinds, sorted.
    #[must_use]
    pub fn interaction_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.interactions.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Number of registered interaction kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }
}

impl fmt::Debug for ClassifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierRegistry")
            .field("interactions", &self.interaction_kinds())
            .finish()
    }
}
