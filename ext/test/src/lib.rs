//! tutor-test: Test domain for conformance testing
//!
//! Provides a small extension interaction and the YAML fixture runner used by
//! the conformance suites. This is the reference extension that demonstrates
//! how to add an interaction kind to a [`ClassifierRegistry`].
//!
//! # Example
//!
//! ```
//! use tutor_test::prelude::*;
//!
//! let registry = tutor_test::registry();
//! let parity = registry.resolve(PARITY_INPUT_ID).unwrap();
//! assert_eq!(parity.rule_types(), vec!["IsDivisibleBy", "IsEven", "IsOdd"]);
//!
//! // The core interactions are registered alongside it.
//! assert!(registry.contains("FractionInput"));
//! ```

use tutor::{ClassifierRegistry, NoInputClassifier, RegistryBuilder, SingleInputClassifier};

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Interaction kind of the parity extension.
///
/// Answers are signed integers:
///
/// | Rule | Inputs |
/// |------|--------|
/// | `IsEven` | - |
/// | `IsOdd` | - |
/// | `IsDivisibleBy` | `x`: non-negative int |
pub const PARITY_INPUT_ID: &str = "ParityInput";

fn is_divisible_by(answer: &i32, divisor: &u32) -> bool {
    *divisor != 0 && i64::from(*answer) % i64::from(*divisor) == 0
}

/// Register the core interactions plus [`PARITY_INPUT_ID`] with the given builder.
#[must_use]
pub fn register(builder: RegistryBuilder) -> RegistryBuilder {
    tutor::register_core_interactions(builder).interaction(PARITY_INPUT_ID, |rules| {
        rules
            .rule("IsEven", NoInputClassifier::<i32>::new(|n| n % 2 == 0))
            .rule("IsOdd", NoInputClassifier::<i32>::new(|n| n % 2 != 0))
            .rule(
                "IsDivisibleBy",
                SingleInputClassifier::<i32, u32>::new("x", is_divisible_by),
            )
    })
}

/// A registry with the core interactions and the parity extension.
#[must_use]
pub fn registry() -> ClassifierRegistry {
    register(RegistryBuilder::new()).build()
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::PARITY_INPUT_ID;
    pub use tutor::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tutor::prelude::*;

    fn parity(rule: RuleSpec) -> Interaction {
        Interaction {
            id: PARITY_INPUT_ID.into(),
            answer_groups: vec![AnswerGroup {
                rule_specs: vec![rule],
                outcome: Outcome::to_state("Yes", ""),
                tagged_skill_misconception_id: None,
            }],
            default_outcome: Some(Outcome::to_state("No", "")),
        }
    }

    fn dest(interaction: &Interaction, answer: i32) -> String {
        AnswerClassifier::new(Arc::new(registry()))
            .classify(interaction, &TypedValue::SignedInt(answer))
            .unwrap()
            .into_outcome()
            .dest_state_name
    }

    #[test]
    fn test_registry_extends_core() {
        let core = ClassifierRegistry::with_core_interactions();
        let extended = registry();

        assert_eq!(extended.len(), core.len() + 1);
        assert!(extended.contains(PARITY_INPUT_ID));
        assert!(!core.contains(PARITY_INPUT_ID));
    }

    #[test]
    fn test_parity_rules() {
        let even = parity(RuleSpec::new("IsEven", Vec::<(&str, TypedValue)>::new()));
        assert_eq!(dest(&even, 4), "Yes");
        assert_eq!(dest(&even, -3), "No");

        let odd = parity(RuleSpec::new("IsOdd", Vec::<(&str, TypedValue)>::new()));
        assert_eq!(dest(&odd, -3), "Yes");
    }

    #[test]
    fn test_divisible_by() {
        let by_three = parity(RuleSpec::new("IsDivisibleBy", [("x", 3u32)]));
        assert_eq!(dest(&by_three, -9), "Yes");
        assert_eq!(dest(&by_three, 10), "No");

        let by_zero = parity(RuleSpec::new("IsDivisibleBy", [("x", 0u32)]));
        assert_eq!(dest(&by_zero, 0), "No");
    }
}
