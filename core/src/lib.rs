//! tutor - typed answer classification and navigation for interactive lessons
//!
//! A lesson ("exploration") is a directed graph of states. Each state has an
//! interaction whose ordered answer groups grade the learner's typed answer and
//! decide where they go next.
//!
//! # Architecture
//!
//! - [`TypedValue`] - Closed tagged union of answers and rule inputs
//! - [`FromTypedValue`] - Typed input validation before any predicate runs
//! - [`RuleClassifier`] - One named, pure predicate (`matches(answer, inputs)`)
//! - [`ClassifierRegistry`] - Interaction kind → rule name → classifier
//! - [`AnswerClassifier`] - First-match-wins over answer groups, default outcome fallback
//! - [`StateDeck`] - Navigation state machine over completed, pending and terminal states
//! - [`ExplorationPlayer`] - One learner session tying classification to the deck
//!
//! # Key Design Insights
//!
//! 1. **No runtime casts**: the registry returns a trait object and the
//!    classifier converts inputs itself through [`FromTypedValue`]. A predicate
//!    body never sees an ill-typed value.
//!
//! 2. **Malformed content is an error, not a non-match**: unknown rules and
//!    ill-typed inputs surface as [`ConfigurationError`] / [`InputValidationError`].
//!    Run [`Exploration::validate`] at load time to find them early.
//!
//! 3. **Pushing does not navigate**: [`StateDeck::push_state`] extends the deck
//!    without moving the cursor.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tutor::prelude::*;
//!
//! let classifier = AnswerClassifier::new(Arc::new(ClassifierRegistry::with_core_interactions()));
//!
//! let interaction = Interaction {
//!     id: "RatioExpressionInput".into(),
//!     answer_groups: vec![AnswerGroup {
//!         rule_specs: vec![RuleSpec::new(
//!             "IsEquivalent",
//!             [("x", RatioExpression::new(vec![1, 2, 3]))],
//!         )],
//!         outcome: Outcome::to_state("Next", "Well done.").correct(),
//!         tagged_skill_misconception_id: None,
//!     }],
//!     default_outcome: Some(Outcome::to_state("Ask", "Try again.")),
//! };
//!
//! let answer = TypedValue::from(RatioExpression::new(vec![2, 4, 6]));
//! let result = classifier.classify(&interaction, &answer).unwrap();
//! assert!(result.outcome().labelled_as_correct);
//!
//! let mut deck = StateDeck::new(State::new("Ask", interaction));
//! deck.submit_answer(answer, result.outcome().feedback.clone()).unwrap();
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod classification;
mod classifier;
mod click_on_image;
mod config;
mod content;
mod deck;
mod error;
mod fraction;
mod input_validator;
pub mod interactions;
mod number_with_units;
mod player;
mod ratio;
mod registry;
mod trace;
mod typed_value;

// ═══════════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════════

// Values
pub use click_on_image::{ClickOnImage, Point2d};
pub use fraction::Fraction;
pub use number_with_units::{NumberUnit, NumberWithUnits, UnitNumber};
pub use ratio::RatioExpression;
pub use typed_value::{TypedValue, ValueType};

// Validation and classifiers
pub use classifier::{
    DoubleInputClassifier, NoInputClassifier, RuleClassifier, SingleInputClassifier,
};
pub use input_validator::{
    retrieve_input, typed_answer, typed_input, FromTypedValue, Number, RuleInputs,
};
pub use interactions::register_core_interactions;
pub use registry::{
    ClassifierRegistry, InteractionClassifier, InteractionClassifierBuilder, RegistryBuilder,
};

// Content
pub use config::{ExplorationConfig, StateConfig};
pub use content::{AnswerGroup, Exploration, Interaction, Outcome, RuleSpec, State, SubtitledHtml};

// Classification
pub use classification::{AnswerClassifier, AnswerOutcome, ClassificationResult, Destination};
pub use trace::{ClassificationTrace, RuleTrace};

// Navigation
pub use deck::{AnswerAndResponse, EphemeralState, StateDeck, StateKind, TerminalCheck};
pub use player::ExplorationPlayer;

// Errors
pub use error::{
    ClassificationError, ConfigurationError, ContentError, DeckError, InputValidationError,
    PlayerError,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use tutor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Classification
        AnswerClassifier,
        // Content
        AnswerGroup,
        AnswerOutcome,
        ClassificationResult,
        // Errors
        ClassificationError,
        ClassifierRegistry,
        ConfigurationError,
        DeckError,
        Destination,
        // Navigation
        EphemeralState,
        Exploration,
        ExplorationPlayer,
        // Values
        Fraction,
        InputValidationError,
        Interaction,
        NumberWithUnits,
        Outcome,
        RatioExpression,
        // Registry
        RegistryBuilder,
        RuleSpec,
        State,
        StateDeck,
        StateKind,
        SubtitledHtml,
        TypedValue,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Tolerance for numeric equality: `|a - b| < FLOAT_EQUALITY_EPSILON`.
pub const FLOAT_EQUALITY_EPSILON: f64 = 1e-5;

/// Maximum number of answer groups in a single [`Interaction`].
///
/// Checked by [`Interaction::validate`]; classification cost is linear in it.
pub const MAX_ANSWER_GROUPS: usize = 128;

/// Maximum number of rule specs in a single [`AnswerGroup`].
pub const MAX_RULE_SPECS_PER_GROUP: usize = 64;

/// Interaction id of the state that ends an exploration.
///
/// Terminal interactions have no rules and need no default outcome.
pub const TERMINAL_INTERACTION_ID: &str = "EndExploration";

/// Approximate equality used by every numeric rule.
///
/// ```
/// assert!(tutor::approximately_equals(0.1 + 0.2, 0.3));
/// assert!(!tutor::approximately_equals(1.0, 1.001));
/// ```
#[inline]
#[must_use]
pub fn approximately_equals(a: f64, b: f64) -> bool {
    (a - b).abs() < FLOAT_EQUALITY_EPSILON
}
