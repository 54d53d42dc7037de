//! Error taxonomy.
//!
//! Every error here reports a defect in authored content or in the calling
//! session, never a wrong answer. None of them are recovered locally.
//!
//! | Error | Raised by | Meaning |
//! |-------|-----------|---------|
//! | [`ConfigurationError`] | registry lookups, content validation | content names something that does not exist |
//! | [`InputValidationError`] | the typed input validator | a rule parameter or answer has the wrong shape |
//! | [`DeckError`] | [`StateDeck`](crate::StateDeck) | a deck operation was called outside its precondition |
//! | [`ClassificationError`] | [`AnswerClassifier`](crate::AnswerClassifier) | either of the first two, during classification |
//! | [`ContentError`] | [`Exploration::validate`](crate::Exploration::validate) | a classification error located in a state |
//! | [`PlayerError`] | [`ExplorationPlayer`](crate::ExplorationPlayer) | any of the above, or no active session |

use crate::ValueType;

/// Content references an interaction, rule or state that is not known.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// No classifiers are registered for the interaction kind.
    #[error("Encountered unknown interaction type: \"{kind}\"{}", available_suffix(.available))]
    UnknownInteraction {
        /// The unregistered interaction kind.
        kind: String,
        /// Interaction kinds that ARE registered.
        available: Vec<String>,
    },

    /// The interaction has no classifier for the rule name.
    #[error(
        "Expected interaction {interaction} to have classifier for rule type: \"{rule}\"{}",
        available_suffix(.available)
    )]
    UnknownRule {
        /// The interaction kind that was searched.
        interaction: String,
        /// The unregistered rule name.
        rule: String,
        /// Rule names registered for the interaction.
        available: Vec<String>,
    },

    /// No answer group matched and the interaction has no default outcome.
    #[error("interaction {interaction} has no default outcome for unmatched answers")]
    MissingDefaultOutcome {
        /// The interaction kind.
        interaction: String,
    },

    /// A state name is referenced but not defined in the exploration.
    #[error("state \"{name}\" referenced by {referenced_by} does not exist")]
    UnknownState {
        /// The missing state name.
        name: String,
        /// Where the reference was found (e.g. `"init_state_name"`).
        referenced_by: String,
    },

    /// Too many answer groups in a single interaction.
    #[error("interaction has {count} answer groups, but maximum allowed is {max}")]
    TooManyAnswerGroups {
        /// Actual count.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// Too many rule specs in a single answer group.
    #[error("answer group has {count} rule specs, but maximum allowed is {max}")]
    TooManyRuleSpecs {
        /// Actual count.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },
}

/// A rule parameter or answer does not have the type a classifier declares.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputValidationError {
    /// The rule spec does not carry a declared parameter.
    #[error(
        "Expected classifier inputs to contain parameter with name '{name}' but had: [{}]",
        .present.join(", ")
    )]
    MissingParameter {
        /// The declared parameter name.
        name: String,
        /// Parameter names the rule spec does carry.
        present: Vec<String>,
    },

    /// A parameter is present but has an unaccepted type.
    #[error(
        "Expected input value '{name}' to be of type {} not {actual}",
        type_list(.expected)
    )]
    ParameterTypeMismatch {
        /// The parameter name.
        name: String,
        /// Types the classifier accepts for this parameter.
        expected: &'static [ValueType],
        /// The type the rule spec supplied.
        actual: ValueType,
    },

    /// The learner's answer has an unaccepted type.
    #[error("Expected answer to be of type {} not {actual}", type_list(.expected))]
    AnswerTypeMismatch {
        /// Types the classifier accepts as an answer.
        expected: &'static [ValueType],
        /// The type that was submitted.
        actual: ValueType,
    },
}

/// A failure while classifying an answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    /// Unknown interaction, unknown rule, or missing default outcome.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A rule's inputs or the answer are ill-typed.
    #[error(transparent)]
    InputValidation(#[from] InputValidationError),
}

/// A [`StateDeck`](crate::StateDeck) operation was called outside its allowed state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    /// Backward navigation from the first state.
    #[error("Cannot navigate to previous State; at initial state.")]
    AtInitialState,

    /// Forward navigation from the most recent state.
    #[error("Cannot navigate to next State; at most recent State.")]
    AtMostRecentState,

    /// The learner is looking at an earlier state.
    #[error("Cannot {operation} unless the learner is at the most recent State.")]
    NotAtMostRecentState {
        /// The rejected operation (`"submit an answer"`, `"push a new State"`).
        operation: &'static str,
    },

    /// The pending state is terminal.
    #[error("Cannot {operation} after reaching a terminal State.")]
    TerminalState {
        /// The rejected operation.
        operation: &'static str,
    },

    /// Pushing before any answer was recorded for the pending state.
    #[error("Cannot push another State without an answer.")]
    NoAnswerSubmitted,

    /// Pushing the pending state onto itself.
    #[error("Cannot route from the same State to itself as a new card: \"{state}\".")]
    SelfLoop {
        /// The pending state's name.
        state: String,
    },
}

/// Content failed validation against a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// A problem located inside one state's interaction.
    #[error("state \"{state}\": {source}")]
    InState {
        /// The offending state.
        state: String,
        /// What went wrong.
        #[source]
        source: ClassificationError,
    },

    /// A problem with the exploration graph itself.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// A failure reported by [`ExplorationPlayer`](crate::ExplorationPlayer).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// An operation that needs an active session was called without one.
    #[error("Cannot {operation} if an exploration is not being played.")]
    NotPlaying {
        /// The rejected operation.
        operation: &'static str,
    },

    /// A session was begun while another is still active.
    #[error("Expected to finish exploration \"{exploration_id}\" before starting a new one.")]
    AlreadyPlaying {
        /// The exploration still being played.
        exploration_id: String,
    },

    /// The exploration failed validation when the session began.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Classifying the submitted answer failed.
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    /// The deck rejected the operation.
    #[error(transparent)]
    Deck(#[from] DeckError),
}

fn available_suffix(available: &[String]) -> String {
    if available.is_empty() {
        " (none are registered)".to_string()
    } else {
        format!(" (registered: {})", available.join(", "))
    }
}

fn type_list(types: &[ValueType]) -> String {
    match types {
        [single] => single.to_string(),
        many => {
            let names: Vec<&str> = many.iter().map(|t| t.name()).collect();
            format!("one of [{}]", names.join(", "))
        }
    }
}
