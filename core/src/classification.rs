//! Answer classification: interaction + answer → outcome.
//!
//! Answer groups are evaluated in authored order and, within a group, rule specs
//! in authored order. The first rule that matches selects its group's outcome;
//! nothing after it is evaluated (first-match-wins, not best-match). When
//! nothing matches, the interaction's default outcome is used.
//!
//! Unknown interaction kinds, unknown rule names and ill-typed inputs are
//! errors, not non-matches: they mean the content is malformed.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    ClassificationError, ClassificationTrace, ClassifierRegistry, ConfigurationError, Interaction,
    Outcome, RuleTrace, SubtitledHtml, TypedValue,
};

/// The outcome selected for an answer, plus any misconception it diagnoses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationResult {
    /// The selected group carries no misconception (or the default was used).
    OutcomeOnly {
        /// The selected outcome.
        outcome: Outcome,
    },
    /// The selected group is tagged with a skill misconception.
    OutcomeWithMisconception {
        /// The selected outcome.
        outcome: Outcome,
        /// The tagged misconception id.
        tagged_skill_misconception_id: String,
    },
}

impl ClassificationResult {
    /// The selected outcome.
    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        match self {
            Self::OutcomeOnly { outcome } | Self::OutcomeWithMisconception { outcome, .. } => {
                outcome
            }
        }
    }

    /// The tagged misconception id, if any.
    #[must_use]
    pub fn misconception_id(&self) -> Option<&str> {
        match self {
            Self::OutcomeOnly { .. } => None,
            Self::OutcomeWithMisconception {
                tagged_skill_misconception_id,
                ..
            } => Some(tagged_skill_misconception_id),
        }
    }

    /// Consume into the selected outcome.
    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        match self {
            Self::OutcomeOnly { outcome } | Self::OutcomeWithMisconception { outcome, .. } => {
                outcome
            }
        }
    }
}

/// Classifies answers against interactions using a shared registry.
///
/// Stateless apart from the registry handle; cheap to clone and safe to use
/// from any thread.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tutor::{
///     AnswerClassifier, AnswerGroup, ClassifierRegistry, Interaction, Outcome, RuleSpec,
///     TypedValue,
/// };
///
/// let classifier = AnswerClassifier::new(Arc::new(ClassifierRegistry::with_core_interactions()));
/// let interaction = Interaction {
///     id: "NumericInput".into(),
///     answer_groups: vec![AnswerGroup {
///         rule_specs: vec![RuleSpec::new("IsLessThan", [("x", 10.0)])],
///         outcome: Outcome::to_state("Small", "Under ten."),
///         tagged_skill_misconception_id: None,
///     }],
///     default_outcome: Some(Outcome::to_state("Ask", "Try a smaller number.")),
/// };
///
/// let result = classifier.classify(&interaction, &TypedValue::Real(3.0)).unwrap();
/// assert_eq!(result.outcome().dest_state_name, "Small");
///
/// let result = classifier.classify(&interaction, &TypedValue::SignedInt(30)).unwrap();
/// assert_eq!(result.outcome().dest_state_name, "Ask");
/// ```
#[derive(Debug, Clone)]
pub struct AnswerClassifier {
    registry: Arc<ClassifierRegistry>,
}

impl AnswerClassifier {
    /// Create a classifier over `registry`.
    #[must_use]
    pub fn new(registry: Arc<ClassifierRegistry>) -> Self {
        Self { registry }
    }

    /// The registry rules are resolved against.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &ClassifierRegistry {
        &self.registry
    }

    /// Select the outcome for `answer`.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::UnknownInteraction`] / [`ConfigurationError::UnknownRule`]
    /// - [`InputValidationError`](crate::InputValidationError) from the first ill-typed rule evaluated
    /// - [`ConfigurationError::MissingDefaultOutcome`] when nothing matches and there is no default
    pub fn classify(
        &self,
        interaction: &Interaction,
        answer: &TypedValue,
    ) -> Result<ClassificationResult, ClassificationError> {
        self.evaluate(interaction, answer, |_| {})
    }

    /// Like [`classify`](Self::classify), also returning every rule evaluated.
    ///
    /// # Errors
    ///
    /// Same as [`classify`](Self::classify).
    pub fn classify_with_trace(
        &self,
        interaction: &Interaction,
        answer: &TypedValue,
    ) -> Result<(ClassificationResult, ClassificationTrace), ClassificationError> {
        let mut steps = Vec::new();
        let result = self.evaluate(interaction, answer, |step| steps.push(step))?;
        let matched_group = steps.last().filter(|s| s.matched).map(|s| s.group_index);
        let trace = ClassificationTrace {
            steps,
            matched_group,
            used_default: matched_group.is_none(),
            ..ClassificationTrace::new(&interaction.id)
        };
        Ok((result, trace))
    }

    fn evaluate(
        &self,
        interaction: &Interaction,
        answer: &TypedValue,
        mut record: impl FnMut(RuleTrace),
    ) -> Result<ClassificationResult, ClassificationError> {
        let classifiers = self.registry.resolve(&interaction.id)?;
        for (group_index, group) in interaction.answer_groups.iter().enumerate() {
            for (rule_index, spec) in group.rule_specs.iter().enumerate() {
                let classifier = classifiers.resolve(&spec.rule_type)?;
                let matched = classifier.matches(answer, &spec.inputs)?;
                trace!(
                    interaction = %interaction.id,
                    group_index,
                    rule_index,
                    rule = %spec.rule_type,
                    matched,
                    "rule evaluated"
                );
                record(RuleTrace {
                    group_index,
                    rule_index,
                    rule_type: spec.rule_type.clone(),
                    matched,
                });
                if matched {
                    debug!(
                        interaction = %interaction.id,
                        group_index,
                        dest = %group.outcome.dest_state_name,
                        "answer group matched"
                    );
                    let outcome = group.outcome.clone();
                    return Ok(match &group.tagged_skill_misconception_id {
                        Some(id) => ClassificationResult::OutcomeWithMisconception {
                            outcome,
                            tagged_skill_misconception_id: id.clone(),
                        },
                        None => ClassificationResult::OutcomeOnly { outcome },
                    });
                }
            }
        }
        let outcome = interaction.default_outcome.clone().ok_or_else(|| {
            ConfigurationError::MissingDefaultOutcome {
                interaction: interaction.id.clone(),
            }
        })?;
        debug!(
            interaction = %interaction.id,
            dest = %outcome.dest_state_name,
            "no answer group matched, using default outcome"
        );
        Ok(ClassificationResult::OutcomeOnly { outcome })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Answer outcome
// ═══════════════════════════════════════════════════════════════════════════════

/// Where the learner goes after an answer. Exactly one applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Leave for a refresher exploration.
    RefresherExploration(String),
    /// Leave to learn a missing prerequisite skill.
    MissingPrerequisiteSkill(String),
    /// Stay on the current state and try again.
    SameState,
    /// Move on to another state.
    State(String),
}

/// What the session layer needs after an answer is classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Feedback to show.
    pub feedback: SubtitledHtml,
    /// Whether the outcome is marked correct.
    pub labelled_as_correct: bool,
    /// Where to go next.
    pub destination: Destination,
}

impl AnswerOutcome {
    /// Resolve `outcome` relative to the state the answer was submitted on.
    ///
    /// Refresher explorations take priority, then missing prerequisites, then
    /// the destination state.
    #[must_use]
    pub fn for_outcome(current_state_name: &str, outcome: &Outcome) -> Self {
        let non_empty = |id: &Option<String>| id.clone().filter(|id| !id.is_empty());
        let destination = if let Some(id) = non_empty(&outcome.refresher_exploration_id) {
            Destination::RefresherExploration(id)
        } else if let Some(id) = non_empty(&outcome.missing_prerequisite_skill_id) {
            Destination::MissingPrerequisiteSkill(id)
        } else if outcome.dest_state_name == current_state_name {
            Destination::SameState
        } else {
            Destination::State(outcome.dest_state_name.clone())
        };
        Self {
            feedback: outcome.feedback.clone(),
            labelled_as_correct: outcome.labelled_as_correct,
            destination,
        }
    }

    /// Returns `true` if the learner stays on the current state.
    #[must_use]
    pub fn is_same_state(&self) -> bool {
        self.destination == Destination::SameState
    }
}
