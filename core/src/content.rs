//! Lesson content: explorations, states, interactions, answer groups, outcomes.
//!
//! Content is authored elsewhere and consumed read-only. [`Exploration::validate`]
//! checks it against a [`ClassifierRegistry`] once, at load time, so that the
//! errors classification can raise are found before a learner sees the lesson.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ExplorationConfig;
use crate::{
    ClassificationError, ClassifierRegistry, ConfigurationError, ContentError, RuleInputs,
    MAX_ANSWER_GROUPS, MAX_RULE_SPECS_PER_GROUP, TERMINAL_INTERACTION_ID,
};

/// HTML with a content id used by the (external) translation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitledHtml {
    /// Translation key.
    #[serde(default)]
    pub content_id: String,
    /// The HTML body.
    #[serde(default)]
    pub html: String,
}

impl SubtitledHtml {
    /// HTML without a content id.
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            content_id: String::new(),
            html: html.into(),
        }
    }
}

/// Where an answer leads and what the learner is told.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Destination state; equal to the current state's name to stay.
    pub dest_state_name: String,

    /// Feedback shown after the answer.
    #[serde(default)]
    pub feedback: SubtitledHtml,

    /// Whether the author marked this outcome as the correct answer.
    #[serde(default)]
    pub labelled_as_correct: bool,

    /// Send the learner to a refresher exploration instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresher_exploration_id: Option<String>,

    /// Send the learner to a prerequisite skill instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_prerequisite_skill_id: Option<String>,
}

impl Outcome {
    /// An outcome leading to `dest_state_name` with feedback `html`.
    #[must_use]
    pub fn to_state(dest_state_name: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            dest_state_name: dest_state_name.into(),
            feedback: SubtitledHtml::new(html),
            ..Self::default()
        }
    }

    /// Mark this outcome as correct.
    #[must_use]
    pub fn correct(mut self) -> Self {
        self.labelled_as_correct = true;
        self
    }
}

/// A named rule plus its typed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Rule name, resolved through the interaction's classifiers.
    pub rule_type: String,

    /// Parameters by name.
    #[serde(default)]
    pub inputs: RuleInputs,
}

impl RuleSpec {
    /// Create a rule spec from `(name, value)` pairs.
    #[must_use]
    pub fn new<K, V>(rule_type: impl Into<String>, inputs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<crate::TypedValue>,
    {
        Self {
            rule_type: rule_type.into(),
            inputs: inputs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Rule specs sharing one outcome. Any matching rule selects the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerGroup {
    /// Rules, evaluated in authored order.
    pub rule_specs: Vec<RuleSpec>,

    /// Outcome when any rule matches.
    pub outcome: Outcome,

    /// Misconception this group diagnoses, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagged_skill_misconception_id: Option<String>,
}

/// How a state collects and grades answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction kind (e.g. `"NumericInput"`).
    pub id: String,

    /// Answer groups, evaluated in authored order.
    #[serde(default)]
    pub answer_groups: Vec<AnswerGroup>,

    /// Outcome when no group matches. Absent only for terminal interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_outcome: Option<Outcome>,
}

impl Interaction {
    /// Returns `true` for the interaction that ends an exploration.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.id == TERMINAL_INTERACTION_ID
    }

    /// Check this interaction against `registry`.
    ///
    /// # Errors
    ///
    /// - unknown interaction kind or rule name
    /// - too many answer groups or rule specs
    /// - a rule spec missing a declared parameter, or carrying an ill-typed one
    /// - a non-terminal interaction without a default outcome
    pub fn validate(&self, registry: &ClassifierRegistry) -> Result<(), ClassificationError> {
        let classifiers = registry.resolve(&self.id)?;
        if self.answer_groups.len() > MAX_ANSWER_GROUPS {
            return Err(ConfigurationError::TooManyAnswerGroups {
                count: self.answer_groups.len(),
                max: MAX_ANSWER_GROUPS,
            }
            .into());
        }
        for group in &self.answer_groups {
            if group.rule_specs.len() > MAX_RULE_SPECS_PER_GROUP {
                return Err(ConfigurationError::TooManyRuleSpecs {
                    count: group.rule_specs.len(),
                    max: MAX_RULE_SPECS_PER_GROUP,
                }
                .into());
            }
            for spec in &group.rule_specs {
                classifiers.resolve(&spec.rule_type)?.validate_inputs(&spec.inputs)?;
            }
        }
        if self.default_outcome.is_none() && !self.is_terminal() {
            return Err(ConfigurationError::MissingDefaultOutcome {
                interaction: self.id.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn outcomes(&self) -> impl Iterator<Item = (String, &Outcome)> {
        let groups = self
            .answer_groups
            .iter()
            .enumerate()
            .map(|(index, group)| (format!("answer group {index}"), &group.outcome));
        let default = self
            .default_outcome
            .iter()
            .map(|outcome| ("default outcome".to_string(), outcome));
        groups.chain(default)
    }
}

/// One node of an exploration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Unique name within the exploration.
    pub name: String,

    /// Content shown when the state is displayed.
    #[serde(default)]
    pub content: SubtitledHtml,

    /// How answers are collected and graded.
    pub interaction: Interaction,
}

impl State {
    /// Create a state with empty content.
    #[must_use]
    pub fn new(name: impl Into<String>, interaction: Interaction) -> Self {
        Self {
            name: name.into(),
            content: SubtitledHtml::default(),
            interaction,
        }
    }
}

/// A directed graph of [`State`]s, keyed by name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ExplorationConfig")]
pub struct Exploration {
    /// Exploration id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Name of the first state.
    pub init_state_name: String,
    /// States by name.
    pub states: BTreeMap<String, State>,
}

impl Exploration {
    /// Look up a state by name.
    #[must_use]
    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    /// Look up a state by name, or report where the dangling reference came from.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownState`] when `name` is not defined.
    pub fn resolve_state(
        &self,
        name: &str,
        referenced_by: &str,
    ) -> Result<&State, ConfigurationError> {
        self.state(name).ok_or_else(|| ConfigurationError::UnknownState {
            name: name.to_owned(),
            referenced_by: referenced_by.to_owned(),
        })
    }

    /// The initial state.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownState`] if `init_state_name` is dangling.
    pub fn initial_state(&self) -> Result<&State, ConfigurationError> {
        self.resolve_state(&self.init_state_name, "init_state_name")
    }

    /// Validate every state against `registry`.
    ///
    /// Checks the initial state exists, every interaction passes
    /// [`Interaction::validate`], and every outcome leads to a defined state.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContentError`] found, in state-name order.
    pub fn validate(&self, registry: &ClassifierRegistry) -> Result<(), ContentError> {
        self.initial_state()?;
        for (name, state) in &self.states {
            state
                .interaction
                .validate(registry)
                .map_err(|source| ContentError::InState {
                    state: name.clone(),
                    source,
                })?;
            for (location, outcome) in state.interaction.outcomes() {
                let referenced_by = format!("state \"{name}\" {location}");
                self.resolve_state(&outcome.dest_state_name, &referenced_by)?;
            }
        }
        debug!(exploration = %self.id, states = self.states.len(), "exploration validated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Fraction, InputValidationError, TypedValue};

    fn fraction_state(dest: &str) -> State {
        State::new(
            "Ask",
            Interaction {
                id: "FractionInput".into(),
                answer_groups: vec![AnswerGroup {
                    rule_specs: vec![RuleSpec::new(
                        "IsEquivalentTo",
                        [("f", Fraction::new(false, 1, 2))],
                    )],
                    outcome: Outcome::to_state(dest, "Yes!").correct(),
                    tagged_skill_misconception_id: None,
                }],
                default_outcome: Some(Outcome::to_state("Ask", "Try again.")),
            },
        )
    }

    fn end_state() -> State {
        State::new(
            "End",
            Interaction {
                id: TERMINAL_INTERACTION_ID.into(),
                answer_groups: vec![],
                default_outcome: None,
            },
        )
    }

    fn exploration(states: Vec<State>) -> Exploration {
        Exploration {
            id: "e".into(),
            title: "Halves".into(),
            init_state_name: "Ask".into(),
            states: states.into_iter().map(|s| (s.name.clone(), s)).collect(),
        }
    }

    #[test]
    fn valid_exploration_passes() {
        let registry = ClassifierRegistry::with_core_interactions();
        exploration(vec![fraction_state("End"), end_state()])
            .validate(&registry)
            .unwrap();
    }

    #[test]
    fn dangling_destination_is_reported() {
        let registry = ClassifierRegistry::with_core_interactions();
        let err = exploration(vec![fraction_state("Nowhere"), end_state()])
            .validate(&registry)
            .unwrap_err();
        assert_eq!(
            err,
            ContentError::Configuration(ConfigurationError::UnknownState {
                name: "Nowhere".into(),
                referenced_by: "state \"Ask\" answer group 0".into(),
            })
        );
    }

    #[test]
    fn missing_initial_state_is_reported() {
        let registry = ClassifierRegistry::with_core_interactions();
        let err = exploration(vec![end_state()]).validate(&registry).unwrap_err();
        assert!(err.to_string().contains("init_state_name"));
    }

    #[test]
    fn ill_typed_input_is_located() {
        let registry = ClassifierRegistry::with_core_interactions();
        let mut ask = fraction_state("End");
        ask.interaction.answer_groups[0].rule_specs[0].inputs =
            [("f".to_string(), TypedValue::Real(0.5))].into_iter().collect();
        let err = exploration(vec![ask, end_state()]).validate(&registry).unwrap_err();
        match err {
            ContentError::InState { state, source } => {
                assert_eq!(state, "Ask");
                assert!(matches!(
                    source,
                    ClassificationError::InputValidation(
                        InputValidationError::ParameterTypeMismatch { .. }
                    )
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_terminal_needs_default_outcome() {
        let registry = ClassifierRegistry::with_core_interactions();
        let mut ask = fraction_state("End");
        ask.interaction.default_outcome = None;
        let err = ask.interaction.validate(&registry).unwrap_err();
        assert_eq!(
            err,
            ClassificationError::Configuration(ConfigurationError::MissingDefaultOutcome {
                interaction: "FractionInput".into(),
            })
        );
        assert!(end_state().interaction.validate(&registry).is_ok());
    }

    #[test]
    fn unknown_rule_is_reported() {
        let registry = ClassifierRegistry::with_core_interactions();
        let mut ask = fraction_state("End");
        ask.interaction.answer_groups[0].rule_specs[0].rule_type = "IsHalf".into();
        let err = ask.interaction.validate(&registry).unwrap_err();
        assert!(err.to_string().contains("\"IsHalf\""));
    }

    #[test]
    fn too_many_answer_groups() {
        let registry = ClassifierRegistry::with_core_interactions();
        let mut ask = fraction_state("End");
        let group = ask.interaction.answer_groups[0].clone();
        ask.interaction.answer_groups = vec![group; MAX_ANSWER_GROUPS + 1];
        assert!(matches!(
            ask.interaction.validate(&registry),
            Err(ClassificationError::Configuration(ConfigurationError::TooManyAnswerGroups { .. }))
        ));
    }
}
