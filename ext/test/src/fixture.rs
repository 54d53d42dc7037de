//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the tutor engine. Two shapes:
//!
//! - [`Fixture`]: one interaction, many answers, each with the expected
//!   destination (or error).
//! - [`Walkthrough`]: one exploration played through an [`ExplorationPlayer`]
//!   step by step, checking where the learner ends up.
//!
//! Content and answers are held as raw YAML values and converted with
//! `serde_json`, the same path the CLI uses for content files.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tutor::prelude::*;
use tutor::PlayerError;

/// A classification fixture.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Raw interaction, deserialized as [`Interaction`].
    pub interaction: Value,
    pub cases: Vec<TestCase>,
}

/// One answer and what classifying it must produce.
///
/// Exactly one of `expect` (destination state name) or `error` is set.
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    /// Raw answer, deserialized as [`TypedValue`].
    pub answer: Value,
    #[serde(default)]
    pub expect: Option<String>,
    #[serde(default)]
    pub misconception: Option<String>,
    #[serde(default)]
    pub correct: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A scripted playthrough of one exploration.
#[derive(Debug, Deserialize)]
pub struct Walkthrough {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Raw exploration, deserialized as [`Exploration`].
    pub exploration: Value,
    pub steps: Vec<Step>,
}

/// One walkthrough step.
/// Uses untagged deserialization - each variant has its own key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Submit(SubmitStep),
    Navigate(NavigateStep),
    Expect(ExpectStep),
}

/// Submit an answer; optionally check the feedback, destination or error.
#[derive(Debug, Deserialize)]
pub struct SubmitStep {
    pub submit: Value,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Move the learner; optionally expect the move to fail.
#[derive(Debug, Deserialize)]
pub struct NavigateStep {
    pub navigate: Direction,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

/// Check the state the learner is looking at.
#[derive(Debug, Deserialize)]
pub struct ExpectStep {
    pub at: String,
    pub status: Status,
    /// Answers recorded at this state (wrong answers while pending).
    #[serde(default)]
    pub answers: Option<usize>,
    #[serde(default)]
    pub has_previous: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
    Terminal,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Error kinds
// ═══════════════════════════════════════════════════════════════════════════════

/// Stable snake_case name of a classification error, as written in fixtures.
#[must_use]
pub fn classification_error_kind(error: &ClassificationError) -> &'static str {
    match error {
        ClassificationError::Configuration(e) => configuration_error_kind(e),
        ClassificationError::InputValidation(e) => match e {
            InputValidationError::MissingParameter { .. } => "missing_parameter",
            InputValidationError::ParameterTypeMismatch { .. } => "parameter_type_mismatch",
            InputValidationError::AnswerTypeMismatch { .. } => "answer_type_mismatch",
        },
    }
}

fn configuration_error_kind(error: &ConfigurationError) -> &'static str {
    match error {
        ConfigurationError::UnknownInteraction { .. } => "unknown_interaction",
        ConfigurationError::UnknownRule { .. } => "unknown_rule",
        ConfigurationError::MissingDefaultOutcome { .. } => "missing_default_outcome",
        ConfigurationError::UnknownState { .. } => "unknown_state",
        ConfigurationError::TooManyAnswerGroups { .. } => "too_many_answer_groups",
        ConfigurationError::TooManyRuleSpecs { .. } => "too_many_rule_specs",
    }
}

/// Stable snake_case name of a player error, as written in fixtures.
#[must_use]
pub fn player_error_kind(error: &PlayerError) -> &'static str {
    match error {
        PlayerError::NotPlaying { .. } => "not_playing",
        PlayerError::AlreadyPlaying { .. } => "already_playing",
        PlayerError::Content(tutor::ContentError::InState { source, .. }) => {
            classification_error_kind(source)
        }
        PlayerError::Content(tutor::ContentError::Configuration(e)) => configuration_error_kind(e),
        PlayerError::Classification(e) => classification_error_kind(e),
        PlayerError::Deck(e) => match e {
            DeckError::AtInitialState => "at_initial_state",
            DeckError::AtMostRecentState => "at_most_recent_state",
            DeckError::NotAtMostRecentState { .. } => "not_at_most_recent_state",
            DeckError::TerminalState { .. } => "terminal_state",
            DeckError::NoAnswerSubmitted => "no_answer_submitted",
            DeckError::SelfLoop { .. } => "self_loop",
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// What a case produced, in fixture vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    Outcome {
        dest: String,
        misconception: Option<String>,
        correct: bool,
    },
    Error(String),
}

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub actual: Observed,
}

impl TestCase {
    fn check(&self, actual: &Observed) -> bool {
        match actual {
            Observed::Outcome {
                dest,
                misconception,
                correct,
            } => {
                self.error.is_none()
                    && self.expect.as_ref() == Some(dest)
                    && self.misconception == *misconception
                    && self.correct.map_or(true, |c| c == *correct)
            }
            Observed::Error(kind) => self.error.as_ref() == Some(kind),
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(what: &str, value: &Value) -> Result<T, String> {
    serde_json::from_value(value.clone()).map_err(|e| format!("invalid {what}: {e}"))
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases against `registry` and return results
    ///
    /// # Errors
    ///
    /// Returns a message if the interaction or an answer does not deserialize.
    pub fn run(&self, registry: Arc<ClassifierRegistry>) -> Result<Vec<CaseResult>, String> {
        let interaction: Interaction = parse("interaction", &self.interaction)?;
        let classifier = AnswerClassifier::new(registry);
        self.cases
            .iter()
            .map(|case| {
                let answer: TypedValue = parse("answer", &case.answer)?;
                let actual = match classifier.classify(&interaction, &answer) {
                    Ok(result) => Observed::Outcome {
                        misconception: result.misconception_id().map(str::to_string),
                        correct: result.outcome().labelled_as_correct,
                        dest: result.into_outcome().dest_state_name,
                    },
                    Err(e) => Observed::Error(classification_error_kind(&e).to_string()),
                };
                Ok(CaseResult {
                    case_name: case.name.clone(),
                    passed: case.check(&actual),
                    actual,
                })
            })
            .collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self, registry: Arc<ClassifierRegistry>) {
        let results = self
            .run(registry)
            .unwrap_or_else(|e| panic!("Fixture '{}': {e}", self.name));
        for (case, result) in self.cases.iter().zip(results) {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {:?}{}, got {:?}",
                self.name,
                result.case_name,
                case.expect.as_ref().or(case.error.as_ref()),
                case.misconception
                    .as_ref()
                    .map(|m| format!(" [{m}]"))
                    .unwrap_or_default(),
                result.actual
            );
        }
    }
}

impl Walkthrough {
    /// Parse multiple walkthroughs from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut walkthroughs = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            walkthroughs.push(Self::deserialize(doc)?);
        }
        Ok(walkthroughs)
    }

    /// Play every step, stopping at the first one that does not hold.
    ///
    /// # Errors
    ///
    /// Returns a message naming the failing step (1-based) and what differed.
    pub fn run(&self, registry: Arc<ClassifierRegistry>) -> Result<(), String> {
        let exploration: Exploration = parse("exploration", &self.exploration)?;
        let mut player = ExplorationPlayer::new(registry);
        player
            .begin(exploration)
            .map_err(|e| format!("begin failed: {e}"))?;

        for (index, step) in self.steps.iter().enumerate() {
            run_step(&mut player, step).map_err(|e| format!("step {}: {e}", index + 1))?;
        }
        Ok(())
    }

    /// Run and panic on failure
    pub fn run_and_assert(&self, registry: Arc<ClassifierRegistry>) {
        if let Err(e) = self.run(registry) {
            panic!("Walkthrough '{}' failed at {e}", self.name);
        }
    }
}

fn expect_error(
    expected: Option<&String>,
    result: Result<(), PlayerError>,
) -> Result<(), String> {
    match (expected, result) {
        (None, Ok(())) => Ok(()),
        (None, Err(e)) => Err(format!("unexpected error: {e}")),
        (Some(kind), Ok(())) => Err(format!("expected error {kind}, but it succeeded")),
        (Some(kind), Err(e)) if player_error_kind(&e) == kind => Ok(()),
        (Some(kind), Err(e)) => Err(format!(
            "expected error {kind}, got {} ({e})",
            player_error_kind(&e)
        )),
    }
}

fn run_step(player: &mut ExplorationPlayer, step: &Step) -> Result<(), String> {
    match step {
        Step::Submit(submit) => {
            let answer: TypedValue = parse("answer", &submit.submit)?;
            let outcome = match player.submit_answer(answer) {
                Ok(outcome) => outcome,
                Err(e) => return expect_error(submit.error.as_ref(), Err(e)),
            };
            expect_error(submit.error.as_ref(), Ok(()))?;
            if let Some(feedback) = &submit.feedback {
                if outcome.feedback.html != *feedback {
                    return Err(format!(
                        "expected feedback {feedback:?}, got {:?}",
                        outcome.feedback.html
                    ));
                }
            }
            if let Some(destination) = &submit.destination {
                let actual = describe_destination(&outcome.destination);
                if actual != *destination {
                    return Err(format!("expected destination {destination}, got {actual}"));
                }
            }
            Ok(())
        }
        Step::Navigate(navigate) => {
            let result = match navigate.navigate {
                Direction::Previous => player.move_to_previous_state(),
                Direction::Next => player.move_to_next_state(),
            };
            expect_error(navigate.error.as_ref(), result)
        }
        Step::Expect(expect) => {
            let current = player.current_state().map_err(|e| e.to_string())?;
            if current.state.name != expect.at {
                return Err(format!("expected to be at {}, got {}", expect.at, current.state.name));
            }
            let (status, answers) = match &current.kind {
                StateKind::Pending { wrong_answers } => (Status::Pending, wrong_answers.len()),
                StateKind::Completed { answers } => (Status::Completed, answers.len()),
                StateKind::Terminal => (Status::Terminal, 0),
            };
            if status != expect.status {
                return Err(format!("expected {:?}, got {status:?}", expect.status));
            }
            if let Some(expected) = expect.answers {
                if answers != expected {
                    return Err(format!("expected {expected} answers, got {answers}"));
                }
            }
            if let Some(expected) = expect.has_previous {
                if current.has_previous_state != expected {
                    return Err(format!(
                        "expected has_previous_state {expected}, got {}",
                        current.has_previous_state
                    ));
                }
            }
            Ok(())
        }
    }
}

/// Fixture spelling of a destination: `same`, `state:<name>`,
/// `refresher:<id>` or `prerequisite:<skill>`.
#[must_use]
pub fn describe_destination(destination: &Destination) -> String {
    match destination {
        Destination::SameState => "same".to_string(),
        Destination::State(name) => format!("state:{name}"),
        Destination::RefresherExploration(id) => format!("refresher:{id}"),
        Destination::MissingPrerequisiteSkill(skill) => format!("prerequisite:{skill}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixture_with_error_case() {
        let yaml = r#"
name: numeric
interaction:
  id: NumericInput
  answer_groups:
    - rule_specs:
        - rule_type: IsLessThan
          inputs: { x: { real: 0.0 } }
      outcome: { dest_state_name: Negative }
  default_outcome: { dest_state_name: Ask }
cases:
  - name: positive falls through
    answer: { real: 1.5 }
    expect: Ask
  - name: text is rejected
    answer: { normalized_string: "1.5" }
    error: answer_type_mismatch
"#;
        let fixture = Fixture::from_yaml(yaml).unwrap();
        let results = fixture
            .run(Arc::new(ClassifierRegistry::with_core_interactions()))
            .unwrap();
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn parses_walkthrough_steps() {
        let yaml = r#"
name: steps
exploration: {}
steps:
  - submit: { real: 1 }
    destination: same
  - navigate: previous
    error: at_initial_state
  - at: Ask
    status: pending
    answers: 1
"#;
        let walkthrough = Walkthrough::from_yaml_multi(yaml).unwrap().remove(0);
        assert!(matches!(walkthrough.steps[0], Step::Submit(_)));
        assert!(matches!(
            walkthrough.steps[1],
            Step::Navigate(NavigateStep {
                navigate: Direction::Previous,
                ..
            })
        ));
        assert!(matches!(
            walkthrough.steps[2],
            Step::Expect(ExpectStep {
                status: Status::Pending,
                ..
            })
        ));
    }

    #[test]
    fn describes_destinations() {
        assert_eq!(describe_destination(&Destination::SameState), "same");
        assert_eq!(
            describe_destination(&Destination::State("End".into())),
            "state:End"
        );
    }
}
