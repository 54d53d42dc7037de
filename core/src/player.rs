//! `ExplorationPlayer`: one learner session over one exploration.
//!
//! Ties the pieces together: the pending state's interaction is classified, the
//! outcome is resolved to a destination, the answer is recorded on the deck,
//! and when the destination is another state that state is pushed.
//!
//! Refresher and prerequisite-skill destinations are reported to the caller
//! and leave the deck unchanged; leaving the exploration is the session
//! layer's job.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    AnswerClassifier, AnswerOutcome, ClassifierRegistry, ContentError, DeckError, Destination,
    EphemeralState, Exploration, PlayerError, StateDeck, TypedValue,
};

struct Session {
    exploration: Exploration,
    deck: StateDeck,
}

/// Plays explorations, one at a time.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tutor::{ClassifierRegistry, Destination, Exploration, ExplorationPlayer, TypedValue};
///
/// let exploration: Exploration = serde_json::from_value(serde_json::json!({
///     "id": "counting",
///     "init_state_name": "Ask",
///     "states": {
///         "Ask": { "interaction": {
///             "id": "NumericInput",
///             "answer_groups": [{
///                 "rule_specs": [{ "rule_type": "Equals", "inputs": { "x": { "real": 3.0 } } }],
///                 "outcome": { "dest_state_name": "End", "labelled_as_correct": true }
///             }],
///             "default_outcome": { "dest_state_name": "Ask" }
///         }},
///         "End": { "interaction": { "id": "EndExploration" } }
///     }
/// })).unwrap();
///
/// let mut player = ExplorationPlayer::new(Arc::new(ClassifierRegistry::with_core_interactions()));
/// player.begin(exploration).unwrap();
///
/// let outcome = player.submit_answer(TypedValue::Real(2.0)).unwrap();
/// assert_eq!(outcome.destination, Destination::SameState);
///
/// let outcome = player.submit_answer(TypedValue::SignedInt(3)).unwrap();
/// assert!(outcome.labelled_as_correct);
///
/// player.move_to_next_state().unwrap();
/// assert!(player.current_state().unwrap().is_terminal());
/// ```
pub struct ExplorationPlayer {
    classifier: AnswerClassifier,
    session: Option<Session>,
}

impl ExplorationPlayer {
    /// A player resolving rules against `registry`.
    #[must_use]
    pub fn new(registry: Arc<ClassifierRegistry>) -> Self {
        Self {
            classifier: AnswerClassifier::new(registry),
            session: None,
        }
    }

    /// Returns `true` while an exploration is being played.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    /// Validate `exploration` and start at its initial state.
    ///
    /// # Errors
    ///
    /// - [`PlayerError::AlreadyPlaying`] if a session is active
    /// - [`PlayerError::Content`] if the exploration fails validation
    pub fn begin(&mut self, exploration: Exploration) -> Result<(), PlayerError> {
        if let Some(session) = &self.session {
            return Err(PlayerError::AlreadyPlaying {
                exploration_id: session.exploration.id.clone(),
            });
        }
        exploration.validate(self.classifier.registry())?;
        let initial = exploration
            .initial_state()
            .map_err(ContentError::from)?
            .clone();
        info!(exploration = %exploration.id, state = %initial.name, "exploration started");
        self.session = Some(Session {
            deck: StateDeck::new(initial),
            exploration,
        });
        Ok(())
    }

    /// End the active session.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::NotPlaying`] if no session is active.
    pub fn finish(&mut self) -> Result<(), PlayerError> {
        let session = self.session.take().ok_or(PlayerError::NotPlaying {
            operation: "finish playing",
        })?;
        info!(exploration = %session.exploration.id, "exploration finished");
        Ok(())
    }

    /// Snapshot of the state the learner is looking at.
    ///
    /// # Errors
    ///
    /// Returns [`PlayerError::NotPlaying`] if no session is active.
    pub fn current_state(&self) -> Result<EphemeralState, PlayerError> {
        let session = self.session("retrieve the current state")?;
        Ok(session.deck.get_current_ephemeral_state())
    }

    /// Classify `answer` against the pending state and advance.
    ///
    /// # Errors
    ///
    /// - [`PlayerError::NotPlaying`] if no session is active
    /// - [`PlayerError::Deck`] if the learner is not at the pending state, or it is terminal
    /// - [`PlayerError::Classification`] if classification fails
    pub fn submit_answer(&mut self, answer: TypedValue) -> Result<AnswerOutcome, PlayerError> {
        const OPERATION: &str = "submit an answer";
        let classifier = &self.classifier;
        let session = self
            .session
            .as_mut()
            .ok_or(PlayerError::NotPlaying { operation: OPERATION })?;
        let deck = &mut session.deck;
        if !deck.is_current_state_top_of_deck() {
            return Err(DeckError::NotAtMostRecentState { operation: OPERATION }.into());
        }
        if deck.is_current_state_terminal() {
            return Err(DeckError::TerminalState { operation: OPERATION }.into());
        }

        let top = deck.get_pending_top_state();
        let result = classifier.classify(&top.interaction, &answer)?;
        if let Some(misconception) = result.misconception_id() {
            debug!(state = %top.name, misconception, "answer tagged with misconception");
        }
        let outcome = AnswerOutcome::for_outcome(&top.name, result.outcome());
        let next = match &outcome.destination {
            Destination::State(name) => Some(
                session
                    .exploration
                    .resolve_state(name, &format!("state \"{}\"", top.name))
                    .map_err(ContentError::from)?
                    .clone(),
            ),
            _ => None,
        };

        deck.submit_answer(answer, outcome.feedback.clone())?;
        if let Some(next) = next {
            deck.push_state(next)?;
        }
        Ok(outcome)
    }

    /// Move the learner back one state.
    ///
    /// # Errors
    ///
    /// [`PlayerError::NotPlaying`], or [`PlayerError::Deck`] at the initial state.
    pub fn move_to_previous_state(&mut self) -> Result<(), PlayerError> {
        let session = self.session_mut("move to the previous state")?;
        session.deck.navigate_to_previous_state()?;
        Ok(())
    }

    /// Move the learner forward one state.
    ///
    /// # Errors
    ///
    /// [`PlayerError::NotPlaying`], or [`PlayerError::Deck`] at the most recent state.
    pub fn move_to_next_state(&mut self) -> Result<(), PlayerError> {
        let session = self.session_mut("move to the next state")?;
        session.deck.navigate_to_next_state()?;
        Ok(())
    }

    fn session(&self, operation: &'static str) -> Result<&Session, PlayerError> {
        self.session
            .as_ref()
            .ok_or(PlayerError::NotPlaying { operation })
    }

    fn session_mut(&mut self, operation: &'static str) -> Result<&mut Session, PlayerError> {
        self.session
            .as_mut()
            .ok_or(PlayerError::NotPlaying { operation })
    }
}

impl std::fmt::Debug for ExplorationPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorationPlayer")
            .field("classifier", &self.classifier)
            .field(
                "exploration",
                &self.session.as_ref().map(|s| s.exploration.id.as_str()),
            )
            .finish()
    }
}
