//! `StateDeck`: the learner's position in an exploration.
//!
//! The deck is an arena of completed [`EphemeralState`]s, one pending state
//! at the top, the answers recorded for that pending state so far, and a
//! cursor into the arena. Position `history.len()` is the pending state.
//!
//! ```text
//!  history[0]   history[1]   ...   history[n-1]   pending
//!  Completed    Completed          Completed      Pending | Terminal
//!      ^cursor may point anywhere in 0..=n
//! ```
//!
//! | Operation | Allowed when |
//! |-----------|--------------|
//! | [`reset_deck`](StateDeck::reset_deck) | always |
//! | [`submit_answer`](StateDeck::submit_answer) | cursor at top, pending not terminal |
//! | [`push_state`](StateDeck::push_state) | cursor at top, pending not terminal, ≥ 1 answer, different name |
//! | [`navigate_to_previous_state`](StateDeck::navigate_to_previous_state) | cursor > 0 |
//! | [`navigate_to_next_state`](StateDeck::navigate_to_next_state) | cursor < top |
//!
//! Pushing does not move the cursor: after a push the learner is still looking
//! at the state they answered, now completed, and must navigate forward to see
//! the new pending state.
//!
//! The deck is single-writer. Every mutation takes `&mut self`; a session that
//! shares a deck across threads wraps it in a mutex.

use std::fmt;

use tracing::debug;

use crate::{DeckError, State, SubtitledHtml, TypedValue};

/// One submitted answer and the feedback it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerAndResponse {
    /// The submitted answer.
    pub answer: TypedValue,
    /// Feedback shown for it.
    pub feedback: SubtitledHtml,
}

/// Which of the three positions an [`EphemeralState`] is in.
#[derive(Debug, Clone, PartialEq)]
pub enum StateKind {
    /// The top of the deck, still accepting answers.
    Pending {
        /// Answers submitted so far, none of which moved the learner on.
        wrong_answers: Vec<AnswerAndResponse>,
    },
    /// A state the learner has moved past.
    Completed {
        /// Every answer submitted on the state, in order.
        answers: Vec<AnswerAndResponse>,
    },
    /// The top of the deck, where no interaction is possible.
    Terminal,
}

/// A read-only snapshot of the deck at its cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemeralState {
    /// The state at the cursor.
    pub state: State,
    /// Whether backward navigation is possible.
    pub has_previous_state: bool,
    /// Pending, completed or terminal.
    pub kind: StateKind,
}

impl EphemeralState {
    /// Returns `true` for [`StateKind::Pending`].
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.kind, StateKind::Pending { .. })
    }

    /// Returns `true` for [`StateKind::Completed`].
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self.kind, StateKind::Completed { .. })
    }

    /// Returns `true` for [`StateKind::Terminal`].
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, StateKind::Terminal)
    }
}

/// Predicate deciding whether a state ends the exploration.
pub type TerminalCheck = Box<dyn Fn(&State) -> bool + Send + Sync>;

/// Navigation state machine over visited states.
///
/// # Example
///
/// ```
/// use tutor::{Interaction, State, StateDeck, SubtitledHtml, TypedValue};
///
/// let state = |name: &str| State::new(name, Interaction {
///     id: "NumericInput".into(),
///     answer_groups: vec![],
///     default_outcome: None,
/// });
///
/// let mut deck = StateDeck::new(state("A"));
/// deck.submit_answer(TypedValue::Real(1.0), SubtitledHtml::new("Nope")).unwrap();
/// deck.push_state(state("B")).unwrap();
///
/// // Pushing extends the deck; the learner still sees A.
/// assert!(deck.get_current_ephemeral_state().is_completed());
/// assert_eq!(deck.get_pending_top_state().name, "B");
///
/// deck.navigate_to_next_state().unwrap();
/// assert!(deck.get_current_ephemeral_state().is_pending());
/// ```
pub struct StateDeck {
    pending_top_state: State,
    history: Vec<EphemeralState>,
    current_answers: Vec<AnswerAndResponse>,
    cursor: usize,
    is_terminal: TerminalCheck,
}

impl StateDeck {
    /// A deck whose terminal states are those with the terminal interaction.
    #[must_use]
    pub fn new(initial_state: State) -> Self {
        Self::with_terminal_check(initial_state, |state| state.interaction.is_terminal())
    }

    /// A deck with a custom terminal-state predicate.
    #[must_use]
    pub fn with_terminal_check(
        initial_state: State,
        is_terminal: impl Fn(&State) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            pending_top_state: initial_state,
            history: Vec::new(),
            current_answers: Vec::new(),
            cursor: 0,
            is_terminal: Box::new(is_terminal),
        }
    }

    /// Clear all history and start again from `initial_state`.
    pub fn reset_deck(&mut self, initial_state: State) {
        debug!(state = %initial_state.name, "deck reset");
        self.pending_top_state = initial_state;
        self.history.clear();
        self.current_answers.clear();
        self.cursor = 0;
    }

    /// Record an answer and its feedback against the pending state.
    ///
    /// # Errors
    ///
    /// - [`DeckError::NotAtMostRecentState`] if the cursor is not at the top
    /// - [`DeckError::TerminalState`] if the pending state is terminal
    pub fn submit_answer(
        &mut self,
        answer: TypedValue,
        feedback: SubtitledHtml,
    ) -> Result<(), DeckError> {
        const OPERATION: &str = "submit an answer";
        self.require_top(OPERATION)?;
        self.require_not_terminal(OPERATION)?;
        self.current_answers.push(AnswerAndResponse { answer, feedback });
        debug!(
            state = %self.pending_top_state.name,
            answers = self.current_answers.len(),
            "answer recorded"
        );
        Ok(())
    }

    /// Complete the pending state and make `next_state` the new pending state.
    ///
    /// The cursor does not move.
    ///
    /// # Errors
    ///
    /// Checked in order:
    /// - [`DeckError::NotAtMostRecentState`] if the cursor is not at the top
    /// - [`DeckError::TerminalState`] if the pending state is terminal
    /// - [`DeckError::NoAnswerSubmitted`] if no answer was recorded for the pending state
    /// - [`DeckError::SelfLoop`] if `next_state` has the pending state's name
    pub fn push_state(&mut self, next_state: State) -> Result<(), DeckError> {
        const OPERATION: &str = "push a new State";
        self.require_top(OPERATION)?;
        self.require_not_terminal(OPERATION)?;
        if self.current_answers.is_empty() {
            return Err(DeckError::NoAnswerSubmitted);
        }
        if next_state.name == self.pending_top_state.name {
            return Err(DeckError::SelfLoop {
                state: next_state.name,
            });
        }
        let completed = std::mem::replace(&mut self.pending_top_state, next_state);
        let has_previous_state = !self.history.is_empty();
        self.history.push(EphemeralState {
            state: completed,
            has_previous_state,
            kind: StateKind::Completed {
                answers: std::mem::take(&mut self.current_answers),
            },
        });
        debug!(
            state = %self.pending_top_state.name,
            depth = self.history.len(),
            cursor = self.cursor,
            "state pushed"
        );
        Ok(())
    }

    /// Move the cursor one state back.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::AtInitialState`] when the cursor is at 0.
    pub fn navigate_to_previous_state(&mut self) -> Result<(), DeckError> {
        if self.cursor == 0 {
            return Err(DeckError::AtInitialState);
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, "navigated to previous state");
        Ok(())
    }

    /// Move the cursor one state forward.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::AtMostRecentState`] when the cursor is at the top.
    pub fn navigate_to_next_state(&mut self) -> Result<(), DeckError> {
        if self.is_current_state_top_of_deck() {
            return Err(DeckError::AtMostRecentState);
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, "navigated to next state");
        Ok(())
    }

    /// Snapshot of the state at the cursor.
    #[must_use]
    pub fn get_current_ephemeral_state(&self) -> EphemeralState {
        match self.history.get(self.cursor) {
            Some(completed) => completed.clone(),
            None => EphemeralState {
                state: self.pending_top_state.clone(),
                has_previous_state: self.cursor != 0,
                kind: if self.is_top_terminal() {
                    StateKind::Terminal
                } else {
                    StateKind::Pending {
                        wrong_answers: self.current_answers.clone(),
                    }
                },
            },
        }
    }

    /// The most recently pushed state, wherever the cursor is.
    #[inline]
    #[must_use]
    pub fn get_pending_top_state(&self) -> &State {
        &self.pending_top_state
    }

    /// Returns `true` if the cursor is at the pending state.
    #[inline]
    #[must_use]
    pub fn is_current_state_top_of_deck(&self) -> bool {
        self.cursor == self.history.len()
    }

    /// Returns `true` if the cursor is at the pending state and it is terminal.
    #[must_use]
    pub fn is_current_state_terminal(&self) -> bool {
        self.is_current_state_top_of_deck() && self.is_top_terminal()
    }

    /// Cursor position; `history_len()` means the pending state.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of completed states.
    #[inline]
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Answers recorded against the pending state since it was pushed.
    #[must_use]
    pub fn pending_answers(&self) -> &[AnswerAndResponse] {
        &self.current_answers
    }

    fn is_top_terminal(&self) -> bool {
        (self.is_terminal)(&self.pending_top_state)
    }

    fn require_top(&self, operation: &'static str) -> Result<(), DeckError> {
        if self.is_current_state_top_of_deck() {
            Ok(())
        } else {
            Err(DeckError::NotAtMostRecentState { operation })
        }
    }

    fn require_not_terminal(&self, operation: &'static str) -> Result<(), DeckError> {
        if self.is_top_terminal() {
            Err(DeckError::TerminalState { operation })
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for StateDeck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDeck")
            .field("pending_top_state", &self.pending_top_state.name)
            .field("history", &self.history.len())
            .field("current_answers", &self.current_answers.len())
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
