//! Authored content shapes.
//!
//! Content files key states by name, so the runtime [`State`](crate::State)
//! (which carries its own name) is built from a keyed [`StateConfig`]. Everything
//! below a state deserializes directly into its runtime type.
//!
//! | Config type | Runtime type |
//! |-------------|--------------|
//! | [`ExplorationConfig`] | [`Exploration`](crate::Exploration) |
//! | [`StateConfig`] | [`State`](crate::State) |
//!
//! ```yaml
//! id: fractions-intro
//! title: Halves
//! init_state_name: Ask
//! states:
//!   Ask:
//!     content: { html: "What is 2/4 in simplest form?" }
//!     interaction:
//!       id: FractionInput
//!       answer_groups:
//!         - rule_specs:
//!             - rule_type: IsEquivalentToAndInSimplestForm
//!               inputs: { f: { fraction: { numerator: 1, denominator: 2 } } }
//!           outcome: { dest_state_name: Done, labelled_as_correct: true }
//!       default_outcome: { dest_state_name: Ask, feedback: { html: "Try again." } }
//!   Done:
//!     interaction: { id: EndExploration }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{Exploration, Interaction, State, SubtitledHtml};

/// Configuration for an [`Exploration`](crate::Exploration).
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorationConfig {
    /// Exploration id.
    pub id: String,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Name of the first state.
    pub init_state_name: String,

    /// States keyed by their unique name.
    pub states: BTreeMap<String, StateConfig>,
}

/// Configuration for a [`State`](crate::State); the name is its map key.
#[derive(Debug, Clone, Deserialize)]
pub struct StateConfig {
    /// Content shown when the state is displayed.
    #[serde(default)]
    pub content: SubtitledHtml,

    /// How answers are collected and graded.
    pub interaction: Interaction,
}

impl From<ExplorationConfig> for Exploration {
    fn from(config: ExplorationConfig) -> Self {
        let states = config
            .states
            .into_iter()
            .map(|(name, state)| {
                let state = State {
                    name: name.clone(),
                    content: state.content,
                    interaction: state.interaction,
                };
                (name, state)
            })
            .collect();
        Self {
            id: config.id,
            title: config.title,
            init_state_name: config.init_state_name,
            states,
        }
    }
}
