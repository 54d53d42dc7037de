//! Classification trace types for debugging authored rules.
//!
//! A [`ClassificationTrace`] records every rule spec the controller evaluated,
//! in evaluation order, and how the decision was reached. Use
//! [`AnswerClassifier::classify_with_trace`](crate::AnswerClassifier::classify_with_trace)
//! to get one.
//!
//! # Example
//!
//! ```ignore
//! let (result, trace) = classifier.classify_with_trace(&interaction, &answer)?;
//! for step in &trace.steps {
//!     println!("  group[{}].rule[{}] {}: matched={}",
//!         step.group_index, step.rule_index, step.rule_type, step.matched);
//! }
//! ```

use std::fmt;

/// One rule-spec evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTrace {
    /// Index of the answer group in authored order.
    pub group_index: usize,
    /// Index of the rule spec within its group.
    pub rule_index: usize,
    /// The rule name.
    pub rule_type: String,
    /// Whether the rule matched.
    pub matched: bool,
}

/// The full decision path of one classification.
///
/// # INV: stops at the first match
///
/// `steps` ends with the first matching rule (first-match-wins); rules after it
/// are never evaluated and never appear.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassificationTrace {
    /// Interaction kind that was classified.
    pub interaction: String,
    /// Every rule evaluated, in order.
    pub steps: Vec<RuleTrace>,
    /// Index of the answer group that matched, if any.
    pub matched_group: Option<usize>,
    /// Whether the default outcome was used.
    pub used_default: bool,
}

impl ClassificationTrace {
    pub(crate) fn new(interaction: &str) -> Self {
        Self {
            interaction: interaction.to_owned(),
            ..Self::default()
        }
    }

    /// Number of rules evaluated before a decision.
    #[must_use]
    pub fn evaluated(&self) -> usize {
        self.steps.len()
    }
}

impl fmt::Display for ClassificationTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.interaction)?;
        for step in &self.steps {
            let mark = if step.matched { "✓" } else { "✗" };
            writeln!(
                f,
                "  {mark} group[{}].rule[{}] {}",
                step.group_index, step.rule_index, step.rule_type
            )?;
        }
        match self.matched_group {
            Some(index) => write!(f, "  → answer group {index}"),
            None => write!(f, "  → default outcome"),
        }
    }
}
