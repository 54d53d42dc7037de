//! `NumberWithUnits` rules.

use crate::{InteractionClassifierBuilder, NumberWithUnits, SingleInputClassifier};

/// Interaction id.
pub const INTERACTION_ID: &str = "NumberWithUnits";

type Against = SingleInputClassifier<NumberWithUnits, NumberWithUnits>;

/// Register every `NumberWithUnits` rule.
#[must_use]
pub fn register(rules: InteractionClassifierBuilder) -> InteractionClassifierBuilder {
    rules
        .rule("IsEqualTo", Against::new("f", NumberWithUnits::is_equal_to))
        .rule("IsEquivalentTo", Against::new("f", NumberWithUnits::is_equivalent_to))
}
