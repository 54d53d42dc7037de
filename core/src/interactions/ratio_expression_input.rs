//! `RatioExpressionInput` rules.

use crate::{
    DoubleInputClassifier, InteractionClassifierBuilder, RatioExpression, SingleInputClassifier,
};

/// Interaction id.
pub const INTERACTION_ID: &str = "RatioExpressionInput";

/// Register every `RatioExpressionInput` rule.
#[must_use]
pub fn register(rules: InteractionClassifierBuilder) -> InteractionClassifierBuilder {
    rules
        .rule(
            "Equals",
            SingleInputClassifier::<RatioExpression, RatioExpression>::new("x", |a, x| a == x),
        )
        .rule(
            "IsEquivalent",
            SingleInputClassifier::<RatioExpression, RatioExpression>::new("x", |a, x| {
                a.to_simplest_form() == x.to_simplest_form()
            }),
        )
        .rule(
            "HasNumberOfTermsEqualTo",
            SingleInputClassifier::<RatioExpression, u32>::new("y", |a, y| {
                u32::try_from(a.len()).is_ok_and(|len| len == *y)
            }),
        )
        // Out-of-range positions are a non-match.
        .rule(
            "HasSpecificTermEqualTo",
            DoubleInputClassifier::<RatioExpression, u32, u32>::new("x", "y", |a, x, y| {
                a.term(*x as usize) == Some(*y)
            }),
        )
}
