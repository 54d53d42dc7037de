//! `NumericInput` rules.
//!
//! Answers and inputs accept any numeric tag ([`Number`]); integers are widened
//! to `f64` before comparison.

use crate::{
    approximately_equals, DoubleInputClassifier, InteractionClassifierBuilder, Number,
    SingleInputClassifier,
};

/// Interaction id.
pub const INTERACTION_ID: &str = "NumericInput";

type Compare = SingleInputClassifier<Number, Number>;
type Range = DoubleInputClassifier<Number, Number, Number>;

/// Register every `NumericInput` rule.
#[must_use]
pub fn register(rules: InteractionClassifierBuilder) -> InteractionClassifierBuilder {
    rules
        .rule("Equals", Compare::new("x", |a, x| approximately_equals(a.0, x.0)))
        .rule("IsLessThan", Compare::new("x", |a, x| a.0 < x.0))
        .rule("IsGreaterThan", Compare::new("x", |a, x| a.0 > x.0))
        .rule("IsLessThanOrEqualTo", Compare::new("x", |a, x| a.0 <= x.0))
        .rule("IsGreaterThanOrEqualTo", Compare::new("x", |a, x| a.0 >= x.0))
        .rule("IsInclusivelyBetween", Range::new("a", "b", |v, a, b| a.0 <= v.0 && v.0 <= b.0))
        .rule("IsWithinTolerance", Range::new("x", "tol", |a, x, tol| {
            x.0 - tol.0 <= a.0 && a.0 <= x.0 + tol.0
        }))
}
