//! `FractionInput` rules.
//!
//! Exact-equality rules compare structurally (`1/2` is not exactly `2/4`);
//! ordering and equivalence go through [`Fraction::to_f64`].

use crate::{
    approximately_equals, Fraction, InteractionClassifierBuilder, NoInputClassifier,
    SingleInputClassifier,
};

/// Interaction id.
pub const INTERACTION_ID: &str = "FractionInput";

type Against = SingleInputClassifier<Fraction, Fraction>;

fn is_equivalent(answer: &Fraction, input: &Fraction) -> bool {
    approximately_equals(answer.to_f64(), input.to_f64())
}

/// Register every `FractionInput` rule.
#[must_use]
pub fn register(rules: InteractionClassifierBuilder) -> InteractionClassifierBuilder {
    rules
        .rule("IsExactlyEqualTo", Against::new("f", |a, f| a == f))
        .rule("IsEquivalentTo", Against::new("f", is_equivalent))
        .rule(
            "IsEquivalentToAndInSimplestForm",
            Against::new("f", |a, f| is_equivalent(a, f) && a.is_in_simplest_form()),
        )
        .rule("IsLessThan", Against::new("f", |a, f| a.to_f64() < f.to_f64()))
        .rule("IsGreaterThan", Against::new("f", |a, f| a.to_f64() > f.to_f64()))
        .rule(
            "HasNumeratorEqualTo",
            SingleInputClassifier::<Fraction, i32>::new("x", |a, x| {
                i64::from(a.numerator) == i64::from(*x)
            }),
        )
        .rule(
            "HasDenominatorEqualTo",
            SingleInputClassifier::<Fraction, u32>::new("x", |a, x| a.denominator == *x),
        )
        .rule(
            "HasIntegerPartEqualTo",
            SingleInputClassifier::<Fraction, i32>::new("x", |a, x| {
                a.to_whole_number() == i64::from(*x)
            }),
        )
        .rule(
            "HasNoFractionalPart",
            NoInputClassifier::<Fraction>::new(|a| !a.has_fractional_part()),
        )
        .rule(
            "HasFractionalPartExactlyEqualTo",
            Against::new("f", |a, f| {
                a.numerator == f.numerator && a.denominator == f.denominator
            }),
        )
}
