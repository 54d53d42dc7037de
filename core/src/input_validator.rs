//! Typed input validation.
//!
//! Classifiers never look at a raw [`TypedValue`]. Before a predicate runs, the
//! answer and every declared parameter are pulled through [`FromTypedValue`],
//! which either yields the concrete Rust type the predicate expects or an
//! [`InputValidationError`] naming the parameter and both types.
//!
//! Multi-type parameters (a rule that accepts a real *or* an integer) are
//! expressed as their own target type, e.g. [`Number`], whose
//! [`ACCEPTS`](FromTypedValue::ACCEPTS) lists every tag it converts from.

use std::collections::BTreeMap;

use crate::{
    ClickOnImage, Fraction, InputValidationError, NumberWithUnits, RatioExpression, TypedValue,
    ValueType,
};

/// Parameter name → typed value, as authored in a rule spec.
///
/// Ordered so that error messages list present parameters deterministically.
pub type RuleInputs = BTreeMap<String, TypedValue>;

/// A Rust type that a classifier predicate can receive.
///
/// `ACCEPTS` is the full list of [`ValueType`] tags this type converts from. It is
/// reported in error messages and by [`RuleClassifier::parameters`](crate::RuleClassifier::parameters).
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be received by a rule predicate",
    label = "not convertible from `TypedValue`",
    note = "implement `FromTypedValue` for `{Self}`, or use one of the built-in targets (f64, Number, String, Fraction, RatioExpression, ...)"
)]
pub trait FromTypedValue: Sized + Send + Sync + 'static {
    /// Tags this type converts from.
    const ACCEPTS: &'static [ValueType];

    /// Convert, or `None` when the tag is not in [`ACCEPTS`](Self::ACCEPTS).
    fn from_typed_value(value: &TypedValue) -> Option<Self>;
}

/// Look up `name` in `inputs` and check its tag against `expected`.
///
/// # Errors
///
/// - [`InputValidationError::MissingParameter`] when `name` is absent
/// - [`InputValidationError::ParameterTypeMismatch`] when the tag is not in `expected`
pub fn retrieve_input<'a>(
    inputs: &'a RuleInputs,
    name: &str,
    expected: &'static [ValueType],
) -> Result<&'a TypedValue, InputValidationError> {
    let value = inputs
        .get(name)
        .ok_or_else(|| InputValidationError::MissingParameter {
            name: name.to_owned(),
            present: inputs.keys().cloned().collect(),
        })?;
    if expected.contains(&value.value_type()) {
        Ok(value)
    } else {
        Err(InputValidationError::ParameterTypeMismatch {
            name: name.to_owned(),
            expected,
            actual: value.value_type(),
        })
    }
}

/// Retrieve parameter `name` as `T`.
///
/// # Errors
///
/// See [`retrieve_input`].
pub fn typed_input<T: FromTypedValue>(
    inputs: &RuleInputs,
    name: &str,
) -> Result<T, InputValidationError> {
    let value = retrieve_input(inputs, name, T::ACCEPTS)?;
    T::from_typed_value(value).ok_or_else(|| InputValidationError::ParameterTypeMismatch {
        name: name.to_owned(),
        expected: T::ACCEPTS,
        actual: value.value_type(),
    })
}

/// Convert the learner's answer to `T`.
///
/// # Errors
///
/// Returns [`InputValidationError::AnswerTypeMismatch`] when the answer's tag is
/// not accepted by `T`.
pub fn typed_answer<T: FromTypedValue>(answer: &TypedValue) -> Result<T, InputValidationError> {
    T::from_typed_value(answer).ok_or_else(|| InputValidationError::AnswerTypeMismatch {
        expected: T::ACCEPTS,
        actual: answer.value_type(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════════

/// Any numeric tag, widened to `f64`.
///
/// Numeric rules accept reals and both integer kinds interchangeably.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Number(pub f64);

impl FromTypedValue for Number {
    const ACCEPTS: &'static [ValueType] = &[
        ValueType::Real,
        ValueType::SignedInt,
        ValueType::NonNegativeInt,
    ];

    fn from_typed_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::Real(v) => Some(Self(*v)),
            TypedValue::SignedInt(v) => Some(Self(f64::from(*v))),
            TypedValue::NonNegativeInt(v) => Some(Self(f64::from(*v))),
            _ => None,
        }
    }
}

impl FromTypedValue for f64 {
    const ACCEPTS: &'static [ValueType] = &[ValueType::Real];

    fn from_typed_value(value: &TypedValue) -> Option<Self> {
        value.as_real()
    }
}

impl FromTypedValue for i32 {
    const ACCEPTS: &'static [ValueType] = &[ValueType::SignedInt];

    fn from_typed_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::SignedInt(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromTypedValue for u32 {
    const ACCEPTS: &'static [ValueType] = &[ValueType::NonNegativeInt];

    fn from_typed_value(value: &TypedValue) -> Option<Self> {
        value.as_non_negative_int()
    }
}

impl FromTypedValue for String {
    const ACCEPTS: &'static [ValueType] = &[ValueType::NormalizedString];

    fn from_typed_value(value: &TypedValue) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromTypedValue for Vec<String> {
    const ACCEPTS: &'static [ValueType] = &[ValueType::SetOfNormalizedString];

    fn from_typed_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::SetOfNormalizedString(values) => Some(values.clone()),
            _ => None,
        }
    }
}

impl FromTypedValue for Vec<Vec<String>> {
    const ACCEPTS: &'static [ValueType] = &[ValueType::ListOfSetsOfNormalizedString];

    fn from_typed_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::ListOfSetsOfNormalizedString(positions) => Some(positions.clone()),
            _ => None,
        }
    }
}

impl FromTypedValue for Fraction {
    const ACCEPTS: &'static [ValueType] = &[ValueType::Fraction];

    fn from_typed_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::Fraction(fraction) => Some(*fraction),
            _ => None,
        }
    }
}

impl FromTypedValue for RatioExpression {
    const ACCEPTS: &'static [ValueType] = &[ValueType::RatioExpression];

    fn from_typed_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::RatioExpression(ratio) => Some(ratio.clone()),
            _ => None,
        }
    }
}

impl FromTypedValue for NumberWithUnits {
    const ACCEPTS: &'static [ValueType] = &[ValueType::NumberWithUnits];

    fn from_typed_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::NumberWithUnits(quantity) => Some(quantity.clone()),
            _ => None,
        }
    }
}

impl FromTypedValue for ClickOnImage {
    const ACCEPTS: &'static [ValueType] = &[ValueType::ClickOnImage];

    fn from_typed_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::ClickOnImage(click) => Some(click.clone()),
            _ => None,
        }
    }
}
