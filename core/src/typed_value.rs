//! `TypedValue`: the closed set of values that flow into classifiers.
//!
//! Learner answers and rule-spec inputs share one tagged union. Every variant
//! reports a [`ValueType`], which is what the input validator compares against
//! a classifier's declared parameter types before a predicate runs.
//!
//! # Serialization
//!
//! Values are externally tagged in `snake_case`, which reads naturally in
//! lesson content:
//!
//! ```yaml
//! inputs:
//!   x: { real: 3.5 }
//!   tol: { non_negative_int: 1 }
//! ```

use crate::{ClickOnImage, Fraction, NumberWithUnits, RatioExpression};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`TypedValue`], used in validation errors.
///
/// Displays in `SCREAMING_SNAKE_CASE` (e.g. `NORMALIZED_STRING`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    /// [`TypedValue::Real`]
    Real,
    /// [`TypedValue::SignedInt`]
    SignedInt,
    /// [`TypedValue::NonNegativeInt`]
    NonNegativeInt,
    /// [`TypedValue::NormalizedString`]
    NormalizedString,
    /// [`TypedValue::SetOfNormalizedString`]
    SetOfNormalizedString,
    /// [`TypedValue::ListOfSetsOfNormalizedString`]
    ListOfSetsOfNormalizedString,
    /// [`TypedValue::Fraction`]
    Fraction,
    /// [`TypedValue::RatioExpression`]
    RatioExpression,
    /// [`TypedValue::NumberWithUnits`]
    NumberWithUnits,
    /// [`TypedValue::ClickOnImage`]
    ClickOnImage,
}

impl ValueType {
    /// The `SCREAMING_SNAKE_CASE` name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Real => "REAL",
            Self::SignedInt => "SIGNED_INT",
            Self::NonNegativeInt => "NON_NEGATIVE_INT",
            Self::NormalizedString => "NORMALIZED_STRING",
            Self::SetOfNormalizedString => "SET_OF_NORMALIZED_STRING",
            Self::ListOfSetsOfNormalizedString => "LIST_OF_SETS_OF_NORMALIZED_STRING",
            Self::Fraction => "FRACTION",
            Self::RatioExpression => "RATIO_EXPRESSION",
            Self::NumberWithUnits => "NUMBER_WITH_UNITS",
            Self::ClickOnImage => "CLICK_ON_IMAGE",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed answer or rule input.
///
/// # Example
///
/// ```
/// use tutor::{TypedValue, ValueType};
///
/// let value = TypedValue::Real(2.5);
/// assert_eq!(value.value_type(), ValueType::Real);
/// assert_eq!(value.as_real(), Some(2.5));
/// assert_eq!(TypedValue::from("hello").as_str(), Some("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypedValue {
    /// A decimal number.
    Real(f64),
    /// A signed integer.
    SignedInt(i32),
    /// A non-negative integer (choice indexes, term positions, counts).
    NonNegativeInt(u32),
    /// A string already normalized by the input layer.
    NormalizedString(String),
    /// A set of normalized strings (text alternatives, item selections).
    SetOfNormalizedString(Vec<String>),
    /// An ordering of items where each position may hold several items.
    ListOfSetsOfNormalizedString(Vec<Vec<String>>),
    /// A signed mixed fraction.
    Fraction(Fraction),
    /// Ordered ratio terms.
    RatioExpression(RatioExpression),
    /// A quantity with units.
    NumberWithUnits(NumberWithUnits),
    /// A click on an image with the regions it hit.
    ClickOnImage(ClickOnImage),
}

impl TypedValue {
    /// The discriminant of this value.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Real(_) => ValueType::Real,
            Self::SignedInt(_) => ValueType::SignedInt,
            Self::NonNegativeInt(_) => ValueType::NonNegativeInt,
            Self::NormalizedString(_) => ValueType::NormalizedString,
            Self::SetOfNormalizedString(_) => ValueType::SetOfNormalizedString,
            Self::ListOfSetsOfNormalizedString(_) => ValueType::ListOfSetsOfNormalizedString,
            Self::Fraction(_) => ValueType::Fraction,
            Self::RatioExpression(_) => ValueType::RatioExpression,
            Self::NumberWithUnits(_) => ValueType::NumberWithUnits,
            Self::ClickOnImage(_) => ValueType::ClickOnImage,
        }
    }

    /// Try to get the value as a real number (only the `Real` variant).
    #[inline]
    #[must_use]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(value) => Some(*value),
            _ => None,
        }
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::NormalizedString(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as a non-negative integer.
    #[inline]
    #[must_use]
    pub fn as_non_negative_int(&self) -> Option<u32> {
        match self {
            Self::NonNegativeInt(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(value) => write!(f, "{value}"),
            Self::SignedInt(value) => write!(f, "{value}"),
            Self::NonNegativeInt(value) => write!(f, "{value}"),
            Self::NormalizedString(value) => write!(f, "{value:?}"),
            Self::SetOfNormalizedString(values) => write!(f, "{values:?}"),
            Self::ListOfSetsOfNormalizedString(positions) => write!(f, "{positions:?}"),
            Self::Fraction(fraction) => write!(f, "{fraction}"),
            Self::RatioExpression(ratio) => write!(f, "{ratio}"),
            Self::NumberWithUnits(quantity) => {
                match quantity.number {
                    crate::UnitNumber::Real(value) => write!(f, "{value}")?,
                    crate::UnitNumber::Fraction(fraction) => write!(f, "{fraction}")?,
                }
                for unit in &quantity.units {
                    write!(f, " {}", unit.unit)?;
                    if unit.exponent != 1 {
                        write!(f, "^{}", unit.exponent)?;
                    }
                }
                Ok(())
            }
            Self::ClickOnImage(click) => write!(
                f,
                "click({}, {}) in {:?}",
                click.click_position.x, click.click_position.y, click.clicked_regions
            ),
        }
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<i32> for TypedValue {
    fn from(value: i32) -> Self {
        Self::SignedInt(value)
    }
}

impl From<u32> for TypedValue {
    fn from(value: u32) -> Self {
        Self::NonNegativeInt(value)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        Self::NormalizedString(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        Self::NormalizedString(value)
    }
}

impl From<Vec<String>> for TypedValue {
    fn from(values: Vec<String>) -> Self {
        Self::SetOfNormalizedString(values)
    }
}

impl From<Vec<Vec<String>>> for TypedValue {
    fn from(positions: Vec<Vec<String>>) -> Self {
        Self::ListOfSetsOfNormalizedString(positions)
    }
}

impl From<Fraction> for TypedValue {
    fn from(value: Fraction) -> Self {
        Self::Fraction(value)
    }
}

impl From<RatioExpression> for TypedValue {
    fn from(value: RatioExpression) -> Self {
        Self::RatioExpression(value)
    }
}

impl From<NumberWithUnits> for TypedValue {
    fn from(value: NumberWithUnits) -> Self {
        Self::NumberWithUnits(value)
    }
}

impl From<ClickOnImage> for TypedValue {
    fn from(value: ClickOnImage) -> Self {
        Self::ClickOnImage(value)
    }
}
