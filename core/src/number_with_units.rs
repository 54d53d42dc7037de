//! `NumberWithUnits`: a real or fractional quantity tagged with units.

use crate::{approximately_equals, Fraction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The numeric part of a [`NumberWithUnits`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitNumber {
    /// A decimal quantity (`2.5 m`).
    Real(f64),
    /// A fractional quantity (`1/2 kg`).
    Fraction(Fraction),
}

impl UnitNumber {
    /// Real value of the quantity; fractions go through [`Fraction::to_f64`].
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Real(value) => *value,
            Self::Fraction(fraction) => fraction.to_f64(),
        }
    }

    /// Returns `true` if both numbers carry the same tag (real vs fraction).
    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Real(_), Self::Real(_)) | (Self::Fraction(_), Self::Fraction(_))
        )
    }
}

/// A single unit with its exponent (`m^2` is `{ unit: "m", exponent: 2 }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NumberUnit {
    /// Unit symbol.
    pub unit: String,
    /// Power the unit is raised to.
    #[serde(default = "default_exponent")]
    pub exponent: i32,
}

fn default_exponent() -> i32 {
    1
}

impl NumberUnit {
    /// A unit raised to the first power.
    pub fn new(unit: impl Into<String>) -> Self {
        Self::with_exponent(unit, 1)
    }

    /// A unit raised to `exponent`.
    pub fn with_exponent(unit: impl Into<String>, exponent: i32) -> Self {
        Self {
            unit: unit.into(),
            exponent,
        }
    }
}

impl From<&str> for NumberUnit {
    fn from(unit: &str) -> Self {
        Self::new(unit)
    }
}

/// A quantity with an unordered list of units.
///
/// Unit order never matters for comparison:
///
/// ```
/// use tutor::NumberWithUnits;
///
/// let a = NumberWithUnits::real(5.0, ["m", "s"]);
/// let b = NumberWithUnits::real(5.0, ["s", "m"]);
/// assert!(a.has_same_units(&b));
/// assert!(a.is_equal_to(&b));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberWithUnits {
    /// The numeric part.
    pub number: UnitNumber,
    /// Units, in entry order.
    #[serde(default)]
    pub units: Vec<NumberUnit>,
}

impl NumberWithUnits {
    /// Build a real-valued quantity.
    pub fn real<U: Into<NumberUnit>>(value: f64, units: impl IntoIterator<Item = U>) -> Self {
        Self {
            number: UnitNumber::Real(value),
            units: units.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a fraction-valued quantity.
    pub fn fraction<U: Into<NumberUnit>>(
        value: Fraction,
        units: impl IntoIterator<Item = U>,
    ) -> Self {
        Self {
            number: UnitNumber::Fraction(value),
            units: units.into_iter().map(Into::into).collect(),
        }
    }

    /// The units as an order-independent set.
    #[must_use]
    pub fn unit_set(&self) -> BTreeSet<&NumberUnit> {
        self.units.iter().collect()
    }

    /// Returns `true` if both sides carry the same set of units.
    #[must_use]
    pub fn has_same_units(&self, other: &Self) -> bool {
        self.unit_set() == other.unit_set()
    }

    /// Same units, same number kind, and equal value.
    ///
    /// Reals compare approximately; fractions compare structurally.
    #[must_use]
    pub fn is_equal_to(&self, other: &Self) -> bool {
        if !self.has_same_units(other) {
            return false;
        }
        match (&self.number, &other.number) {
            (UnitNumber::Real(a), UnitNumber::Real(b)) => approximately_equals(*a, *b),
            (UnitNumber::Fraction(a), UnitNumber::Fraction(b)) => a == b,
            _ => false,
        }
    }

    /// Same units and approximately equal real value, regardless of number kind.
    #[must_use]
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        self.has_same_units(other)
            && approximately_equals(self.number.to_f64(), other.number.to_f64())
    }
}
