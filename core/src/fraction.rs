//! `Fraction`: signed mixed fractions as entered by learners.
//!
//! A fraction is stored in the shape it was typed: a sign, a whole-number part,
//! and a proper-or-improper numerator over a denominator. Nothing is normalized
//! on construction, so structural equality (`==`) distinguishes `1/2` from `2/4`.
//! Use [`Fraction::to_f64`] for ordering and approximate equivalence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A signed mixed fraction: `[-] whole numerator/denominator`.
///
/// # Example
///
/// ```
/// use tutor::Fraction;
///
/// let one_and_a_half = Fraction::mixed(false, 1, 1, 2);
/// assert_eq!(one_and_a_half.to_f64(), 1.5);
/// assert_eq!(one_and_a_half.to_string(), "1 1/2");
///
/// // Structurally different, numerically equal.
/// assert_ne!(Fraction::new(false, 1, 2), Fraction::new(false, 2, 4));
/// assert_eq!(Fraction::new(false, 2, 4).to_simplest_form(), Fraction::new(false, 1, 2));
/// assert_eq!(Fraction::new(false, 6, 4).to_proper_form(), Fraction::mixed(false, 1, 1, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    /// Whether the whole value is negative.
    #[serde(default)]
    pub is_negative: bool,
    /// Whole-number part of a mixed fraction.
    #[serde(default)]
    pub whole_number: u32,
    /// Numerator of the fractional part.
    #[serde(default)]
    pub numerator: u32,
    /// Denominator of the fractional part.
    #[serde(default = "default_denominator")]
    pub denominator: u32,
}

fn default_denominator() -> u32 {
    1
}

impl Fraction {
    /// Create a fraction with no whole-number part.
    #[must_use]
    pub fn new(is_negative: bool, numerator: u32, denominator: u32) -> Self {
        Self::mixed(is_negative, 0, numerator, denominator)
    }

    /// Create a mixed fraction.
    #[must_use]
    pub fn mixed(is_negative: bool, whole_number: u32, numerator: u32, denominator: u32) -> Self {
        Self {
            is_negative,
            whole_number,
            numerator,
            denominator,
        }
    }

    /// Create a fraction representing a whole number.
    #[must_use]
    pub fn whole(value: i64) -> Self {
        let magnitude = u32::try_from(value.unsigned_abs()).unwrap_or(u32::MAX);
        Self::mixed(value < 0, magnitude, 0, 1)
    }

    /// Real value: `(whole * denominator + numerator) / denominator`, sign applied.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let whole = f64::from(self.whole_number);
        let numerator = f64::from(self.numerator);
        let denominator = f64::from(self.denominator);
        let magnitude = (whole * denominator + numerator) / denominator;
        if self.is_negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Returns `true` if the numerator is non-zero.
    #[must_use]
    pub fn has_fractional_part(&self) -> bool {
        self.numerator != 0
    }

    /// Returns `true` if the value is expressed only by its whole-number part.
    #[must_use]
    pub fn is_only_whole_number(&self) -> bool {
        !self.has_fractional_part()
    }

    /// Signed whole-number part, ignoring any fractional part.
    ///
    /// `3/3` has a whole-number part of zero: nothing is normalized.
    #[must_use]
    pub fn to_whole_number(&self) -> i64 {
        let whole = i64::from(self.whole_number);
        if self.is_negative {
            -whole
        } else {
            whole
        }
    }

    /// Folds the whole-number part into the numerator (`1 1/2` → `3/2`).
    #[must_use]
    pub fn to_improper_form(&self) -> Self {
        let numerator = self
            .whole_number
            .saturating_mul(self.denominator)
            .saturating_add(self.numerator);
        Self::new(self.is_negative, numerator, self.denominator)
    }

    /// Divides numerator and denominator by their GCD (`6/4` → `3/2`).
    ///
    /// The whole-number part and sign are kept as entered, so `1 2/4` becomes
    /// `1 1/2` and an improper `3/2` is already simplest. A zero denominator
    /// cannot be reduced and is returned unchanged.
    #[must_use]
    pub fn to_simplest_form(&self) -> Self {
        if self.denominator == 0 {
            return *self;
        }
        let divisor = gcd(self.numerator, self.denominator).max(1);
        Self::mixed(
            self.is_negative,
            self.whole_number,
            self.numerator / divisor,
            self.denominator / divisor,
        )
    }

    /// Reduces to lowest terms and moves any whole part out of the numerator
    /// (`6/4` → `1 1/2`, `2 5/4` → `3 1/4`).
    #[must_use]
    pub fn to_proper_form(&self) -> Self {
        let simplest = self.to_simplest_form();
        if simplest.denominator == 0 {
            return simplest;
        }
        Self::mixed(
            simplest.is_negative,
            simplest
                .whole_number
                .saturating_add(simplest.numerator / simplest.denominator),
            simplest.numerator % simplest.denominator,
            simplest.denominator,
        )
    }

    /// Returns `true` if this fraction is already in the shape produced by
    /// [`to_simplest_form`](Self::to_simplest_form).
    #[must_use]
    pub fn is_in_simplest_form(&self) -> bool {
        *self == self.to_simplest_form()
    }
}

/// Greatest common divisor (Euclid). `gcd(0, 0) == 0`.
pub(crate) fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let is_zero = self.whole_number == 0 && self.numerator == 0;
        if self.is_negative && !is_zero {
            f.write_str("-")?;
        }
        match (self.whole_number, self.numerator) {
            (whole, 0) => write!(f, "{whole}"),
            (0, numerator) => write!(f, "{numerator}/{}", self.denominator),
            (whole, numerator) => write!(f, "{whole} {numerator}/{}", self.denominator),
        }
    }
}
