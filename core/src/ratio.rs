//! `RatioExpression`: ordered non-negative ratio terms (`1:2:3`).

use crate::fraction::gcd;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered list of non-negative ratio components.
///
/// ```
/// use tutor::RatioExpression;
///
/// let ratio = RatioExpression::new(vec![2, 4, 6]);
/// assert_eq!(ratio.to_simplest_form(), RatioExpression::new(vec![1, 2, 3]));
/// assert_eq!(ratio.term(2), Some(4));
/// assert_eq!(ratio.term(4), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatioExpression {
    components: Vec<u32>,
}

impl RatioExpression {
    /// Create a ratio from its components, in order.
    #[must_use]
    pub fn new(components: Vec<u32>) -> Self {
        Self { components }
    }

    /// The components in authored order.
    #[must_use]
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the ratio has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The 1-indexed term at `position`, or `None` when out of range.
    #[must_use]
    pub fn term(&self, position: usize) -> Option<u32> {
        position
            .checked_sub(1)
            .and_then(|index| self.components.get(index).copied())
    }

    /// Divides every term by the GCD of all terms.
    ///
    /// All-zero and empty ratios have no meaningful divisor and are returned as-is.
    #[must_use]
    pub fn to_simplest_form(&self) -> Self {
        let divisor = self.components.iter().copied().fold(0, gcd);
        if divisor <= 1 {
            return self.clone();
        }
        Self::new(self.components.iter().map(|c| c / divisor).collect())
    }
}

impl From<Vec<u32>> for RatioExpression {
    fn from(components: Vec<u32>) -> Self {
        Self::new(components)
    }
}

impl fmt::Display for RatioExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                f.write_str(":")?;
            }
            write!(f, "{component}")?;
            first = false;
        }
        Ok(())
    }
}
