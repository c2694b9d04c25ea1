//! Token amount type.
//!
//! Amounts are represented as fixed-point integers (u128) in the token's
//! smallest denomination (nanoton for the native coin, minor units for
//! jettons) to avoid floating-point errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// An amount in a token's minor units.
///
/// Internally stored as raw units (u128) for precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(u128);

impl TokenAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Parse a decimal string (e.g. `"12.345"`) into minor units for a
    /// token with the given number of decimals.
    ///
    /// Fractional digits beyond `decimals` are truncated. Returns `None`
    /// for malformed input or on overflow.
    pub fn from_decimal_str(text: &str, decimals: u32) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() || text.starts_with('-') || text.starts_with('+') {
            return None;
        }
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        let int_value: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };
        let scale = 10u128.checked_pow(decimals)?;

        // Truncate excess fractional digits, right-pad missing ones.
        let frac_digits: String = frac_part.chars().take(decimals as usize).collect();
        if !frac_digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let frac_value: u128 = if frac_digits.is_empty() {
            0
        } else {
            let parsed: u128 = frac_digits.parse().ok()?;
            let pad = decimals as usize - frac_digits.len();
            parsed.checked_mul(10u128.checked_pow(pad as u32)?)?
        };

        int_value
            .checked_mul(scale)?
            .checked_add(frac_value)
            .map(Self)
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TokenAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for TokenAmount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, a| acc.saturating_add(a))
    }
}

/// Displays the raw minor-unit integer; denomination formatting is a UI
/// concern.
impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_ops() {
        let a = TokenAmount::new(100);
        let b = TokenAmount::new(30);
        assert_eq!(a.checked_add(b), Some(TokenAmount::new(130)));
        assert_eq!(a.checked_sub(b), Some(TokenAmount::new(70)));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(b.saturating_sub(a), TokenAmount::ZERO);
    }

    #[test]
    fn parse_integer_decimal() {
        assert_eq!(
            TokenAmount::from_decimal_str("12", 9),
            Some(TokenAmount::new(12_000_000_000))
        );
    }

    #[test]
    fn parse_fractional_decimal() {
        assert_eq!(
            TokenAmount::from_decimal_str("12.345", 9),
            Some(TokenAmount::new(12_345_000_000))
        );
        assert_eq!(
            TokenAmount::from_decimal_str("0.000000001", 9),
            Some(TokenAmount::new(1))
        );
        assert_eq!(
            TokenAmount::from_decimal_str(".5", 9),
            Some(TokenAmount::new(500_000_000))
        );
    }

    #[test]
    fn parse_truncates_excess_fraction() {
        // 9-decimal token: the 10th fractional digit is dropped, not rounded.
        assert_eq!(
            TokenAmount::from_decimal_str("1.0000000019", 9),
            Some(TokenAmount::new(1_000_000_001))
        );
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(TokenAmount::from_decimal_str("", 9), None);
        assert_eq!(TokenAmount::from_decimal_str("-1", 9), None);
        assert_eq!(TokenAmount::from_decimal_str("1.2.3", 9), None);
        assert_eq!(TokenAmount::from_decimal_str("abc", 9), None);
        assert_eq!(TokenAmount::from_decimal_str("1,5", 9), None);
    }

    #[test]
    fn sum_saturates() {
        let total: TokenAmount = [TokenAmount::new(1), TokenAmount::new(2)]
            .into_iter()
            .sum();
        assert_eq!(total, TokenAmount::new(3));
    }
}
