//! # Exact Decimal Values
//!
//! `Decimal` is the in-memory value exchanged with scaled-decimal fields. It is
//! an unscaled integer plus a base-10 scale, the same `(digits, scale)` pair a
//! fixed-point column stores:
//!
//! ```text
//! value = digits × 10^-scale        19.99 == Decimal { digits: 1999, scale: 2 }
//! ```
//!
//! ## Equality
//!
//! Comparison is by numeric value, so `19.99`, `19.990` and `19.9900` are all
//! equal and hash identically. `normalized()` yields the canonical form with
//! no trailing fractional zeros.
//!
//! ## Rounding
//!
//! `rescale` reduces scale with round-half-away-from-zero, matching the
//! rounding applied when a value is written into a narrower field:
//!
//! | Input | Target scale | Result digits |
//! |-------|--------------|---------------|
//! | 1.005 | 2 | 101 |
//! | -1.005 | 2 | -101 |
//! | 1.004 | 2 | 100 |

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::config::MAX_DECIMAL_SCALE;
use crate::error::{MarshalError, Result};

#[derive(Debug, Clone, Copy)]
pub struct Decimal {
    digits: i128,
    scale: u8,
}

#[inline]
fn pow10(exp: u8) -> Option<i128> {
    10i128.checked_pow(exp as u32)
}

impl Decimal {
    pub const ZERO: Decimal = Decimal { digits: 0, scale: 0 };

    pub fn new(digits: i128, scale: u8) -> Result<Self> {
        if scale > MAX_DECIMAL_SCALE {
            return Err(MarshalError::range(format!(
                "decimal scale {} exceeds maximum {}",
                scale, MAX_DECIMAL_SCALE
            )));
        }
        Ok(Self { digits, scale })
    }

    pub fn digits(&self) -> i128 {
        self.digits
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.digits < 0
    }

    /// Strips trailing fractional zeros.
    pub fn normalized(self) -> Self {
        let mut digits = self.digits;
        let mut scale = self.scale;
        while scale > 0 && digits % 10 == 0 {
            digits /= 10;
            scale -= 1;
        }
        Self { digits, scale }
    }

    /// Returns the unscaled integer at `target` scale, or `None` when it
    /// does not fit in i128.
    pub fn rescale(&self, target: u8) -> Option<i128> {
        match target.cmp(&self.scale) {
            Ordering::Equal => Some(self.digits),
            Ordering::Greater => self.digits.checked_mul(pow10(target - self.scale)?),
            Ordering::Less => {
                let divisor = pow10(self.scale - target)?;
                let quotient = self.digits / divisor;
                let remainder = self.digits % divisor;
                if remainder.unsigned_abs() * 2 >= divisor.unsigned_abs() {
                    Some(quotient + self.digits.signum())
                } else {
                    Some(quotient)
                }
            }
        }
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self {
            digits: value as i128,
            scale: 0,
        }
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from(value as i64)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.normalized(), other.normalized());
        a.digits == b.digits && a.scale == b.scale
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let n = self.normalized();
        n.digits.hash(state);
        n.scale.hash(state);
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        match (self.rescale(scale), other.rescale(scale)) {
            (Some(a), Some(b)) => a.cmp(&b),
            // only the operand that was scaled up can overflow, and it
            // overflowed because its magnitude dominates
            (None, _) if self.is_negative() => Ordering::Less,
            (None, _) => Ordering::Greater,
            (_, None) if other.is_negative() => Ordering::Greater,
            (_, None) => Ordering::Less,
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.digits < 0 { "-" } else { "" };
        let magnitude = self.digits.unsigned_abs();
        if self.scale == 0 {
            return write!(f, "{}{}", sign, magnitude);
        }
        let divisor = 10u128.pow(self.scale as u32);
        write!(
            f,
            "{}{}.{:0>width$}",
            sign,
            magnitude / divisor,
            magnitude % divisor,
            width = self.scale as usize
        )
    }
}

impl FromStr for Decimal {
    type Err = MarshalError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MarshalError::range(format!("invalid decimal literal '{}'", s));

        let trimmed = s.trim();
        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let scale = u8::try_from(frac_part.len())
            .ok()
            .filter(|&sc| sc <= MAX_DECIMAL_SCALE)
            .ok_or_else(|| {
                MarshalError::range(format!(
                    "decimal literal '{}' has more than {} fractional digits",
                    s, MAX_DECIMAL_SCALE
                ))
            })?;

        let mut digits: i128 = 0;
        for b in int_part.bytes().chain(frac_part.bytes()) {
            digits = digits
                .checked_mul(10)
                .and_then(|d| d.checked_add((b - b'0') as i128))
                .ok_or_else(|| {
                    MarshalError::range(format!("decimal literal '{}' overflows", s))
                })?;
        }
        if negative {
            digits = -digits;
        }
        Ok(Self { digits, scale })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn parses_plain_and_signed_literals() {
        assert_eq!(dec("19.99").digits(), 1999);
        assert_eq!(dec("19.99").scale(), 2);
        assert_eq!(dec("-0.5").digits(), -5);
        assert_eq!(dec("+3").digits(), 3);
        assert_eq!(dec(".25").digits(), 25);
        assert_eq!(dec("7.").scale(), 0);
    }

    #[test]
    fn rejects_malformed_literals() {
        for bad in ["", "-", ".", "1e3", "1.2.3", "abc", "1,5"] {
            assert!(
                matches!(bad.parse::<Decimal>(), Err(MarshalError::Range { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn display_pads_fraction_and_keeps_sign_of_small_negatives() {
        assert_eq!(dec("19.99").to_string(), "19.99");
        assert_eq!(dec("-0.05").to_string(), "-0.05");
        assert_eq!(Decimal::new(5000, 2).unwrap().to_string(), "50.00");
        assert_eq!(Decimal::from(-42i64).to_string(), "-42");
    }

    #[test]
    fn equality_ignores_trailing_zeros() {
        assert_eq!(dec("19.99"), dec("19.990"));
        assert_eq!(dec("5000"), dec("5000.00"));
        assert_ne!(dec("19.99"), dec("19.9"));
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(dec("1.5") < dec("1.51"));
        assert!(dec("-2") < dec("-1.99"));
        assert!(dec("10") > dec("9.999"));
    }

    #[test]
    fn rescale_rounds_half_away_from_zero() {
        assert_eq!(dec("1.005").rescale(2), Some(101));
        assert_eq!(dec("-1.005").rescale(2), Some(-101));
        assert_eq!(dec("1.004").rescale(2), Some(100));
        assert_eq!(dec("-1.004").rescale(2), Some(-100));
        assert_eq!(dec("2.5").rescale(0), Some(3));
        assert_eq!(dec("-2.5").rescale(0), Some(-3));
    }

    #[test]
    fn rescale_up_multiplies() {
        assert_eq!(dec("19.99").rescale(4), Some(199_900));
        assert_eq!(dec("1").rescale(38), Some(10i128.pow(38)));
        assert_eq!(dec("100").rescale(38), None);
    }

    #[test]
    fn scale_above_maximum_is_rejected() {
        assert!(Decimal::new(1, 39).is_err());
        assert!(Decimal::new(1, 38).is_ok());
    }
}
