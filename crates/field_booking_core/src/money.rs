//! Money values kept as integer satang (1/100 baht).
//!
//! Payload amounts must always print with exactly two fractional digits, so
//! the value never passes through a float once it is inside the core.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Largest amount that fits the signed 64-bit `amount_satang` column.
pub const MAX_SATANG: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    satang: u64,
}

impl Amount {
    #[inline]
    pub const fn from_satang(satang: u64) -> Self {
        Self { satang }
    }

    /// Create from baht, rounding to the nearest satang.
    pub fn from_baht(baht: f64) -> CoreResult<Self> {
        if !baht.is_finite() || baht < 0.0 {
            return Err(CoreError::Validation(format!(
                "amount must be a non-negative number, got {}",
                baht
            )));
        }
        let satang = (baht * 100.0).round();
        // `i64::MAX as f64` rounds up to 2^63, so `>=` keeps the cast in range.
        if satang >= MAX_SATANG as f64 {
            return Err(CoreError::Validation(format!("amount {} is too large", baht)));
        }
        Ok(Self {
            satang: satang as u64,
        })
    }

    #[inline]
    pub const fn satang(&self) -> u64 {
        self.satang
    }

    /// Value in baht, for JSON responses.
    #[inline]
    pub fn as_baht(&self) -> f64 {
        self.satang as f64 / 100.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.satang == 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.satang / 100, self.satang % 100)
    }
}

impl FromStr for Amount {
    type Err = CoreError;

    /// Parses `"500"`, `"500.5"` or `"500.50"`. More than two fractional
    /// digits is rejected rather than rounded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("'{}' is not a valid amount", s));
        let s = s.trim();
        let (whole, fraction) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty()
            || fraction.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        let satang = whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction))
            .filter(|v| *v <= MAX_SATANG)
            .ok_or_else(invalid)?;
        Ok(Self { satang })
    }
}
