//! Fixed-precision transfer amounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when building an [`Amount`].
#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("invalid decimal amount: {0:?}")]
    Invalid(String),
    #[error("amount {0:?} has more than {max} decimal places", max = Amount::DECIMALS)]
    TooPrecise(String),
    #[error("amount is out of range")]
    OutOfRange,
    #[error("amount is not a finite number: {0}")]
    NotFinite(f64),
}

/// A signed decimal amount with six fixed decimal places.
///
/// Stored as a count of micro-units so that equal amounts always have the
/// same bit pattern, which keeps transaction hashes stable. Negative values
/// are representable and never rejected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Number of decimal places carried.
    pub const DECIMALS: usize = 6;
    /// Micro-units per whole unit.
    pub const SCALE: i64 = 1_000_000;
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a raw count of micro-units.
    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    /// Create an amount from a whole number of units.
    pub fn from_whole(whole: i64) -> Result<Self, AmountError> {
        whole
            .checked_mul(Self::SCALE)
            .map(Self)
            .ok_or(AmountError::OutOfRange)
    }

    /// Create an amount from a float, rounded to the nearest micro-unit.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite(value));
        }
        let scaled = (value * Self::SCALE as f64).round();
        // i64::MAX is not exactly representable; 2^63 is the first value past it.
        if scaled < i64::MIN as f64 || scaled >= 9_223_372_036_854_775_808.0 {
            return Err(AmountError::OutOfRange);
        }
        Ok(Self(scaled as i64))
    }

    /// Raw micro-units.
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Lossy conversion for display and arithmetic outside the ledger.
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({self})")
    }
}

/// Canonical text: shortest fraction, at least one decimal digit (`1.0`, `2.5`).
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;
        let whole = abs / scale;
        let frac = format!("{:0width$}", abs % scale, width = Self::DECIMALS);
        let frac = frac.trim_end_matches('0');
        let frac = if frac.is_empty() { "0" } else { frac };
        write!(f, "{sign}{whole}.{frac}")
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AmountError::Invalid(s.to_string());

        let trimmed = s.trim();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > Self::DECIMALS {
            return Err(AmountError::TooPrecise(s.to_string()));
        }

        let whole: i128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| AmountError::OutOfRange)?
        };
        let frac: i128 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<width$}", width = Self::DECIMALS);
            padded.parse().map_err(|_| invalid())?
        };

        let magnitude = whole
            .checked_mul(Self::SCALE as i128)
            .and_then(|w| w.checked_add(frac))
            .ok_or(AmountError::OutOfRange)?;
        let units = if negative { -magnitude } else { magnitude };

        i64::try_from(units)
            .map(Self)
            .map_err(|_| AmountError::OutOfRange)
    }
}
