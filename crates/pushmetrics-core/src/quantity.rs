//! Decimal quantities in canonical decimal-exponent form.
//!
//! Values arrive as `i64`. Rendering factors trailing powers of ten out in
//! groups of three so `1000` becomes `"1e3"` while `1500` stays `"1500"`.
//! Parsing accepts the same form back (`<int>` or `<int>e<exp>`).

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{MetricsError, Result};

/// Integer decimal quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Quantity(i64);

impl Quantity {
    pub fn from_i64(v: i64) -> Self {
        Self(v)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Canonical mantissa/exponent pair (exponent is a non-negative multiple of 3).
    pub fn canonical(self) -> (i64, u32) {
        let mut mantissa = self.0;
        if mantissa == 0 {
            return (0, 0);
        }
        let mut exponent = 0u32;
        while mantissa % 1000 == 0 {
            mantissa /= 1000;
            exponent += 3;
        }
        (mantissa, exponent)
    }
}

impl From<i64> for Quantity {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical() {
            (m, 0) => write!(f, "{m}"),
            (m, e) => write!(f, "{m}e{e}"),
        }
    }
}

impl FromStr for Quantity {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || MetricsError::BadRequest(format!("invalid quantity: {s:?}"));

        let (mantissa, exponent) = match s.split_once(['e', 'E']) {
            Some((m, e)) => (m, e.parse::<u32>().map_err(|_| bad())?),
            None => (s, 0),
        };
        let mantissa: i64 = mantissa.parse().map_err(|_| bad())?;

        10i64
            .checked_pow(exponent)
            .and_then(|scale| mantissa.checked_mul(scale))
            .map(Quantity)
            .ok_or_else(bad)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
