//! Fixed-point money.
//!
//! Prices are stored in minor units (two decimal places) so arithmetic and
//! wire round-trips stay exact. On the wire a price is a decimal string like
//! `"9.99"`; floats are rejected outright since they cannot carry the
//! fixed-point guarantee.

use core::fmt;
use core::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::DomainError;

const MINOR_UNITS_PER_UNIT: u64 = 100;

/// Non-negative fixed-point price with two decimal places.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Build a price from minor units (e.g. cents): `from_minor_units(999)`
    /// is `9.99`.
    pub fn from_minor_units(minor_units: u64) -> Self {
        Self(minor_units)
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / MINOR_UNITS_PER_UNIT,
            self.0 % MINOR_UNITS_PER_UNIT
        )
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::validation("price cannot be empty"));
        }
        if s.starts_with('-') {
            return Err(DomainError::validation("price cannot be negative"));
        }

        let (whole, frac) = match s.split_once('.') {
            Some((_, "")) => {
                return Err(DomainError::validation(format!("malformed price: {s:?}")));
            }
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation(format!("malformed price: {s:?}")));
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation(format!(
                "price must have at most two decimal places: {s:?}"
            )));
        }

        let whole: u64 = whole
            .parse()
            .map_err(|_| DomainError::validation(format!("price out of range: {s:?}")))?;

        let mut frac_minor: u64 = 0;
        if !frac.is_empty() {
            frac_minor = frac.parse::<u64>().map_err(|_| {
                DomainError::validation(format!("malformed price: {s:?}"))
            })?;
            if frac.len() == 1 {
                frac_minor *= 10;
            }
        }

        let minor = whole
            .checked_mul(MINOR_UNITS_PER_UNIT)
            .and_then(|m| m.checked_add(frac_minor))
            .ok_or_else(|| DomainError::validation(format!("price out of range: {s:?}")))?;

        Ok(Self(minor))
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PriceVisitor;

        impl Visitor<'_> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string like \"9.99\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(PriceVisitor)
    }
}
