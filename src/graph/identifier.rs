//! Identifier type for lineage nodes.
//!
//! Identifiers come straight out of table cells, so they are either text or a
//! number. They compare by value: two cells holding `"A"` name the same node,
//! as do two cells holding `42`. Boolean cells are read as the text `"true"`
//! or `"false"`.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque node identifier taken from a parent or child cell.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Identifier {
    /// Numeric cell value.
    Number(f64),
    /// Text cell value.
    Text(String),
}

impl Identifier {
    /// Bit pattern used for equality and hashing of numbers (`-0` folds into `0`).
    #[inline]
    fn number_bits(value: f64) -> u64 {
        if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
    }
}

/// Cell shapes accepted from the host.
#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Cell::deserialize(deserializer)? {
            Cell::Number(value) => Self::Number(value),
            Cell::Text(text) => Self::Text(text),
            Cell::Flag(flag) => Self::Text(flag.to_string()),
        })
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => Self::number_bits(*a) == Self::number_bits(*b),
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Number(value) => {
                0u8.hash(state);
                Self::number_bits(*value).hash(state);
            }
            Self::Text(text) => {
                1u8.hash(state);
                text.hash(state);
            }
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Identifier {
    #[inline]
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Identifier {
    #[inline]
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for Identifier {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Identifier {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}
