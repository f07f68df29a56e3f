//! Link type.
//!
//! A link is one parent→child row of the source table. Links are kept in row
//! order; several links may share a source (fan-out).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::identifier::Identifier;

/// Directed parent→child edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Parent identifier.
    pub source: Identifier,
    /// Child identifier.
    pub target: Identifier,
}

impl Link {
    /// Create a new link from `source` to `target`.
    #[inline]
    pub fn new(source: impl Into<Identifier>, target: impl Into<Identifier>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_display() {
        let link = Link::new("A", "B");
        assert_eq!(format!("{}", link), "A -> B");
    }

    #[test]
    fn test_link_serializes_as_source_target() {
        let link = Link::new("A", 2);
        let json = serde_json::to_string(&link).unwrap();
        assert_eq!(json, r#"{"source":"A","target":2.0}"#);
    }
}
