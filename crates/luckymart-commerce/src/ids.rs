//! Product identifier newtype.
//!
//! Catalog ids are short, stable, human-assigned keys ("p1".."p5"), so unlike
//! generated ids they are always constructed from existing strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable key of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "p3".into();
        assert_eq!(id.as_str(), "p3");
        assert_eq!(format!("{}", id), "p3");
    }

    #[test]
    fn test_id_ordering_follows_string_order() {
        let mut ids = vec![ProductId::new("p2"), ProductId::new("p1")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "p1");
    }
}
