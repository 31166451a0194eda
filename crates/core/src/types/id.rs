//! Product identifiers.
//!
//! IDs are opaque strings generated on the client side. They are short and
//! random rather than globally unique: a collision is possible but treated as
//! negligible for a single-shop catalog.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of base-36 characters in a generated ID.
pub const GENERATED_ID_LEN: usize = 8;

/// Identifier of a catalog product.
///
/// Cart lines hold a `ProductId` as a reference, not as ownership: the
/// product may be deleted while the line survives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create an ID from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random ID of lowercase base-36 characters.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use electrohome_core::ProductId;
    /// let id = ProductId::generate();
    /// assert_eq!(id.as_str().len(), 8);
    /// ```
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..GENERATED_ID_LEN)
            .map(|_| char::from_digit(rng.random_range(0..36), 36).unwrap_or('0'))
            .collect();
        Self(id)
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if no ID has been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_base36() {
        let id = ProductId::generate();
        assert_eq!(id.as_str().len(), GENERATED_ID_LEN);
        assert!(
            id.as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_generate_differs() {
        // Two draws colliding over 36^8 values would point at a broken RNG.
        assert_ne!(ProductId::generate(), ProductId::generate());
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProductId::new("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
        let back: ProductId = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(ProductId::default().is_empty());
        assert!(!ProductId::new("x").is_empty());
    }
}
