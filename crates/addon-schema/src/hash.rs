//! Checksum newtype for package artifacts.

use serde::{Deserialize, Serialize};

/// Newtype for a SHA256 hash string (64 hex characters when well formed).
///
/// Checksums are taken verbatim from the `.sha256sum` files published next to
/// release assets, so construction does not validate; use
/// [`Sha256Hash::is_well_formed`] to check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Sha256Hash(String);

impl Sha256Hash {
    /// Create a new `Sha256Hash` without validation.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Whether the digest is 64 lowercase hex characters.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 64
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    /// Return the inner hex string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Sha256Hash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Sha256Hash {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Sha256Hash {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

    #[test]
    fn test_is_well_formed() {
        assert!(Sha256Hash::new(DIGEST).is_well_formed());
        assert!(!Sha256Hash::new("abc").is_well_formed());
        assert!(!Sha256Hash::new(DIGEST.to_uppercase()).is_well_formed());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Sha256Hash::new(DIGEST)).unwrap();
        assert_eq!(json, format!("\"{DIGEST}\""));
    }
}
