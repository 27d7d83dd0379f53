//! Secret passphrase storage.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An authentication or privacy passphrase.
///
/// The bytes are wiped on drop, never shown by `Debug`, and compared in
/// constant time.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct Passphrase(Vec<u8>);

impl Passphrase {
    /// Create a passphrase from raw bytes.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    /// The secret bytes, for key localization.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the passphrase is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Passphrase").field(&"<redacted>").finish()
    }
}

impl PartialEq for Passphrase {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for Passphrase {}

impl From<&str> for Passphrase {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for Passphrase {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<&[u8]> for Passphrase {
    fn from(b: &[u8]) -> Self {
        Self::new(b)
    }
}

impl From<Vec<u8>> for Passphrase {
    fn from(b: Vec<u8>) -> Self {
        Self(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let p = Passphrase::from("authpass123");
        let dbg = format!("{:?}", p);
        assert!(!dbg.contains("authpass123"));
        assert!(dbg.contains("redacted"));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Passphrase::from("abc"), Passphrase::from(b"abc".to_vec()));
        assert_ne!(Passphrase::from("abc"), Passphrase::from("abd"));
        assert_ne!(Passphrase::from("abc"), Passphrase::from("abcd"));
    }

    #[test]
    fn test_empty() {
        assert!(Passphrase::default().is_empty());
        assert!(Passphrase::from("").is_empty());
        assert_eq!(Passphrase::from("xyz").len(), 3);
    }
}
