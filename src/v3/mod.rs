//! SNMPv3 User-based Security Model (USM) security parameters.
//!
//! This module implements the security-parameter side of RFC 3414, with the
//! AES privacy extension of RFC 3826 and the SHA-2 authentication protocols of
//! RFC 7860:
//!
//! - Security level validation against msgFlags
//! - Per-session privacy salt initialization and advance
//! - USM security parameters encoding/decoding
//! - Authentication parameter placeholder patching
//!
//! Key localization, digest computation and encryption live outside this
//! crate and consume the placeholders and salts produced here.

mod builder;
mod level;
mod passphrase;
mod salt;
mod usm;

pub use builder::{UsmAuthBuilder, UsmBuilder, UsmPrivBuilder};
pub use level::{MsgFlags, SecurityLevel, UsmField};
pub use passphrase::Passphrase;
pub use salt::{LocalSalt, OsRandom, RandomSource};
pub use usm::{EncodedUsmParams, UsmSecurityParams, patch_auth_params};

/// Error returned when parsing a protocol name fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProtocolError {
    input: String,
    family: &'static str,
    expected: &'static str,
}

impl std::fmt::Display for ParseProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown {} protocol '{}'; expected one of: {}",
            self.family, self.input, self.expected
        )
    }
}

impl std::error::Error for ParseProtocolError {}

/// Look a protocol up by name, ignoring case and dashes.
fn lookup<P: Copy>(names: &[(&str, P)], input: &str) -> Option<P> {
    let key: String = input
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    names
        .iter()
        .find(|(name, _)| name.replace('-', "") == key)
        .map(|(_, p)| *p)
}

/// Authentication protocol identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuthProtocol {
    /// HMAC-MD5-96 (RFC 3414)
    Md5,
    /// HMAC-SHA-96 (RFC 3414)
    Sha1,
    /// HMAC-SHA-224 (RFC 7860)
    Sha224,
    /// HMAC-SHA-256 (RFC 7860)
    Sha256,
    /// HMAC-SHA-384 (RFC 7860)
    Sha384,
    /// HMAC-SHA-512 (RFC 7860)
    Sha512,
}

impl AuthProtocol {
    // Canonical name first; later entries are accepted aliases
    const NAMES: &'static [(&'static str, Self)] = &[
        ("MD5", Self::Md5),
        ("SHA", Self::Sha1),
        ("SHA-224", Self::Sha224),
        ("SHA-256", Self::Sha256),
        ("SHA-384", Self::Sha384),
        ("SHA-512", Self::Sha512),
        ("SHA-1", Self::Sha1),
    ];

    /// Name used on the command line and in logs.
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, p)| *p == self)
            .map_or("", |(name, _)| *name)
    }

    /// Truncated MAC length, which is also the auth params placeholder length.
    pub fn mac_len(self) -> usize {
        match self {
            Self::Md5 | Self::Sha1 => 12,
            Self::Sha224 => 16,
            Self::Sha256 => 24,
            Self::Sha384 => 32,
            Self::Sha512 => 48,
        }
    }
}

impl std::fmt::Display for AuthProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for AuthProtocol {
    type Err = ParseProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(Self::NAMES, s).ok_or_else(|| ParseProtocolError {
            input: s.to_string(),
            family: "authentication",
            expected: "MD5, SHA, SHA-224, SHA-256, SHA-384, SHA-512",
        })
    }
}

/// Privacy protocol identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrivProtocol {
    /// DES-CBC (RFC 3414)
    Des,
    /// 3DES-EDE (draft-reeder-snmpv3-usm-3desede)
    Des3,
    /// AES-128-CFB (RFC 3826)
    Aes128,
    /// AES-192-CFB
    Aes192,
    /// AES-256-CFB
    Aes256,
}

impl PrivProtocol {
    const NAMES: &'static [(&'static str, Self)] = &[
        ("DES", Self::Des),
        ("3DES", Self::Des3),
        ("AES", Self::Aes128),
        ("AES-192", Self::Aes192),
        ("AES-256", Self::Aes256),
        ("AES-128", Self::Aes128),
    ];

    /// Name used on the command line and in logs.
    pub fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, p)| *p == self)
            .map_or("", |(name, _)| *name)
    }
}

impl std::fmt::Display for PrivProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PrivProtocol {
    type Err = ParseProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(Self::NAMES, s).ok_or_else(|| ParseProtocolError {
            input: s.to_string(),
            family: "privacy",
            expected: "DES, 3DES, AES, AES-192, AES-256",
        })
    }
}

/// Width of the local salt kept for a privacy protocol family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaltWidth {
    /// 32-bit salt, combined with engine boots (DES family, RFC 3414 8.1.1.1).
    Bits32,
    /// 64-bit salt (AES family, RFC 3826 3.1.2.1).
    Bits64,
}

impl SaltWidth {
    /// Number of random bytes needed to seed a salt of this width.
    pub fn byte_len(self) -> usize {
        match self {
            Self::Bits32 => 4,
            Self::Bits64 => 8,
        }
    }
}

impl std::fmt::Display for SaltWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bits32 => write!(f, "32-bit"),
            Self::Bits64 => write!(f, "64-bit"),
        }
    }
}

impl PrivProtocol {
    /// Get the local salt width for this protocol family.
    pub fn salt_width(self) -> SaltWidth {
        match self {
            Self::Des | Self::Des3 => SaltWidth::Bits32,
            Self::Aes128 | Self::Aes192 | Self::Aes256 => SaltWidth::Bits64,
        }
    }

    /// Get the privacy parameters (msgPrivacyParameters) length in bytes.
    pub fn salt_len(self) -> usize {
        8 // All protocols use 8-byte salt
    }
}
