//! Error types for snmp-usm.
//!
//! All errors are `#[non_exhaustive]` to allow adding new variants without breaking changes.

use crate::v3::{SaltWidth, SecurityLevel, UsmField};

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by a [`RandomSource`](crate::v3::RandomSource).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Security configuration error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// A field required by the requested security level is unset or empty.
    MissingField {
        field: UsmField,
        level: SecurityLevel,
    },
    /// msgFlags do not select a valid security level (privacy without authentication).
    InvalidSecurityLevel { flags: u8 },
    /// Local salt was already initialized for this session.
    SaltAlreadyInitialized,
    /// Local salt has not been initialized.
    SaltNotInitialized,
    /// Privacy parameters requested but no privacy protocol configured.
    NoPrivProtocol,
    /// Local salt was seeded for a different privacy protocol family.
    SaltWidthMismatch {
        expected: SaltWidth,
        actual: SaltWidth,
    },
}

impl std::fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field, level } => {
                write!(f, "{} is required for {}", field, level)
            }
            Self::InvalidSecurityLevel { flags } => write!(
                f,
                "msgFlags 0x{:02X} must be populated with an appropriate security level",
                flags
            ),
            Self::SaltAlreadyInitialized => {
                write!(f, "local privacy salt already initialized for this session")
            }
            Self::SaltNotInitialized => write!(f, "local privacy salt not initialized"),
            Self::NoPrivProtocol => write!(f, "no privacy protocol configured"),
            Self::SaltWidthMismatch { expected, actual } => write!(
                f,
                "local privacy salt is {} but the privacy protocol needs {}",
                actual, expected
            ),
        }
    }
}

/// BER decode error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Expected different tag.
    UnexpectedTag { expected: u8, actual: u8 },
    /// Data truncated unexpectedly.
    TruncatedData,
    /// Invalid BER length encoding.
    InvalidLength,
    /// Indefinite length not supported.
    IndefiniteLength,
    /// Length field too long.
    LengthTooLong { octets: usize },
    /// Integer value overflow.
    IntegerOverflow,
    /// Zero-length integer.
    ZeroLengthInteger,
    /// Negative value where an unsigned counter is required.
    NegativeInteger,
    /// Constructed OCTET STRING not supported.
    ConstructedOctetString,
    /// TLV extends past end of data.
    TlvOverflow,
    /// Unconsumed bytes after the last expected element.
    TrailingData { remaining: usize },
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedTag { expected, actual } => {
                write!(f, "expected tag 0x{:02X}, got 0x{:02X}", expected, actual)
            }
            Self::TruncatedData => write!(f, "unexpected end of data"),
            Self::InvalidLength => write!(f, "invalid length encoding"),
            Self::IndefiniteLength => write!(f, "indefinite length encoding not supported"),
            Self::LengthTooLong { octets } => {
                write!(f, "length encoding too long ({} octets)", octets)
            }
            Self::IntegerOverflow => write!(f, "integer overflow"),
            Self::ZeroLengthInteger => write!(f, "zero-length integer"),
            Self::NegativeInteger => write!(f, "negative value for unsigned integer"),
            Self::ConstructedOctetString => {
                write!(f, "constructed OCTET STRING (0x24) not supported")
            }
            Self::TlvOverflow => write!(f, "TLV extends past end of data"),
            Self::TrailingData { remaining } => {
                write!(f, "{} trailing bytes after last element", remaining)
            }
        }
    }
}

/// BER encode error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeErrorKind {
    /// Length cannot be represented in BER definite form.
    LengthTooLarge { length: usize, max: usize },
    /// Could not locate the auth params placeholder at the given offset.
    MissingAuthParams { offset: usize },
    /// Digest length does not match the placeholder.
    WrongMacLength { expected: usize, actual: usize },
}

impl std::fmt::Display for EncodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthTooLarge { length, max } => {
                write!(
                    f,
                    "length {} exceeds maximum encodable length {}",
                    length, max
                )
            }
            Self::MissingAuthParams { offset } => {
                write!(f, "no auth params placeholder at offset {}", offset)
            }
            Self::WrongMacLength { expected, actual } => {
                write!(f, "wrong MAC length: expected {}, got {}", expected, actual)
            }
        }
    }
}

/// Library error type.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Security parameters are inconsistent with the requested security level.
    #[error("invalid security configuration: {kind}")]
    Config { kind: ConfigErrorKind },

    /// The secure random source failed while creating the privacy salt.
    #[error("error creating a cryptographically secure salt ({needed} bytes): {source}")]
    Randomness {
        needed: usize,
        #[source]
        source: BoxError,
    },

    /// BER encoding error.
    #[error("encode error: {kind}")]
    Encode { kind: EncodeErrorKind },

    /// BER decoding error.
    #[error("decode error at offset {offset}: {kind}")]
    Decode {
        offset: usize,
        kind: DecodeErrorKind,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config(kind: ConfigErrorKind) -> Self {
        Self::Config { kind }
    }

    /// Create a missing-field configuration error.
    pub fn missing_field(field: UsmField, level: SecurityLevel) -> Self {
        Self::config(ConfigErrorKind::MissingField { field, level })
    }

    /// Create a randomness error.
    pub fn randomness(needed: usize, source: impl Into<BoxError>) -> Self {
        Self::Randomness {
            needed,
            source: source.into(),
        }
    }

    /// Create an encode error.
    pub fn encode(kind: EncodeErrorKind) -> Self {
        Self::Encode { kind }
    }

    /// Create a decode error.
    pub fn decode(offset: usize, kind: DecodeErrorKind) -> Self {
        Self::Decode { offset, kind }
    }

    /// The missing field, if this is a missing-field configuration error.
    pub fn missing(&self) -> Option<UsmField> {
        match self {
            Self::Config {
                kind: ConfigErrorKind::MissingField { field, .. },
            } => Some(*field),
            _ => None,
        }
    }
}
