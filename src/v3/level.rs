//! Security levels and msgFlags (RFC 3412 Section 6.4).

use crate::error::{ConfigErrorKind, Error, Result};

/// The msgFlags octet of an SNMPv3 message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MsgFlags(u8);

impl MsgFlags {
    /// authFlag
    pub const AUTH: u8 = 0x01;
    /// privFlag
    pub const PRIV: u8 = 0x02;
    /// reportableFlag
    pub const REPORTABLE: u8 = 0x04;
    /// Bits that select the security level.
    pub const SECURITY_LEVEL_MASK: u8 = Self::AUTH | Self::PRIV;

    /// Wrap a raw msgFlags octet.
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    /// Build flags for a security level.
    pub const fn from_level(level: SecurityLevel, reportable: bool) -> Self {
        let bits = match level {
            SecurityLevel::NoAuthNoPriv => 0,
            SecurityLevel::AuthNoPriv => Self::AUTH,
            SecurityLevel::AuthPriv => Self::AUTH | Self::PRIV,
        };
        if reportable {
            Self(bits | Self::REPORTABLE)
        } else {
            Self(bits)
        }
    }

    /// Raw octet value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the reportable flag is set.
    pub const fn is_reportable(self) -> bool {
        self.0 & Self::REPORTABLE != 0
    }

    /// Isolate the security level bits.
    ///
    /// Fails for privFlag without authFlag, which RFC 3412 forbids.
    pub fn security_level(self) -> Result<SecurityLevel> {
        match self.0 & Self::SECURITY_LEVEL_MASK {
            0x00 => Ok(SecurityLevel::NoAuthNoPriv),
            Self::AUTH => Ok(SecurityLevel::AuthNoPriv),
            Self::SECURITY_LEVEL_MASK => Ok(SecurityLevel::AuthPriv),
            _ => Err(Error::config(ConfigErrorKind::InvalidSecurityLevel {
                flags: self.0,
            })),
        }
    }
}

impl From<u8> for MsgFlags {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<SecurityLevel> for MsgFlags {
    fn from(level: SecurityLevel) -> Self {
        Self::from_level(level, false)
    }
}

/// SNMPv3 security level.
///
/// Levels are ordered; each level requires everything the lower levels do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SecurityLevel {
    /// No authentication, no privacy.
    NoAuthNoPriv,
    /// Authentication without privacy.
    AuthNoPriv,
    /// Authentication and privacy.
    AuthPriv,
}

impl SecurityLevel {
    /// Whether messages at this level carry an authentication digest.
    pub const fn requires_auth(self) -> bool {
        matches!(self, Self::AuthNoPriv | Self::AuthPriv)
    }

    /// Whether messages at this level are encrypted.
    pub const fn requires_priv(self) -> bool {
        matches!(self, Self::AuthPriv)
    }

    /// Fields that must be populated at this level, in check order.
    ///
    /// Each level lists its own requirements followed by those of every
    /// lower level.
    pub const fn required_fields(self) -> &'static [UsmField] {
        match self {
            Self::NoAuthNoPriv => &[UsmField::Username],
            Self::AuthNoPriv => &[
                UsmField::AuthProtocol,
                UsmField::AuthPassphrase,
                UsmField::Username,
            ],
            Self::AuthPriv => &[
                UsmField::PrivProtocol,
                UsmField::PrivPassphrase,
                UsmField::AuthProtocol,
                UsmField::AuthPassphrase,
                UsmField::Username,
            ],
        }
    }
}

impl std::fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoAuthNoPriv => write!(f, "noAuthNoPriv"),
            Self::AuthNoPriv => write!(f, "authNoPriv"),
            Self::AuthPriv => write!(f, "authPriv"),
        }
    }
}

/// A field checked by [`validate`](super::UsmSecurityParams::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsmField {
    Username,
    AuthProtocol,
    AuthPassphrase,
    PrivProtocol,
    PrivPassphrase,
}

impl std::fmt::Display for UsmField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Username => write!(f, "user name"),
            Self::AuthProtocol => write!(f, "authentication protocol"),
            Self::AuthPassphrase => write!(f, "authentication passphrase"),
            Self::PrivProtocol => write!(f, "privacy protocol"),
            Self::PrivPassphrase => write!(f, "privacy passphrase"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_level_from_flags() {
        assert_eq!(
            MsgFlags::new(0x00).security_level().unwrap(),
            SecurityLevel::NoAuthNoPriv
        );
        assert_eq!(
            MsgFlags::new(0x01).security_level().unwrap(),
            SecurityLevel::AuthNoPriv
        );
        assert_eq!(
            MsgFlags::new(0x03).security_level().unwrap(),
            SecurityLevel::AuthPriv
        );
    }

    #[test]
    fn test_reportable_bit_ignored() {
        assert_eq!(
            MsgFlags::new(0x04).security_level().unwrap(),
            SecurityLevel::NoAuthNoPriv
        );
        assert_eq!(
            MsgFlags::new(0x05).security_level().unwrap(),
            SecurityLevel::AuthNoPriv
        );
        assert_eq!(
            MsgFlags::new(0x07).security_level().unwrap(),
            SecurityLevel::AuthPriv
        );
        assert!(MsgFlags::new(0x07).is_reportable());
        assert!(!MsgFlags::new(0x03).is_reportable());
    }

    #[test]
    fn test_priv_without_auth_rejected() {
        for bits in [0x02, 0x06] {
            let err = MsgFlags::new(bits).security_level().unwrap_err();
            assert!(matches!(
                err,
                Error::Config {
                    kind: ConfigErrorKind::InvalidSecurityLevel { flags }
                } if flags == bits
            ));
        }
    }

    #[test]
    fn test_from_level() {
        assert_eq!(MsgFlags::from(SecurityLevel::NoAuthNoPriv).bits(), 0x00);
        assert_eq!(MsgFlags::from(SecurityLevel::AuthNoPriv).bits(), 0x01);
        assert_eq!(MsgFlags::from(SecurityLevel::AuthPriv).bits(), 0x03);
        assert_eq!(
            MsgFlags::from_level(SecurityLevel::AuthPriv, true).bits(),
            0x07
        );
    }

    #[test]
    fn test_required_fields_are_cumulative() {
        let none = SecurityLevel::NoAuthNoPriv.required_fields();
        let auth = SecurityLevel::AuthNoPriv.required_fields();
        let full = SecurityLevel::AuthPriv.required_fields();

        assert!(auth.ends_with(none));
        assert!(full.ends_with(auth));
        assert_eq!(full.len(), 5);
    }

    #[test]
    fn test_level_ordering() {
        assert!(SecurityLevel::NoAuthNoPriv < SecurityLevel::AuthNoPriv);
        assert!(SecurityLevel::AuthNoPriv < SecurityLevel::AuthPriv);
        assert!(SecurityLevel::AuthPriv.requires_auth());
        assert!(!SecurityLevel::AuthNoPriv.requires_priv());
    }
}
