//! Typestate builders for USM security parameters.
//!
//! Builders prevent invalid configurations at compile time: calling
//! `.privacy()` before `.auth()` is a compile error, because authPriv
//! without authentication is not a valid security level.
//!
//! # Examples
//!
//! ```rust
//! use snmp_usm::v3::{AuthProtocol, PrivProtocol, SecurityLevel, UsmSecurityParams};
//!
//! let builder = UsmSecurityParams::builder("admin")
//!     .engine_id(b"\x80\x00\x1f\x88\x04test".as_slice())
//!     .engine_boots(3)
//!     .auth(AuthProtocol::Sha256, "authpass123")
//!     .privacy(PrivProtocol::Aes128, "privpass123");
//! assert_eq!(builder.security_level(), SecurityLevel::AuthPriv);
//!
//! let params = builder.build().unwrap();
//! assert!(params.local_salt().is_initialized());
//! ```

use bytes::Bytes;

use super::{AuthProtocol, Passphrase, PrivProtocol, SecurityLevel, UsmSecurityParams};
use crate::error::Result;

// Macro to implement engine field setters shared by all builders
macro_rules! impl_engine_methods {
    ($builder:ty) => {
        impl $builder {
            /// Set the authoritative engine ID.
            pub fn engine_id(mut self, engine_id: impl Into<Bytes>) -> Self {
                self.params.engine_id = engine_id.into();
                self
            }

            /// Set the authoritative engine boots counter.
            pub fn engine_boots(mut self, boots: u32) -> Self {
                self.params.engine_boots = boots;
                self
            }

            /// Set the authoritative engine time.
            pub fn engine_time(mut self, time: u32) -> Self {
                self.params.engine_time = time;
                self
            }
        }
    };
}

/// Builder for noAuthNoPriv security parameters.
///
/// Created via [`UsmSecurityParams::builder()`]. Call [`.auth()`](Self::auth)
/// to add authentication.
pub struct UsmBuilder {
    params: UsmSecurityParams,
}

impl UsmBuilder {
    pub(crate) fn new(username: impl Into<Bytes>) -> Self {
        Self {
            params: UsmSecurityParams::new(username),
        }
    }

    /// Add authentication protocol and passphrase.
    ///
    /// This transitions to [`UsmAuthBuilder`] with authNoPriv security level.
    pub fn auth(
        mut self,
        protocol: AuthProtocol,
        passphrase: impl Into<Passphrase>,
    ) -> UsmAuthBuilder {
        self.params.auth_protocol = Some(protocol);
        self.params.auth_passphrase = passphrase.into();
        UsmAuthBuilder {
            params: self.params,
        }
    }

    /// Security level the built parameters are configured for.
    pub fn security_level(&self) -> SecurityLevel {
        SecurityLevel::NoAuthNoPriv
    }

    /// Validate and build noAuthNoPriv parameters.
    pub fn build(self) -> Result<UsmSecurityParams> {
        finish(self.params, SecurityLevel::NoAuthNoPriv)
    }
}

impl_engine_methods!(UsmBuilder);

/// Builder for authNoPriv security parameters.
///
/// Created from [`UsmBuilder::auth()`]. Call [`.privacy()`](Self::privacy)
/// to add encryption.
pub struct UsmAuthBuilder {
    params: UsmSecurityParams,
}

impl UsmAuthBuilder {
    /// Add privacy protocol and passphrase.
    ///
    /// This transitions to [`UsmPrivBuilder`] with authPriv security level.
    pub fn privacy(
        mut self,
        protocol: PrivProtocol,
        passphrase: impl Into<Passphrase>,
    ) -> UsmPrivBuilder {
        self.params.priv_protocol = Some(protocol);
        self.params.priv_passphrase = passphrase.into();
        UsmPrivBuilder {
            params: self.params,
        }
    }

    /// Security level the built parameters are configured for.
    pub fn security_level(&self) -> SecurityLevel {
        SecurityLevel::AuthNoPriv
    }

    /// Validate and build authNoPriv parameters.
    pub fn build(self) -> Result<UsmSecurityParams> {
        finish(self.params, SecurityLevel::AuthNoPriv)
    }
}

impl_engine_methods!(UsmAuthBuilder);

/// Builder for authPriv security parameters.
///
/// Created from [`UsmAuthBuilder::privacy()`].
pub struct UsmPrivBuilder {
    params: UsmSecurityParams,
}

impl UsmPrivBuilder {
    /// Security level the built parameters are configured for.
    pub fn security_level(&self) -> SecurityLevel {
        SecurityLevel::AuthPriv
    }

    /// Validate, seed the local salt and build authPriv parameters.
    pub fn build(self) -> Result<UsmSecurityParams> {
        let mut params = finish(self.params, SecurityLevel::AuthPriv)?;
        params.init_salt()?;
        Ok(params)
    }

    /// Like [`build`](Self::build), seeding the salt from `rng`.
    pub fn build_with<R>(self, rng: &mut R) -> Result<UsmSecurityParams>
    where
        R: super::RandomSource + ?Sized,
    {
        let mut params = finish(self.params, SecurityLevel::AuthPriv)?;
        params.init_salt_with(rng)?;
        Ok(params)
    }
}

impl_engine_methods!(UsmPrivBuilder);

fn finish(params: UsmSecurityParams, level: SecurityLevel) -> Result<UsmSecurityParams> {
    params.validate_level(level)?;
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoxError, Error};
    use crate::v3::UsmField;

    #[test]
    fn test_no_auth_builder() {
        let params = UsmSecurityParams::builder("public_user")
            .engine_id(Bytes::from_static(b"engine"))
            .engine_boots(5)
            .engine_time(1000)
            .build()
            .unwrap();
        assert_eq!(&params.username[..], b"public_user");
        assert_eq!(&params.engine_id[..], b"engine");
        assert_eq!(params.engine_boots, 5);
        assert_eq!(params.engine_time, 1000);
        assert_eq!(params.auth_protocol, None);
        assert!(!params.local_salt().is_initialized());
    }

    #[test]
    fn test_auth_builder() {
        let builder = UsmSecurityParams::builder("alice").auth(AuthProtocol::Md5, "authpass123");
        assert_eq!(builder.security_level(), SecurityLevel::AuthNoPriv);
        let params = builder.build().unwrap();
        assert_eq!(params.auth_protocol, Some(AuthProtocol::Md5));
        assert_eq!(params.auth_passphrase, Passphrase::from("authpass123"));
    }

    #[test]
    fn test_priv_builder_seeds_salt() {
        let params = UsmSecurityParams::builder("alice")
            .auth(AuthProtocol::Sha1, "authpass123")
            .privacy(PrivProtocol::Des, "privpass123")
            .build()
            .unwrap();
        assert!(params.local_salt().is_initialized());
    }

    #[test]
    fn test_builder_rejects_empty_fields() {
        let err = UsmSecurityParams::builder("").build().unwrap_err();
        assert_eq!(err.missing(), Some(UsmField::Username));

        let err = UsmSecurityParams::builder("alice")
            .auth(AuthProtocol::Sha1, "")
            .build()
            .unwrap_err();
        assert_eq!(err.missing(), Some(UsmField::AuthPassphrase));

        let err = UsmSecurityParams::builder("alice")
            .auth(AuthProtocol::Sha1, "authpass123")
            .privacy(PrivProtocol::Aes128, "")
            .build()
            .unwrap_err();
        assert_eq!(err.missing(), Some(UsmField::PrivPassphrase));
    }

    #[test]
    fn test_priv_builder_random_failure() {
        struct Failing;
        impl crate::v3::RandomSource for Failing {
            fn fill(&mut self, _dest: &mut [u8]) -> std::result::Result<(), BoxError> {
                Err("no entropy".into())
            }
        }

        let err = UsmSecurityParams::builder("alice")
            .auth(AuthProtocol::Sha1, "authpass123")
            .privacy(PrivProtocol::Aes256, "privpass123")
            .build_with(&mut Failing)
            .unwrap_err();
        assert!(matches!(err, Error::Randomness { needed: 8, .. }));
    }
}
