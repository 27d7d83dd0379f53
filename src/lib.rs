//! SNMPv3 User-based Security Model (USM) security parameters.
//!
//! This crate covers the part of an SNMPv3 message layer that deals with
//! `msgSecurityParameters`:
//!
//! - Checking that a user's configuration satisfies the security level
//!   requested in msgFlags
//! - Seeding and advancing the per-session privacy salt
//! - Encoding the BER `UsmSecurityParameters` SEQUENCE, and reporting where
//!   the authentication digest must be patched in afterwards
//!
//! # Example
//!
//! ```rust
//! use snmp_usm::prelude::*;
//!
//! # fn main() -> snmp_usm::Result<()> {
//! let mut params = UsmSecurityParams::builder("alice")
//!     .engine_id(b"80001f88".as_slice())
//!     .engine_boots(1)
//!     .engine_time(42)
//!     .auth(AuthProtocol::Sha1, "authpass123")
//!     .privacy(PrivProtocol::Aes128, "privpass123")
//!     .build()?;
//!
//! let flags = MsgFlags::from_level(SecurityLevel::AuthPriv, true);
//! params.validate(flags)?;
//! params.next_priv_params()?;
//!
//! let encoded = params.encode(flags)?;
//! assert_eq!(&encoded.bytes[encoded.auth_offset - 2..encoded.auth_offset], &[0x04, 12]);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod ber;
pub mod error;
pub mod prelude;
pub mod v3;

#[cfg(feature = "cli")]
#[cfg_attr(docsrs, doc(cfg(feature = "cli")))]
pub mod cli;

pub use error::{Error, Result};
pub use v3::{
    AuthProtocol, EncodedUsmParams, MsgFlags, PrivProtocol, SecurityLevel, UsmSecurityParams,
};
