//! Prelude module for convenient imports.
//!
//! This module provides a convenient set of commonly-used types for working
//! with USM security parameters.
//!
//! # Usage
//!
//! ```rust
//! use snmp_usm::prelude::*;
//! ```
//!
//! This imports:
//! - Core types: [`UsmSecurityParams`], [`EncodedUsmParams`], [`MsgFlags`], [`SecurityLevel`]
//! - Error handling: [`Error`], [`Result`]
//! - V3 protocols: [`AuthProtocol`], [`PrivProtocol`]

pub use crate::error::{Error, Result};
pub use crate::v3::{
    AuthProtocol, EncodedUsmParams, MsgFlags, PrivProtocol, SecurityLevel, UsmSecurityParams,
    patch_auth_params,
};
