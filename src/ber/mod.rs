//! BER (Basic Encoding Rules) codec for USM security parameters.
//!
//! Only the subset of X.690 that the USM wire format needs is provided:
//! INTEGER, OCTET STRING and SEQUENCE, with definite-length encoding.

mod decode;
mod encode;
mod length;
pub mod tag;

pub use decode::*;
pub use encode::*;
pub use length::*;
