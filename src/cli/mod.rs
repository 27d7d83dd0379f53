//! CLI utilities for snmp-usm.
//!
//! This module provides command-line argument parsing and output formatting
//! for the `usm-encode` tool.
//!
//! This module is only available with the `cli` feature.

pub mod args;
pub mod output;
