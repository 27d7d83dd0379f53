//! Output formatting for CLI tools.
//!
//! Supports human-readable and JSON output formats.

use crate::cli::args::OutputFormat;
use crate::v3::{AuthProtocol, EncodedUsmParams, PrivProtocol, SecurityLevel, UsmSecurityParams};
use serde::Serialize;
use std::io::{self, Write};

/// Result of encoding security parameters.
#[derive(Debug, Serialize)]
pub struct EncodeReport {
    pub username: String,
    pub security_level: SecurityLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_protocol: Option<AuthProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priv_protocol: Option<PrivProtocol>,
    pub engine_id: String,
    pub engine_boots: u32,
    pub engine_time: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priv_params: Option<String>,
    pub length: usize,
    pub auth_offset: usize,
    pub auth_len: usize,
    pub hex: String,
}

impl EncodeReport {
    /// Build a report for encoded parameters.
    pub fn new(
        params: &UsmSecurityParams,
        level: SecurityLevel,
        encoded: &EncodedUsmParams,
    ) -> Self {
        Self {
            username: String::from_utf8_lossy(&params.username).into_owned(),
            security_level: level,
            auth_protocol: params.auth_protocol,
            priv_protocol: params.priv_protocol,
            engine_id: format_hex_compact(&params.engine_id),
            engine_boots: params.engine_boots,
            engine_time: params.engine_time,
            priv_params: level
                .requires_priv()
                .then(|| format_hex_compact(&params.priv_params)),
            length: encoded.bytes.len(),
            auth_offset: encoded.auth_offset,
            auth_len: encoded.auth_len,
            hex: format_hex_compact(&encoded.bytes),
        }
    }
}

/// Write a report to stdout in the chosen format.
pub fn write_report(format: OutputFormat, report: &EncodeReport) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Human => write_human(&mut stdout, report),
        OutputFormat::Json => write_json(&mut stdout, report),
    }
}

fn write_human<W: Write>(w: &mut W, report: &EncodeReport) -> io::Result<()> {
    writeln!(w, "User:        {}", report.username)?;
    writeln!(w, "Level:       {}", report.security_level)?;
    if let Some(p) = report.auth_protocol {
        writeln!(w, "Auth:        {}", p)?;
    }
    if let Some(p) = report.priv_protocol {
        writeln!(w, "Privacy:     {}", p)?;
    }
    writeln!(w, "Engine ID:   {}", report.engine_id)?;
    writeln!(
        w,
        "Boots/Time:  {}/{}",
        report.engine_boots, report.engine_time
    )?;
    if let Some(ref salt) = report.priv_params {
        writeln!(w, "Priv params: {}", salt)?;
    }
    writeln!(
        w,
        "Auth params: offset {} ({} bytes)",
        report.auth_offset, report.auth_len
    )?;
    writeln!(w, "Encoded ({} bytes):", report.length)?;
    for line in report.hex.as_bytes().chunks(32) {
        // chunks of a hex string are valid ASCII
        let line = std::str::from_utf8(line).unwrap_or_default();
        writeln!(w, "  {}", format_hex_spaced(line))?;
    }
    Ok(())
}

fn write_json<W: Write>(w: &mut W, report: &EncodeReport) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    writeln!(w, "{}", json)
}

/// Format bytes as contiguous lowercase hex.
fn format_hex_compact(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Insert a space between each pair of hex digits.
fn format_hex_spaced(hex: &str) -> String {
    hex.as_bytes()
        .chunks(2)
        .filter_map(|pair| std::str::from_utf8(pair).ok())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v3::MsgFlags;
    use bytes::Bytes;

    fn report() -> EncodeReport {
        let mut params = UsmSecurityParams::new("alice");
        params.engine_id = Bytes::from_static(b"80001f88");
        params.engine_boots = 1;
        params.engine_time = 42;
        params.auth_protocol = Some(AuthProtocol::Sha1);
        let encoded = params.encode(MsgFlags::new(0x01)).unwrap();
        EncodeReport::new(&params, SecurityLevel::AuthNoPriv, &encoded)
    }

    #[test]
    fn test_hex_helpers() {
        assert_eq!(format_hex_compact(&[0x30, 0x0A, 0xFF]), "300aff");
        assert_eq!(format_hex_spaced("300aff"), "30 0a ff");
    }

    #[test]
    fn test_human_output() {
        let mut out = Vec::new();
        write_human(&mut out, &report()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Level:       authNoPriv"));
        assert!(text.contains("Auth:        SHA"));
        assert!(text.contains("offset 27 (12 bytes)"));
        assert!(text.contains("  30 27 04 08"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_json(&mut out, &report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["username"], "alice");
        assert_eq!(value["security_level"], "AuthNoPriv");
        assert_eq!(value["auth_offset"], 27);
        assert_eq!(value["engine_id"], "3830303031663838");
        assert!(value.get("priv_params").is_none());
        assert!(value["hex"].as_str().unwrap().starts_with("3027"));
    }
}
