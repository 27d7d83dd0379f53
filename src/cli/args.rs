//! Command-line argument definitions.

use clap::{Args, ValueEnum};

use crate::v3::{AuthProtocol, MsgFlags, PrivProtocol, SecurityLevel, UsmSecurityParams};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary and hex dump.
    #[default]
    Human,
    /// JSON object.
    Json,
}

/// Security level as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LevelArg {
    #[value(alias = "noAuthNoPriv")]
    NoAuthNoPriv,
    #[value(alias = "authNoPriv")]
    AuthNoPriv,
    #[value(alias = "authPriv")]
    AuthPriv,
}

impl From<LevelArg> for SecurityLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::NoAuthNoPriv => SecurityLevel::NoAuthNoPriv,
            LevelArg::AuthNoPriv => SecurityLevel::AuthNoPriv,
            LevelArg::AuthPriv => SecurityLevel::AuthPriv,
        }
    }
}

/// Octet string given as hex on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexBytes(pub Vec<u8>);

impl std::str::FromStr for HexBytes {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map(HexBytes)
    }
}

/// USM security arguments.
#[derive(Debug, Args)]
pub struct UsmArgs {
    /// Security name (msgUserName).
    #[arg(short = 'u', long)]
    pub username: String,

    /// Authoritative engine ID in hex (e.g. 80001f8804...).
    #[arg(short = 'e', long = "engine-id", default_value = "")]
    pub engine_id: HexBytes,

    /// Authoritative engine boots.
    #[arg(long, default_value_t = 0)]
    pub engine_boots: u32,

    /// Authoritative engine time.
    #[arg(long, default_value_t = 0)]
    pub engine_time: u32,

    /// Authentication protocol (MD5, SHA, SHA-224, SHA-256, SHA-384, SHA-512).
    #[arg(short = 'a', long = "auth-protocol")]
    pub auth_protocol: Option<AuthProtocol>,

    /// Authentication passphrase.
    #[arg(short = 'A', long = "auth-password")]
    pub auth_password: Option<String>,

    /// Privacy protocol (DES, 3DES, AES, AES-192, AES-256).
    #[arg(short = 'x', long = "priv-protocol")]
    pub priv_protocol: Option<PrivProtocol>,

    /// Privacy passphrase.
    #[arg(short = 'X', long = "priv-password")]
    pub priv_password: Option<String>,

    /// Security level. Defaults to the highest level the configured
    /// protocols allow.
    #[arg(short = 'l', long = "level", value_enum)]
    pub level: Option<LevelArg>,

    /// Set the reportable flag in msgFlags.
    #[arg(long)]
    pub reportable: bool,
}

impl UsmArgs {
    /// Check argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.priv_protocol.is_some() && self.auth_protocol.is_none() {
            return Err("privacy protocol requires an authentication protocol".into());
        }
        Ok(())
    }

    /// Requested security level.
    pub fn security_level(&self) -> SecurityLevel {
        match self.level {
            Some(level) => level.into(),
            None if self.priv_protocol.is_some() => SecurityLevel::AuthPriv,
            None if self.auth_protocol.is_some() => SecurityLevel::AuthNoPriv,
            None => SecurityLevel::NoAuthNoPriv,
        }
    }

    /// msgFlags for the requested level.
    pub fn msg_flags(&self) -> MsgFlags {
        MsgFlags::from_level(self.security_level(), self.reportable)
    }

    /// Build security parameters from the arguments, without validation.
    pub fn to_params(&self) -> UsmSecurityParams {
        let mut params = UsmSecurityParams::new(self.username.clone().into_bytes());
        params.engine_id = self.engine_id.0.clone().into();
        params.engine_boots = self.engine_boots;
        params.engine_time = self.engine_time;
        params.auth_protocol = self.auth_protocol;
        params.priv_protocol = self.priv_protocol;
        if let Some(ref p) = self.auth_password {
            params.auth_passphrase = p.as_str().into();
        }
        if let Some(ref p) = self.priv_password {
            params.priv_passphrase = p.as_str().into();
        }
        params
    }
}

/// Output arguments.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(short = 'O', long = "format", value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Enable debug tracing on stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl OutputArgs {
    /// Initialize tracing. `RUST_LOG` overrides the default filter.
    pub fn init_tracing(&self) {
        use tracing_subscriber::EnvFilter;

        let default = if self.verbose {
            "snmp_usm=trace"
        } else {
            "snmp_usm=warn"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Parse a hex string, allowing an optional `0x` prefix and `:`/space separators.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let digits: Vec<u8> = s.bytes().filter(|b| !matches!(b, b':' | b' ')).collect();

    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in '{}'", s));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let hi = hex_digit(pair[0]);
            let lo = hex_digit(pair[1]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => Err(format!("invalid hex digit in '{}'", s)),
            }
        })
        .collect()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
