//! USM security parameters (RFC 3414 Section 2.4).
//!
//! ```text
//! UsmSecurityParameters ::= SEQUENCE {
//!     msgAuthoritativeEngineID     OCTET STRING,
//!     msgAuthoritativeEngineBoots  INTEGER (0..2147483647),
//!     msgAuthoritativeEngineTime   INTEGER (0..2147483647),
//!     msgUserName                  OCTET STRING (SIZE(0..32)),
//!     msgAuthenticationParameters  OCTET STRING,
//!     msgPrivacyParameters         OCTET STRING
//! }
//! ```

use bytes::Bytes;

use super::builder::UsmBuilder;
use super::salt::{LocalSalt, OsRandom, RandomSource};
use super::{AuthProtocol, MsgFlags, Passphrase, PrivProtocol, SecurityLevel, UsmField};
use crate::ber::{Decoder, EncodeBuf, tag};
use crate::error::{ConfigErrorKind, EncodeErrorKind, Error, Result};

/// Placeholder length when no authentication protocol is configured (HMAC-96).
const DEFAULT_AUTH_PARAMS_LEN: usize = 12;

/// Security parameters for one USM session.
///
/// Holds the wire fields of `UsmSecurityParameters` together with the
/// caller's protocol and passphrase choices and the session's local salt.
/// Cloning produces an independent session value, salt included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsmSecurityParams {
    /// msgAuthoritativeEngineID
    pub engine_id: Bytes,
    /// msgAuthoritativeEngineBoots
    pub engine_boots: u32,
    /// msgAuthoritativeEngineTime
    pub engine_time: u32,
    /// msgUserName
    pub username: Bytes,
    /// msgAuthenticationParameters as last decoded. Encoding always emits a
    /// zeroed placeholder instead.
    pub auth_params: Bytes,
    /// msgPrivacyParameters
    pub priv_params: Bytes,
    /// Authentication protocol, `None` for no authentication.
    pub auth_protocol: Option<AuthProtocol>,
    /// Privacy protocol, `None` for no privacy.
    pub priv_protocol: Option<PrivProtocol>,
    /// Authentication passphrase.
    pub auth_passphrase: Passphrase,
    /// Privacy passphrase.
    pub priv_passphrase: Passphrase,
    local_salt: LocalSalt,
}

/// Encoded security parameters and the location of the auth placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedUsmParams {
    /// The complete `UsmSecurityParameters` SEQUENCE.
    pub bytes: Bytes,
    /// Offset from the start of `bytes` to the first value byte of
    /// msgAuthenticationParameters.
    pub auth_offset: usize,
    /// Placeholder length (0 when the level has no authentication).
    pub auth_len: usize,
}

impl EncodedUsmParams {
    /// Split into the encoded bytes and the auth placeholder offset.
    pub fn into_parts(self) -> (Bytes, usize) {
        (self.bytes, self.auth_offset)
    }
}

impl UsmSecurityParams {
    /// Create noAuthNoPriv parameters for a user.
    pub fn new(username: impl Into<Bytes>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// Start a typestate builder for a user.
    pub fn builder(username: impl Into<Bytes>) -> UsmBuilder {
        UsmBuilder::new(username)
    }

    /// Check that every field required by the security level in `flags`
    /// is populated.
    ///
    /// Bits other than authFlag and privFlag are ignored. Cheap and free of
    /// side effects; run it before every outgoing message.
    pub fn validate(&self, flags: MsgFlags) -> Result<()> {
        self.validate_level(flags.security_level()?)
    }

    /// Check the fields required by `level`, in
    /// [`SecurityLevel::required_fields`] order.
    pub fn validate_level(&self, level: SecurityLevel) -> Result<()> {
        match level
            .required_fields()
            .iter()
            .find(|field| !self.is_populated(**field))
        {
            Some(&field) => {
                tracing::debug!(%field, %level, "security level check failed");
                Err(Error::missing_field(field, level))
            }
            None => Ok(()),
        }
    }

    /// Whether a validated field is set and non-empty.
    pub fn is_populated(&self, field: UsmField) -> bool {
        match field {
            UsmField::Username => !self.username.is_empty(),
            UsmField::AuthProtocol => self.auth_protocol.is_some(),
            UsmField::AuthPassphrase => !self.auth_passphrase.is_empty(),
            UsmField::PrivProtocol => self.priv_protocol.is_some(),
            UsmField::PrivPassphrase => !self.priv_passphrase.is_empty(),
        }
    }

    /// Seed the local salt from the operating system's secure random source.
    ///
    /// Call once at session establishment. Does nothing when no privacy
    /// protocol is configured. If the privacy protocol has since moved to a
    /// family with a different salt width, the salt is seeded again for it.
    pub fn init_salt(&mut self) -> Result<()> {
        self.init_salt_with(&mut OsRandom)
    }

    /// Seed the local salt from `rng`.
    pub fn init_salt_with<R>(&mut self, rng: &mut R) -> Result<()>
    where
        R: RandomSource + ?Sized,
    {
        let Some(protocol) = self.priv_protocol else {
            return Ok(());
        };
        match self.local_salt.width() {
            Some(width) if width == protocol.salt_width() => {
                return Err(Error::config(ConfigErrorKind::SaltAlreadyInitialized));
            }
            Some(width) => {
                tracing::debug!(
                    %protocol,
                    from = %width,
                    "privacy protocol family changed, reseeding salt"
                );
            }
            None => {}
        }

        self.local_salt = LocalSalt::generate(protocol, rng)?;
        tracing::debug!(%protocol, "initialized local privacy salt");
        Ok(())
    }

    /// Current salt state.
    pub fn local_salt(&self) -> LocalSalt {
        self.local_salt
    }

    /// Produce the msgPrivacyParameters for the next encrypted message.
    ///
    /// The value is stored in `priv_params` and returned; the local salt is
    /// advanced so the next call yields a different value.
    ///
    /// Fails if the salt was seeded for a protocol family of another width;
    /// call [`init_salt`](Self::init_salt) again after changing families.
    pub fn next_priv_params(&mut self) -> Result<Bytes> {
        let Some(protocol) = self.priv_protocol else {
            return Err(Error::config(ConfigErrorKind::NoPrivProtocol));
        };
        if let Some(actual) = self.local_salt.width() {
            let expected = protocol.salt_width();
            if actual != expected {
                return Err(Error::config(ConfigErrorKind::SaltWidthMismatch {
                    expected,
                    actual,
                }));
            }
        }
        let salt = self.local_salt.advance(self.engine_boots)?;
        self.priv_params = Bytes::copy_from_slice(&salt);
        Ok(self.priv_params.clone())
    }

    /// Length of the msgAuthenticationParameters placeholder for this
    /// configuration's authentication protocol.
    pub fn auth_params_len(&self) -> usize {
        self.auth_protocol
            .map_or(DEFAULT_AUTH_PARAMS_LEN, AuthProtocol::mac_len)
    }

    /// Encode as a `UsmSecurityParameters` SEQUENCE for the security level in
    /// `flags`.
    ///
    /// With authentication, msgAuthenticationParameters is a zero placeholder
    /// of [`auth_params_len`](Self::auth_params_len) bytes whose location is
    /// returned in [`EncodedUsmParams::auth_offset`]; the digest is patched in
    /// once the whole message is encoded. Without it, the field is empty.
    /// msgPrivacyParameters carries `priv_params` only with privacy.
    ///
    /// The placeholder is 12 bytes (`04 0C` followed by twelve zeros) for the
    /// HMAC-96 protocols MD5 and SHA-1, and when no protocol is set. The
    /// SHA-2 protocols of RFC 7860 use their longer truncated MAC lengths:
    /// 16, 24, 32 and 48 bytes for SHA-224, SHA-256, SHA-384 and SHA-512.
    pub fn encode(&self, flags: MsgFlags) -> Result<EncodedUsmParams> {
        self.encode_level(flags.security_level()?)
    }

    /// Encode for an explicit security level.
    pub fn encode_level(&self, level: SecurityLevel) -> Result<EncodedUsmParams> {
        let auth_len = if level.requires_auth() {
            self.auth_params_len()
        } else {
            0
        };

        let mut buf = EncodeBuf::with_capacity(
            32 + self.engine_id.len() + self.username.len() + auth_len + self.priv_params.len(),
        );
        // Distance from the first auth params value byte to the end of the output
        let mut auth_tail = 0;

        // Reverse buffer: fields are pushed last to first
        buf.push_sequence(|buf| {
            if level.requires_priv() {
                buf.push_octet_string(&self.priv_params)?;
            } else {
                buf.push_octet_string(&[])?;
            }

            buf.push_zeros(auth_len);
            auth_tail = buf.len();
            buf.push_length(auth_len)?;
            buf.push_tag(tag::universal::OCTET_STRING);

            buf.push_octet_string(&self.username)?;
            buf.push_unsigned32(tag::universal::INTEGER, self.engine_time);
            buf.push_unsigned32(tag::universal::INTEGER, self.engine_boots);
            buf.push_octet_string(&self.engine_id)
        })?;

        let auth_offset = buf.len() - auth_tail;
        let bytes = buf.finish();
        tracing::trace!(
            %level,
            len = bytes.len(),
            auth_offset,
            "encoded USM security parameters"
        );

        Ok(EncodedUsmParams {
            bytes,
            auth_offset,
            auth_len,
        })
    }

    /// Decode a complete `UsmSecurityParameters` SEQUENCE.
    ///
    /// Only the wire fields are filled in; protocols, passphrases and salt
    /// are left unset.
    pub fn decode(data: Bytes) -> Result<Self> {
        let mut decoder = Decoder::new(data);
        let params = Self::decode_from(&mut decoder)?;
        decoder.expect_end()?;
        Ok(params)
    }

    /// Decode a `UsmSecurityParameters` SEQUENCE from a decoder, leaving any
    /// following data unread.
    pub fn decode_from(decoder: &mut Decoder) -> Result<Self> {
        let mut seq = decoder.read_sequence()?;

        let engine_id = seq.read_octet_string()?;
        let engine_boots = seq.read_unsigned32()?;
        let engine_time = seq.read_unsigned32()?;
        let username = seq.read_octet_string()?;
        let auth_params = seq.read_octet_string()?;
        let priv_params = seq.read_octet_string()?;
        seq.expect_end()?;

        Ok(Self {
            engine_id,
            engine_boots,
            engine_time,
            username,
            auth_params,
            priv_params,
            ..Default::default()
        })
    }
}

/// Write a computed digest into the auth params placeholder of a finished
/// message.
///
/// `offset` is the placeholder position within `msg`: the
/// [`auth_offset`](EncodedUsmParams::auth_offset) plus wherever the security
/// parameters ended up in the outer message. The OCTET STRING header in front
/// of `offset` must announce exactly `mac.len()` bytes.
pub fn patch_auth_params(msg: &mut [u8], offset: usize, mac: &[u8]) -> Result<()> {
    let missing = || Error::encode(EncodeErrorKind::MissingAuthParams { offset });

    let header = offset.checked_sub(2).ok_or_else(missing)?;
    if offset > msg.len() || msg[header] != tag::universal::OCTET_STRING {
        return Err(missing());
    }

    let expected = msg[header + 1] as usize;
    if expected != mac.len() {
        return Err(Error::encode(EncodeErrorKind::WrongMacLength {
            expected,
            actual: mac.len(),
        }));
    }
    let end = offset + expected;
    if end > msg.len() {
        return Err(missing());
    }

    msg[offset..end].copy_from_slice(mac);
    Ok(())
}
