//! Common test fixtures and constants.

use bytes::Bytes;
use snmp_usm::v3::{AuthProtocol, Passphrase, PrivProtocol, UsmSecurityParams};

// =============================================================================
// Engine and user
// =============================================================================

/// Engine ID used by the reference scenario.
pub const ENGINE_ID: &[u8] = b"80001f88";
pub const ENGINE_BOOTS: u32 = 1;
pub const ENGINE_TIME: u32 = 42;
pub const USERNAME: &str = "alice";

/// Auth password for all V3 users
pub const AUTH_PASSWORD: &str = "authpass123";
/// Privacy password for all V3 users
pub const PRIV_PASSWORD: &str = "privpass123";

/// msgPrivacyParameters used where a fixed value is needed.
pub const PRIV_PARAMS: [u8; 8] = [0x00, 0x00, 0x00, 0x01, 0xDE, 0xAD, 0xBE, 0xEF];

// =============================================================================
// Parameter sets
// =============================================================================

/// Parameters with every field populated (SHA-1 / AES-128), salt unseeded.
pub fn full_params() -> UsmSecurityParams {
    let mut params = UsmSecurityParams::new(USERNAME);
    params.engine_id = Bytes::from_static(ENGINE_ID);
    params.engine_boots = ENGINE_BOOTS;
    params.engine_time = ENGINE_TIME;
    params.auth_protocol = Some(AuthProtocol::Sha1);
    params.auth_passphrase = Passphrase::from(AUTH_PASSWORD);
    params.priv_protocol = Some(PrivProtocol::Aes128);
    params.priv_passphrase = Passphrase::from(PRIV_PASSWORD);
    params.priv_params = Bytes::from_static(&PRIV_PARAMS);
    params
}

/// Parameters for the given privacy protocol, or none.
pub fn params_with_priv(protocol: Option<PrivProtocol>) -> UsmSecurityParams {
    let mut params = full_params();
    params.priv_protocol = protocol;
    params
}
