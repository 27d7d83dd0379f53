#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_usm::{MsgFlags, UsmSecurityParams};

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode and decode to the same wire fields
    let Ok(params) = UsmSecurityParams::decode(Bytes::copy_from_slice(data)) else {
        return;
    };

    let encoded = params
        .encode(MsgFlags::new(0x03))
        .expect("decoded params must encode");
    let again = UsmSecurityParams::decode(encoded.bytes).expect("encoded params must decode");

    assert_eq!(again.engine_id, params.engine_id);
    assert_eq!(again.engine_boots, params.engine_boots);
    assert_eq!(again.engine_time, params.engine_time);
    assert_eq!(again.username, params.username);
    assert_eq!(again.priv_params, params.priv_params);
});
