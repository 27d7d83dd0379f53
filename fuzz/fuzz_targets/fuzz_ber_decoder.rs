#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_usm::ber::Decoder;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);

    // Fuzz the BER decoder primitives
    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_unsigned32();

    let mut decoder = Decoder::new(bytes.clone());
    let _ = decoder.read_octet_string();

    let mut decoder = Decoder::new(bytes.clone());
    if let Ok(mut seq) = decoder.read_sequence() {
        while !seq.is_empty() {
            if seq.read_octet_string().is_err() {
                break;
            }
        }
    }
});
