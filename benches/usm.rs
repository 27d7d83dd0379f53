use std::hint::black_box;

use bytes::Bytes;
use criterion::{Criterion, criterion_group, criterion_main};
use snmp_usm::v3::{AuthProtocol, MsgFlags, PrivProtocol, UsmSecurityParams};

const ENGINE_ID: &[u8] = b"\x80\x00\x1f\x88\x80\x12\x34\x56\x78\x9a\xbc\xde";

const LEVELS: [(&str, u8); 3] = [
    ("no_auth_no_priv", 0x04),
    ("auth_no_priv", 0x05),
    ("auth_priv", 0x07),
];

fn params() -> UsmSecurityParams {
    let mut params = UsmSecurityParams::builder("benchmark_user")
        .engine_id(Bytes::from_static(ENGINE_ID))
        .engine_boots(12)
        .engine_time(345_678)
        .auth(AuthProtocol::Sha256, "authpass123")
        .privacy(PrivProtocol::Aes128, "privpass123")
        .build()
        .expect("valid params");
    params.next_priv_params().expect("salt seeded");
    params
}

fn bench_validate(c: &mut Criterion) {
    let params = params();
    let flags = MsgFlags::new(0x07);
    c.bench_function("usm/validate_auth_priv", |b| {
        b.iter(|| black_box(&params).validate(black_box(flags)))
    });
}

fn bench_encode(c: &mut Criterion) {
    let params = params();
    let mut group = c.benchmark_group("usm/encode");
    for (name, bits) in LEVELS {
        let flags = MsgFlags::new(bits);
        group.bench_function(name, |b| {
            b.iter(|| black_box(&params).encode(black_box(flags)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let encoded = params().encode(MsgFlags::new(0x07)).expect("encodes").bytes;
    c.bench_function("usm/decode", |b| {
        b.iter(|| UsmSecurityParams::decode(black_box(encoded.clone())))
    });
}

fn bench_next_priv_params(c: &mut Criterion) {
    let mut params = params();
    c.bench_function("usm/next_priv_params", |b| {
        b.iter(|| params.next_priv_params())
    });
}

criterion_group!(
    benches,
    bench_validate,
    bench_encode,
    bench_decode,
    bench_next_priv_params
);
criterion_main!(benches);
