use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sm2_codec::{
    alloy_primitives::{b256, b512, hex},
    compress_public_key, constants::P, extract_signature_rs, math::modular_sqrt,
    parse_public_key_der, parse_secret_key_der, public_key_to_der, secret_key_to_der,
    signature_to_der, uncompress_public_key, RawPrivateKey, RawPublicKey, U256,
};

const D: RawPrivateKey = b256!("3945208f7b2144b13f36e38ac6d39f95889393692860b51a42fb81ef4df7c5b8");
const PUBLIC: RawPublicKey = b512!("09f9df311e5421a150dd7d161e4bc5c672179fad1833fc076bb08ff356f35020ccea490ce26775a52dc6ea718cc1aa600aed05fbf35e084a6632f6072da9ad13");

/// Benchmarks the key and signature conversions.
pub fn benchmark_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("SM2 codec benchmarks");
    let group_name = |description: &str| format!("codec bench | {description}");

    let public = PUBLIC;
    let (x, y) = public.split_at(32);
    let public_der = public_key_to_der(x, y).unwrap();
    let secret_der = secret_key_to_der(D.as_slice(), x, y).unwrap();
    let compressed = compress_public_key(PUBLIC.as_slice()).unwrap();
    let raw_signature = hex!("feeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee00007fababababababababababababababababababababababababababababab");
    let signature_der = signature_to_der(&raw_signature).unwrap();

    group.bench_function(group_name("public key to der"), |b| {
        b.iter(|| public_key_to_der(black_box(x), black_box(y)).unwrap())
    });

    group.bench_function(group_name("parse public key der"), |b| {
        b.iter(|| parse_public_key_der(black_box(&public_der)).unwrap())
    });

    group.bench_function(group_name("parse secret key der"), |b| {
        b.iter(|| parse_secret_key_der(black_box(&secret_der)).unwrap())
    });

    group.bench_function(group_name("compress"), |b| {
        b.iter(|| compress_public_key(black_box(public.as_slice())).unwrap())
    });

    group.bench_function(group_name("uncompress"), |b| {
        b.iter(|| uncompress_public_key(black_box(compressed.as_slice())).unwrap())
    });

    group.bench_function(group_name("signature to der"), |b| {
        b.iter(|| signature_to_der(black_box(&raw_signature)).unwrap())
    });

    group.bench_function(group_name("extract signature"), |b| {
        b.iter(|| extract_signature_rs(black_box(&signature_der)).unwrap())
    });

    // 2^255 - 19 takes the Tonelli-Shanks path
    let p25519 = U256::from_str_radix(
        "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
        16,
    )
    .unwrap();
    let square = U256::from(0xC0FFEE_u64).pow(U256::from(2));

    group.bench_function(group_name("sqrt 3 mod 4"), |b| {
        b.iter(|| modular_sqrt(black_box(square), P).unwrap())
    });

    group.bench_function(group_name("sqrt tonelli-shanks"), |b| {
        b.iter(|| modular_sqrt(black_box(square), p25519).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = benchmark_codec
}
criterion_main!(benches);
