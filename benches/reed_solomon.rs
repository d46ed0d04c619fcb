use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qr_encode::encoder::ecc::add_error_correction;
use qr_encode::encoder::reed_solomon::ReedSolomonEncoder;
use qr_encode::encoder::tables::data_codewords;
use qr_encode::{ECLevel, Version};

fn bench_rs_block(c: &mut Criterion) {
    let encoder = ReedSolomonEncoder::new(30);
    let data: Vec<u8> = (0..118u32).map(|i| (i * 31 % 256) as u8).collect();
    c.bench_function("rs_encode_118_plus_30", |b| {
        b.iter(|| encoder.encode(black_box(&data)))
    });
}

fn bench_interleave_v40(c: &mut Criterion) {
    let version = Version::MAX;
    let data = vec![0xA5u8; data_codewords(version, ECLevel::H)];
    c.bench_function("ecc_interleave_v40_h", |b| {
        b.iter(|| add_error_correction(black_box(&data), version, ECLevel::H))
    });
}

criterion_group!(benches, bench_rs_block, bench_interleave_v40);
criterion_main!(benches);
