use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use otf_rlnc::coding::CodingVectorFormat;
use otf_rlnc::{
    Coder, DecoderFactory, EncoderFactory, FieldType, PayloadConsumer, PayloadProducer,
};

const FIELDS: [FieldType; 4] = [
    FieldType::Binary,
    FieldType::Binary4,
    FieldType::Binary8,
    FieldType::Binary16,
];

const SYMBOLS: usize = 16;
const SYMBOL_SIZE: usize = 1024;

fn source() -> Vec<u8> {
    (0..SYMBOLS * SYMBOL_SIZE).map(|i| (i * 7 + 3) as u8).collect()
}

/// Payloads until a fresh decoder completes
fn coded_payloads(field: FieldType, density: f32) -> Vec<Vec<u8>> {
    let data = source();
    let mut out = vec![0u8; data.len()];
    let mut encoder = EncoderFactory::new(field, SYMBOLS, SYMBOL_SIZE)
        .with_systematic(false)
        .with_density(density)
        .build()
        .unwrap();
    encoder.set_seed(42);
    encoder.set_symbols_storage(&data);
    let mut decoder = DecoderFactory::new(field, SYMBOLS, SYMBOL_SIZE)
        .build()
        .unwrap();
    decoder.set_symbols_storage(&mut out);

    let mut payloads = Vec::new();
    while !decoder.is_complete() {
        let mut payload = vec![0u8; encoder.payload_size()];
        let size = encoder.produce_payload(&mut payload);
        payload.truncate(size);
        decoder.consume_payload(&payload);
        payloads.push(payload);
    }
    payloads
}

fn bench_rlnc_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("RLNC Encoding");
    group.throughput(Throughput::Bytes(SYMBOL_SIZE as u64));
    let data = source();

    for field in FIELDS {
        let mut encoder = EncoderFactory::new(field, SYMBOLS, SYMBOL_SIZE)
            .with_systematic(false)
            .build()
            .unwrap();
        encoder.set_symbols_storage(&data);
        let mut payload = vec![0u8; encoder.payload_size()];

        group.bench_function(BenchmarkId::new("payload", format!("{field:?}")), |b| {
            b.iter(|| black_box(encoder.produce_payload(&mut payload)))
        });
    }
    group.finish();
}

fn bench_sparse_rlnc_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sparse RLNC Encoding");
    group.throughput(Throughput::Bytes(SYMBOL_SIZE as u64));
    let data = source();

    for density in [0.1f32, 0.3, 0.5, 1.0] {
        let mut encoder = EncoderFactory::new(FieldType::Binary8, SYMBOLS, SYMBOL_SIZE)
            .with_systematic(false)
            .with_density(density)
            .with_coding_vector_format(CodingVectorFormat::SparseSeed)
            .build()
            .unwrap();
        encoder.set_symbols_storage(&data);
        let mut payload = vec![0u8; encoder.payload_size()];

        group.bench_with_input(format!("density_{density}"), &density, |b, _| {
            b.iter(|| black_box(encoder.produce_payload(&mut payload)))
        });
    }
    group.finish();
}

fn bench_rlnc_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("RLNC Decoding");
    group.throughput(Throughput::Bytes((SYMBOLS * SYMBOL_SIZE) as u64));

    for field in FIELDS {
        let payloads = coded_payloads(field, 1.0);
        let mut out = vec![0u8; SYMBOLS * SYMBOL_SIZE];

        group.bench_function(BenchmarkId::new("generation", format!("{field:?}")), |b| {
            b.iter(|| {
                let mut decoder = DecoderFactory::new(field, SYMBOLS, SYMBOL_SIZE)
                    .build()
                    .unwrap();
                decoder.set_symbols_storage(&mut out);
                for payload in &payloads {
                    decoder.consume_payload(payload);
                }
                black_box(decoder.rank())
            })
        });
    }
    group.finish();
}

fn bench_rlnc_recoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("RLNC Recoding");
    group.throughput(Throughput::Bytes(SYMBOL_SIZE as u64));

    for field in FIELDS {
        let payloads = coded_payloads(field, 1.0);
        let mut out = vec![0u8; SYMBOLS * SYMBOL_SIZE];
        let mut relay = DecoderFactory::new(field, SYMBOLS, SYMBOL_SIZE)
            .build()
            .unwrap();
        relay.set_symbols_storage(&mut out);
        // Half a generation: recoding without having decoded
        for payload in payloads.iter().take(SYMBOLS / 2) {
            relay.consume_payload(payload);
        }
        let mut payload = vec![0u8; relay.payload_size()];

        group.bench_function(BenchmarkId::new("payload", format!("{field:?}")), |b| {
            b.iter(|| black_box(relay.produce_payload(&mut payload)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_rlnc_encoding,
    bench_sparse_rlnc_encoding,
    bench_rlnc_decoding,
    bench_rlnc_recoding
);
criterion_main!(benches);
