//! # SMS Verifier Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Canonical encode + digest | < 5µs |
//! | RSA-2048 verify (valid or invalid) | < 1ms |
//! | Bulk session, 100 messages | < 100ms |
//! | NDJSON bulk stream, 100 lines | < 100ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use futures::stream;
use shared_types::SmsRequest;
use sms_signature_verification::{
    canonical_digest, verify_ndjson_stream, BulkSession, SmsVerificationApi,
    DEFAULT_MAX_LINE_BYTES,
};
use sms_tests::fixtures::{random_payload, service, sign, signed, to_json};
use std::convert::Infallible;
use std::time::Duration;

fn bench_canonical_digest(c: &mut Criterion) {
    let payload = random_payload("bench-1");

    c.bench_function("canonical_digest", |b| {
        b.iter(|| black_box(canonical_digest(black_box(&payload))))
    });
}

fn bench_single_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("rsa-2048-verify");
    group.measurement_time(Duration::from_secs(10));

    let service = service();
    let valid = signed(random_payload("valid"));

    // Signature of a different payload: full RSA work, then a mismatch
    let invalid = SmsRequest::new(random_payload("invalid"), sign(&random_payload("other")));

    group.bench_function("valid", |b| {
        b.iter(|| black_box(service.verify_request(black_box(&valid))))
    });
    group.bench_function("invalid", |b| {
        b.iter(|| black_box(service.verify_request(black_box(&invalid))))
    });
    group.bench_function("missing_signature", |b| {
        let unsigned = SmsRequest::new(random_payload("unsigned"), "");
        b.iter(|| black_box(service.verify_request(black_box(&unsigned))))
    });

    group.finish();
}

fn bench_bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk");
    group.measurement_time(Duration::from_secs(10));

    let service = service();

    for size in [10usize, 100] {
        let requests: Vec<SmsRequest> = (0..size)
            .map(|i| signed(random_payload(&format!("m{i}"))))
            .collect();
        let body: Vec<u8> = requests
            .iter()
            .flat_map(|r| (to_json(r) + "\n").into_bytes())
            .collect();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("session", size), &requests, |b, requests| {
            b.iter(|| {
                let mut session = BulkSession::new(service.as_ref());
                for request in requests {
                    let _ = session.on_message(request);
                }
                black_box(session.on_complete())
            })
        });

        group.bench_with_input(BenchmarkId::new("ndjson", size), &body, |b, body| {
            b.iter(|| {
                let chunks = stream::iter(
                    body.chunks(4096)
                        .map(Ok::<_, Infallible>)
                        .collect::<Vec<_>>(),
                );
                black_box(futures::executor::block_on(verify_ndjson_stream(
                    service.as_ref(),
                    chunks,
                    DEFAULT_MAX_LINE_BYTES,
                )))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_canonical_digest,
    bench_single_verify,
    bench_bulk
);
criterion_main!(benches);
