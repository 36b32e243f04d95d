use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;
use zahlwort::gazetteer::Gazetteer;
use zahlwort::{Dialect, Normalizer, Resources};

const PARAGRAPH: &str = "Der 2. Termin ist am 15. Januar 2024 um 14:30 Uhr in 4410 Liestal. \
Anmeldung unter Tel. 061 123 45 67 oder +41 23 056 789. Die Gebühr beträgt CHF 25.50, \
das Modell X500 steht neben BS 12345. Seit 1983 kamen 1'250 Gäste. ";

fn basel() -> Normalizer {
    let gazetteer = Gazetteer::from_names(["Liestal", "Basel", "St. Gallen", "Zürich"]);
    Normalizer::new(Dialect::Basel, Arc::new(Resources::new(gazetteer, None))).unwrap()
}

/// Cold start: pattern compilation for detector, validator and temporal rules
fn bench_normalizer_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalizer_construction");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(30);

    group.bench_function("basel", |b| {
        b.iter(|| black_box(basel()));
    });

    group.finish();
}

/// End-to-end normalization throughput for growing inputs
fn bench_normalize_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_throughput");
    let normalizer = basel();
    let without_temporal = basel().without_temporal_tagger();

    for repeats in [1usize, 10, 100] {
        let text = PARAGRAPH.repeat(repeats);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("full", repeats), &text, |b, text| {
            b.iter(|| black_box(normalizer.normalize(black_box(text))));
        });

        group.bench_with_input(
            BenchmarkId::new("no_temporal", repeats),
            &text,
            |b, text| {
                b.iter(|| black_box(without_temporal.normalize(black_box(text))));
            },
        );
    }

    group.finish();
}

/// Detection alone, separating span finding from generation and rewriting
fn bench_detect_only(c: &mut Criterion) {
    let normalizer = basel();
    let text = PARAGRAPH.repeat(10);

    c.bench_function("detect_only", |b| {
        b.iter(|| black_box(normalizer.detect(black_box(&text))).len());
    });
}

criterion_group!(
    benches,
    bench_normalizer_construction,
    bench_normalize_throughput,
    bench_detect_only
);
criterion_main!(benches);
