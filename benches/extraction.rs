use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use strelka_features::{
    Diagnostics, FeatureExtractor, RawRecord, RawValue, RecordBuffer, StrelkaSnvFeatures,
};

const BASES: [&str; 4] = ["A", "C", "G", "T"];

fn record(i: usize) -> RawRecord {
    let reference = BASES[i % 4];
    let alt = BASES[(i + 1) % 4];
    let mut record = RawRecord::new()
        .with("CHROM", format!("chr{}", i % 23 + 1))
        .with("POS", i as i64 * 100 + 1)
        .with("REF", reference)
        .with("ALT", vec![alt])
        .with("FILTER", vec!["PASS"])
        .with("I.NT", if i % 3 == 0 { "het" } else { "ref" })
        .with("I.SOMATIC", 1)
        .with("I.QSS_NT", (i % 60) as i64)
        .with("I.SGT", "AA->AG")
        .with("I.MQ", 58.0)
        .with("I.MQ0", 0.0)
        .with("I.PNOISE", 0.0)
        .with("I.PNOISE2", 0.0)
        .with("I.ReadPosRankSum", -0.5);
    // leave SNVSB out on every other call to exercise the sanitizer
    if i % 2 == 0 {
        record.insert("I.SNVSB", 0.8);
    }
    for sample in 1..=2 {
        let depth = (30 + i % 40) as f64;
        record.insert(format!("S.{}.DP", sample), depth);
        record.insert(format!("S.{}.FDP", sample), (i % 3) as f64);
        record.insert(format!("S.{}.SDP", sample), 0.0);
        for base in &BASES {
            let count = if *base == reference {
                depth - 4.0
            } else if *base == alt {
                4.0
            } else {
                0.0
            };
            record.insert(
                format!("S.{}.{}U", sample, base),
                RawValue::Counts(vec![count, count + 1.0]),
            );
        }
    }
    record
}

fn source(n: usize) -> RecordBuffer {
    let mut source: RecordBuffer = (0..n).map(record).collect();
    for chrom in 1..=22 {
        source.push_header_line(format!("##maxDepth_chr{}={}", chrom, 60 + chrom));
    }
    source
}

fn benchmark_collect(c: &mut Criterion) {
    let mut group = c.benchmark_group("strelka.snv");
    for &n in &[1_000usize, 10_000] {
        group.bench_with_input(BenchmarkId::new("collect", n), &n, |b, &n| {
            b.iter_batched(
                || source(n),
                |mut source| {
                    let table = StrelkaSnvFeatures::new()
                        .collect(&mut source, &mut Diagnostics::new())
                        .unwrap();
                    black_box(table)
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
}

criterion_group!(benches, benchmark_collect);
criterion_main!(benches);
