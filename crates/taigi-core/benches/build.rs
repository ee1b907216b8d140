use criterion::{black_box, criterion_group, criterion_main, Criterion};

use taigi_core::build::{build_entries, DictionaryRow};
use taigi_core::qstring::get_qstrings;
use taigi_core::settings::BuildSettings;

const SAMPLE: &[(&str, &str, &str)] = &[
    ("tsiah8-png7", "tsiah8-png7", "食飯"),
    ("tsa-boo-lang5", "tsa-boo-lang5", "查某人"),
    ("tshit4-tho5", "tshit4-tho5", "𨑨迌"),
    ("pa5", "pa5", "爬"),
    ("kue3-ho2", "kue3-ho2", "過好"),
    ("tsai-iann5", "tsai-iann5", "栽培"),
];

fn rows(n: usize) -> Vec<DictionaryRow> {
    SAMPLE
        .iter()
        .cycle()
        .take(n)
        .map(|(o, c, h)| DictionaryRow::new(o, c, h))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let rows = rows(10_000);
    let settings = BuildSettings::default();
    c.bench_function("build_entries_10k", |b| {
        b.iter(|| build_entries(black_box(&rows), &settings))
    });
}

fn bench_qstrings(c: &mut Criterion) {
    c.bench_function("get_qstrings", |b| {
        b.iter(|| {
            for (_, reading, _) in SAMPLE {
                black_box(get_qstrings(black_box(reading)));
            }
        })
    });
}

criterion_group!(benches, bench_build, bench_qstrings);
criterion_main!(benches);
