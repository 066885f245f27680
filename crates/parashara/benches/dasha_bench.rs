use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parashara::calculate_dashas;

fn bench_dasha_tree(c: &mut Criterion) {
    let birth = Utc.with_ymd_and_hms(1990, 5, 15, 9, 0, 0).unwrap();

    c.bench_function("calculate_dashas", |b| {
        b.iter(|| calculate_dashas(black_box(211.7), black_box(birth)))
    });

    let timeline = calculate_dashas(211.7, birth).unwrap();
    let instant = Utc.with_ymd_and_hms(2031, 8, 2, 12, 0, 0).unwrap();
    c.bench_function("locate", |b| b.iter(|| timeline.locate(black_box(instant))));
}

criterion_group!(benches, bench_dasha_tree);
criterion_main!(benches);
