use cobble_core::options::Options;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_options(c: &mut Criterion) {
    let opts = Options::with_defaults();
    let text = opts.to_string();

    c.bench_function("options_to_string", |b| {
        b.iter(|| black_box(&opts).to_string())
    });

    c.bench_function("options_parse", |b| {
        b.iter(|| Options::parse(black_box(&text), None).unwrap())
    });

    c.bench_function("options_check", |b| {
        b.iter(|| opts.check(black_box(&text)).unwrap())
    });
}

criterion_group!(benches, bench_options);
criterion_main!(benches);
