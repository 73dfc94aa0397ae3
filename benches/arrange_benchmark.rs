use criterion::{criterion_group, criterion_main, Criterion};

use primula::input::random_arrange_generator;
use primula::search::{AllocationSearch, SingleSearchBuilder};

fn arrange_core_loop_test() {
    let config = random_arrange_generator(3, 6);
    let (offering, brokers, budget) = config.assemble();

    let search = SingleSearchBuilder::new()
        .with_offering(offering)
        .with_brokers(brokers)
        .with_budget(budget)
        .build();

    search.find_best().unwrap();
}

fn benchmarks(c: &mut Criterion) {
    c.bench_function("arrange core loop", |b| b.iter(arrange_core_loop_test));
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
