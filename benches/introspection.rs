//! Benchmarks for enumeration, selective copy and filter synthesis.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use propwise::prelude::*;

#[derive(Debug, Clone, Default, Properties)]
#[props(rename_all = "camelCase")]
struct CustomerPatch {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    age: Option<i32>,
    loyalty_points: Option<i64>,
}

#[derive(Debug, Clone, Default, Properties)]
#[props(rename_all = "camelCase")]
struct Customer {
    #[props(readonly)]
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    age: Option<i32>,
    #[props(column = "points")]
    loyalty_points: Option<i64>,
}

fn patch() -> CustomerPatch {
    CustomerPatch {
        first_name: Some("Ada".into()),
        last_name: None,
        email: Some("ada@example.com".into()),
        phone: Some(String::new()),
        age: None,
        loyalty_points: Some(1200),
    }
}

fn bench_enumerate(c: &mut Criterion) {
    let customer = Customer::default();
    c.bench_function("enumerate_7_properties", |b| {
        b.iter(|| enumerate(black_box(&customer)))
    });
}

fn bench_find_empty(c: &mut Criterion) {
    let patch = patch();
    let ignore = IgnoreList::none();
    c.bench_function("find_empty_properties", |b| {
        b.iter(|| find_empty_properties(black_box(&patch), &ignore))
    });
}

fn bench_copy(c: &mut Criterion) {
    let patch = patch();
    let mut group = c.benchmark_group("copy");

    group.bench_function("copy_into", |b| {
        let mut customer = Customer::default();
        b.iter(|| {
            copy_into(black_box(&patch), &mut customer, &IgnoreList::none()).map(|_| ())
        })
    });

    group.bench_function("copy_non_null", |b| {
        let mut customer = Customer::default();
        b.iter(|| {
            copy_non_null(black_box(&patch), &mut customer, &IgnoreList::none()).map(|_| ())
        })
    });

    group.finish();
}

fn bench_predicate(c: &mut Criterion) {
    let patch = patch();
    let ctx = FilterContext::for_entity::<Customer>();
    let ignore = IgnoreList::none();

    c.bench_function("build_equality_conjunction", |b| {
        b.iter(|| build_equality_conjunction(Filter::None, black_box(&patch), &ctx, &ignore))
    });

    c.bench_function("build_and_render_sql", |b| {
        b.iter(|| {
            build_equality_conjunction(Filter::None, black_box(&patch), &ctx, &ignore)
                .map(|filter| filter.to_sql(0))
        })
    });
}

criterion_group!(
    benches,
    bench_enumerate,
    bench_find_empty,
    bench_copy,
    bench_predicate
);
criterion_main!(benches);
