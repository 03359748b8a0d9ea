// Benchmarks for union alternative selection and delegation

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;
use strainer_filter::prelude::*;

fn union_of(width: usize) -> Box<dyn Filter> {
    let mut decl = FilterDecl::union().named("field");
    for i in 0..width {
        decl = decl.with_filter(FilterDecl::value(format!("choice-{i}")));
    }
    decl = decl.with_filter(FilterDecl::integer());
    FilterRegistry::default().build(decl).unwrap()
}

// ===== SELECTION =====

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("union_selection");

    for width in [1, 8, 64].iter() {
        let union = union_of(*width);

        group.bench_with_input(BenchmarkId::new("first", width), width, |b, _| {
            b.iter(|| process_value(union.as_ref(), black_box("choice-0")));
        });

        group.bench_with_input(BenchmarkId::new("last", width), width, |b, _| {
            b.iter(|| process_value(union.as_ref(), black_box(42)));
        });

        group.bench_with_input(BenchmarkId::new("none", width), width, |b, _| {
            b.iter(|| process_value(union.as_ref(), black_box(1.5)));
        });
    }

    group.finish();
}

// ===== NESTED COMPOSITES =====

fn bench_nested(c: &mut Criterion) {
    let union = FilterRegistry::default()
        .from_json(json!({
            "kind": "union",
            "names": ["payload"],
            "filters": [
                {"kind": "hash", "filters": [
                    {"kind": "string", "names": ["name"]},
                    {"kind": "integer", "names": ["age"]}
                ]},
                {"kind": "array", "filters": [{"kind": "integer"}]}
            ]
        }))
        .unwrap();

    let hash = Value::from(json!({"name": "Ada", "age": 36, "extra": true}));
    let array = Value::from(json!((0..32).collect::<Vec<i64>>()));

    let mut group = c.benchmark_group("union_nested");
    group.bench_function("hash", |b| {
        b.iter(|| process_value(union.as_ref(), black_box(hash.clone())));
    });
    group.bench_function("array", |b| {
        b.iter(|| process_value(union.as_ref(), black_box(array.clone())));
    });
    group.finish();
}

criterion_group!(benches, bench_selection, bench_nested);
criterion_main!(benches);
