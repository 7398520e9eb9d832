use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sqlts_codegen::{map_type, CodeGenerator, GeneratorOptions, TypeScriptGenerator};
use sqlts_schema::{Dml, FirstResultSet, Namespace, UndeclaredParameter};

const TYPES: &[&str] = &[
    "int",
    "nvarchar(50)",
    "datetime2(7)",
    "bit",
    "decimal(10,2)",
    "uniqueidentifier",
];

fn wide_namespace(queries: usize, columns: usize) -> Namespace {
    let dmls = (0..queries)
        .map(|q| {
            let columns = (0..columns)
                .map(|c| {
                    FirstResultSet::new(
                        c as u32 + 1,
                        format!("column_{}", c),
                        c % 2 == 0,
                        TYPES[c % TYPES.len()],
                    )
                })
                .collect();

            Dml::new(format!("Query{}", q), "", columns)
                .unwrap()
                .with_parameters(vec![UndeclaredParameter::new("@id", "int", 4)])
        })
        .collect();

    Namespace::new("Bench", dmls).unwrap()
}

fn map_types(c: &mut Criterion) {
    c.bench_function("map_type", |b| {
        b.iter(|| {
            for name in TYPES {
                let _ = map_type(black_box(name));
            }
        })
    });
}

fn generate_small_namespace(c: &mut Criterion) {
    let namespace = wide_namespace(1, 3);
    let gen = TypeScriptGenerator::new();

    c.bench_function("generate_small_namespace", |b| {
        b.iter(|| gen.generate_namespace(black_box(&namespace)))
    });
}

fn generate_large_namespace(c: &mut Criterion) {
    let namespace = wide_namespace(50, 40);
    let gen = TypeScriptGenerator::with_options(GeneratorOptions::with_parameters());

    c.bench_function("generate_large_namespace", |b| {
        b.iter(|| gen.generate_namespace(black_box(&namespace)))
    });
}

criterion_group!(
    benches,
    map_types,
    generate_small_namespace,
    generate_large_namespace
);
criterion_main!(benches);
