use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datascript::literal::classify;
use datascript::{from_str, to_string, Section, Value};
use serde::Serialize;

#[derive(Serialize, Clone)]
struct Server {
    host: String,
    port: i32,
    motd: String,
    whitelist: bool,
    limits: Limits,
}

#[derive(Serialize, Clone)]
struct Limits {
    max_players: i32,
    view_distance: i16,
    timeout: i64,
}

fn server(i: u16) -> Server {
    Server {
        host: format!("node-{}.example.com", i),
        port: 25565 + i32::from(i),
        motd: "Welcome, traveller".to_string(),
        whitelist: i % 2 == 0,
        limits: Limits {
            max_players: 20,
            view_distance: 10,
            timeout: 30_000,
        },
    }
}

fn tree(sections: u16) -> Section {
    let mut root = Section::root();
    for i in 0..sections {
        root.store(&format!("server {}", i), &server(i))
            .expect("server fields are storable");
    }
    root.set(
        "tags",
        (0..20).map(|i| format!("tag-{}", i)).collect::<Vec<_>>(),
    );
    root
}

fn benchmark_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for literal in ["true", "12345", "12345L", "3.25D", "'x'C", "'a string'", "plain"] {
        group.bench_with_input(BenchmarkId::from_parameter(literal), literal, |b, l| {
            b.iter(|| classify(black_box(l)))
        });
    }
    group.finish();
}

fn benchmark_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");

    for size in [10, 50, 100, 500].iter() {
        let root = tree(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &root, |b, root| {
            b.iter(|| to_string(black_box(root)).expect("generated names are writable"))
        });
    }
    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 50, 100, 500].iter() {
        let text = to_string(&tree(*size)).expect("generated names are writable");
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_long_list(c: &mut Criterion) {
    let mut root = Section::root();
    root.set("numbers", (0..1000).map(Value::Long).collect::<Vec<_>>());
    let text = to_string(&root).expect("generated names are writable");

    c.bench_function("parse_long_list", |b| b.iter(|| from_str(black_box(&text))));
}

criterion_group!(
    benches,
    benchmark_classify,
    benchmark_write,
    benchmark_parse,
    benchmark_long_list
);
criterion_main!(benches);
