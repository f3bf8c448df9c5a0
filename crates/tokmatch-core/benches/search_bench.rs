//! Benchmarks for pattern registration and ranked search

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tokmatch_core::{SearchEngine, SharedInterner};

const LINES: &[&str] = &[
    "Once upon a midnight dreary, while I pondered, weak and weary,",
    "Over many a quaint and curious volume of forgotten lore—",
    "While I nodded, nearly napping, suddenly there came a tapping,",
    "As of some one gently rapping, rapping at my chamber door.",
    "\"'Tis some visitor,\" I muttered, \"tapping at my chamber door—",
    "Only this and nothing more.\"",
];

fn populated_engine(copies: u16) -> SearchEngine {
    let mut engine = SearchEngine::new(SharedInterner::new());
    let mut id = 0;
    for copy in 0..copies {
        for line in LINES {
            engine.register_text(line, (copy % 8) as u8, id);
            id += 1;
        }
    }
    engine
}

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.throughput(Throughput::Elements(LINES.len() as u64));

    group.bench_function("register_stanza", |b| {
        b.iter(|| {
            let mut engine = SearchEngine::new(SharedInterner::new());
            for (id, line) in LINES.iter().enumerate() {
                engine.register_text(black_box(line), 1, id as u16);
            }
            black_box(engine)
        })
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let engine = populated_engine(200);
    let query = engine
        .tokenizer()
        .tokenize("suddenly there came a tapping at my chamber door", false);

    let mut group = c.benchmark_group("engine");

    group.bench_function("search_all_groups", |b| {
        b.iter(|| black_box(engine.search(black_box(&query), &[])))
    });

    group.bench_function("search_two_groups", |b| {
        b.iter(|| black_box(engine.search(black_box(&query), &[1, 2])))
    });

    group.finish();
}

criterion_group!(benches, bench_register, bench_search);
criterion_main!(benches);
