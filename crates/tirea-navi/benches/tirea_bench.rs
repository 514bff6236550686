// Criterion benchmarks for tirea-navi.
//
// The dictionary is a small hand-written one over the default Na'vi tables,
// so the numbers measure the matcher rather than dictionary size.
//
// Run:
//   cargo bench -p tirea-navi

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tirea_navi::Dictionary;
use tirea_trie::build_tree;

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

fn build_dictionary() -> Dictionary {
    let entries: &[&[&str]] = &[
        &["fm", "<0>", "<1>", "et", "<2>", "ok", "=392"],
        &["fm", "<0>", "<1>", "<2>", "i", "=396"],
        &["fm", "<0>", "<1>", "<2>", "al", "=3700"],
        &["f", "<0>", "<1>", "rrf", "<2>", "en", "=464"],
        &["s", "<0>", "<1>", "<2>", "i", "=1788"],
        &["$np", "tì-", "fm", "<us>", "etok", "=392:n."],
        &["$np", "uvan", "$nsmod|$ncec", "=2644"],
        &["$np", "uvan", " s", "<0>", "<1>", "<2>", "i", "=2648"],
        &["$np", "tìtaron", "=7336"],
        &["sìk", "=1796"],
        &["tìk", "=13294"],
        &["tsìk", "=8280"],
        &["ma", "=1056"],
        &["$np", "'eylan", "=56"],
        &["$np", "fe'ran", "$nsmod|$ncec", "=9248"],
        &["$np", "fe'ranvi", "$nsmod|$ncec", "=9256"],
        &["tsuk-", "k", "anom", "=8392"],
    ];

    let mut dict = Dictionary::new();
    for tokens in entries {
        dict.insert(build_tree(tokens));
    }
    dict
}

const WORDS: &[&str] = &[
    "fmetok",
    "fmäpeykìlmetängok",
    "saysìfmusetok",
    "sayfneuvanti",
    "peylan",
    "sìk",
    "fe'ranvi",
    "tsukkanom",
    "blerg",
];

const TEXT: &str = "fmetok fìuvanti, ma eylan. tsauvan seri sìk fe'ranìl";

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_build(c: &mut Criterion) {
    c.bench_function("build_dictionary", |b| b.iter(|| black_box(build_dictionary())));
}

fn bench_lookup(c: &mut Criterion) {
    let plain = build_dictionary();
    let mut optimized = build_dictionary();
    optimized.optimize();

    c.bench_function("lookup_words", |b| {
        b.iter(|| {
            for word in WORDS {
                black_box(plain.lookup(black_box(word)));
            }
        })
    });
    c.bench_function("lookup_words_optimized", |b| {
        b.iter(|| {
            for word in WORDS {
                black_box(optimized.lookup(black_box(word)));
            }
        })
    });
}

fn bench_extract(c: &mut Criterion) {
    let mut dict = build_dictionary();
    dict.optimize();
    c.bench_function("extract_text", |b| b.iter(|| black_box(dict.extract(black_box(TEXT)))));
}

criterion_group!(benches, bench_build, bench_lookup, bench_extract);
criterion_main!(benches);
