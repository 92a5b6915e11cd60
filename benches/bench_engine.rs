use criterion::{criterion_group, criterion_main, Criterion};
use kibitzer::{Board, Codec, GamePosition, Lexicon, Rack, SimParams, Simmer};

const WORDS: &[&str] = &[
    "af", "ah", "al", "aar", "aas", "be", "bi", "bo", "bar", "bes", "bel", "belt", "rust", "rest",
    "ruste", "rusten",
];

const STATE: &[&str] = &[
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    ".......bel.....",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
    "...............",
];

fn bench_lexicon_build(c: &mut Criterion) {
    c.bench_function("lexicon.from_words", |b| {
        b.iter(|| Lexicon::from_words(WORDS, &Codec::default()).unwrap())
    });
}

fn bench_legal_fills(c: &mut Criterion) {
    let lexicon = Lexicon::from_words(WORDS, &Codec::default()).unwrap();
    let prefix = Codec::default().encode("be").unwrap();
    c.bench_function("lexicon.legal_fills", |b| {
        b.iter(|| lexicon.legal_fills(&prefix, &[]))
    });
}

fn bench_legal_moves(c: &mut Criterion) {
    let board = Board::default()
        .with_lexicon_from_words(WORDS)
        .unwrap()
        .with_rows_from_strings(STATE)
        .unwrap();
    let rack: Rack = board.encode("abe*st").unwrap();
    c.bench_function("board.legal_moves", |b| b.iter(|| board.legal_moves(&rack)));
}

fn bench_kibitz(c: &mut Criterion) {
    let board = Board::default()
        .with_lexicon_from_words(WORDS)
        .unwrap()
        .with_rows_from_strings(STATE)
        .unwrap();
    let racks: [Rack; 2] = [
        board.encode("abe*st").unwrap(),
        board.encode("raustel").unwrap(),
    ];
    let position = GamePosition::new(board, racks);
    let simmer = Simmer::new(SimParams {
        shortlist: 5,
        trials: 10,
        plies: 2,
        seed: 123,
    });
    c.bench_function("simmer.kibitz", |b| b.iter(|| simmer.kibitz(&position)));
}

fn criterion_benchmark(c: &mut Criterion) {
    bench_lexicon_build(c);
    bench_legal_fills(c);
    bench_legal_moves(c);
    bench_kibitz(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
