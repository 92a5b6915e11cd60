use anyhow::Result;
use kibitzer::{Board, GamePosition, Rack, SimParams, Simmer};
use std::time::Instant;

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

const WORDS: &[&str] = &[
    "ab", "abe", "abel", "at", "af", "al", "be", "bel", "belt", "bes", "bo", "el", "els", "es",
    "set", "sta", "te", "tel", "tels",
];

fn run() -> Result<()> {
    // swap in with_lexicon_from_file for a real word list
    let board = Board::default()
        .with_lexicon_from_words(WORDS)?
        .with_rows_from_strings(STATE)?;
    let racks: [Rack; 2] = [board.encode("abelst*")?, board.encode("etsbale")?];
    let position = GamePosition::new(board, racks);

    let params = SimParams {
        shortlist: 10,
        trials: 50,
        plies: 2,
        seed: 123,
    };
    let now = Instant::now();
    let ranking = Simmer::new(params).kibitz(&position)?;
    eprintln!("kibitz took {:.2} s", now.elapsed().as_secs_f32());

    let board = position.board();
    println!("{}\n", board);
    for c in ranking.candidates.iter().take(10) {
        println!(
            "{:2} {:2} {:1} {:-7} {:3} {:7.2} {:6.2} {:4}",
            c.mov.x,
            c.mov.y,
            c.mov.horizontal as i32,
            board.decode(c.mov.word),
            c.mov.score,
            c.mean,
            c.variance.sqrt(),
            c.trials,
        );
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:?}", err);
    }
}
