//! A word-tile game engine for Rust.
//! <br>
//! Given a board, a word list and a rack, this crate enumerates every
//! legal placement with its score, and can recommend the strongest move
//! by simulating lookahead turns against a modeled opponent. It can be
//! used to study strategies in a game, or just to cheat.
//! Move enumeration walks a compact dictionary automaton in both
//! directions under per-square cross-checks; the simulation layer samples
//! the opponent's hidden rack and can run its trials in parallel with the
//! `rayon` crate.
//!
//! # How to use `kibitzer`
//! Start by creating a board, then specify the word list to be used, and
//! the tiles on the board. By default a standard premium layout and the
//! english tile distribution are used, but both can be supplied from
//! external configuration. The word list must be in utf-8 and contain one
//! word per line.
//!
//! # Enumerating moves
//! ```
//! # use kibitzer::{Board, Error, Rack};
//! let board = Board::default().with_lexicon_from_words(&["rust", "rest"])?;
//! let rack: Rack = board.encode("rusta")?;
//! let moves = board.legal_moves(&rack);
//! assert_eq!(moves.len(), 8);
//! for m in &moves {
//!     println!("{} {} {} {} {}", m.x, m.y, m.horizontal, board.decode(m.word), m.score);
//! }
//! # Ok::<(), Error>(())
//! ```
//!
//! # Recommending a move
//! ```
//! # use kibitzer::{Board, Error, GamePosition, Rack, SimParams, Simmer};
//! let board = Board::default().with_lexicon_from_words(&["rust", "rest"])?;
//! let racks: [Rack; 2] = [board.encode("rusta")?, board.encode("eeeeee")?];
//! let position = GamePosition::new(board, racks);
//! let ranking = Simmer::new(SimParams::default()).kibitz(&position)?;
//! assert!(ranking.complete);
//! # Ok::<(), Error>(())
//! ```
mod bag;
mod board;
mod error;
mod grid;
mod lexicon;
mod movegen;
mod position;
mod simulate;
mod stats;
mod symbolset;
mod tiles;
mod tileset;

pub use crate::bag::Bag;
pub use crate::board::{Board, RowData, N};
pub use crate::error::Error;
pub use crate::grid::{Grid, Premium};
pub use crate::lexicon::{Cursor, Direction, Lexicon};
pub use crate::movegen::{generate, Move};
pub use crate::position::GamePosition;
pub use crate::simulate::{
    CancelToken, Greedy, Policy, Ranking, SimParams, SimulationResult, Simmer,
};
pub use crate::stats::Stats;
pub use crate::symbolset::SymbolSet;
pub use crate::tiles::{
    Code, Codec, Letter, Piece, PieceList, Rack, Row, Square, Symbol, Tile, Word, BLANK, EMPTY,
};
pub use crate::tileset::{TileInfo, TileSet};
