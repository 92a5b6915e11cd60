//! Basic types for tiles, racks and board rows.
mod codec;
mod codes;
mod list;
mod piece;

/// Maximum length of a code list (a board row plus one sentinel square)
pub(crate) const DIM: usize = 16;

pub use codec::Codec;
pub use codes::{Code, Symbol, BLANK, EMPTY};
pub use list::{PieceList, Pieces, Rack, Row, Word};
pub use piece::{Letter, Piece, Square, Tile};
