use thiserror::Error;

#[derive(Error, Debug)]
/// Errors that can be returned
pub enum Error {
    /// Error reading a word list file
    #[error("Wordfile \"{path}\" could not be read")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// Error deserializing a bincoded lexicon
    #[cfg(feature = "bincode")]
    #[error("Lexicon file {0} could not be deserialized")]
    LexiconDeserializeError(String),

    /// The string is longer than 15 tokens
    #[error("Encoder: string too long {0}")]
    EncodeStringTooLong(String),

    /// Token can not be encoded
    #[error("Encoder: invalid token '{0}'")]
    EncodeInvalidToken(String),

    /// The alphabet has more symbols than a cross-check set can hold
    #[error("Alphabet too large: {0} symbols (at most 31)")]
    AlphabetTooLarge(usize),

    /// Code is not valid for `Tile` or `Square`
    #[error("Invalid code for tile {0}")]
    InvalidTileCode(u8),

    /// Code is not valid for `Letter`
    #[error("Invalid code for letter {0}")]
    InvalidLetterCode(u8),

    /// Error parsing board rows or premium grid from strings
    #[error("Invalid number of rows {0} (expect 15)")]
    InvalidRowCount(usize),

    /// Parsing a row on the board needs 15 squares
    #[error("Invalid row \"{0}\": length {1}, expect 15")]
    InvalidRowLength(String, usize),

    /// Error parsing a premium square
    #[error("Invalid premium square: \"{0}\"")]
    PremiumParseError(String),

    /// Attempt to place (part of) a word outside the board
    #[error("Playing {len} tiles at x={x}, y={y} does not fit")]
    Placement {
        x: usize,
        y: usize,
        horizontal: bool,
        len: usize,
    },

    /// Attempt to cover a tile already on the board with a different one
    #[error("Square at x:{x}, y:{y} already holds another tile")]
    SquareOccupied { x: usize, y: usize },

    /// Committing a move that needs a letter the mover does not hold
    #[error("Rack does not hold a '{0}' tile")]
    TileNotInRack(String),

    /// Committing a move that places no tile from the rack
    #[error("Move places no tile from the rack")]
    NothingPlaced,
}
