/// Symbol 1..=31 for a letter of the alphabet (a..z plus language specific)
pub type Symbol = u8;

/// Tile code used to represent a `Tile` or `Letter`. See [`Codec`](crate::Codec).
pub type Code = u8;

/// code for EMPTY (no tile)
pub const EMPTY: Code = 0;

/// code for the unassigned BLANK tile
pub const BLANK: Code = 0x40;

/// Mask to get the symbol value 0..32 out of a code
pub const SYMBOL_MASK: u8 = 0b1_1111;

/// bitflag marking a blank assigned to a symbol
pub const IS_WILDCARD: Code = 0x40;

/// An uninitialized piece
pub(super) const UNINIT: Code = 0x7f;
