use super::codes::{Code, Symbol, BLANK, IS_WILDCARD, SYMBOL_MASK, UNINIT};
use crate::error::Error;
use std::convert::TryFrom;
use std::fmt::Debug;
use std::num::NonZeroU8;

/// Common trait for [`Letter`], [`Tile`] and [`Square`].
pub trait Piece:
    Debug + Clone + Copy + Eq + PartialEq + Default + Into<Code> + TryFrom<Code, Error = Error>
{
    fn code(&self) -> Code;
}

/// A rack piece: a regular letter, or an unassigned blank ("*").
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Letter(NonZeroU8);

impl Letter {
    fn new(code: Code) -> Letter {
        let code = NonZeroU8::new(code).expect("letter code can't be 0");
        Letter(code)
    }

    /// The blank rack piece.
    pub fn blank() -> Letter {
        Letter::new(BLANK)
    }

    pub fn is_blank(&self) -> bool {
        self.code() == BLANK
    }

    /// The alphabet symbol of this letter (0 for an unassigned blank).
    pub fn symbol(&self) -> Symbol {
        self.code() & SYMBOL_MASK
    }

    /// The rack piece a placed tile was taken from: the blank for a
    /// wildcard, the plain letter otherwise.
    pub fn from_tile(tile: Tile) -> Letter {
        if tile.is_wildcard() {
            Letter::blank()
        } else {
            Letter::new(tile.code())
        }
    }
}

impl Default for Letter {
    fn default() -> Self {
        Self::new(UNINIT)
    }
}

impl Piece for Letter {
    fn code(&self) -> Code {
        self.0.get()
    }
}

impl TryFrom<Code> for Letter {
    type Error = Error;
    fn try_from(code: Code) -> Result<Self, Self::Error> {
        match code {
            1..=31 | BLANK => Ok(Self::new(code)),
            _ => Err(Error::InvalidLetterCode(code)),
        }
    }
}

impl From<Letter> for Code {
    fn from(letter: Letter) -> Code {
        letter.0.get()
    }
}

/// A placed piece: a letter tile, or a blank assigned to a symbol
/// (a "wildcard", which scores zero).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tile(NonZeroU8);

impl Tile {
    pub(crate) fn new(code: Code) -> Tile {
        let code = NonZeroU8::new(code).expect("tile code can't be 0");
        Tile(code)
    }

    /// A wildcard tile: a blank assigned to `symbol`.
    /// ## Example
    /// ```
    /// use kibitzer::{Piece, Tile};
    /// let tile = Tile::wildcard(1);
    /// assert_eq!(tile.code(), 65);
    /// assert_eq!(tile.symbol(), 1);
    /// ```
    pub fn wildcard(symbol: Symbol) -> Tile {
        Tile::new(symbol | IS_WILDCARD)
    }

    /// Place a plain (non-blank) rack letter as a tile.
    pub fn from_letter(letter: Letter) -> Tile {
        Tile::new(letter.code())
    }

    /// The alphabet symbol of this tile, ignoring the wildcard flag.
    pub fn symbol(&self) -> Symbol {
        self.code() & SYMBOL_MASK
    }

    /// Whether this tile is a placed blank.
    pub fn is_wildcard(&self) -> bool {
        self.code() & IS_WILDCARD != 0
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(BLANK)
    }
}

impl Piece for Tile {
    fn code(&self) -> Code {
        self.0.get()
    }
}

impl TryFrom<Code> for Tile {
    type Error = Error;
    fn try_from(code: Code) -> Result<Self, Self::Error> {
        match code {
            1..=31 | 65..=95 => Ok(Self::new(code)),
            _ => Err(Error::InvalidTileCode(code)),
        }
    }
}

impl From<Tile> for Code {
    fn from(tile: Tile) -> Code {
        tile.0.get()
    }
}

/// A board square that is either vacant or holds a [`Tile`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Square(Option<Tile>);

impl Square {
    /// A vacant square
    pub const VACANT: Self = Self(None);

    fn new(code: Code) -> Square {
        if code == 0 {
            Square(None)
        } else {
            Square(Some(Tile::new(code)))
        }
    }

    pub fn from_tile(tile: Tile) -> Square {
        Square(Some(tile))
    }

    /// The held tile, or None.
    pub fn tile(&self) -> Option<Tile> {
        self.0
    }

    pub fn is_vacant(&self) -> bool {
        self.0.is_none()
    }

    /// Strip the wildcard flag from the held tile, if any.
    /// Perpendicular contexts compare plain symbols.
    pub fn as_symbol(self) -> Square {
        Square::new(self.code() & SYMBOL_MASK)
    }
}

impl Piece for Square {
    fn code(&self) -> Code {
        self.0.map_or(0, |tile| tile.code())
    }
}

impl TryFrom<Code> for Square {
    type Error = Error;
    fn try_from(code: Code) -> Result<Self, Self::Error> {
        match code {
            0 | 1..=31 | 65..=95 => Ok(Self::new(code)),
            _ => Err(Error::InvalidTileCode(code)),
        }
    }
}

impl From<Square> for Code {
    fn from(square: Square) -> Code {
        square.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_wildcard() {
        let tile = Tile::wildcard(3);
        assert!(tile.is_wildcard());
        assert_eq!(tile.symbol(), 3);
        assert_eq!(Letter::from_tile(tile), Letter::blank());
        let plain = Tile::new(3);
        assert_eq!(Letter::from_tile(plain).code(), 3);
    }

    #[test]
    fn test_square_as_symbol() {
        let square = Square::new(65);
        assert_eq!(square.code(), 65);
        assert_eq!(square.as_symbol().code(), 1);
        assert!(Square::VACANT.is_vacant());
    }

    #[test]
    fn test_bad_codes() {
        assert!(Letter::try_from(0x7fu8).is_err());
        assert!(Tile::try_from(64u8).is_err());
        assert!(Square::try_from(96u8).is_err());
    }
}
