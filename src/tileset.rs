use crate::tiles::{Code, Codec};
use crate::Error;

/// glyph, count in the bag, points
pub type TileInfo = (&'static str, u32, u32);

/// English distribution: 26 letters plus two blanks, 104 tiles in all.
/// Index 0 is the empty square placeholder, so rows line up with codes.
#[rustfmt::skip]
const ENGLISH: &[TileInfo] = &[
    ("", 0, 0),
    ("a", 10, 1), ("b", 2, 4), ("c", 2, 4), ("d", 5, 2), ("e", 12, 1),
    ("f", 2, 4), ("g", 3, 3), ("h", 3, 4), ("i", 9, 1), ("j", 1, 10),
    ("k", 1, 5), ("l", 4, 1), ("m", 2, 3), ("n", 6, 1), ("o", 7, 1),
    ("p", 2, 4), ("q", 1, 10), ("r", 6, 1), ("s", 5, 1), ("t", 7, 1),
    ("u", 4, 2), ("v", 2, 4), ("w", 2, 4), ("x", 1, 8), ("y", 2, 4),
    ("z", 1, 10),
];

const ENGLISH_BLANKS: u32 = 2;
const DEFAULT_RACK_SIZE: usize = 7;
const DEFAULT_FULL_RACK_BONUS: u32 = 40;

/// The alphabet and tile distribution of a game: per-symbol glyphs, bag
/// counts and point values, the number of blanks, the rack size, and the
/// bonus for playing out a whole rack in one move.
///
/// This is the interface to the external alphabet/tile-distribution
/// configuration: [`TileSet::english`] is the built-in preset, and
/// [`TileSet::custom`] accepts a distribution loaded elsewhere.
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<(String, u32, u32)>,
    blanks: u32,
    rack_size: usize,
    full_rack_bonus: u32,
    codec: Codec,
}

impl TileSet {
    /// The built-in english tile distribution.
    pub fn english() -> TileSet {
        // the preset is well formed, so this can not fail
        TileSet::custom(ENGLISH, ENGLISH_BLANKS, DEFAULT_RACK_SIZE, DEFAULT_FULL_RACK_BONUS)
            .unwrap()
    }

    /// Build a tileset from an externally loaded distribution.
    /// `tiles[0]` is a placeholder for the empty square; rows past index 26
    /// extend the codec with language specific glyphs.
    /// ## Errors
    /// If the distribution holds more symbols than a cross-check set can
    /// represent.
    pub fn custom(
        tiles: &[(&str, u32, u32)],
        blanks: u32,
        rack_size: usize,
        full_rack_bonus: u32,
    ) -> Result<TileSet, Error> {
        if tiles.len() > 32 {
            return Err(Error::AlphabetTooLarge(tiles.len() - 1));
        }
        let extra: Vec<&str> = tiles
            .iter()
            .skip(27)
            .map(|&(glyph, _, _)| glyph)
            .collect();
        let codec = Codec::new(&extra);
        let tiles = tiles
            .iter()
            .map(|&(glyph, count, points)| (String::from(glyph), count, points))
            .collect();
        Ok(TileSet {
            tiles,
            blanks,
            rack_size,
            full_rack_bonus,
            codec,
        })
    }

    /// The points for a tile code, or 0 if not found.
    /// Wildcard codes fall outside the table and score 0.
    pub fn points(&self, code: Code) -> u32 {
        self.tiles.get(code as usize).map_or(0, |tile| tile.2)
    }

    /// The number of copies of this tile in a fresh bag (blanks excluded).
    pub fn count(&self, code: Code) -> u32 {
        self.tiles.get(code as usize).map_or(0, |tile| tile.1)
    }

    /// The glyph for a tile code, or " " if not found.
    pub fn glyph(&self, code: Code) -> &str {
        self.tiles.get(code as usize).map_or(" ", |tile| &tile.0)
    }

    /// The number of blank tiles in a fresh bag.
    pub fn blank_count(&self) -> u32 {
        self.blanks
    }

    /// Number of symbol rows, the empty placeholder included.
    pub fn symbol_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn rack_size(&self) -> usize {
        self.rack_size
    }

    /// Bonus for a move that plays every tile of the mover's rack.
    pub fn full_rack_bonus(&self) -> u32 {
        self.full_rack_bonus
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }
}
