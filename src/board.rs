use crate::grid::{Grid, Premium};
use crate::lexicon::Lexicon;
use crate::movegen::{self, Move};
use crate::symbolset::SymbolSet;
use crate::tiles::{Letter, Piece, PieceList, Rack, Row, Square, Word};
use crate::tileset::TileSet;
use crate::Error;
use std::fmt;
use std::sync::Arc;
use tinyvec::ArrayVec;

/// The board is N x N squares.
pub const N: usize = 15;

type Rows = [Row; N];

/// Per-square data of one lane in one orientation: the cross-check set
/// (symbols keeping every perpendicular word valid) and the anchor flag
/// (placing here connects the word to the board).
pub type RowData = ArrayVec<[(SymbolSet, bool); N + 1]>;

/// The playing surface: premium layout plus placed tiles, kept in both
/// orientations, with cross-check and anchor data cached per lane.
///
/// A `Board` is a value. Committing a move goes through
/// [`place`](Board::place), which returns a new board and leaves the
/// original untouched, so earlier snapshots stay valid for replay. The
/// lexicon and tileset are shared behind `Arc`, which keeps those
/// snapshots cheap.
#[derive(Debug, Clone)]
pub struct Board {
    premiums: Grid,
    horizontal: Rows,
    vertical: Rows,
    rowdata: [[RowData; N]; 2],
    start: (usize, usize),
    tileset: Arc<TileSet>,
    lexicon: Arc<Lexicon>,
}

/// Display the board as 15 lines of 15 squares, vacant squares as ".".
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = self
            .horizontal
            .iter()
            .map(|&row| self.decode(row))
            .collect::<Vec<String>>()
            .join("\n");
        write!(f, "{}", repr)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(TileSet::english())
    }
}

impl Board {
    /// A new empty board with the default premium layout and an empty
    /// lexicon.
    ///
    /// Builder methods supply the rest:
    /// - [`with_lexicon_from_file`](Board::with_lexicon_from_file)
    /// - [`with_lexicon_from_words`](Board::with_lexicon_from_words)
    /// - [`with_premiums_from_strings`](Board::with_premiums_from_strings)
    /// - [`with_rows_from_strings`](Board::with_rows_from_strings)
    #[must_use]
    pub fn new(tileset: TileSet) -> Board {
        // an empty word list always encodes, so this can not fail
        let lexicon = Lexicon::from_words(&[], tileset.codec()).unwrap();
        let vacant_row: Row = (0..N).map(|_| Square::VACANT).collect();
        let premiums = Grid::default();
        let start = premiums.start_square();
        let mut board = Board {
            premiums,
            horizontal: [vacant_row; N],
            vertical: [vacant_row; N],
            rowdata: [[RowData::new(); N]; 2],
            start,
            tileset: Arc::new(tileset),
            lexicon: Arc::new(lexicon),
        };
        board.refresh_rowdata();
        board
    }

    /// Read the lexicon from `wordfile`, one word per line.
    /// ## Errors
    /// If the file does not exist or a word can not be encoded.
    pub fn with_lexicon_from_file(mut self, wordfile: &str) -> Result<Board, Error> {
        self.lexicon = Arc::new(Lexicon::from_file(wordfile, self.tileset.codec())?);
        self.refresh_rowdata();
        Ok(self)
    }

    /// Build the lexicon from a list of words.
    /// ## Errors
    /// If a word can not be encoded.
    /// ## Example
    /// ```
    /// use kibitzer::Board;
    /// let board = Board::default().with_lexicon_from_words(&["aardvark", "zebra"]);
    /// ```
    pub fn with_lexicon_from_words(mut self, words: &[&str]) -> Result<Board, Error> {
        self.lexicon = Arc::new(Lexicon::from_words(words, self.tileset.codec())?);
        self.refresh_rowdata();
        Ok(self)
    }

    /// Share an already built lexicon.
    pub fn with_lexicon(mut self, lexicon: Arc<Lexicon>) -> Board {
        self.lexicon = lexicon;
        self.refresh_rowdata();
        self
    }

    /// Set the premium layout from its string representation
    /// (see [`Grid::from_strings`]).
    /// ## Errors
    /// If the layout has wrong dimensions or unparsable squares.
    pub fn with_premiums_from_strings<S: AsRef<str>>(mut self, grid: &[S]) -> Result<Board, Error> {
        self.premiums = Grid::from_strings(grid)?;
        self.start = self.premiums.start_square();
        self.refresh_rowdata();
        Ok(self)
    }

    /// Set the placed tiles from 15 strings of 15 characters, vacant
    /// squares as "." or " ".
    /// ## Errors
    /// If the rows have wrong dimensions or can not be encoded.
    pub fn with_rows_from_strings(mut self, rows: &[&str]) -> Result<Board, Error> {
        if rows.len() != N {
            return Err(Error::InvalidRowCount(rows.len()));
        }
        let mut state = [Row::new(); N];
        for (i, &row) in rows.iter().enumerate() {
            let encoded: Row = self.encode(row)?;
            if encoded.len() != N {
                return Err(Error::InvalidRowLength(String::from(row), encoded.len()));
            }
            state[i] = encoded;
        }
        self.horizontal = state;
        self.sync();
        Ok(self)
    }

    /// Rebuild the transposed rows and the cross-check cache after the
    /// horizontal rows changed.
    fn sync(&mut self) {
        for y in 0..N {
            for x in 0..N {
                self.vertical[x].0[y] = self.horizontal[y][x];
            }
        }
        self.refresh_rowdata();
    }

    fn refresh_rowdata(&mut self) {
        for i in 0..N {
            self.rowdata[0][i] = self.lane_data_for(false, i);
            self.rowdata[1][i] = self.lane_data_for(true, i);
        }
        // the start square anchors the first move
        let (sx, sy) = self.start;
        self.rowdata[1][sy][sx].1 = true;
        self.rowdata[0][sx][sy].1 = true;
    }

    /// Cross-check and anchor data for lane `i`: what may be placed on
    /// each square given the perpendicular words through it.
    fn lane_data_for(&self, horizontal: bool, i: usize) -> RowData {
        let crossing = if horizontal {
            &self.vertical
        } else {
            &self.horizontal
        };
        crossing
            .iter()
            .map(|row| {
                let context = row.perpendicular_context(i);
                let connected = !context.is_single_vacant();
                (self.fills_for_context(&context), connected)
            })
            .collect()
    }

    /// The symbols that complete every perpendicular word in `context`
    /// (a stretch of tiles with one vacant square). An occupied context
    /// yields the empty set: those squares never take a tile.
    fn fills_for_context(&self, context: &Row) -> SymbolSet {
        match context.iter().position(|square| square.is_vacant()) {
            Some(at) => {
                let prefix: Vec<u8> = context.iter().take(at).map(|s| s.code()).collect();
                let suffix: Vec<u8> = context.iter().skip(at + 1).map(|s| s.code()).collect();
                self.lexicon.legal_fills(&prefix, &suffix)
            }
            None => SymbolSet::new(),
        }
    }

    /// Whether no tile has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.horizontal
            .iter()
            .all(|row| row.iter().all(Square::is_vacant))
    }

    /// Every square a new placement may originate from: vacant squares
    /// adjacent to a placed tile, or just the start square while the board
    /// is empty.
    pub fn anchors(&self) -> Vec<(usize, usize)> {
        if self.is_empty() {
            return vec![self.start];
        }
        let mut anchors = Vec::new();
        for y in 0..N {
            for x in 0..N {
                if self.horizontal[y][x].is_vacant() && self.has_neighbor(x, y) {
                    anchors.push((x, y));
                }
            }
        }
        anchors
    }

    fn has_neighbor(&self, x: usize, y: usize) -> bool {
        (x > 0 && self.is_occupied(x - 1, y))
            || (x + 1 < N && self.is_occupied(x + 1, y))
            || (y > 0 && self.is_occupied(x, y - 1))
            || (y + 1 < N && self.is_occupied(x, y + 1))
    }

    /// The cross-check set of a square for words running in the given
    /// direction. An empty set excludes the square in that axis for good:
    /// no tile can keep the perpendicular words valid.
    pub fn cross_check(&self, x: usize, y: usize, horizontal: bool) -> SymbolSet {
        let (lane, pos) = if horizontal { (y, x) } else { (x, y) };
        self.rowdata[horizontal as usize][lane][pos].0
    }

    /// The designated start square.
    pub fn start_square(&self) -> (usize, usize) {
        self.start
    }

    /// Check if the square at x, y holds a tile.
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.tile_at(x, y).is_some()
    }

    /// The tile at x, y, or None if vacant or outside the board.
    pub fn tile_at(&self, x: usize, y: usize) -> Option<crate::tiles::Tile> {
        if x < N && y < N {
            self.horizontal[y][x].tile()
        } else {
            None
        }
    }

    /// The letters a mover must supply to play `word` at the given spot:
    /// tiles for the vacant squares it covers, in order, the blank for a
    /// wildcard.
    /// ## Errors
    /// If the word does not fit the board, or covers a square holding a
    /// different tile.
    pub fn used_letters(
        &self,
        word: &Word,
        x: usize,
        y: usize,
        horizontal: bool,
    ) -> Result<Rack, Error> {
        let len = word.len();
        let (dx, dy) = if horizontal { (1, 0) } else { (0, 1) };
        if x + len * dx > N || y + len * dy > N {
            return Err(Error::Placement { x, y, horizontal, len });
        }
        let (mut cx, mut cy) = (x, y);
        let mut used = Rack::new();
        for tile in word.iter() {
            match self.horizontal[cy][cx].tile() {
                None => used.push(Letter::from_tile(*tile)),
                Some(held) if held == *tile => {}
                Some(_) => return Err(Error::SquareOccupied { x: cx, y: cy }),
            }
            cx += dx;
            cy += dy;
        }
        Ok(used)
    }

    /// Commit `mov` and return the resulting board. The receiver is left
    /// untouched, so earlier snapshots remain replayable.
    /// ## Errors
    /// If the move does not fit, or covers a square holding a different
    /// tile.
    pub fn place(&self, mov: &Move) -> Result<Board, Error> {
        self.used_letters(&mov.word, mov.x, mov.y, mov.horizontal)?;
        let mut board = self.clone();
        let (dx, dy) = if mov.horizontal { (1, 0) } else { (0, 1) };
        let (mut x, mut y) = (mov.x, mov.y);
        for tile in mov.word.iter() {
            board.horizontal[y].0[x] = Square::from_tile(*tile);
            x += dx;
            y += dy;
        }
        board.sync();
        Ok(board)
    }

    /// Every legal move for `rack` on this board, ordered by score
    /// descending (ties: longer word first, then position).
    pub fn legal_moves(&self, rack: &Rack) -> Vec<Move> {
        movegen::generate(self, rack)
    }

    /// The score of playing `word` at the given spot: letter and word
    /// premiums on newly covered squares, every perpendicular word formed,
    /// and the full-rack bonus when the move places all `rack_len` tiles.
    /// ## Errors
    /// If the placed word would cross the right or bottom border.
    pub fn score_play(
        &self,
        word: &Word,
        x: usize,
        y: usize,
        horizontal: bool,
        rack_len: usize,
    ) -> Result<u32, Error> {
        let len = word.len();
        let (dx, dy) = if horizontal { (1, 0) } else { (0, 1) };
        if x + len * dx > N || y + len * dy > N {
            return Err(Error::Placement { x, y, horizontal, len });
        }
        Ok(self.score_play_unchecked(word, x, y, horizontal, Some(rack_len)))
    }

    pub(crate) fn score_play_unchecked(
        &self,
        word: &Word,
        x: usize,
        y: usize,
        horizontal: bool,
        rack_len: Option<usize>,
    ) -> u32 {
        self.score_word(word, x, y, horizontal, rack_len, true)
    }

    fn score_word(
        &self,
        word: &Word,
        x0: usize,
        y0: usize,
        horizontal: bool,
        rack_len: Option<usize>,
        include_crossing: bool,
    ) -> u32 {
        let mut word_multiplier = 1;
        let mut word_points = 0;
        let mut placed = 0;
        let mut total = 0;
        let (mut x, mut y) = (x0, y0);
        let (dx, dy) = if horizontal { (1, 0) } else { (0, 1) };

        for tile in word.iter() {
            // wildcards fall outside the points table and score zero
            let mut letter_points = self.tileset.points(tile.code());
            if self.horizontal[y][x].is_vacant() {
                placed += 1;
                match self.premiums[y][x] {
                    Premium::Letter(n) => letter_points *= n,
                    Premium::Word(n) => word_multiplier *= n,
                    _ => {}
                }
                if include_crossing {
                    let (crossing_row, ci) = if horizontal {
                        (self.vertical[x], y)
                    } else {
                        (self.horizontal[y], x)
                    };
                    let (s, e) = crossing_row.word_span(ci);
                    if e - s > 1 {
                        let crossing_word = crossing_row.word_with(s, e, ci, *tile);
                        let (cx, cy) = if horizontal { (x, s) } else { (s, y) };
                        total +=
                            self.score_word(&crossing_word, cx, cy, !horizontal, None, false);
                    }
                }
            }
            word_points += letter_points;
            x += dx;
            y += dy;
        }
        total += word_points * word_multiplier;
        if let Some(rack_len) = rack_len {
            if rack_len > 0 && placed == rack_len {
                total += self.tileset.full_rack_bonus();
            }
        }
        total
    }

    pub(crate) fn lanes(&self, horizontal: bool) -> &Rows {
        if horizontal {
            &self.horizontal
        } else {
            &self.vertical
        }
    }

    pub(crate) fn lane_data(&self, horizontal: bool, i: usize) -> &RowData {
        &self.rowdata[horizontal as usize][i]
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn tileset(&self) -> &Arc<TileSet> {
        &self.tileset
    }

    /// Encode a string with the board's codec.
    /// ## Errors
    /// If the string can not be encoded.
    pub fn encode<T: Piece>(&self, word: &str) -> Result<PieceList<T>, Error> {
        self.lexicon.encode(word)
    }

    /// Decode a piece list back to a string with the board's codec.
    pub fn decode<T: Piece>(&self, pieces: PieceList<T>) -> String {
        self.lexicon.decode(pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Result<T> = std::result::Result<T, Error>;

    const WORDS: &[&str] = &[
        "af", "ah", "al", "aar", "aas", "be", "bi", "bo", "bar", "bes", "bel",
    ];

    const TEST_ROWS: &[&str] = &[
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

    fn board() -> Board {
        Board::default()
            .with_lexicon_from_words(WORDS)
            .unwrap()
            .with_rows_from_strings(TEST_ROWS)
            .unwrap()
    }

    #[test]
    fn test_rows_roundtrip() -> Result<()> {
        let board = board();
        assert!(board.is_occupied(7, 7));
        assert!(board.is_occupied(9, 7));
        assert!(!board.is_occupied(0, 0));
        assert_eq!(board.decode(board.horizontal[7]), ".......bel.....");
        assert_eq!(board.decode(board.vertical[7]), ".......b.......");
        Ok(())
    }

    #[test]
    fn test_anchors_empty_board() {
        let board = Board::default();
        assert!(board.is_empty());
        assert_eq!(board.anchors(), vec![(7, 7)]);
    }

    #[test]
    fn test_anchors_adjacent() {
        let board = board();
        let anchors = board.anchors();
        // the six squares around "bel" plus the two at its ends
        assert_eq!(anchors.len(), 8);
        assert!(anchors.contains(&(6, 7)));
        assert!(anchors.contains(&(10, 7)));
        assert!(anchors.contains(&(8, 6)));
        assert!(anchors.contains(&(8, 8)));
        assert!(!anchors.contains(&(7, 7)));
        assert!(!anchors.contains(&(0, 0)));
    }

    #[test]
    fn test_cross_checks() {
        let board = board();
        // below the 'b' of "bel": b_ must form a word downwards
        let fills: Vec<u8> = board.cross_check(7, 8, true).iter().collect();
        // be, bi, bo -> e, i, o
        assert_eq!(fills, vec![5, 9, 15]);
        // a free-standing square far away allows the whole alphabet
        assert_eq!(board.cross_check(0, 0, true), board.lexicon().alphabet());
    }

    #[test]
    fn test_cross_check_occupied() {
        let board = board();
        // occupied squares never take a tile in either axis
        assert!(board.cross_check(7, 7, false).is_empty());
    }

    #[test]
    fn test_score_plain_sum() -> Result<()> {
        // no premium squares at all
        let plain: Vec<String> = (0..N).map(|_| vec!["--"; N].join(" ")).collect();
        let board = Board::default()
            .with_lexicon_from_words(WORDS)?
            .with_premiums_from_strings(&plain)?;
        let word: Word = board.encode("bel")?;
        // b=4, e=1, l=1 with a rack of 7: no bonus
        assert_eq!(board.score_play(&word, 7, 7, true, 7)?, 6);
        Ok(())
    }

    #[test]
    fn test_score_word_premium() -> Result<()> {
        let board = Board::default().with_lexicon_from_words(WORDS)?;
        let word: Word = board.encode("bel")?;
        // (3,7) carries 2w: (4+1+1) * 2
        assert_eq!(board.score_play(&word, 3, 7, true, 7)?, 12);
        Ok(())
    }

    #[test]
    fn test_full_rack_bonus_iff_whole_rack() -> Result<()> {
        let plain: Vec<String> = (0..N).map(|_| vec!["--"; N].join(" ")).collect();
        let board = Board::default()
            .with_lexicon_from_words(WORDS)?
            .with_premiums_from_strings(&plain)?;
        let word: Word = board.encode("bel")?;
        // the move places 3 tiles: bonus only when the rack holds exactly 3
        assert_eq!(board.score_play(&word, 7, 7, true, 3)?, 6 + 40);
        assert_eq!(board.score_play(&word, 7, 7, true, 4)?, 6);
        Ok(())
    }

    #[test]
    fn test_score_crossing_words() -> Result<()> {
        let plain: Vec<String> = (0..N).map(|_| vec!["--"; N].join(" ")).collect();
        let board = Board::default()
            .with_lexicon_from_words(WORDS)?
            .with_premiums_from_strings(&plain)?
            .with_rows_from_strings(TEST_ROWS)?;
        // "aar" in the row under "bel" touches all three tiles:
        // main word 1+1+1, crossings b+a=5, e+a=2, l+r=2
        let word: Word = board.encode("aar")?;
        assert_eq!(board.score_play(&word, 7, 8, true, 7)?, 12);
        Ok(())
    }

    #[test]
    fn test_place_is_value_producing() -> Result<()> {
        let board = board();
        let word: Word = board.encode("be")?;
        let score = board.score_play(&word, 7, 7, false, 7)?;
        let mov = Move {
            x: 7,
            y: 7,
            horizontal: false,
            word,
            score,
        };
        let next = board.place(&mov)?;
        assert!(next.is_occupied(7, 8));
        // the original snapshot is untouched
        assert!(!board.is_occupied(7, 8));
        Ok(())
    }

    #[test]
    fn test_place_occupied_rejected() {
        let board = board();
        // "af" horizontally at (7,7) would cover the 'b' of "bel"
        let word: Word = board.encode("af").unwrap();
        let mov = Move {
            x: 7,
            y: 7,
            horizontal: true,
            word,
            score: 0,
        };
        assert!(matches!(
            board.place(&mov),
            Err(Error::SquareOccupied { x: 7, y: 7 })
        ));
    }

    #[test]
    fn test_place_out_of_bounds() {
        let board = board();
        let word: Word = board.encode("aas").unwrap();
        let mov = Move {
            x: 13,
            y: 0,
            horizontal: true,
            word,
            score: 0,
        };
        assert!(matches!(board.place(&mov), Err(Error::Placement { .. })));
    }

    #[test]
    fn test_used_letters_wildcard() -> Result<()> {
        let board = board();
        // word with an assigned blank: the rack must supply a blank
        let word: Word = board.encode("bE")?;
        let used = board.used_letters(&word, 7, 7, false)?;
        assert_eq!(used.codes(), vec![0x40]);
        Ok(())
    }
}
