use crate::bag::Bag;
use crate::board::Board;
use crate::movegen::Move;
use crate::tiles::{Code, Letter, Piece, Rack, BLANK};
use crate::Error;
use rand::Rng;
use std::convert::TryFrom;

/// A snapshot of a game: board, both racks, remaining bag, cumulative
/// scores and whose turn it is.
///
/// Snapshots are values. [`commit_move`](GamePosition::commit_move) and
/// friends derive a new position and leave the receiver untouched, so a
/// caller replaying a game log keeps every prior position valid. A
/// game-log reader drives this type move by move; rack-reveal events go
/// through [`with_rack`](GamePosition::with_rack).
#[derive(Debug, Clone)]
pub struct GamePosition {
    board: Board,
    racks: [Rack; 2],
    scores: [i32; 2],
    bag: Bag,
    turn: usize,
}

impl GamePosition {
    /// A fresh position over `board` with the given racks. The bag holds
    /// everything the tileset provides minus what is on the board and the
    /// racks.
    pub fn new(board: Board, racks: [Rack; 2]) -> GamePosition {
        let bag = GamePosition::unseen(&board, &racks);
        GamePosition {
            board,
            racks,
            scores: [0; 2],
            bag,
            turn: 0,
        }
    }

    /// The tiles neither on the board nor on a rack.
    fn unseen(board: &Board, racks: &[Rack; 2]) -> Bag {
        let mut seen: Vec<Code> = Vec::new();
        for y in 0..crate::board::N {
            for x in 0..crate::board::N {
                if let Some(tile) = board.tile_at(x, y) {
                    // a placed blank came out of the bag as a blank
                    seen.push(if tile.is_wildcard() { BLANK } else { tile.code() });
                }
            }
        }
        for rack in racks.iter() {
            seen.extend(rack.iter().map(|letter| letter.code()));
        }
        Bag::from(board.tileset().as_ref()) - Bag::from(&seen)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rack(&self, player: usize) -> &Rack {
        &self.racks[player]
    }

    /// The rack of the player to move.
    pub fn rack_to_move(&self) -> &Rack {
        &self.racks[self.turn]
    }

    pub fn score(&self, player: usize) -> i32 {
        self.scores[player]
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    /// Commit `mov` for the player to move and return the new position.
    ///
    /// Validation is strict and all-or-nothing: the move must fit the
    /// board, agree with every covered tile, place at least one tile, and
    /// take every placed tile from the mover's rack. On any failure the
    /// receiver is unchanged and an error describes the first violation.
    /// ## Errors
    /// [`Error::Placement`], [`Error::SquareOccupied`],
    /// [`Error::NothingPlaced`] or [`Error::TileNotInRack`].
    pub fn commit_move(&self, mov: &Move) -> Result<GamePosition, Error> {
        let used = self
            .board
            .used_letters(&mov.word, mov.x, mov.y, mov.horizontal)?;
        if used.is_empty() {
            return Err(Error::NothingPlaced);
        }
        let mut rack = self.racks[self.turn];
        for letter in used.iter() {
            match rack.position(letter.code()) {
                Some(pos) => rack = rack.without(pos),
                None => {
                    let mut missing = Rack::new();
                    missing.push(*letter);
                    return Err(Error::TileNotInRack(self.board.decode(missing)));
                }
            }
        }
        let board = self.board.place(mov)?;
        let mut racks = self.racks;
        racks[self.turn] = rack;
        let mut scores = self.scores;
        scores[self.turn] += mov.score as i32;
        Ok(GamePosition {
            board,
            racks,
            scores,
            bag: self.bag.clone(),
            turn: 1 - self.turn,
        })
    }

    /// The player to move passes: only the turn changes.
    pub fn pass(&self) -> GamePosition {
        let mut next = self.clone();
        next.turn = 1 - next.turn;
        next
    }

    /// Refill a player's rack from the bag up to the configured rack
    /// size. A short or empty bag is not an error: the rack simply stays
    /// short (the no-draw turn of an exhausted bag).
    pub fn draw_to_rack<R: Rng>(&self, player: usize, rng: &mut R) -> GamePosition {
        let mut next = self.clone();
        let rack_size = next.board.tileset().rack_size();
        let need = rack_size.saturating_sub(next.racks[player].len());
        for code in next.bag.draw(need, rng) {
            // the bag only ever holds valid letter codes
            let letter = Letter::try_from(code).expect("bag holds letter codes");
            next.racks[player].push(letter);
        }
        next
    }

    /// Replace a player's rack (a rack-reveal event during log replay).
    /// The bag is rebalanced against the new rack contents.
    pub fn with_rack(&self, player: usize, rack: Rack) -> GamePosition {
        let mut racks = self.racks;
        racks[player] = rack;
        let bag = GamePosition::unseen(&self.board, &racks);
        GamePosition {
            board: self.board.clone(),
            racks,
            scores: self.scores,
            bag,
            turn: self.turn,
        }
    }

    /// Set whose turn it is (log replay).
    pub fn with_turn(&self, turn: usize) -> GamePosition {
        let mut next = self.clone();
        next.turn = turn;
        next
    }

    /// Return a player's tiles to the bag and empty the rack.
    ///
    /// Simulation uses this on the opponent: their real rack is hidden
    /// information, so each trial pools it with the bag and samples a
    /// fresh one.
    pub fn pool_rack(&self, player: usize) -> GamePosition {
        let mut next = self.clone();
        next.bag.put_back(&next.racks[player]);
        next.racks[player] = Rack::new();
        next
    }
}
