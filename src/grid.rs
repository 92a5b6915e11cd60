use crate::Error;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

const N: usize = 15;
const Q: usize = 1 + N / 2;

const DEFAULT_QUARTER: [&str; Q] = [
    "3l -- -- -- 3w -- -- 2l",
    "-- 2l -- -- -- 3l -- --",
    "-- -- 2w -- -- -- 2l --",
    "-- -- -- 3l -- -- -- 2w",
    "3w -- -- -- 2w -- 2l --",
    "-- 3l -- -- -- 3l -- --",
    "-- -- 2l -- 2l -- -- --",
    "2l -- -- 2w -- -- -- ss",
];

/// The premium of one board square.
///
/// `Start` marks the designated start square of an empty board and carries
/// no multiplier of its own.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Premium {
    None,
    Start,
    Letter(u32),
    Word(u32),
}

impl fmt::Display for Premium {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Premium::None => write!(f, "--"),
            Premium::Start => write!(f, "ss"),
            Premium::Letter(n) => write!(f, "{}l", n),
            Premium::Word(n) => write!(f, "{}w", n),
        }
    }
}

impl FromStr for Premium {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "--" => Ok(Premium::None),
            "ss" => Ok(Premium::Start),
            "2l" => Ok(Premium::Letter(2)),
            "3l" => Ok(Premium::Letter(3)),
            "2w" => Ok(Premium::Word(2)),
            "3w" => Ok(Premium::Word(3)),
            _ => Err(Error::PremiumParseError(String::from(s))),
        }
    }
}

type Inner = [[Premium; N]; N];

/// The premium layout of a board: 15x15 squares with letter/word bonuses.
/// Fixed at construction, from the external board-layout source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid(Inner);

impl Deref for Grid {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Grid {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_strings().join("\n"))
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::expand_quarter(&DEFAULT_QUARTER)
    }
}

impl Grid {
    fn empty() -> Grid {
        Grid([[Premium::None; N]; N])
    }

    /// Create a symmetrical grid by mirroring a quarter board horizontally
    /// and vertically.
    fn expand_quarter(quarter: &[&str; Q]) -> Grid {
        let mut grid = Grid::empty();
        for (i, row) in quarter.iter().enumerate() {
            let row = row.split(' ').collect::<Vec<&str>>();
            assert!(row.len() == Q);
            for (j, square) in row.iter().enumerate() {
                let premium = square.parse().unwrap();
                grid[i][j] = premium;
                grid[N - i - 1][j] = premium;
                grid[i][N - j - 1] = premium;
                grid[N - i - 1][N - j - 1] = premium;
            }
        }
        grid
    }

    /// The designated start square: the first `ss` in the layout, reading
    /// left to right, top to bottom. Falls back to the center square for a
    /// layout without one.
    pub fn start_square(&self) -> (usize, usize) {
        for y in 0..N {
            for x in 0..N {
                if self.0[y][x] == Premium::Start {
                    return (x, y);
                }
            }
        }
        (N / 2, N / 2)
    }

    /// The grid as 15 strings of 15 space-joined squares.
    pub fn to_strings(&self) -> Vec<String> {
        self.iter()
            .map(|row| {
                row.iter()
                    .map(Premium::to_string)
                    .collect::<Vec<String>>()
                    .join(" ")
            })
            .collect()
    }

    /// Parse a grid from 15 strings of 15 space-joined squares.
    /// This is the interface to the external board-layout source.
    /// ## Errors
    /// If `rows` has wrong dimensions, or a square can not be parsed as a
    /// [`Premium`].
    pub fn from_strings<S: AsRef<str>>(rows: &[S]) -> Result<Grid, Error> {
        if rows.len() != N {
            return Err(Error::InvalidRowCount(rows.len()));
        }
        let mut grid = Grid::empty();
        for (i, row) in rows.iter().enumerate() {
            let row: Vec<&str> = row.as_ref().split(' ').collect();
            if row.len() != N {
                return Err(Error::InvalidRowLength(
                    row.join(" "),
                    row.len(),
                ));
            }
            for (j, &square) in row.iter().enumerate() {
                grid[i][j] = square.parse()?;
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() -> Result<(), Error> {
        let grid = Grid::default();
        let strings = grid.to_strings();
        assert_eq!(Grid::from_strings(&strings)?, grid);
        Ok(())
    }

    #[test]
    fn test_start_square() {
        assert_eq!(Grid::default().start_square(), (7, 7));
        // a layout without an explicit start falls back to the center
        let blank = Grid::empty();
        assert_eq!(blank.start_square(), (7, 7));
    }

    #[test]
    fn test_parse_error() {
        let mut strings = Grid::default().to_strings();
        strings[3] = strings[3].replace("3l", "9q");
        assert!(matches!(
            Grid::from_strings(&strings),
            Err(Error::PremiumParseError(_))
        ));
    }
}
