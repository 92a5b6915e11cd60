use crate::tiles::{Code, Piece, Rack, BLANK};
use crate::tileset::TileSet;
use multiset::HashMultiSet;
use rand::seq::IteratorRandom;
use rand::Rng;
use std::ops::{Deref, Sub};

/// The pool of undrawn tiles, as a multiset of tile codes.
///
/// Running dry is not an error: [`draw`](Bag::draw) simply returns fewer
/// tiles than asked for.
#[derive(Debug, Clone)]
pub struct Bag(HashMultiSet<Code>);

impl Deref for Bag {
    type Target = HashMultiSet<Code>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Sub for Bag {
    type Output = Self;
    fn sub(self, other: Self) -> Self::Output {
        Self(self.0 - other.0)
    }
}

impl Bag {
    pub fn new() -> Self {
        Self(HashMultiSet::new())
    }

    fn from_tileset(tileset: &TileSet) -> Self {
        let mut bag = HashMultiSet::new();
        for code in 1..tileset.symbol_count() as u8 {
            let count = tileset.count(code);
            if count > 0 {
                bag.insert_times(code, count as usize);
            }
        }
        bag.insert_times(BLANK, tileset.blank_count() as usize);
        Self(bag)
    }

    fn from_codes<T: AsRef<[Code]>>(codes: T) -> Bag {
        let mut bag = HashMultiSet::new();
        for &code in codes.as_ref() {
            bag.insert(code);
        }
        Self(bag)
    }

    /// Draw up to `n` tiles uniformly, without replacement. A bag with
    /// fewer than `n` tiles yields what it has.
    ///
    /// The pool is sorted before sampling, so equal seeds draw equal
    /// tiles whatever the multiset's internal order.
    pub fn draw<R: Rng>(&mut self, n: usize, rng: &mut R) -> Vec<Code> {
        let mut pool: Vec<Code> = self.0.iter().cloned().collect();
        pool.sort_unstable();
        let drawn = pool.into_iter().choose_multiple(rng, n);
        for code in &drawn {
            self.0.remove(code);
        }
        drawn
    }

    /// Return a rack's tiles to the bag.
    pub fn put_back(&mut self, rack: &Rack) {
        for letter in rack.iter() {
            self.0.insert(letter.code());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.len() == 0
    }
}

impl Default for Bag {
    fn default() -> Self {
        Bag::new()
    }
}

impl From<&TileSet> for Bag {
    fn from(tileset: &TileSet) -> Self {
        Bag::from_tileset(tileset)
    }
}

impl<T> From<T> for Bag
where
    T: AsRef<[Code]>,
{
    fn from(codes: T) -> Self {
        Bag::from_codes(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::convert::TryFrom;

    #[test]
    fn test_full_bag() {
        let tileset = TileSet::english();
        let bag = Bag::from(&tileset);
        assert_eq!(bag.len(), 104);
        assert_eq!(bag.count_of(&BLANK), 2);
        assert_eq!(bag.count_of(&5), 12);
    }

    #[test]
    fn test_difference() {
        let tileset = TileSet::english();
        let bag = Bag::from(&tileset) - Bag::from(vec![1u8, 1, 5, BLANK]);
        assert_eq!(bag.len(), 100);
        assert_eq!(bag.count_of(&1), 8);
        assert_eq!(bag.count_of(&BLANK), 1);
    }

    #[test]
    fn test_draw_without_replacement() {
        let mut bag = Bag::from(vec![1u8, 1, 2, 3]);
        let mut rng = StdRng::seed_from_u64(7);
        let drawn = bag.draw(3, &mut rng);
        assert_eq!(drawn.len(), 3);
        assert_eq!(bag.len(), 1);
        // drawing more than the bag holds yields what is left
        let rest = bag.draw(5, &mut rng);
        assert_eq!(rest.len(), 1);
        assert!(bag.is_empty());
        assert!(bag.draw(7, &mut rng).is_empty());
    }

    #[test]
    fn test_draw_deterministic() {
        let draw_with_seed = |seed| {
            let mut bag = Bag::from(&TileSet::english());
            bag.draw(7, &mut StdRng::seed_from_u64(seed))
        };
        assert_eq!(draw_with_seed(42), draw_with_seed(42));
    }

    #[test]
    fn test_put_back() {
        let mut bag = Bag::new();
        let rack: Rack = vec![1u8, 2, BLANK]
            .into_iter()
            .map(|code| crate::tiles::Letter::try_from(code).unwrap())
            .collect();
        bag.put_back(&rack);
        assert_eq!(bag.len(), 3);
        assert_eq!(bag.count_of(&BLANK), 1);
    }
}
