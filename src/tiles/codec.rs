use super::codes::{Code, BLANK, EMPTY};
use super::DIM;
use crate::error::Error;
use std::collections::HashMap;

const NCODE: usize = 256;
const NOGLYPH: [Option<char>; 2] = [None; 2];

const ASCII_LC: &str = "abcdefghijklmnopqrstuvwxyz";

/// Translate between strings and tile codes.
/// Each tile is represented by one code:
/// - 0: no tile (empty square)
/// - 1 ..= 26: `a` .. `z`
/// - 27 ..= 31: language specific symbols past `z`
/// - 64: unassigned blank `*`
/// - 65 ..= 95: blank assigned to a symbol (`A` .. `Z` and beyond)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Codec {
    encoder: HashMap<String, Code>,
    decoder: Vec<[Option<char>; 2]>,
}

impl Default for Codec {
    fn default() -> Codec {
        Codec::new(&[])
    }
}

impl Codec {
    /// Return a new `Codec` for "a".."z", "*", "." and " ", extended with
    /// the language specific glyphs in `extra`.
    /// ## Examples
    /// ```
    /// use kibitzer::Codec;
    /// let codec = Codec::new(&["ä", "ö", "ü"]);
    /// ```
    pub fn new(extra: &[&str]) -> Codec {
        let mut encoder = HashMap::new();
        for (i, ch) in ASCII_LC.chars().enumerate() {
            encoder.insert(String::from(ch), i as u8 + 1);
            encoder.insert(String::from(ch.to_ascii_uppercase()), (i as u8 + 1) | BLANK);
        }
        let n = ASCII_LC.len();
        for (i, s) in extra.iter().enumerate() {
            encoder.insert(String::from(*s), (i + n + 1) as u8);
            encoder.insert(s.to_uppercase(), (i + n + 1) as u8 | BLANK);
        }
        encoder.insert(String::from("."), EMPTY);
        encoder.insert(String::from("*"), BLANK);

        let mut decoder = vec![NOGLYPH; NCODE];
        for (k, &v) in &encoder {
            let mut it = k.chars();
            decoder[v as usize] = [it.next(), it.next()];
        }
        // encode both '.' and ' ' to EMPTY, but always decode to '.'
        encoder.insert(String::from(" "), EMPTY);
        Codec { encoder, decoder }
    }

    /// Encode a string, and return a list of codes.
    /// ## Errors
    /// If the string is longer than a board row, or contains a token
    /// outside the alphabet.
    /// ## Examples
    /// ```
    /// use kibitzer::{Codec, Error};
    /// let codec = Codec::new(&["ä"]);
    /// assert_eq!(codec.encode("azAä *")?, vec![1, 26, 65, 27, 0, 64]);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn encode(&self, word: &str) -> Result<Vec<Code>, Error> {
        let tokens: Vec<String> = word.chars().map(String::from).collect();
        if tokens.len() > DIM {
            return Err(Error::EncodeStringTooLong(String::from(word)));
        }
        tokens
            .into_iter()
            .map(|token| {
                self.encoder
                    .get(&token)
                    .copied()
                    .ok_or(Error::EncodeInvalidToken(token))
            })
            .collect()
    }

    /// Decode codes back to a list of strings. Unknown codes decode to "?".
    pub fn decode(&self, codes: &[Code]) -> Vec<String> {
        codes
            .iter()
            .map(|&code| {
                let glyphs = self.decoder[code as usize];
                let mut s = String::new();
                s.push(glyphs[0].unwrap_or('?'));
                if let Some(ch) = glyphs[1] {
                    s.push(ch);
                }
                s
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let codec = Codec::default();
        assert_eq!(codec.encode("azAZ*").unwrap(), vec![1, 26, 65, 90, 64]);
    }

    #[test]
    fn test_decode() {
        let codec = Codec::new(&["ä", "ö", "ü"]);
        let decoded = codec.decode(&[1, 26, 65, 90, 27, 0, 64]);
        assert_eq!(decoded, &["a", "z", "A", "Z", "ä", ".", "*"]);
    }

    #[test]
    fn test_encode_error() {
        let codec = Codec::default();
        assert!(matches!(
            codec.encode("Illegal!"),
            Err(Error::EncodeInvalidToken(_))
        ));
    }
}
