mod trie;

use self::trie::TrieNode;
use crate::symbolset::SymbolSet;
use crate::tiles::{Codec, Piece, PieceList, Symbol};
use crate::Error;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::convert::TryFrom;
use std::fmt;
use std::fs::read_to_string;

/// Traversal direction through the [`Lexicon`].
///
/// `Forward` extends a prefix to the right; `Backward` extends a suffix to
/// the left. Move generation and cross-check computation need both,
/// because words grow out of an anchor square in both directions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Forward = 0,
    Backward = 1,
}

/// A traversal position: a node plus the direction the walk is tagged
/// with. Cursors are cheap values; the automaton itself is never modified
/// after construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cursor {
    node: u32,
    dir: Direction,
}

impl Cursor {
    pub fn direction(&self) -> Direction {
        self.dir
    }
}

/// The dictionary automaton: a compact trie over the alphabet holding
/// every word forward (root 0) and reversed (root 1) in one node arena.
///
/// Built once from a word list, read-only afterwards, so it can be shared
/// across simulation threads without locking.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lexicon {
    /// Node rows: index of the first child, and the outgoing edge set.
    /// A child is found at `first_child + edges.index_of(symbol)`.
    nodes: Vec<(u32, SymbolSet)>,
    /// Terminal flag per node (a complete word ends here).
    terminal: Vec<bool>,
    /// Every symbol that occurs in the word list.
    alphabet: SymbolSet,
    /// The number of words in the lexicon.
    word_count: usize,
    /// Path of the word file, empty if built from a word slice.
    wordfile: String,
    /// Encode words to/from symbols.
    codec: Codec,
}

impl fmt::Display for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "<Lexicon: {} words, {} nodes from '{}'>",
            self.word_count,
            self.nodes.len(),
            self.wordfile
        )
    }
}

impl Lexicon {
    /// Build a lexicon from a list of words.
    /// ## Errors
    /// If a word holds characters outside the alphabet of `codec`
    /// (a configuration error: no partial lexicon is returned).
    pub fn from_words(words: &[&str], codec: &Codec) -> Result<Lexicon, Error> {
        let mut forward = TrieNode::new();
        let mut backward = TrieNode::new();
        let mut alphabet = SymbolSet::new();
        for &word in words {
            let symbols = codec.encode(word)?;
            for &symbol in &symbols {
                // only plain lowercase symbols belong in a word list;
                // blanks and spaces are rack and board notation
                if symbol == 0 || symbol >= 32 {
                    return Err(Error::EncodeInvalidToken(String::from(word)));
                }
                alphabet.insert(symbol);
            }
            forward.insert(&symbols);
            let reversed: Vec<Symbol> = symbols.iter().rev().copied().collect();
            backward.insert(&reversed);
        }
        Ok(Lexicon::flatten(&forward, &backward, alphabet, codec))
    }

    /// Read the lexicon from a file with one word per line, utf-8.
    /// ## Errors
    /// If the file can not be read, or a word can not be encoded.
    pub fn from_file(wordfile: &str, codec: &Codec) -> Result<Lexicon, Error> {
        let contents = read_to_string(wordfile).map_err(|source| Error::ReadError {
            path: String::from(wordfile),
            source,
        })?;
        let words: Vec<&str> = contents
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .collect();
        let mut lexicon = Lexicon::from_words(&words, codec)?;
        lexicon.wordfile = String::from(wordfile);
        Ok(lexicon)
    }

    #[cfg(all(feature = "bincode", feature = "serde"))]
    /// Deserialize a lexicon from a bincoded file.
    /// ## Errors
    /// If the file can not be read or decoded.
    pub fn deserialize_from(wordfile: &str) -> Result<Lexicon, Error> {
        use std::fs::File;
        use std::io::BufReader;
        let file = File::open(wordfile).map_err(|source| Error::ReadError {
            path: String::from(wordfile),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut lexicon: Lexicon = bincode::deserialize_from(reader)
            .map_err(|_| Error::LexiconDeserializeError(String::from(wordfile)))?;
        lexicon.wordfile = String::from(wordfile);
        Ok(lexicon)
    }

    /// Flatten the two insertion tries into one breadth-first node arena.
    /// Root 0 is the forward trie, root 1 the backward trie; the children
    /// of a node occupy consecutive rows in symbol order.
    fn flatten(
        forward: &TrieNode,
        backward: &TrieNode,
        alphabet: SymbolSet,
        codec: &Codec,
    ) -> Lexicon {
        let mut nodes: Vec<(u32, SymbolSet)> = Vec::new();
        let mut terminal: Vec<bool> = Vec::new();
        let mut queue: VecDeque<&TrieNode> = VecDeque::new();
        for &root in &[forward, backward] {
            let edges = root.children().iter().map(|&(s, _)| s).collect();
            nodes.push((0, edges));
            terminal.push(root.terminal());
            queue.push_back(root);
        }
        let mut popped = 0;
        while let Some(node) = queue.pop_front() {
            nodes[popped].0 = nodes.len() as u32;
            for (_, child) in node.children() {
                let edges = child.children().iter().map(|&(s, _)| s).collect();
                nodes.push((0, edges));
                terminal.push(child.terminal());
                queue.push_back(child);
            }
            popped += 1;
        }
        Lexicon {
            nodes,
            terminal,
            alphabet,
            word_count: forward.word_count(),
            wordfile: String::new(),
            codec: codec.clone(),
        }
    }

    /// A cursor at the root for the given traversal direction.
    pub fn cursor(&self, dir: Direction) -> Cursor {
        Cursor {
            node: dir as u32,
            dir,
        }
    }

    /// Follow the edge for `symbol`, staying in the cursor's direction.
    pub fn step(&self, cursor: Cursor, symbol: Symbol) -> Option<Cursor> {
        let (first_child, edges) = &self.nodes[cursor.node as usize];
        edges.index_of(symbol).map(|rank| Cursor {
            node: first_child + rank as u32,
            dir: cursor.dir,
        })
    }

    /// Walk a whole sequence of symbols from `cursor`.
    pub fn walk(&self, cursor: Cursor, symbols: &[Symbol]) -> Option<Cursor> {
        let mut cursor = cursor;
        for &symbol in symbols {
            cursor = self.step(cursor, symbol)?;
        }
        Some(cursor)
    }

    /// Every symbol that continues the partial sequence at `cursor` in its
    /// direction. Every node lies on a path to a terminal, so each edge
    /// leads to at least one complete word.
    pub fn extensions(&self, cursor: Cursor) -> SymbolSet {
        self.nodes[cursor.node as usize].1
    }

    /// Whether a complete word ends at `cursor`.
    pub fn is_terminal(&self, cursor: Cursor) -> bool {
        self.terminal[cursor.node as usize]
    }

    /// Every symbol that can extend `partial` in `dir` toward a complete
    /// word. `partial` is given in board order; a backward walk reads it
    /// from its end (the symbols that could precede it on the board).
    pub fn valid_extensions(&self, partial: &[Symbol], dir: Direction) -> SymbolSet {
        let symbols: Vec<Symbol> = match dir {
            Direction::Forward => partial.to_vec(),
            Direction::Backward => partial.iter().rev().copied().collect(),
        };
        match self.walk(self.cursor(dir), &symbols) {
            Some(cursor) => self.extensions(cursor),
            None => SymbolSet::new(),
        }
    }

    /// Exact-match lookup, forward traversal.
    pub fn is_word(&self, symbols: &[Symbol]) -> bool {
        match self.walk(self.cursor(Direction::Forward), symbols) {
            Some(cursor) => self.is_terminal(cursor),
            None => false,
        }
    }

    /// The cross-check primitive: every symbol `c` such that
    /// `prefix + c + suffix` is a word.
    ///
    /// Chooses the traversal direction by the shape of the context: a
    /// prefix walks forward, a bare suffix walks backward from the end.
    /// An unconstrained square (both sides empty) allows the whole
    /// alphabet.
    pub fn legal_fills(&self, prefix: &[Symbol], suffix: &[Symbol]) -> SymbolSet {
        if prefix.is_empty() && suffix.is_empty() {
            return self.alphabet;
        }
        let mut fills = SymbolSet::new();
        if suffix.is_empty() {
            if let Some(cursor) = self.walk(self.cursor(Direction::Forward), prefix) {
                for symbol in self.extensions(cursor).iter() {
                    // walk is infallible here: symbol is an edge of cursor
                    if let Some(next) = self.step(cursor, symbol) {
                        if self.is_terminal(next) {
                            fills.insert(symbol);
                        }
                    }
                }
            }
        } else if prefix.is_empty() {
            let reversed: Vec<Symbol> = suffix.iter().rev().copied().collect();
            if let Some(cursor) = self.walk(self.cursor(Direction::Backward), &reversed) {
                for symbol in self.extensions(cursor).iter() {
                    if let Some(next) = self.step(cursor, symbol) {
                        if self.is_terminal(next) {
                            fills.insert(symbol);
                        }
                    }
                }
            }
        } else if let Some(cursor) = self.walk(self.cursor(Direction::Forward), prefix) {
            for symbol in self.extensions(cursor).iter() {
                if let Some(next) = self.step(cursor, symbol) {
                    if let Some(end) = self.walk(next, suffix) {
                        if self.is_terminal(end) {
                            fills.insert(symbol);
                        }
                    }
                }
            }
        }
        fills
    }

    /// Every symbol occurring in the word list.
    pub fn alphabet(&self) -> SymbolSet {
        self.alphabet
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Encode a string with our codec.
    /// ## Errors
    /// If the string can not be encoded.
    pub fn encode<T: Piece>(&self, word: &str) -> Result<PieceList<T>, Error> {
        PieceList::<T>::try_from(self.codec.encode(word)?)
    }

    /// Decode a piece list back to a string with our codec.
    pub fn decode<T: Piece>(&self, pieces: PieceList<T>) -> String {
        self.codec.decode(&pieces.codes()).join("")
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }
}
