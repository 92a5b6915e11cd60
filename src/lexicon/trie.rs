use crate::tiles::Symbol;

/// Insertion-time trie, flattened into the [`Lexicon`](crate::Lexicon)
/// node arena once every word is in.
#[derive(Debug, Default)]
pub(super) struct TrieNode {
    children: Vec<(Symbol, Box<TrieNode>)>,
    terminal: bool,
}

impl TrieNode {
    pub fn new() -> TrieNode {
        TrieNode {
            children: Vec::new(),
            terminal: false,
        }
    }

    /// Insert a key, keeping the children of every node sorted by symbol.
    pub fn insert(&mut self, key: &[Symbol]) {
        let mut node = self;
        for &symbol in key {
            let pos = match node
                .children
                .binary_search_by_key(&symbol, |&(s, _)| s)
            {
                Ok(pos) => pos,
                Err(pos) => {
                    node.children
                        .insert(pos, (symbol, Box::new(TrieNode::new())));
                    pos
                }
            };
            node = &mut { node }.children[pos].1;
        }
        node.terminal = true;
    }

    pub fn has(&self, key: &[Symbol]) -> bool {
        let mut node = self;
        for symbol in key {
            match node.children.binary_search_by(|(s, _)| s.cmp(symbol)) {
                Ok(pos) => node = &node.children[pos].1,
                Err(_) => return false,
            }
        }
        node.terminal
    }

    pub fn children(&self) -> &[(Symbol, Box<TrieNode>)] {
        &self.children
    }

    pub fn terminal(&self) -> bool {
        self.terminal
    }

    /// Number of complete words below (and at) this node.
    pub fn word_count(&self) -> usize {
        let mut count = self.terminal as usize;
        for (_, child) in &self.children {
            count += child.word_count();
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(word: &str) -> Vec<Symbol> {
        word.bytes().map(|b| b - b'a' + 1).collect()
    }

    #[test]
    fn test_insert_has() {
        let mut trie = TrieNode::new();
        let words = ["to", "tea", "ten", "i", "in", "inn", "we"];
        for word in &words {
            trie.insert(&key(word));
        }
        for word in &words {
            assert!(trie.has(&key(word)), "trie should have '{}'", word);
        }
        for word in &["te", "inno", "web", "x", ""] {
            assert!(!trie.has(&key(word)), "trie should not have '{}'", word);
        }
        assert_eq!(trie.word_count(), words.len());
    }

    #[test]
    fn test_sorted_children() {
        let mut trie = TrieNode::new();
        for word in &["cab", "bad", "ace"] {
            trie.insert(&key(word));
        }
        let symbols: Vec<Symbol> = trie.children().iter().map(|&(s, _)| s).collect();
        assert_eq!(symbols, vec![1, 2, 3]);
    }

    #[test]
    fn test_duplicate_insert() {
        let mut trie = TrieNode::new();
        trie.insert(&key("tea"));
        trie.insert(&key("tea"));
        assert_eq!(trie.word_count(), 1);
    }
}
