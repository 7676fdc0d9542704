//! Keyword trie
//!
//! A character trie over case-folded keywords. Scanning walks the trie from
//! each word start and keeps the longest keyword that ends on a word
//! boundary.

use std::collections::HashMap;

/// Fold one character for case-insensitive comparison
///
/// Whitespace folds to a plain space, so a keyword wrapped onto the next
/// line still matches. Characters whose lowercase form is more than one
/// character are kept as-is; folding never changes character offsets.
pub fn fold_char(c: char) -> char {
    if c.is_whitespace() {
        return ' ';
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Fold a whole string with [`fold_char`]
pub fn fold(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// Characters that continue a word
///
/// Only ASCII letters, digits and `_`; everything else (punctuation,
/// whitespace, CJK) separates words.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, u32>,
    /// Entry id of the keyword ending here
    terminal: Option<u32>,
}

/// Trie automaton over folded keywords
#[derive(Debug)]
pub struct KeywordTrie {
    nodes: Vec<TrieNode>,
    len: usize,
}

impl Default for KeywordTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            len: 0,
        }
    }

    /// Number of keywords in the trie
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a keyword for `entry`
    ///
    /// Returns false (and keeps the existing entry) when the folded keyword
    /// is already present or empty.
    pub fn insert(&mut self, keyword: &str, entry: u32) -> bool {
        let mut node = 0usize;
        for c in keyword.chars().map(fold_char) {
            node = match self.nodes[node].children.get(&c) {
                Some(&next) => next as usize,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(c, next as u32);
                    next
                }
            };
        }

        if node == 0 || self.nodes[node].terminal.is_some() {
            return false;
        }
        self.nodes[node].terminal = Some(entry);
        self.len += 1;
        true
    }

    /// Entry id for an exact (folded) keyword
    pub fn get(&self, keyword: &str) -> Option<u32> {
        let mut node = 0usize;
        for c in keyword.chars().map(fold_char) {
            node = *self.nodes[node].children.get(&c)? as usize;
        }
        self.nodes[node].terminal
    }

    /// Longest keyword starting at `start` in folded `chars` that ends on a
    /// word boundary. Returns `(end, entry)` with `end` exclusive.
    pub fn longest_at(&self, chars: &[char], start: usize) -> Option<(usize, u32)> {
        let mut node = 0usize;
        let mut best = None;

        for (offset, c) in chars[start..].iter().enumerate() {
            node = match self.nodes[node].children.get(c) {
                Some(&next) => next as usize,
                None => break,
            };
            if let Some(entry) = self.nodes[node].terminal {
                let end = start + offset + 1;
                if is_end_boundary(chars, end) {
                    best = Some((end, entry));
                }
            }
        }

        best
    }
}

/// Whether a match may begin at `index`
pub fn is_start_boundary(chars: &[char], index: usize) -> bool {
    index == 0 || !(is_word_char(chars[index - 1]) && is_word_char(chars[index]))
}

/// Whether a match may end at `end` (exclusive)
pub fn is_end_boundary(chars: &[char], end: usize) -> bool {
    end == chars.len() || !(is_word_char(chars[end - 1]) && is_word_char(chars[end]))
}
