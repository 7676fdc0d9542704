//! Multi-pattern keyword matcher
//!
//! Finds every catalog keyword in a text in one left-to-right pass over a
//! trie built once per catalog.
//!
//! Matching rules:
//!
//! - case-insensitive
//! - non-overlapping, scanning left to right
//! - at a given start the longest keyword wins
//! - keywords only match whole words (see [`trie::is_word_char`])
//!
//! Offsets in [`MatchSpan`] are zero-based character offsets into the
//! scanned text, not byte offsets.
//!
//! ```rust,ignore
//! for span in find_all("She felt painful", &catalog) {
//!     println!("{} at {}..{}", span.keyword, span.start, span.end);
//! }
//! ```

pub mod trie;

use serde::Serialize;

use crate::document::ColorTag;
use crate::vocabulary::Catalog;

pub use trie::{fold, fold_char, KeywordTrie};

/// One matched keyword occurrence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSpan<'c> {
    /// Keyword as first registered in the catalog
    pub keyword: &'c str,
    /// Catalog entry id
    pub entry: u32,
    /// Start character offset (inclusive)
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
    pub color: ColorTag,
}

/// Lazy iterator over the matches in one text
///
/// Created by [`find_all`]. Holds no state beyond the current position, so
/// every call to `find_all` starts over.
pub struct Matches<'c> {
    catalog: &'c Catalog,
    chars: Vec<char>,
    pos: usize,
}

impl<'c> Iterator for Matches<'c> {
    type Item = MatchSpan<'c>;

    fn next(&mut self) -> Option<Self::Item> {
        let trie = self.catalog.trie();

        while self.pos < self.chars.len() {
            let start = self.pos;
            if trie::is_start_boundary(&self.chars, start) {
                if let Some((end, entry)) = trie.longest_at(&self.chars, start) {
                    self.pos = end;
                    let keyword = self.catalog.entry(entry);
                    return Some(MatchSpan {
                        keyword: &keyword.keyword,
                        entry,
                        start,
                        end,
                        color: keyword.color,
                    });
                }
            }
            self.pos += 1;
        }

        None
    }
}

/// Scan `text` for every keyword in `catalog`
pub fn find_all<'c>(text: &str, catalog: &'c Catalog) -> Matches<'c> {
    Matches {
        catalog,
        chars: text.chars().map(trie::fold_char).collect(),
        pos: 0,
    }
}
