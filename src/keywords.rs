// src/keywords.rs
//! Keyword-set construction from a newline-separated word list.

use crate::error::Result;
use crate::trie::PrefixMap;

/// Builds the reserved-word set from newline-separated text. Blank lines and
/// stray carriage returns are ignored. The set is only ever used for
/// membership tests: keywords are excluded from call-candidate detection.
///
/// # Errors
///
/// Returns an error if a word contains a character outside the identifier
/// alphabet or the node ceiling is exceeded.
pub fn build_keyword_set(text: &str, max_nodes: usize) -> Result<PrefixMap> {
    let mut set = PrefixMap::new(max_nodes);
    for word in text.lines() {
        let word = word.trim_end_matches('\r');
        if !word.is_empty() {
            set.insert(word, 1)?;
        }
    }
    Ok(set)
}
