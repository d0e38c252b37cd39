// src/trie.rs
//! Prefix map: a trie over the 64-symbol identifier alphabet, backed by an
//! index-addressed arena.
//!
//! Two instances exist per run with very different lifetimes: the long-lived
//! keyword set, and a short-lived call-rank dictionary owned by a single
//! submission. Both share this one implementation; they never share storage.
//!
//! Nodes live in a flat `Vec` and point to each other by index, so insert and
//! lookup are plain loops over the key's characters. Node allocation past the
//! configured ceiling fails with `CapacityExceeded` rather than growing
//! without bound.

use crate::error::{Result, SimError};

/// Alphabet size: `_`, `0-9`, `A-Z`, `a-z`.
const ALPHABET: usize = 64;

/// Maps an identifier character to its branch index, or `None` for any
/// character outside the alphabet.
fn char_index(ch: char) -> Option<usize> {
    match ch {
        '_' => Some(0),
        '0'..='9' => Some(1 + (ch as usize - '0' as usize)),
        'A'..='Z' => Some(1 + 10 + (ch as usize - 'A' as usize)),
        'a'..='z' => Some(1 + 10 + 26 + (ch as usize - 'a' as usize)),
        _ => None,
    }
}

struct Node {
    value: Option<u32>,
    children: [Option<u32>; ALPHABET],
}

impl Node {
    fn new() -> Self {
        Self {
            value: None,
            children: [None; ALPHABET],
        }
    }
}

/// String-to-integer map with lazily created paths.
pub struct PrefixMap {
    nodes: Vec<Node>,
    max_nodes: usize,
}

impl PrefixMap {
    /// Creates an empty map holding only the root node. `max_nodes` is the
    /// allocation ceiling, root included.
    #[must_use]
    pub fn new(max_nodes: usize) -> Self {
        Self {
            nodes: vec![Node::new()],
            max_nodes,
        }
    }

    /// Stores `value` at `key`, creating the path as needed and overwriting
    /// any prior value for the exact key.
    ///
    /// # Errors
    ///
    /// `InvalidKeyChar` if `key` contains a character outside the identifier
    /// alphabet; `CapacityExceeded` if the path would exceed the node ceiling.
    pub fn insert(&mut self, key: &str, value: u32) -> Result<()> {
        let mut cur = 0usize;
        for ch in key.chars() {
            let branch = char_index(ch).ok_or_else(|| SimError::InvalidKeyChar {
                ch,
                key: key.to_string(),
            })?;
            cur = match self.nodes[cur].children[branch] {
                Some(next) => next as usize,
                None => {
                    if self.nodes.len() >= self.max_nodes {
                        return Err(SimError::CapacityExceeded {
                            what: "prefix map nodes",
                            limit: self.max_nodes,
                        });
                    }
                    let next = self.nodes.len() as u32;
                    self.nodes.push(Node::new());
                    self.nodes[cur].children[branch] = Some(next);
                    next as usize
                }
            };
        }
        self.nodes[cur].value = Some(value);
        Ok(())
    }

    /// Returns the value stored at `key`, or `None` if no such path exists.
    /// A key containing an out-of-alphabet character is simply not present.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<u32> {
        let mut cur = 0usize;
        for ch in key.chars() {
            let branch = char_index(ch)?;
            cur = self.nodes[cur].children[branch]? as usize;
        }
        self.nodes[cur].value
    }

    /// Membership test; true iff some value is stored at `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Number of allocated nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
