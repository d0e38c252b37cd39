// src/config.rs
//! Runtime configuration: similarity threshold and capacity ceilings.
//!
//! The ceilings mirror the provisioned bounds of the original fixed-array
//! design, kept as configurable resource limits rather than hard-wired
//! array sizes. Exceeding one raises `SimError::CapacityExceeded` instead
//! of corrupting state.

use crate::error::{Result, SimError};
use serde::Deserialize;
use std::path::Path;

/// Default similarity threshold (strict greater-than).
pub const DEFAULT_THRESHOLD: f64 = 0.95;

/// Default ceiling on submissions per batch.
pub const DEFAULT_MAX_SUBMISSIONS: usize = 1 << 13;

/// Default ceiling on function definitions per submission.
pub const DEFAULT_MAX_FUNCTIONS: usize = 1 << 10;

/// Default ceiling on identifier length in characters.
pub const DEFAULT_MAX_IDENT_LEN: usize = 64;

/// Default ceiling on prefix-map nodes per map instance.
pub const DEFAULT_MAX_TRIE_NODES: usize = 1 << 20;

#[derive(Debug, Clone)]
pub struct Config {
    pub threshold: f64,
    pub max_submissions: usize,
    pub max_functions: usize,
    pub max_ident_len: usize,
    pub max_trie_nodes: usize,
    pub verbose: bool,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_submissions: DEFAULT_MAX_SUBMISSIONS,
            max_functions: DEFAULT_MAX_FUNCTIONS,
            max_ident_len: DEFAULT_MAX_IDENT_LEN,
            max_trie_nodes: DEFAULT_MAX_TRIE_NODES,
            verbose: false,
        }
    }

    /// Merges settings from a `codesim.toml` style file. Missing keys keep
    /// their current values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        let file: ConfigFile = toml::from_str(&text).map_err(|e| SimError::Io {
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            path: path.to_path_buf(),
        })?;

        if let Some(v) = file.threshold {
            self.threshold = v;
        }
        if let Some(v) = file.max_submissions {
            self.max_submissions = v;
        }
        if let Some(v) = file.max_functions {
            self.max_functions = v;
        }
        if let Some(v) = file.max_ident_len {
            self.max_ident_len = v;
        }
        if let Some(v) = file.max_trie_nodes {
            self.max_trie_nodes = v;
        }
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is outside `[0, 1]` or any ceiling
    /// is zero.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SimError::InvalidConfig(format!(
                "threshold {} must lie in [0, 1]",
                self.threshold
            )));
        }
        for (what, limit) in [
            ("max_submissions", self.max_submissions),
            ("max_functions", self.max_functions),
            ("max_ident_len", self.max_ident_len),
            ("max_trie_nodes", self.max_trie_nodes),
        ] {
            if limit == 0 {
                return Err(SimError::InvalidConfig(format!("{what} must be nonzero")));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk shape of the optional config file. All keys optional.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    threshold: Option<f64>,
    max_submissions: Option<usize>,
    max_functions: Option<usize>,
    max_ident_len: Option<usize>,
    max_trie_nodes: Option<usize>,
}
