// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("capacity exceeded: {what} limited to {limit}")]
    CapacityExceeded { what: &'static str, limit: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unbalanced parentheses in parameter list of `{func}`")]
    UnbalancedParens { func: String },

    #[error("unbalanced braces in body of `{func}`")]
    UnbalancedBraces { func: String },

    #[error("character {ch:?} outside the identifier alphabet in key {key:?}")]
    InvalidKeyChar { ch: char, key: String },

    #[error("submission {id} has no function named `main`")]
    MissingEntryPoint { id: u32 },

    #[error("duplicate submission id {id}")]
    DuplicateId { id: u32 },

    #[error("unexpected end of input while parsing `{func}`")]
    UnexpectedEof { func: String },
}

pub type Result<T> = std::result::Result<T, SimError>;

// Allow `?` on std::io::Error by converting to SimError::Io with unknown path.
impl From<std::io::Error> for SimError {
    fn from(source: std::io::Error) -> Self {
        SimError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
