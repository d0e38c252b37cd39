// src/types.rs
//! Core data model: function streams, submissions, and reported groups.

use serde::Serialize;

/// Normalized stream of one function definition.
///
/// `rank` is the invocation rank: the order in which the function was first
/// called from the entry point. `None` marks a function never referenced
/// from `main` (the "unreferenced" sentinel, sorting after every finite
/// rank).
#[derive(Debug, Clone)]
pub struct FuncStream {
    /// Function name as written in the source.
    pub name: String,
    /// Invocation rank; `None` = unreferenced.
    pub rank: Option<u32>,
    /// Body tokens with call sites collapsed to `FUNC` markers.
    pub stream: String,
}

/// One code sample under comparison.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Positive integer id, unique per run.
    pub id: u32,
    /// Function records in declaration order.
    pub funcs: Vec<FuncStream>,
    /// Count of functions with a finite rank.
    pub invoked_count: usize,
    /// The similarity fingerprint: invoked function streams merged in
    /// ascending rank order.
    pub proc_stream: String,
}

impl Submission {
    /// Fingerprint length in bytes.
    #[must_use]
    pub fn fingerprint_len(&self) -> usize {
        self.proc_stream.len()
    }
}

/// A reported cluster of near-duplicate submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Member ids: anchor first, then matches, in ascending original order.
    pub ids: Vec<u32>,
}

/// A submission rejected during parsing, with the reason it was skipped.
#[derive(Debug)]
pub struct Rejected {
    /// The id announced by the record.
    pub id: u32,
    /// Human-readable rejection reason.
    pub reason: String,
}
