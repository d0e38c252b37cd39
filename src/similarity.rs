// src/similarity.rs
//! Pairwise edit-distance comparison and greedy clustering.
//!
//! All pairwise similarity scores are computed up front in parallel (the
//! comparisons are read-only over the fingerprints), then a strictly
//! sequential forward pass forms the groups. Grouping is non-transitive by
//! design: membership is decided only against the anchor submission, never
//! pairwise among group members.

use crate::types::{Group, Submission};
use rayon::prelude::*;

/// Levenshtein edit distance over raw fingerprint bytes, two-row rolling
/// form of the classic DP recurrence.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Similarity score: 1 minus the normalized edit distance. Two empty
/// fingerprints are identical by definition.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

/// Precomputed upper-triangular pair scores, indexed by (i, j) with i < j.
struct PairScores {
    n: usize,
    scores: Vec<f64>,
}

impl PairScores {
    fn compute(subs: &[Submission]) -> Self {
        let n = subs.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();

        let scores: Vec<f64> = pairs
            .par_iter()
            .map(|&(i, j)| similarity(&subs[i].proc_stream, &subs[j].proc_stream))
            .collect();

        Self { n, scores }
    }

    fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < j && j < self.n);
        // Row i starts after all earlier rows of the triangle.
        let row_start = i * self.n - i * (i + 1) / 2;
        self.scores[row_start + (j - i - 1)]
    }
}

/// Clusters submissions by the greedy forward pass.
///
/// Each not-yet-grouped index in turn acts as anchor; every later
/// not-yet-grouped index similar to the anchor (strictly above `threshold`)
/// joins the anchor's group. A group is reported only when at least one
/// match was found. Ids appear in ascending original order.
#[must_use]
pub fn find_groups(subs: &[Submission], threshold: f64) -> Vec<Group> {
    if subs.len() < 2 {
        return Vec::new();
    }

    let scores = PairScores::compute(subs);
    let mut grouped = vec![false; subs.len()];
    let mut groups = Vec::new();

    for i in 0..subs.len() - 1 {
        if grouped[i] {
            continue;
        }
        let mut ids = Vec::new();
        for j in (i + 1)..subs.len() {
            if grouped[j] {
                continue;
            }
            if scores.get(i, j) > threshold {
                if ids.is_empty() {
                    grouped[i] = true;
                    ids.push(subs[i].id);
                }
                grouped[j] = true;
                ids.push(subs[j].id);
            }
        }
        if !ids.is_empty() {
            groups.push(Group { ids });
        }
    }

    groups
}
