//! k-nearest neighbor discovery within a perception radius.
//!
//! Brute force over all agents: O(n) per query, O(n^2) per step. Any
//! faster index must return the same indices in the same order.

use flockwise_data::Vec2;
use std::cmp::Ordering;

/// Reusable neighbor query with a scratch buffer kept across steps.
#[derive(Debug, Clone, Default)]
pub struct NeighborIndex {
    candidates: Vec<(usize, f64)>,
}

impl NeighborIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the neighbors of `query` into `out`.
    ///
    /// Candidates are agents other than `query` strictly closer than
    /// `radius`, sorted by ascending distance (ties keep index order) and
    /// truncated to the first `k`.
    pub fn neighbors_into(
        &mut self,
        query: usize,
        positions: &[Vec2],
        radius: f64,
        k: usize,
        out: &mut Vec<usize>,
    ) {
        out.clear();
        self.candidates.clear();
        let Some(&origin) = positions.get(query) else {
            return;
        };

        self.candidates.extend(
            positions
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != query)
                .map(|(i, &p)| (i, origin.distance(p)))
                .filter(|&(_, d)| d < radius),
        );
        self.candidates
            .sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        out.extend(self.candidates.iter().take(k).map(|&(i, _)| i));
    }
}

/// Allocating convenience wrapper around [`NeighborIndex::neighbors_into`].
#[must_use]
pub fn find_neighbors(query: usize, positions: &[Vec2], radius: f64, k: usize) -> Vec<usize> {
    let mut out = Vec::new();
    NeighborIndex::new().neighbors_into(query, positions, radius, k, &mut out);
    out
}
