//! Display ranking of surviving clusters.
//!
//! Score is `avg_weight / member_count`, which favours small, highly popular
//! clusters over large, mildly popular ones. Clusters are sorted by score
//! ascending and ranked from 1, so rank 1 is the lowest score. Displayed ranks
//! are user-visible; keep the ordering as is.

use std::cmp::Ordering;

use geo::Coord;

use crate::{Centroid, CuratedCluster};

/// A surviving cluster waiting for its rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    pub label: i32,
    pub centroid: Coord<f64>,
    pub member_count: usize,
    pub avg_weight: f64,
    pub members: Vec<usize>,
    pub best_example_indices: Vec<usize>,
}

impl ClusterSummary {
    /// Desirability score. Zero-member summaries score zero.
    pub fn score(&self) -> f64 {
        if self.member_count == 0 {
            return 0.0;
        }
        self.avg_weight / self.member_count as f64
    }
}

/// Assign ranks `1..=M`, ascending score, ties by ascending label.
///
/// Output is ordered by rank.
pub fn rank(clusters: Vec<ClusterSummary>) -> Vec<CuratedCluster> {
    let mut scored: Vec<(f64, ClusterSummary)> =
        clusters.into_iter().map(|c| (c.score(), c)).collect();
    scored.sort_by(|(sa, a), (sb, b)| {
        sa.partial_cmp(sb)
            .unwrap_or(Ordering::Equal)
            .then(a.label.cmp(&b.label))
    });

    scored
        .into_iter()
        .enumerate()
        .map(|(pos, (score, c))| CuratedCluster {
            rank: pos as u32 + 1,
            label: c.label,
            centroid: Centroid::from(c.centroid),
            member_count: c.member_count,
            avg_weight: c.avg_weight,
            score,
            members: c.members,
            best_example_indices: c.best_example_indices,
        })
        .collect()
}
