//! Cluster admission, trimming and weighted centroids.
//!
//! For each candidate cluster (ascending label):
//! 1. Trim spatial outliers on the projected coordinates.
//! 2. If a popularity floor is set and no survivor reaches it, reject the
//!    whole cluster.
//! 3. Collect outliers into one global, sorted list.
//! 4. Survivors' raw longitude/latitude, weighted by popularity, give the
//!    centroid. Clusters with no survivors are dropped.

use std::collections::BTreeMap;

use geo::Coord;
use log::{debug, info};

use crate::backend::{NOISE, validate_labels};
use crate::config::{CurationRules, WeightSummary};
use crate::error::{CurationError, Result};
use crate::rank::ClusterSummary;
use crate::stats::{mean, median};
use crate::trim::trim;
use crate::PhotoPoint;

/// A cluster that survived trimming and admission.
#[derive(Debug, Clone, PartialEq)]
pub struct SurvivingCluster {
    pub label: i32,
    /// Dataset indices of surviving members, ascending.
    pub members: Vec<usize>,
    /// Weighted centroid, `x` = longitude, `y` = latitude.
    pub centroid: Coord<f64>,
}

/// Output of [`curate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curation {
    /// Every trimmed or rejected member, sorted ascending, no duplicates.
    pub outlier_indices: Vec<usize>,
    /// Labels of surviving clusters, ascending.
    pub surviving_cluster_ids: Vec<i32>,
    /// One centroid per surviving cluster, aligned with `surviving_cluster_ids`.
    pub centroids: Vec<Coord<f64>>,
    pub clusters: Vec<SurvivingCluster>,
}

/// Group point indices by non-noise label, ascending by label.
pub fn group_by_label(labels: &[i32]) -> BTreeMap<i32, Vec<usize>> {
    let mut groups: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        if label != NOISE {
            groups.entry(label).or_default().push(idx);
        }
    }
    groups
}

/// Popularity-weighted mean of raw coordinates.
///
/// Falls back to the plain mean when every weight is zero. `None` for an
/// empty member list.
pub fn weighted_centroid(points: &[PhotoPoint], members: &[usize]) -> Option<Coord<f64>> {
    if members.is_empty() {
        return None;
    }
    let total: f64 = members.iter().map(|&i| points[i].weight).sum();
    if total > 0.0 {
        let x = members
            .iter()
            .map(|&i| points[i].longitude * points[i].weight)
            .sum::<f64>()
            / total;
        let y = members
            .iter()
            .map(|&i| points[i].latitude * points[i].weight)
            .sum::<f64>()
            / total;
        Some(Coord { x, y })
    } else {
        let n = members.len() as f64;
        let x = members.iter().map(|&i| points[i].longitude).sum::<f64>() / n;
        let y = members.iter().map(|&i| points[i].latitude).sum::<f64>() / n;
        Some(Coord { x, y })
    }
}

/// Trim every candidate cluster, apply admission rules and compute centroids.
///
/// `projected` must be the projection of `points`; both must match `labels`
/// in length.
pub fn curate(
    labels: &[i32],
    points: &[PhotoPoint],
    projected: &[Coord<f64>],
    rules: &CurationRules,
) -> Result<Curation> {
    validate_labels(labels, points.len())?;
    if projected.len() != points.len() {
        return Err(CurationError::ProjectionMismatch {
            points: points.len(),
            projected: projected.len(),
        });
    }

    let groups = group_by_label(labels);
    let mut curation = Curation::default();

    for (label, members) in &groups {
        let coords: Vec<Coord<f64>> = members.iter().map(|&i| projected[i]).collect();
        let mut outcome = trim(&coords, rules.sigma, rules.critical_char_dist);

        if outcome.diffuse {
            debug!(
                "[Curate] cluster {}: diffuse (char dist {:.4}), rejected",
                label, outcome.characteristic_distance
            );
        }

        if let Some(floor) = rules.critical_views {
            let popular = members
                .iter()
                .zip(outcome.mask.iter())
                .any(|(&i, &outlier)| !outlier && points[i].weight >= floor);
            if !popular {
                debug!("[Curate] cluster {}: no survivor reaches {} views, rejected", label, floor);
                outcome.mask.iter_mut().for_each(|m| *m = true);
            }
        }

        let mut survivors = Vec::with_capacity(members.len());
        for (&idx, &outlier) in members.iter().zip(outcome.mask.iter()) {
            if outlier {
                curation.outlier_indices.push(idx);
            } else {
                survivors.push(idx);
            }
        }

        debug!(
            "[Curate] cluster {}: {} members, {} survive",
            label,
            members.len(),
            survivors.len()
        );

        if let Some(centroid) = weighted_centroid(points, &survivors) {
            curation.surviving_cluster_ids.push(*label);
            curation.centroids.push(centroid);
            curation.clusters.push(SurvivingCluster {
                label: *label,
                members: survivors,
                centroid,
            });
        }
    }

    curation.outlier_indices.sort_unstable();
    curation.outlier_indices.dedup();

    info!(
        "[Curate] {} candidate clusters -> {} survivors, {} outliers",
        groups.len(),
        curation.clusters.len(),
        curation.outlier_indices.len()
    );

    Ok(curation)
}

/// Summarize a surviving cluster for ranking.
///
/// `best_example_indices` holds up to `best_count` survivors by weight
/// descending, ties by ascending index.
pub fn summarize(
    cluster: &SurvivingCluster,
    points: &[PhotoPoint],
    summary: WeightSummary,
    best_count: usize,
) -> ClusterSummary {
    let weights: Vec<f64> = cluster.members.iter().map(|&i| points[i].weight).collect();
    let avg_weight = match summary {
        WeightSummary::Median => median(&weights),
        WeightSummary::Mean => mean(&weights),
    };

    let mut best = cluster.members.clone();
    best.sort_by(|&a, &b| {
        points[b]
            .weight
            .partial_cmp(&points[a].weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    best.truncate(best_count);

    ClusterSummary {
        label: cluster.label,
        centroid: cluster.centroid,
        member_count: cluster.members.len(),
        avg_weight,
        members: cluster.members.clone(),
        best_example_indices: best,
    }
}
