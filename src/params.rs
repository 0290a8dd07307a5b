//! Adaptive parameter selection for the clustering backend.
//!
//! Parameters are derived from the dataset's own distance statistics so that
//! sparse and dense result sets both cluster sensibly without a hand-tuned
//! physical-distance constant.

use geo::Coord;
use log::info;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{CurationError, Result};
use crate::rtree::{build_rtree, nearest_other_distance};
use crate::stats::{mean, percentile, range};
use crate::CurationConfig;

/// Percentile of nearest-neighbour distances used as the search radius.
const NN_PERCENTILE: f64 = 90.0;

/// Radius floor as a fraction of the mean axis range.
const EPS_FLOOR_FRACTION: f64 = 1e-4;

/// The family of density-clustering backend in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Fixed search radius (DBSCAN-like).
    Radius,
    /// Reachability ordering with a maximum radius (OPTICS-like).
    Reachability,
    /// Hierarchical density with a minimum cluster size (HDBSCAN-like).
    Hierarchical,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Radius => write!(f, "radius"),
            BackendKind::Reachability => write!(f, "reachability"),
            BackendKind::Hierarchical => write!(f, "hierarchical"),
        }
    }
}

/// Parameters handed to a [`ClusterBackend`](crate::ClusterBackend).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BackendParams {
    #[serde(rename_all = "camelCase")]
    Radius {
        eps: f64,
        min_samples: usize,
    },
    #[serde(rename_all = "camelCase")]
    Reachability {
        max_eps: f64,
        min_samples: usize,
    },
    #[serde(rename_all = "camelCase")]
    Hierarchical {
        min_cluster_size: usize,
        min_samples: usize,
    },
}

impl BackendParams {
    pub fn kind(&self) -> BackendKind {
        match self {
            BackendParams::Radius { .. } => BackendKind::Radius,
            BackendParams::Reachability { .. } => BackendKind::Reachability,
            BackendParams::Hierarchical { .. } => BackendKind::Hierarchical,
        }
    }

    pub fn min_samples(&self) -> usize {
        match *self {
            BackendParams::Radius { min_samples, .. }
            | BackendParams::Reachability { min_samples, .. }
            | BackendParams::Hierarchical { min_samples, .. } => min_samples,
        }
    }
}

/// `max(global_min_samples, ceil(density_fraction * n))`.
pub fn min_samples_for(n: usize, config: &CurationConfig) -> usize {
    let scaled = (config.density_fraction * n as f64).ceil() as usize;
    config.global_min_samples.max(scaled)
}

/// Mean of the x and y extents of the projected cloud.
pub fn mean_axis_range(points: &[Coord<f64>]) -> f64 {
    let xs: Vec<f64> = points.iter().map(|c| c.x).collect();
    let ys: Vec<f64> = points.iter().map(|c| c.y).collect();
    mean(&[range(&xs), range(&ys)])
}

/// Distance from every point to its nearest other point.
pub fn nearest_neighbor_distances(points: &[Coord<f64>]) -> Vec<f64> {
    let tree = build_rtree(points);

    #[cfg(feature = "parallel")]
    let distances = points
        .par_iter()
        .enumerate()
        .map(|(i, c)| nearest_other_distance(&tree, i, *c).unwrap_or(0.0))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let distances = points
        .iter()
        .enumerate()
        .map(|(i, c)| nearest_other_distance(&tree, i, *c).unwrap_or(0.0))
        .collect();

    distances
}

/// Derive backend parameters for `kind` from the projected dataset.
///
/// Fails with [`CurationError::InsufficientData`] for fewer than two points.
/// Fully coincident input is not an error: the radius falls to its floor.
pub fn select(
    points: &[Coord<f64>],
    kind: BackendKind,
    config: &CurationConfig,
) -> Result<BackendParams> {
    let n = points.len();
    if n < 2 {
        return Err(CurationError::InsufficientData {
            point_count: n,
            minimum_required: 2,
        });
    }

    let min_samples = min_samples_for(n, config);
    let axis_range = mean_axis_range(points);

    let params = match kind {
        BackendKind::Radius => {
            let nn = nearest_neighbor_distances(points);
            let eps_floor = EPS_FLOOR_FRACTION * axis_range;
            let eps = eps_floor.max(percentile(&nn, NN_PERCENTILE));
            BackendParams::Radius { eps, min_samples }
        }
        BackendKind::Reachability => BackendParams::Reachability {
            max_eps: config.max_eps_scaling * axis_range,
            min_samples,
        },
        BackendKind::Hierarchical => {
            let min_cluster_size = min_samples;
            let scaled = (config.min_samples_scaling * min_cluster_size as f64).floor() as usize;
            BackendParams::Hierarchical {
                min_cluster_size,
                min_samples: scaled.max(1),
            }
        }
    };

    info!("[Params] {} points, {} backend: {:?}", n, kind, params);
    Ok(params)
}
