//! The clustering backend seam.
//!
//! The density-clustering algorithms themselves live outside this crate.
//! Everything downstream depends only on [`ClusterBackend::fit`].

use geo::Coord;

use crate::error::{CurationError, Result};
use crate::params::{BackendKind, BackendParams};

/// Label assigned to points outside every density cluster.
pub const NOISE: i32 = -1;

/// A density-clustering algorithm.
///
/// `fit` returns one label per input point, same order, `-1` for noise.
/// Implementations must be deterministic for identical input and params,
/// up to relabelling of otherwise-identical clusters.
pub trait ClusterBackend {
    /// Which parameter family this backend consumes.
    fn kind(&self) -> BackendKind;

    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    fn fit(&self, points: &[Coord<f64>], params: &BackendParams) -> Result<Vec<i32>>;
}

/// Replays a fixed labeling regardless of input geometry.
///
/// Used to replay a labeling computed elsewhere (stored alongside a query,
/// produced by an external service) and as the deterministic stub in tests.
#[derive(Debug, Clone)]
pub struct PrecomputedLabels {
    kind: BackendKind,
    labels: Vec<i32>,
}

impl PrecomputedLabels {
    pub fn new(kind: BackendKind, labels: Vec<i32>) -> Self {
        Self { kind, labels }
    }

    pub fn labels(&self) -> &[i32] {
        &self.labels
    }
}

impl ClusterBackend for PrecomputedLabels {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn name(&self) -> &str {
        "precomputed"
    }

    fn fit(&self, points: &[Coord<f64>], _params: &BackendParams) -> Result<Vec<i32>> {
        if points.len() != self.labels.len() {
            return Err(CurationError::BackendFailure {
                backend: self.name().to_string(),
                message: format!(
                    "stored labeling covers {} points, asked for {}",
                    self.labels.len(),
                    points.len()
                ),
            });
        }
        Ok(self.labels.clone())
    }
}

/// Check a labeling against the dataset it claims to label.
pub fn validate_labels(labels: &[i32], point_count: usize) -> Result<()> {
    if labels.len() != point_count {
        return Err(CurationError::InvalidLabeling {
            expected: point_count,
            actual: labels.len(),
        });
    }
    if let Some((index, &label)) = labels.iter().enumerate().find(|(_, l)| **l < NOISE) {
        return Err(CurationError::InvalidLabel { index, label });
    }
    Ok(())
}
