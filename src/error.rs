//! Unified error handling for the curation pipeline.

use thiserror::Error;

/// Errors surfaced by the curation pipeline.
///
/// Degenerate geometry (coincident points, zero-variance axes) is handled
/// inline and never appears here. An empty curated set is a successful
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurationError {
    /// Too few points to cluster, or fewer than the caller's floor.
    #[error("insufficient data: {point_count} points (minimum {minimum_required})")]
    InsufficientData {
        point_count: usize,
        minimum_required: usize,
    },

    /// No point in the query reaches the popularity floor.
    #[error("no point reaches the popularity floor of {critical_views} (best is {best_weight})")]
    NothingPopular {
        critical_views: f64,
        best_weight: f64,
    },

    /// The clustering backend raised. Not retried.
    #[error("backend '{backend}' failed: {message}")]
    BackendFailure { backend: String, message: String },

    /// A labeling does not line up with the dataset.
    #[error("labeling has {actual} labels for {expected} points")]
    InvalidLabeling { expected: usize, actual: usize },

    /// Projected coordinates do not line up with the raw points.
    #[error("{projected} projected coordinates for {points} points")]
    ProjectionMismatch { points: usize, projected: usize },

    /// A label below the noise marker.
    #[error("invalid label {label} at index {index}")]
    InvalidLabel { index: usize, label: i32 },

    /// A point with a non-finite coordinate or weight.
    #[error("invalid point '{id}'")]
    InvalidPoint { id: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type alias for curation operations.
pub type Result<T> = std::result::Result<T, CurationError>;

/// Extension trait for converting `Option` into curation errors.
pub trait OptionExt<T> {
    /// Map `None` to [`CurationError::InsufficientData`].
    fn ok_or_insufficient_data(self, point_count: usize, minimum_required: usize) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_insufficient_data(self, point_count: usize, minimum_required: usize) -> Result<T> {
        self.ok_or(CurationError::InsufficientData {
            point_count,
            minimum_required,
        })
    }
}
