//! # Photospots
//!
//! Curation of density-clustered geotagged photos into ranked points of
//! interest.
//!
//! This library provides:
//! - A locally-flat projection of longitude/latitude for one region
//! - Adaptive clustering parameters from the dataset's own density
//! - Robust per-cluster outlier rejection ("sigma cut")
//! - Population, popularity and diffuseness admission of clusters
//! - Popularity-weighted centroids and stable display ranks
//!
//! The density-clustering algorithm itself is supplied by the caller through
//! the [`ClusterBackend`] trait.
//!
//! ## Features
//!
//! - **`parallel`** - Parallel nearest-neighbour statistics with rayon
//! - **`synthetic`** - Seeded synthetic hotspot datasets for tests and benches
//! - **`cli`** - The `photospots-cli` debug tool
//!
//! ## Quick Start
//!
//! ```rust
//! use photospots::{
//!     curate_and_rank, BackendKind, CurationConfig, PhotoPoint, PrecomputedLabels,
//!     ReferenceLocation,
//! };
//!
//! let points = vec![
//!     PhotoPoint::new("a", -79.3871, 43.6426, 1200.0),
//!     PhotoPoint::new("b", -79.3872, 43.6427, 800.0),
//!     PhotoPoint::new("c", -79.3870, 43.6425, 950.0),
//!     PhotoPoint::new("d", -79.4000, 43.7000, 10.0),
//! ];
//! let backend = PrecomputedLabels::new(BackendKind::Reachability, vec![0, 0, 0, -1]);
//! let config = CurationConfig {
//!     global_min_samples: 2,
//!     ..CurationConfig::default()
//! };
//!
//! let result = curate_and_rank(&points, ReferenceLocation::TORONTO, &backend, &config).unwrap();
//! assert_eq!(result.curated_clusters.len(), 1);
//! assert_eq!(result.curated_clusters[0].rank, 1);
//! ```

use geo::Coord;
use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{CurationError, OptionExt, Result};

// Percentiles, medians and spreads
pub mod stats;

// Pipeline configuration
pub mod config;
pub use config::{CurationConfig, CurationRules, WeightSummary};

// Longitude/latitude to locally-flat plane
pub mod projection;
pub use projection::{ReferenceLocation, longitude_coefficient, project};

// R-tree indexed projected points
pub mod rtree;

// Adaptive backend parameters
pub mod params;
pub use params::{BackendKind, BackendParams, select};

// Clustering backend seam
pub mod backend;
pub use backend::{ClusterBackend, NOISE, PrecomputedLabels};

// Sigma-cut outlier rejection
pub mod trim;
pub use trim::{TrimOutcome, trim};

// Admission rules and weighted centroids
pub mod curate;
pub use curate::{Curation, SurvivingCluster, curate};

// Display ranking
pub mod rank;
pub use rank::{ClusterSummary, rank};

// End-to-end entry point
pub mod pipeline;
pub use pipeline::{DEFAULT_POPULARITY_PERCENTILE, curate_and_rank, popularity_threshold};

// Synthetic hotspot datasets
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A geotagged photo weighted by popularity.
///
/// # Example
/// ```
/// use photospots::PhotoPoint;
/// let point = PhotoPoint::new("42", -79.3871, 43.6426, 1500.0); // CN Tower
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoPoint {
    pub id: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Popularity measure, e.g. view count
    pub weight: f64,
    /// Reference to the source record (URL, row key)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PhotoPoint {
    /// Create a new point without source metadata.
    pub fn new(id: impl Into<String>, longitude: f64, latitude: f64, weight: f64) -> Self {
        Self {
            id: id.into(),
            longitude,
            latitude,
            weight,
            source: None,
            owner: None,
            title: None,
        }
    }

    /// Attach a source record reference.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// All numeric fields are finite. This is all the pipeline requires.
    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite() && self.weight.is_finite()
    }

    /// Ingestion check: finite, on the globe, and a non-negative weight.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
            && self.weight.is_finite()
            && self.weight >= 0.0
    }
}

/// A geographic centroid in raw degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub longitude: f64,
    pub latitude: f64,
}

impl From<Coord<f64>> for Centroid {
    fn from(c: Coord<f64>) -> Self {
        Self {
            longitude: c.x,
            latitude: c.y,
        }
    }
}

/// A cluster admitted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratedCluster {
    /// Display rank, 1-based and contiguous (1 = lowest score)
    pub rank: u32,
    /// Backend label this cluster came from
    pub label: i32,
    /// Popularity-weighted centroid of surviving members
    pub centroid: Centroid,
    /// Number of surviving members
    pub member_count: usize,
    /// Summary of surviving members' weights
    pub avg_weight: f64,
    /// `avg_weight / member_count`
    pub score: f64,
    /// Dataset indices of surviving members, ascending
    pub members: Vec<usize>,
    /// Most popular surviving members, most popular first
    pub best_example_indices: Vec<usize>,
}

/// Pipeline output for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurationResult {
    /// Backend label per point, with outliers reset to noise
    pub per_point_label: Vec<i32>,
    pub per_point_is_outlier: Vec<bool>,
    /// Admitted clusters ordered by rank
    pub curated_clusters: Vec<CuratedCluster>,
    /// Parameters the backend was run with
    pub params: BackendParams,
}

impl CurationResult {
    /// Display rank of the cluster containing `index`, `None` for background.
    pub fn rank_of(&self, index: usize) -> Option<u32> {
        let label = *self.per_point_label.get(index)?;
        if label == NOISE {
            return None;
        }
        self.curated_clusters
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.rank)
    }

    /// Indices rendered as background (noise or trimmed).
    pub fn noise_indices(&self) -> Vec<usize> {
        self.per_point_label
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == NOISE)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.curated_clusters.is_empty()
    }
}
