//! Pipeline configuration.
//!
//! Every stage reads its tuning from an explicit [`CurationConfig`] passed
//! into [`curate_and_rank`](crate::curate_and_rank). There are no process-wide
//! defaults beyond [`Default`].

use serde::{Deserialize, Serialize};

use crate::error::{CurationError, Result};

/// How a cluster's member weights are summarized into `avg_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightSummary {
    /// Median of surviving members' weights. Insensitive to one viral photo.
    #[default]
    Median,
    /// Arithmetic mean of surviving members' weights.
    Mean,
}

/// Configuration for the curation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurationConfig {
    /// Minimum points for any cluster to be considered, and the minimum
    /// query size. Default: 15
    pub global_min_samples: usize,

    /// Fraction of the dataset size used as the scaled minimum-samples.
    /// Observed useful range 0.005-0.01. Default: 0.01
    pub density_fraction: f64,

    /// Multiplier on the mean axis range for reachability backends.
    /// Default: 1.0
    pub max_eps_scaling: f64,

    /// Ratio of `min_samples` to `min_cluster_size` for hierarchical backends.
    /// Default: 0.5
    pub min_samples_scaling: f64,

    /// Trim threshold in characteristic distances. Default: 2.5
    pub sigma: f64,

    /// Clusters whose characteristic distance exceeds this (in projected
    /// units) are rejected whole. Default: None
    pub critical_char_dist: Option<f64>,

    /// Clusters with no surviving member at or above this weight are
    /// rejected. Default: None
    pub critical_views: Option<f64>,

    /// Summary statistic for `avg_weight`. Default: median
    pub weight_summary: WeightSummary,

    /// Number of top-weighted survivors reported per cluster. Default: 5
    pub best_example_count: usize,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            global_min_samples: 15,
            density_fraction: 0.01,
            max_eps_scaling: 1.0,
            min_samples_scaling: 0.5,
            sigma: 2.5,
            critical_char_dist: None,
            critical_views: None,
            weight_summary: WeightSummary::Median,
            best_example_count: 5,
        }
    }
}

impl CurationConfig {
    /// Reject values no stage can work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(CurationError::InvalidConfig(format!(
                "sigma must be positive, got {}",
                self.sigma
            )));
        }
        if !(self.density_fraction > 0.0 && self.density_fraction <= 1.0) {
            return Err(CurationError::InvalidConfig(format!(
                "density_fraction must be in (0, 1], got {}",
                self.density_fraction
            )));
        }
        if !(self.max_eps_scaling.is_finite() && self.max_eps_scaling > 0.0) {
            return Err(CurationError::InvalidConfig(format!(
                "max_eps_scaling must be positive, got {}",
                self.max_eps_scaling
            )));
        }
        if !(self.min_samples_scaling > 0.0 && self.min_samples_scaling <= 1.0) {
            return Err(CurationError::InvalidConfig(format!(
                "min_samples_scaling must be in (0, 1], got {}",
                self.min_samples_scaling
            )));
        }
        if let Some(cutoff) = self.critical_char_dist {
            if !(cutoff.is_finite() && cutoff > 0.0) {
                return Err(CurationError::InvalidConfig(format!(
                    "critical_char_dist must be positive, got {}",
                    cutoff
                )));
            }
        }
        if let Some(floor) = self.critical_views {
            if !floor.is_finite() {
                return Err(CurationError::InvalidConfig(format!(
                    "critical_views must be finite, got {}",
                    floor
                )));
            }
        }
        Ok(())
    }

    /// The subset of the config the curator applies.
    pub fn rules(&self) -> CurationRules {
        CurationRules {
            sigma: self.sigma,
            critical_views: self.critical_views,
            critical_char_dist: self.critical_char_dist,
        }
    }
}

/// Admission rules applied per cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurationRules {
    pub sigma: f64,
    pub critical_views: Option<f64>,
    pub critical_char_dist: Option<f64>,
}

impl Default for CurationRules {
    fn default() -> Self {
        CurationConfig::default().rules()
    }
}
