//! The one-shot curation pipeline.
//!
//! `Raw -> Projected -> Labeled -> Trimmed -> Curated -> Ranked`, each stage
//! consuming only its predecessor's complete output. Nothing is retained
//! between calls; concurrent callers each run their own invocation.

use log::{info, warn};

use crate::backend::{ClusterBackend, NOISE, validate_labels};
use crate::config::CurationConfig;
use crate::curate::{curate, summarize};
use crate::error::{CurationError, OptionExt, Result};
use crate::params::select;
use crate::projection::{ReferenceLocation, project};
use crate::rank::rank;
use crate::stats::percentile;
use crate::{CurationResult, PhotoPoint};

/// Percentile of store-wide weights used as the popularity floor.
pub const DEFAULT_POPULARITY_PERCENTILE: f64 = 75.0;

/// Popularity floor over a full store's weights (e.g. its 75th percentile).
///
/// Feed the result into [`CurationConfig::critical_views`].
pub fn popularity_threshold(weights: &[f64], pct: f64) -> f64 {
    percentile(weights, pct)
}

/// Reject queries that cannot yield a meaningful result.
///
/// Fewer than two points, fewer than `global_min_samples`, a non-finite
/// point, or (with a popularity floor) no point popular enough. Geographic
/// range checks belong to ingestion (see [`PhotoPoint::is_valid`]).
pub fn check_query(points: &[PhotoPoint], config: &CurationConfig) -> Result<()> {
    let minimum_required = config.global_min_samples.max(2);
    if points.len() < minimum_required {
        return Err(CurationError::InsufficientData {
            point_count: points.len(),
            minimum_required,
        });
    }

    if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
        return Err(CurationError::InvalidPoint { id: bad.id.clone() });
    }

    if let Some(floor) = config.critical_views {
        let best_weight = points
            .iter()
            .map(|p| p.weight)
            .reduce(f64::max)
            .ok_or_insufficient_data(points.len(), minimum_required)?;
        if best_weight < floor {
            return Err(CurationError::NothingPopular {
                critical_views: floor,
                best_weight,
            });
        }
    }

    Ok(())
}

/// Run the full pipeline: project, parametrize, label, trim, curate, rank.
///
/// The dataset is read-only; the returned [`CurationResult`] carries
/// per-point labels and outlier flags for the caller to merge into its own
/// records. Backend errors propagate unchanged.
pub fn curate_and_rank<B: ClusterBackend + ?Sized>(
    points: &[PhotoPoint],
    reference: ReferenceLocation,
    backend: &B,
    config: &CurationConfig,
) -> Result<CurationResult> {
    config.validate()?;
    check_query(points, config)?;

    let projected = project(points, reference.latitude);
    let params = select(&projected, backend.kind(), config)?;

    let labels = backend.fit(&projected, &params)?;
    if let Err(e) = validate_labels(&labels, points.len()) {
        warn!("[Pipeline] backend '{}' returned a bad labeling: {}", backend.name(), e);
        return Err(CurationError::BackendFailure {
            backend: backend.name().to_string(),
            message: e.to_string(),
        });
    }

    let curation = curate(&labels, points, &projected, &config.rules())?;

    let summaries = curation
        .clusters
        .iter()
        .map(|c| summarize(c, points, config.weight_summary, config.best_example_count))
        .collect();
    let curated_clusters = rank(summaries);

    let mut per_point_is_outlier = vec![false; points.len()];
    for &idx in &curation.outlier_indices {
        per_point_is_outlier[idx] = true;
    }
    let per_point_label: Vec<i32> = labels
        .iter()
        .zip(per_point_is_outlier.iter())
        .map(|(&label, &outlier)| if outlier { NOISE } else { label })
        .collect();

    info!(
        "[Pipeline] {} points -> {} curated clusters ({} outliers)",
        points.len(),
        curated_clusters.len(),
        curation.outlier_indices.len()
    );

    Ok(CurationResult {
        per_point_label,
        per_point_is_outlier,
        curated_clusters,
        params,
    })
}
