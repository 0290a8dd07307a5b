//! Robust per-cluster outlier rejection ("sigma cut").
//!
//! The cluster centre is estimated with the per-axis median so the outliers
//! being hunted cannot drag it. Spread is summarized by the characteristic
//! distance: the 68th percentile of distances to that centre, roughly one
//! standard deviation for a Gaussian-like cloud.

use geo::Coord;

use crate::stats::{median, percentile};

/// Percentile of centre distances taken as the characteristic distance.
pub const CHARACTERISTIC_PERCENTILE: f64 = 68.0;

/// Result of trimming one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimOutcome {
    /// `true` for each member judged an outlier, in input order.
    pub mask: Vec<bool>,
    pub characteristic_distance: f64,
    /// Whether the cluster as a whole was rejected as too diffuse.
    pub diffuse: bool,
}

impl TrimOutcome {
    pub fn outlier_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    pub fn survivor_count(&self) -> usize {
        self.mask.len() - self.outlier_count()
    }
}

/// Per-axis median of the cluster.
pub fn median_center(points: &[Coord<f64>]) -> Coord<f64> {
    let xs: Vec<f64> = points.iter().map(|c| c.x).collect();
    let ys: Vec<f64> = points.iter().map(|c| c.y).collect();
    Coord {
        x: median(&xs),
        y: median(&ys),
    }
}

/// 68th-percentile distance of `points` to their median centre.
pub fn characteristic_distance(points: &[Coord<f64>]) -> f64 {
    let distances = center_distances(points);
    percentile(&distances, CHARACTERISTIC_PERCENTILE)
}

fn center_distances(points: &[Coord<f64>]) -> Vec<f64> {
    let center = median_center(points);
    points
        .iter()
        .map(|c| ((c.x - center.x).powi(2) + (c.y - center.y).powi(2)).sqrt())
        .collect()
}

/// Mark outliers among one cluster's projected points.
///
/// A point is an outlier when its distance to the median centre exceeds
/// `sigma * characteristic_distance`. When `critical_char_dist` is given and
/// the characteristic distance exceeds it, every member is marked.
pub fn trim(points: &[Coord<f64>], sigma: f64, critical_char_dist: Option<f64>) -> TrimOutcome {
    if points.is_empty() {
        return TrimOutcome {
            mask: Vec::new(),
            characteristic_distance: 0.0,
            diffuse: false,
        };
    }

    let distances = center_distances(points);
    let char_dist = percentile(&distances, CHARACTERISTIC_PERCENTILE);

    let diffuse = critical_char_dist.is_some_and(|critical| char_dist > critical);
    let mask = if diffuse {
        vec![true; points.len()]
    } else {
        let cutoff = sigma * char_dist;
        distances.iter().map(|&d| d > cutoff).collect()
    };

    TrimOutcome {
        mask,
        characteristic_distance: char_dist,
        diffuse,
    }
}
