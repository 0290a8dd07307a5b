//! Locally-flat projection of longitude/latitude.
//!
//! Both axes are centred on their own mean and then divided by a single
//! spread computed over the combined centred values, so raw lon/lat
//! proportions survive standardization. The longitude axis is then shrunk by
//! the sine of the reference latitude, a first approximation of great-circle
//! distance for a single city-sized region.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::PhotoPoint;
use crate::stats::mean;

/// Spread below this is treated as zero (all points coincide).
const ZERO_SPREAD: f64 = 1e-12;

/// The fixed location a deployment is centred on.
///
/// Only `latitude` feeds the projection. `longitude` completes the location
/// for callers that display or serialize it, as the CLI does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLocation {
    pub longitude: f64,
    pub latitude: f64,
}

impl ReferenceLocation {
    /// Toronto, Ontario, Canada.
    pub const TORONTO: ReferenceLocation = ReferenceLocation {
        longitude: -79.387207,
        latitude: 43.653963,
    };

    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Multiplier applied to the standardized longitude axis.
pub fn longitude_coefficient(reference_latitude: f64) -> f64 {
    (reference_latitude * std::f64::consts::PI / 180.0).sin()
}

/// Centre both axes, then scale them by one shared spread.
///
/// The shared spread is the root mean square of all centred values, i.e.
/// `sqrt((var_x + var_y) / 2)`. A zero-variance axis centres to zeros; fully
/// coincident input collapses to the origin.
fn standardize_jointly(xs: &mut [f64], ys: &mut [f64]) {
    let (mx, my) = (mean(xs), mean(ys));
    xs.iter_mut().for_each(|v| *v -= mx);
    ys.iter_mut().for_each(|v| *v -= my);

    let sum_sq: f64 = xs.iter().chain(ys.iter()).map(|v| v * v).sum();
    let spread = (sum_sq / (xs.len() + ys.len()) as f64).sqrt();
    for v in xs.iter_mut().chain(ys.iter_mut()) {
        *v = if spread > ZERO_SPREAD { *v / spread } else { 0.0 };
    }
}

/// Project points into the flat plane (`x` = longitude, `y` = latitude).
///
/// Output has the same length and order as `points`. Fewer than two points
/// project to the origin.
pub fn project(points: &[PhotoPoint], reference_latitude: f64) -> Vec<Coord<f64>> {
    if points.len() < 2 {
        return vec![Coord { x: 0.0, y: 0.0 }; points.len()];
    }

    let mut xs: Vec<f64> = points.iter().map(|p| p.longitude).collect();
    let mut ys: Vec<f64> = points.iter().map(|p| p.latitude).collect();
    standardize_jointly(&mut xs, &mut ys);

    // Correction must follow standardization, otherwise it is undone.
    let coeff = longitude_coefficient(reference_latitude);
    xs.iter()
        .zip(ys.iter())
        .map(|(&x, &y)| Coord { x: x * coeff, y })
        .collect()
}
