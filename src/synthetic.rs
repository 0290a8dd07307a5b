//! Synthetic geotagged photo generator for testing and benchmarking.
//!
//! Generates photo sets with known hotspots (Gaussian blobs of popular
//! photos) over a uniform background, providing ground-truth labels that can
//! be replayed through [`PrecomputedLabels`](crate::PrecomputedLabels).
//!
//! Feature-gated behind `synthetic`; not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use photospots::synthetic::{HotspotConfig, SyntheticScenario};
//! use photospots::ReferenceLocation;
//!
//! let scenario = SyntheticScenario {
//!     origin: ReferenceLocation::TORONTO,
//!     hotspots: vec![HotspotConfig {
//!         photo_count: 40,
//!         spread_meters: 30.0,
//!         mean_weight: 500.0,
//!         offset_meters: 0.0,
//!         bearing: 0.0,
//!     }],
//!     background_count: 60,
//!     background_radius_meters: 3000.0,
//!     background_mean_weight: 20.0,
//!     seed: 42,
//! };
//!
//! let dataset = scenario.generate();
//! assert_eq!(dataset.points.len(), 100);
//! assert_eq!(dataset.labels.len(), 100);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use crate::backend::{NOISE, PrecomputedLabels};
use crate::params::BackendKind;
use crate::projection::ReferenceLocation;
use crate::PhotoPoint;

// ============================================================================
// Types
// ============================================================================

/// Configuration for one ground-truth hotspot.
#[derive(Debug, Clone)]
pub struct HotspotConfig {
    /// Number of photos taken at this hotspot.
    pub photo_count: usize,
    /// Standard deviation of photo positions around the hotspot, meters.
    pub spread_meters: f64,
    /// Mean popularity of photos here.
    pub mean_weight: f64,
    /// Distance of the hotspot centre from the origin, meters.
    pub offset_meters: f64,
    /// Direction of the offset, radians counter-clockwise from east.
    pub bearing: f64,
}

/// Scenario configuration for generating synthetic data.
#[derive(Debug, Clone)]
pub struct SyntheticScenario {
    /// Origin point for all generated data.
    pub origin: ReferenceLocation,
    pub hotspots: Vec<HotspotConfig>,
    /// Number of unclustered background photos.
    pub background_count: usize,
    /// Background photos fall uniformly within this disc, meters.
    pub background_radius_meters: f64,
    pub background_mean_weight: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

/// Metadata about a generated dataset.
#[derive(Debug, Clone)]
pub struct DatasetMetadata {
    pub hotspot_count: usize,
    pub clustered_points: usize,
    pub background_points: usize,
}

/// Complete synthetic dataset with ground truth.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pub points: Vec<PhotoPoint>,
    /// Ground-truth label per point: hotspot index, or noise for background.
    pub labels: Vec<i32>,
    /// True hotspot centres, in hotspot order.
    pub centers: Vec<ReferenceLocation>,
    pub metadata: DatasetMetadata,
}

impl SyntheticDataset {
    /// A backend that replays the ground-truth labels.
    pub fn ground_truth_backend(&self, kind: BackendKind) -> PrecomputedLabels {
        PrecomputedLabels::new(kind, self.labels.clone())
    }
}

// ============================================================================
// Coordinate Helpers
// ============================================================================

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Convert meters to degrees of latitude.
fn meters_to_deg_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEG_LAT
}

/// Convert meters to degrees of longitude at a given latitude.
fn meters_to_deg_lng(meters: f64, latitude: f64) -> f64 {
    let meters_per_deg_lng = METERS_PER_DEG_LAT * latitude.to_radians().cos();
    if meters_per_deg_lng.abs() < 1e-10 {
        return 0.0;
    }
    meters / meters_per_deg_lng
}

fn offset(origin: &ReferenceLocation, east_meters: f64, north_meters: f64) -> ReferenceLocation {
    ReferenceLocation {
        longitude: origin.longitude + meters_to_deg_lng(east_meters, origin.latitude),
        latitude: origin.latitude + meters_to_deg_lat(north_meters),
    }
}

/// Box-Muller pair of standard normal samples.
fn gaussian_pair(rng: &mut StdRng) -> (f64, f64) {
    let u1: f64 = rng.gen_range(0.0001..1.0);
    let u2: f64 = rng.r#gen();
    let r = (-2.0 * u1.ln()).sqrt();
    (r * (2.0 * PI * u2).cos(), r * (2.0 * PI * u2).sin())
}

/// Exponentially distributed weight with the given mean, rounded like a view count.
fn sample_weight(mean: f64, rng: &mut StdRng) -> f64 {
    let u: f64 = rng.gen_range(0.0001..1.0);
    (-u.ln() * mean).round()
}

// ============================================================================
// Scenario Implementation
// ============================================================================

impl SyntheticScenario {
    /// Generate a complete synthetic dataset from this scenario.
    ///
    /// Hotspot photos come first (hotspot by hotspot), background last.
    pub fn generate(&self) -> SyntheticDataset {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut points = Vec::new();
        let mut labels = Vec::new();
        let mut centers = Vec::with_capacity(self.hotspots.len());

        for (hi, hotspot) in self.hotspots.iter().enumerate() {
            let center = offset(
                &self.origin,
                hotspot.offset_meters * hotspot.bearing.cos(),
                hotspot.offset_meters * hotspot.bearing.sin(),
            );
            centers.push(center);

            for pi in 0..hotspot.photo_count {
                let (ze, zn) = gaussian_pair(&mut rng);
                let at = offset(&center, ze * hotspot.spread_meters, zn * hotspot.spread_meters);
                let weight = sample_weight(hotspot.mean_weight, &mut rng);
                let id = format!("hot_{:02}_{:04}", hi, pi);
                points.push(
                    PhotoPoint::new(id, at.longitude, at.latitude, weight)
                        .with_source(format!("synthetic://hotspot/{}/{}", hi, pi)),
                );
                labels.push(hi as i32);
            }
        }

        for bi in 0..self.background_count {
            // sqrt for uniform density over the disc
            let r = self.background_radius_meters * rng.r#gen::<f64>().sqrt();
            let theta: f64 = rng.gen_range(0.0..(2.0 * PI));
            let at = offset(&self.origin, r * theta.cos(), r * theta.sin());
            let weight = sample_weight(self.background_mean_weight, &mut rng);
            points.push(
                PhotoPoint::new(format!("bg_{:05}", bi), at.longitude, at.latitude, weight)
                    .with_source(format!("synthetic://background/{}", bi)),
            );
            labels.push(NOISE);
        }

        let clustered_points = self.hotspots.iter().map(|h| h.photo_count).sum();
        SyntheticDataset {
            points,
            labels,
            centers,
            metadata: DatasetMetadata {
                hotspot_count: self.hotspots.len(),
                clustered_points,
                background_points: self.background_count,
            },
        }
    }
}

// ============================================================================
// Predefined Scenarios
// ============================================================================

impl SyntheticScenario {
    /// Four downtown landmarks of varying popularity with light background.
    pub fn downtown() -> Self {
        Self {
            origin: ReferenceLocation::TORONTO,
            hotspots: vec![
                HotspotConfig {
                    photo_count: 120,
                    spread_meters: 40.0,
                    mean_weight: 900.0,
                    offset_meters: 0.0,
                    bearing: 0.0,
                },
                HotspotConfig {
                    photo_count: 60,
                    spread_meters: 25.0,
                    mean_weight: 400.0,
                    offset_meters: 1200.0,
                    bearing: PI / 3.0,
                },
                HotspotConfig {
                    photo_count: 30,
                    spread_meters: 20.0,
                    mean_weight: 2500.0,
                    offset_meters: 1800.0,
                    bearing: PI,
                },
                HotspotConfig {
                    photo_count: 200,
                    spread_meters: 80.0,
                    mean_weight: 60.0,
                    offset_meters: 2500.0,
                    bearing: -PI / 2.0,
                },
            ],
            background_count: 300,
            background_radius_meters: 4000.0,
            background_mean_weight: 25.0,
            seed: 42,
        }
    }

    /// Background only: nothing should be admitted.
    pub fn background_only(count: usize) -> Self {
        Self {
            origin: ReferenceLocation::TORONTO,
            hotspots: Vec::new(),
            background_count: count,
            background_radius_meters: 4000.0,
            background_mean_weight: 25.0,
            seed: 7,
        }
    }

    /// `count` equal hotspots on a ring, for scaling benchmarks.
    pub fn with_hotspots(count: usize, photos_per_hotspot: usize, background: usize) -> Self {
        let hotspots = (0..count)
            .map(|i| HotspotConfig {
                photo_count: photos_per_hotspot,
                spread_meters: 30.0,
                mean_weight: 300.0 + 100.0 * i as f64,
                offset_meters: 1500.0,
                bearing: 2.0 * PI * i as f64 / count.max(1) as f64,
            })
            .collect();
        Self {
            origin: ReferenceLocation::TORONTO,
            hotspots,
            background_count: background,
            background_radius_meters: 4000.0,
            background_mean_weight: 25.0,
            seed: 1234,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
