//! Tests for curate module

use geo::{ConvexHull, Coord, Intersects, MultiPoint, Point};
use photospots::curate::{group_by_label, summarize, weighted_centroid};
use photospots::{CurationError, CurationRules, PhotoPoint, WeightSummary, curate, project};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn rules(
    sigma: f64,
    critical_views: Option<f64>,
    critical_char_dist: Option<f64>,
) -> CurationRules {
    CurationRules {
        sigma,
        critical_views,
        critical_char_dist,
    }
}

/// Raw points whose raw coordinates double as their projected ones.
fn identity_points(coords: &[Coord<f64>], weights: &[f64]) -> Vec<PhotoPoint> {
    coords
        .iter()
        .zip(weights.iter())
        .enumerate()
        .map(|(i, (c, &w))| PhotoPoint::new(format!("p{}", i), c.x, c.y, w))
        .collect()
}

fn cross_with_straggler(cx: f64, cy: f64) -> Vec<Coord<f64>> {
    vec![
        Coord { x: cx, y: cy },
        Coord { x: cx + 0.1, y: cy },
        Coord { x: cx, y: cy + 0.1 },
        Coord { x: cx - 0.1, y: cy },
        Coord { x: cx, y: cy - 0.1 },
        Coord { x: cx + 10.0, y: cy + 10.0 },
    ]
}

#[test]
fn test_two_point_cluster_with_far_noise() {
    let points = vec![
        PhotoPoint::new("a", 0.0, 0.0, 50.0),
        PhotoPoint::new("b", 0.0, 0.0001, 50.0),
        PhotoPoint::new("c", 0.0, 100.0, 50.0),
    ];
    let labels = vec![0, 0, -1];
    let projected = project(&points, 43.65);

    let curation = curate(&labels, &points, &projected, &rules(2.5, None, None)).unwrap();

    assert!(curation.outlier_indices.is_empty());
    assert_eq!(curation.surviving_cluster_ids, vec![0]);
    assert_eq!(curation.centroids.len(), 1);
    assert!(approx_eq(curation.centroids[0].x, 0.0, 1e-12));
    assert!(approx_eq(curation.centroids[0].y, 0.00005, 1e-12));
    assert_eq!(curation.clusters[0].members, vec![0, 1]);
}

#[test]
fn test_diffuse_cluster_dropped() {
    // Ten members on a ring of radius 0.02 (projected), one noise point
    let mut coords: Vec<Coord<f64>> = (0..10)
        .map(|k| {
            let theta = 2.0 * std::f64::consts::PI * k as f64 / 10.0;
            Coord {
                x: 0.02 * theta.cos(),
                y: 0.02 * theta.sin(),
            }
        })
        .collect();
    coords.push(Coord { x: 5.0, y: 5.0 });
    let points = identity_points(&coords, &[100.0; 11]);
    let mut labels = vec![0; 10];
    labels.push(-1);

    let curation = curate(&labels, &points, &coords, &rules(2.5, None, Some(0.01))).unwrap();

    assert_eq!(curation.outlier_indices, (0..10).collect::<Vec<_>>());
    assert!(curation.surviving_cluster_ids.is_empty());
    assert!(curation.centroids.is_empty());
}

#[test]
fn test_popularity_admission() {
    let mut coords = cross_with_straggler(0.0, 0.0);
    coords.extend(cross_with_straggler(50.0, 50.0));
    // Cluster 0: popular straggler gets trimmed, leaving nothing popular.
    // Cluster 1: one popular survivor.
    let weights = [
        10.0, 10.0, 10.0, 10.0, 10.0, 5000.0, //
        10.0, 10.0, 900.0, 10.0, 10.0, 10.0,
    ];
    let points = identity_points(&coords, &weights);
    let labels = vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1];

    let curation = curate(&labels, &points, &coords, &rules(2.5, Some(500.0), None)).unwrap();

    assert_eq!(curation.surviving_cluster_ids, vec![1]);
    assert_eq!(curation.outlier_indices, vec![0, 1, 2, 3, 4, 5, 11]);
    assert_eq!(curation.clusters[0].members, vec![6, 7, 8, 9, 10]);
}

#[test]
fn test_popularity_floor_is_inclusive() {
    let coords = cross_with_straggler(0.0, 0.0);
    let weights = [10.0, 10.0, 500.0, 10.0, 10.0, 10.0];
    let points = identity_points(&coords, &weights);
    let labels = vec![0; 6];

    let curation = curate(&labels, &points, &coords, &rules(2.5, Some(500.0), None)).unwrap();
    assert_eq!(curation.surviving_cluster_ids, vec![0]);
}

#[test]
fn test_outliers_sorted_across_interleaved_clusters() {
    let a = cross_with_straggler(0.0, 0.0);
    let b = cross_with_straggler(100.0, 100.0);
    // Interleave: even indices -> cluster 1, odd -> cluster 0
    let mut coords = Vec::new();
    let mut labels = Vec::new();
    for (cb, ca) in b.iter().zip(a.iter()) {
        coords.push(*cb);
        labels.push(1);
        coords.push(*ca);
        labels.push(0);
    }
    let points = identity_points(&coords, &[1.0; 12]);

    let curation = curate(&labels, &points, &coords, &rules(2.5, None, None)).unwrap();

    // Cluster 0's straggler (11) is found before cluster 1's (10)
    assert_eq!(curation.outlier_indices, vec![10, 11]);
    assert_eq!(curation.surviving_cluster_ids, vec![0, 1]);
    assert_eq!(curation.surviving_cluster_ids.len(), curation.centroids.len());
    for cluster in &curation.clusters {
        assert!(cluster.members.iter().all(|m| !curation.outlier_indices.contains(m)));
    }
}

#[test]
fn test_weighted_centroid_pulls_toward_popular() {
    let points = vec![
        PhotoPoint::new("a", 0.0, 0.0, 1.0),
        PhotoPoint::new("b", 1.0, 0.0, 3.0),
    ];
    let centroid = weighted_centroid(&points, &[0, 1]).unwrap();
    assert!(approx_eq(centroid.x, 0.75, 1e-12));
    assert!(approx_eq(centroid.y, 0.0, 1e-12));

    assert!(weighted_centroid(&points, &[]).is_none());
}

#[test]
fn test_weighted_centroid_zero_weights() {
    let points = vec![
        PhotoPoint::new("a", 0.0, 2.0, 0.0),
        PhotoPoint::new("b", 1.0, 4.0, 0.0),
    ];
    let centroid = weighted_centroid(&points, &[0, 1]).unwrap();
    assert!(approx_eq(centroid.x, 0.5, 1e-12));
    assert!(approx_eq(centroid.y, 3.0, 1e-12));
}

#[test]
fn test_centroid_inside_hull() {
    let coords = vec![
        Coord { x: -79.3871, y: 43.6426 },
        Coord { x: -79.3868, y: 43.6429 },
        Coord { x: -79.3875, y: 43.6431 },
        Coord { x: -79.3873, y: 43.6422 },
        Coord { x: -79.3866, y: 43.6424 },
        Coord { x: -79.3870, y: 43.6427 },
    ];
    let weights = [1200.0, 30.0, 75.0, 410.0, 5.0, 980.0];
    let points = identity_points(&coords, &weights);
    let projected = project(&points, 43.65);

    let curation = curate(&[0; 6], &points, &projected, &rules(2.5, None, None)).unwrap();
    let cluster = &curation.clusters[0];

    let hull = MultiPoint::from(
        cluster
            .members
            .iter()
            .map(|&i| Point::new(points[i].longitude, points[i].latitude))
            .collect::<Vec<_>>(),
    )
    .convex_hull();
    assert!(hull.intersects(&Point::from(cluster.centroid)));
}

#[test]
fn test_invalid_labelings() {
    let points = vec![PhotoPoint::new("a", 0.0, 0.0, 1.0), PhotoPoint::new("b", 1.0, 1.0, 1.0)];
    let projected = project(&points, 45.0);

    let short = curate(&[0], &points, &projected, &CurationRules::default());
    assert!(matches!(
        short,
        Err(CurationError::InvalidLabeling { expected: 2, actual: 1 })
    ));

    let bad = curate(&[0, -2], &points, &projected, &CurationRules::default());
    assert!(matches!(bad, Err(CurationError::InvalidLabel { index: 1, label: -2 })));
}

#[test]
fn test_projection_length_mismatch() {
    let points = vec![PhotoPoint::new("a", 0.0, 0.0, 1.0), PhotoPoint::new("b", 1.0, 1.0, 1.0)];
    let projected = project(&points[..1], 45.0);

    let result = curate(&[0, 0], &points, &projected, &CurationRules::default());
    assert!(matches!(
        result,
        Err(CurationError::ProjectionMismatch { points: 2, projected: 1 })
    ));
}

#[test]
fn test_all_noise_is_empty_success() {
    let points = vec![PhotoPoint::new("a", 0.0, 0.0, 1.0), PhotoPoint::new("b", 1.0, 1.0, 1.0)];
    let projected = project(&points, 45.0);

    let curation = curate(&[-1, -1], &points, &projected, &CurationRules::default()).unwrap();
    assert!(curation.clusters.is_empty());
    assert!(curation.outlier_indices.is_empty());
}

#[test]
fn test_group_by_label_ascending() {
    let groups = group_by_label(&[2, -1, 0, 2, 0, 1]);
    let labels: Vec<i32> = groups.keys().copied().collect();
    assert_eq!(labels, vec![0, 1, 2]);
    assert_eq!(groups[&2], vec![0, 3]);
}

#[test]
fn test_summarize_median_and_best_examples() {
    let coords = cross_with_straggler(0.0, 0.0);
    let weights = [100.0, 700.0, 300.0, 700.0, 200.0, 9000.0];
    let points = identity_points(&coords, &weights);

    let curation = curate(&[0; 6], &points, &coords, &rules(2.5, None, None)).unwrap();
    let cluster = &curation.clusters[0];

    let summary = summarize(cluster, &points, WeightSummary::Median, 3);
    assert_eq!(summary.member_count, 5);
    assert_eq!(summary.avg_weight, 300.0);
    // Ties broken by ascending index
    assert_eq!(summary.best_example_indices, vec![1, 3, 2]);

    let summary = summarize(cluster, &points, WeightSummary::Mean, 10);
    assert_eq!(summary.avg_weight, 400.0);
    assert_eq!(summary.best_example_indices.len(), 5);
}
