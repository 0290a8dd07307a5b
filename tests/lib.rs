//! Tests for lib.rs core types and the backend seam

use geo::Coord;
use photospots::backend::validate_labels;
use photospots::{
    BackendKind, BackendParams, Centroid, ClusterBackend, CurationError, NOISE, PhotoPoint,
    PrecomputedLabels,
};

#[test]
fn test_photo_point_validation() {
    assert!(PhotoPoint::new("a", -79.3871, 43.6426, 10.0).is_valid());
    assert!(PhotoPoint::new("a", -79.3871, 43.6426, 0.0).is_valid());
    assert!(!PhotoPoint::new("a", 0.0, 91.0, 10.0).is_valid());
    assert!(!PhotoPoint::new("a", 181.0, 0.0, 10.0).is_valid());
    assert!(!PhotoPoint::new("a", f64::NAN, 0.0, 10.0).is_valid());
    assert!(!PhotoPoint::new("a", 0.0, 0.0, -1.0).is_valid());
}

#[test]
fn test_photo_point_finite() {
    assert!(PhotoPoint::new("a", 0.0, 100.0, 10.0).is_finite());
    assert!(PhotoPoint::new("a", 0.0, 0.0, -1.0).is_finite());
    assert!(!PhotoPoint::new("a", f64::INFINITY, 0.0, 10.0).is_finite());
    assert!(!PhotoPoint::new("a", 0.0, 0.0, f64::NAN).is_finite());
}

#[test]
fn test_photo_point_json_optional_fields() {
    let point: PhotoPoint =
        serde_json::from_str(r#"{"id": "42", "longitude": -79.38, "latitude": 43.65, "weight": 7}"#)
            .unwrap();
    assert_eq!(point.id, "42");
    assert_eq!(point.source, None);

    let with_source = point.clone().with_source("https://example.org/42");
    let json = serde_json::to_string(&with_source).unwrap();
    assert!(json.contains("source"));
    assert!(!serde_json::to_string(&point).unwrap().contains("source"));
}

#[test]
fn test_centroid_from_coord() {
    let c = Centroid::from(Coord { x: -79.0, y: 43.0 });
    assert_eq!(c.longitude, -79.0);
    assert_eq!(c.latitude, 43.0);
}

#[test]
fn test_precomputed_backend_replays() {
    let backend = PrecomputedLabels::new(BackendKind::Reachability, vec![0, NOISE, 1]);
    let points = vec![Coord { x: 0.0, y: 0.0 }; 3];
    let params = BackendParams::Reachability {
        max_eps: 1.0,
        min_samples: 2,
    };

    assert_eq!(backend.kind(), BackendKind::Reachability);
    assert_eq!(backend.fit(&points, &params).unwrap(), vec![0, -1, 1]);
    assert!(matches!(
        backend.fit(&points[..2], &params),
        Err(CurationError::BackendFailure { .. })
    ));
}

#[test]
fn test_validate_labels() {
    assert!(validate_labels(&[0, -1, 2], 3).is_ok());
    assert!(matches!(
        validate_labels(&[0, -1], 3),
        Err(CurationError::InvalidLabeling { expected: 3, actual: 2 })
    ));
    assert!(matches!(
        validate_labels(&[0, -3, 2], 3),
        Err(CurationError::InvalidLabel { index: 1, label: -3 })
    ));
}

#[test]
fn test_backend_kind_display_and_serde() {
    assert_eq!(BackendKind::Radius.to_string(), "radius");
    assert_eq!(BackendKind::Hierarchical.to_string(), "hierarchical");

    let params = BackendParams::Radius {
        eps: 0.5,
        min_samples: 15,
    };
    let json = serde_json::to_string(&params).unwrap();
    assert!(json.contains("\"kind\":\"radius\""));
    assert!(json.contains("\"minSamples\":15"));
}
