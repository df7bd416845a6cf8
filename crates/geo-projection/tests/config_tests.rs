//! Tests for loading and building projection configuration.

use std::io::Write;

use geo_common::Extent;
use geo_projection::{PreClip, ProjectionConfig, ProjectionError, ProjectorKind, ReclipPolicy};
use tempfile::NamedTempFile;
use test_utils::{assert_approx_eq, assert_coords_approx_eq};

fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_yaml_file() {
    let file = write_config(
        ".yaml",
        r#"
projector: mercator
scale: 200
translate: [100, 50]
center: [10, 20]
precision: 0
clip_extent:
  min_x: 0
  min_y: 0
  max_x: 960
  max_y: 500
"#,
    );

    let config = ProjectionConfig::from_file(file.path()).unwrap();
    assert_eq!(config.projector, ProjectorKind::Mercator);
    assert_eq!(config.scale, Some(200.0));
    assert_eq!(config.translate, [100.0, 50.0]);
    assert_eq!(config.clip_extent, Some(Extent::new(0.0, 0.0, 960.0, 500.0)));
    // Unset fields keep their defaults.
    assert!(config.antimeridian_clip);
    assert_eq!(config.rotate, None);
}

#[test]
fn test_load_json_file() {
    let file = write_config(
        ".json",
        r#"{"projector": "transverse_mercator", "rotate": [0, 0, 45], "antimeridian_clip": false}"#,
    );

    let config = ProjectionConfig::from_file(file.path()).unwrap();
    assert_eq!(config.projector, ProjectorKind::TransverseMercator);
    assert_eq!(config.rotate, Some([0.0, 0.0, 45.0]));
    assert!(!config.antimeridian_clip);
}

#[test]
fn test_unknown_projector_is_config_error() {
    let result = ProjectionConfig::from_yaml_str("projector: albers\n");
    assert!(matches!(result, Err(ProjectionError::Config(_))));
}

#[test]
fn test_malformed_json_is_config_error() {
    let result = ProjectionConfig::from_json_str("{\"scale\": ");
    assert!(matches!(result, Err(ProjectionError::Config(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ProjectionConfig::from_file(dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(ProjectionError::Io(_))));
}

#[test]
fn test_empty_yaml_mapping_is_default() {
    let config = ProjectionConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config, ProjectionConfig::default());
}

// ============================================================================
// Building
// ============================================================================

#[test]
fn test_build_applies_every_field() {
    let config = ProjectionConfig::from_yaml_str(
        r#"
projector: mercator
scale: 200
translate: [100, 50]
center: [10, 20]
precision: 0
clip_extent: {min_x: 0, min_y: 0, max_x: 960, max_y: 500}
"#,
    )
    .unwrap();

    let projection = config.build().unwrap();
    assert_eq!(projection.scale(), 200.0);
    assert_eq!(projection.translate(), (100.0, 50.0));
    assert_eq!(projection.precision(), 0.0);
    assert_eq!(projection.reclip_policy(), ReclipPolicy::Longitudinal);
    assert_eq!(projection.clip_extent(), Some(Extent::new(0.0, 0.0, 960.0, 500.0)));

    let (x, y) = projection.project(10.0, 20.0);
    assert_coords_approx_eq!((x, y), (100.0, 50.0), 1e-9);
}

#[test]
fn test_build_defaults_follow_projector() {
    let projection = ProjectionConfig {
        projector: ProjectorKind::TransverseMercator,
        ..Default::default()
    }
    .build()
    .unwrap();

    assert_approx_eq!(projection.scale(), 961.0 / std::f64::consts::TAU, 1e-12);
    let (_, _, gamma) = projection.rotate();
    assert_approx_eq!(gamma, 90.0, 1e-9);
    assert_eq!(projection.pre_clip(), PreClip::Antimeridian);
}

#[test]
fn test_build_without_antimeridian_clip() {
    let projection = ProjectionConfig {
        antimeridian_clip: false,
        ..Default::default()
    }
    .build()
    .unwrap();

    assert_eq!(projection.pre_clip(), PreClip::NoClip);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_validate_rejects_each_bad_field() {
    let bad_scale = ProjectionConfig {
        scale: Some(-1.0),
        ..Default::default()
    };
    assert!(matches!(bad_scale.validate(), Err(ProjectionError::InvalidScale(_))));

    let bad_translate = ProjectionConfig {
        translate: [f64::NAN, 0.0],
        ..Default::default()
    };
    assert!(matches!(bad_translate.validate(), Err(ProjectionError::InvalidTranslate(_))));

    let bad_center = ProjectionConfig {
        center: [0.0, 100.0],
        ..Default::default()
    };
    assert!(matches!(bad_center.validate(), Err(ProjectionError::Geo(_))));

    let bad_precision = ProjectionConfig {
        precision: f64::INFINITY,
        ..Default::default()
    };
    assert!(matches!(bad_precision.validate(), Err(ProjectionError::InvalidPrecision(_))));

    let bad_extent = ProjectionConfig {
        clip_extent: Some(Extent::new(10.0, 0.0, 0.0, 10.0)),
        ..Default::default()
    };
    assert!(matches!(bad_extent.validate(), Err(ProjectionError::InvalidExtent(_))));

    assert!(bad_scale.build().is_err());
}

#[test]
fn test_projector_kind_round_trips_through_display() {
    for kind in [
        ProjectorKind::Equirectangular,
        ProjectorKind::Mercator,
        ProjectorKind::TransverseMercator,
    ] {
        assert_eq!(kind.to_string().parse::<ProjectorKind>().unwrap(), kind);
    }
}
