//! Tests for costreg configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        log_filter = "costreg_automaton=trace"

        [intersection]
        minimize_each_fold = false
        marker_ceiling = 60000
        marker_capacity = 100
    "#;

    let config = CostRegConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.log_filter.as_deref(), Some("costreg_automaton=trace"));
    assert!(!config.intersection.minimize_each_fold);
    assert_eq!(config.intersection.marker_ceiling, 60000);
    assert_eq!(config.intersection.marker_capacity, 100);
    assert_eq!(config.intersection.marker_floor(), 59901);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        intersection:
          marker_capacity: 12
    "#;

    let config = CostRegConfig::from_yaml_str(yaml).unwrap();
    assert!(config.intersection.minimize_each_fold);
    assert_eq!(config.intersection.marker_capacity, 12);
    assert_eq!(config.log_filter, None);
}

#[test]
fn test_defaults() {
    let config = CostRegConfig::from_toml_str("").unwrap();
    assert_eq!(config, CostRegConfig::default());
    assert!(config.validate().is_ok());
    assert_eq!(config.intersection.marker_ceiling, u32::MAX);
}

#[test]
fn test_builder() {
    let config = CostRegConfig::new()
        .with_log_filter("costreg=debug")
        .with_intersection(
            IntersectionConfig::new()
                .with_minimize_each_fold(false)
                .with_marker_ceiling(500)
                .with_marker_capacity(10),
        );

    assert_eq!(config.log_filter.as_deref(), Some("costreg=debug"));
    assert_eq!(config.intersection.marker_floor(), 491);
}

#[test]
fn test_validation() {
    let empty = IntersectionConfig::new().with_marker_capacity(0);
    assert!(matches!(empty.validate(), Err(ConfigError::Invalid(_))));

    let too_large = IntersectionConfig::new()
        .with_marker_ceiling(10)
        .with_marker_capacity(11);
    assert!(matches!(too_large.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_load_missing_file() {
    let result = CostRegConfig::load("/nonexistent/costreg.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
