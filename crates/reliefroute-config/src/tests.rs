//! Tests for engine configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "reproducible"
        random_seed = 42

        [predictor]
        epochs = 20
        learning_rate = 0.05
        safety_buffer = 1.25

        [alerts]
        low_stock_threshold = 75.0
        demand_spike_ratio = 2.0
    "#;

    let config = EngineConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.predictor.epochs, 20);
    assert_eq!(config.predictor.safety_buffer, 1.25);
    assert_eq!(config.alerts.low_stock_threshold, 75.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: reproducible
        random_seed: 42
        predictor:
          epochs: 10
        alerts:
          demand_spike_ratio: 3.0
    "#;

    let config = EngineConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.predictor.epochs, 10);
    assert_eq!(config.predictor.learning_rate, 0.01);
    assert_eq!(config.alerts.demand_spike_ratio, 3.0);
    assert_eq!(config.alerts.low_stock_threshold, 100.0);
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.predictor.epochs, 100);
    assert_eq!(config.effective_seed(), None);
}

#[test]
fn test_builder() {
    let config = EngineConfig::new()
        .with_random_seed(123)
        .with_epochs(5)
        .with_learning_rate(0.1)
        .with_low_stock_threshold(10.0);

    assert_eq!(config.effective_seed(), Some(123));
    assert_eq!(config.predictor.epochs, 5);
    assert_eq!(config.predictor.learning_rate, 0.1);
    assert_eq!(config.alerts.low_stock_threshold, 10.0);
}

#[test]
fn test_explicit_seed_wins_over_reproducible_default() {
    let config = EngineConfig::new()
        .with_environment_mode(EnvironmentMode::Reproducible)
        .with_random_seed(9);
    assert_eq!(config.effective_seed(), Some(9));
}

#[test]
fn test_validation_rejects_bad_values() {
    assert!(matches!(
        EngineConfig::new().with_epochs(0).validate(),
        Err(ConfigError::Invalid(_))
    ));
    assert!(EngineConfig::new().with_learning_rate(-0.1).validate().is_err());
    assert!(EngineConfig::new()
        .with_low_stock_threshold(f64::NAN)
        .validate()
        .is_err());
}

#[test]
fn test_load_missing_file() {
    let result = EngineConfig::load("/nonexistent/reliefroute.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_load_picks_format_from_extension() {
    let dir = tempfile::tempdir().unwrap();

    let yaml = dir.path().join("engine.yml");
    std::fs::write(&yaml, "random_seed: 4\npredictor:\n  epochs: 12\n").unwrap();
    let config = EngineConfig::load(&yaml).unwrap();
    assert_eq!(config.random_seed, Some(4));
    assert_eq!(config.predictor.epochs, 12);

    let toml = dir.path().join("engine.toml");
    std::fs::write(&toml, "random_seed = 5\n").unwrap();
    assert_eq!(EngineConfig::load(&toml).unwrap().random_seed, Some(5));

    let invalid = dir.path().join("invalid.toml");
    std::fs::write(&invalid, "[predictor]\nepochs = 0\n").unwrap();
    assert!(matches!(
        EngineConfig::load(&invalid),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_section_validation_is_public() {
    let predictor = PredictorConfig {
        safety_buffer: -2.0,
        ..PredictorConfig::default()
    };
    assert!(matches!(predictor.validate(), Err(ConfigError::Invalid(_))));
    assert!(PredictorConfig::default().validate().is_ok());

    let alerts = AlertConfig {
        demand_spike_ratio: 0.0,
        ..AlertConfig::default()
    };
    assert!(matches!(alerts.validate(), Err(ConfigError::Invalid(_))));
}
