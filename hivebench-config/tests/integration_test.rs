//! Integration tests for hivebench-config

use hivebench_config::*;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use temp_env::with_vars;

/// Every override the loader reads, unset
fn cleared_env() -> Vec<(&'static str, Option<&'static str>)> {
    [
        "HIVEBENCH_CYCLES",
        "HIVEBENCH_INTERVAL",
        "HIVEBENCH_WORK_SIZE",
        "HIVEBENCH_SEED",
        "HIVEBENCH_HTTP_TIMEOUT",
        "HIVEBENCH_HTTP_USER_AGENT",
        "HIVEBENCH_LOG_LEVEL",
        "HIVEBENCH_LOG_FORMAT",
        "HIVEBENCH_OUTPUT_PATH",
    ]
    .into_iter()
    .map(|name| (name, None))
    .collect()
}

#[test]
fn test_default_config_validation() {
    let config = HivebenchConfig::default();
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("HIVEBENCH_CYCLES", Some("3")),
        ("HIVEBENCH_INTERVAL", Some("0.5")),
        ("HIVEBENCH_WORK_SIZE", Some("25")),
        ("HIVEBENCH_SEED", Some("42")),
        ("HIVEBENCH_HTTP_TIMEOUT", Some("60")),
        ("HIVEBENCH_LOG_LEVEL", Some("debug")),
        ("HIVEBENCH_OUTPUT_PATH", Some("/tmp/run.csv")),
    ];

    with_vars(vars, || {
        let config = ConfigLoader::new().from_env().unwrap();

        assert_eq!(config.experiment.cycles, 3);
        assert_eq!(config.experiment.interval, 0.5);
        assert_eq!(config.experiment.work_size, 25);
        assert_eq!(config.experiment.seed, Some(42));
        assert_eq!(config.http.timeout, Duration::from_secs(60));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.output.path, PathBuf::from("/tmp/run.csv"));
    });
}

#[test]
fn test_invalid_env_value_is_rejected() {
    with_vars(vec![("HIVEBENCH_CYCLES", Some("many"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
        assert!(err.to_string().contains("HIVEBENCH_CYCLES"));
    });
}

#[test]
fn test_env_values_still_validated() {
    with_vars(vec![("HIVEBENCH_CYCLES", Some("0"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::DomainError { .. }));
    });
}

#[test]
fn test_custom_prefix() {
    with_vars(vec![("BENCH_WORK_SIZE", Some("12"))], || {
        let config = ConfigLoader::with_prefix("BENCH").from_env().unwrap();
        assert_eq!(config.experiment.work_size, 12);
    });
}

#[test]
fn test_yaml_config_serialization() {
    let yaml = HivebenchConfig::generate_sample();

    let parsed: HivebenchConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
    assert_eq!(parsed.experiment, ExperimentConfig::default());
}

#[test]
fn test_comprehensive_config_file() {
    let yaml = r#"
experiment:
  cycles: 5
  interval: 0.2
  work_size: 30
  seed: 7

http:
  timeout: 15
  user_agent: "bench-agent"
  connection_pool:
    max_idle_per_host: 4

logging:
  level: warn
  format: json

output:
  path: "results/run.csv"
  create_dirs: false
"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    with_vars(cleared_env(), || {
        let config = ConfigLoader::new().from_file(file.path()).unwrap();

        assert_eq!(config.experiment.cycles, 5);
        assert_eq!(config.experiment.interval, 0.2);
        assert_eq!(config.experiment.work_size, 30);
        assert_eq!(config.experiment.seed, Some(7));
        assert_eq!(config.http.timeout, Duration::from_secs(15));
        assert_eq!(config.http.user_agent, "bench-agent");
        assert_eq!(config.http.connection_pool.max_idle_per_host, 4);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.output.path, PathBuf::from("results/run.csv"));
        assert!(!config.output.create_dirs);
    });
}

#[test]
fn test_env_overrides_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"experiment:\n  cycles: 5\n").unwrap();

    with_vars(vec![("HIVEBENCH_CYCLES", Some("9"))], || {
        let config = ConfigLoader::new().load(Some(file.path())).unwrap();
        assert_eq!(config.experiment.cycles, 9);
    });
}

#[test]
fn test_invalid_file_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"experiment:\n  interval: -1.0\n").unwrap();

    with_vars(cleared_env(), || {
        let err = ConfigLoader::new().from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::DomainError { ref domain, .. } if domain == "experiment"));
    });
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigLoader::new()
        .from_file(dir.path().join("absent.yaml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileReadError(_)));
}
