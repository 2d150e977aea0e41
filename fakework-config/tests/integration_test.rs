//! Integration tests for fakework-config

use fakework_config::*;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use temp_env::with_vars;

/// Every variable the loader reads, unset, so tests start from a clean slate
fn cleared_vars() -> Vec<(&'static str, Option<&'static str>)> {
    vec![
        ("PORT", None),
        ("HEROKU_APP", None),
        ("LOG", None),
        ("QUERY", None),
        ("MAX_CONC", None),
        ("FAKEWORK_SERVER_BIND_ADDRESS", None),
        ("FAKEWORK_SERVER_PORT", None),
        ("FAKEWORK_MAX_RESPONSE_CHARS", None),
        ("FAKEWORK_SIEGE_VARIANTS", None),
        ("FAKEWORK_SIEGE_BASE_URL", None),
        ("FAKEWORK_LOG_LEVEL", None),
        ("FAKEWORK_LOG_FORMAT", None),
    ]
}

fn with_env(overrides: Vec<(&'static str, Option<&'static str>)>, f: impl FnOnce()) {
    let mut vars = cleared_vars();
    for (key, value) in overrides {
        vars.retain(|(k, _)| *k != key);
        vars.push((key, value));
    }
    with_vars(vars, f);
}

#[test]
fn test_default_config_validation() {
    let config = FakeworkConfig::default();
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_serve_does_not_require_app() {
    with_env(vec![], || {
        let config = ConfigLoader::new().from_env().unwrap();
        assert!(config.siege.app.is_empty());
        assert_eq!(config.endpoint.port, 3000);
    });
}

#[test]
fn test_siege_legacy_variables() {
    with_env(
        vec![
            ("HEROKU_APP", Some("fake-work-app")),
            ("LOG", Some("/tmp/runs.log")),
            ("QUERY", Some("cpu_ms=100&iowait_ms=0")),
            ("MAX_CONC", Some("4")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap();
            assert_eq!(config.siege.app, "fake-work-app");
            assert_eq!(config.siege.log_file, PathBuf::from("/tmp/runs.log"));
            assert_eq!(config.siege.query, "cpu_ms=100&iowait_ms=0");
            assert_eq!(config.siege.max_concurrency, 4);
            assert_eq!(
                config.siege.target_url(),
                "http://fake-work-app.herokuapp.com/fake_work?cpu_ms=100&iowait_ms=0"
            );
        },
    );
}

#[test]
fn test_invalid_max_conc_is_an_error() {
    with_env(vec![("MAX_CONC", Some("twenty"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    });
}

#[test]
fn test_prefixed_port_wins_over_paas_port() {
    with_env(
        vec![("PORT", Some("5000")), ("FAKEWORK_SERVER_PORT", Some("6000"))],
        || {
            let config = ConfigLoader::new().from_env().unwrap();
            assert_eq!(config.endpoint.port, 6000);
        },
    );

    with_env(vec![("PORT", Some("5000"))], || {
        let config = ConfigLoader::new().from_env().unwrap();
        assert_eq!(config.endpoint.port, 5000);
    });
}

#[test]
fn test_logging_and_variant_overrides() {
    with_env(
        vec![
            ("FAKEWORK_LOG_LEVEL", Some("debug")),
            ("FAKEWORK_LOG_FORMAT", Some("json")),
            ("FAKEWORK_SIEGE_VARIANTS", Some("puma, unicorn")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap();
            assert_eq!(config.logging.level, LogLevel::Debug);
            assert_eq!(config.logging.format, LogFormat::Json);
            assert_eq!(config.siege.variants, vec!["puma", "unicorn"]);
        },
    );
}

#[test]
fn test_yaml_config_file() {
    let yaml = r#"
endpoint:
  bind_address: "127.0.0.1"
  port: 8088
  max_response_chars: 100000
  defaults:
    cpu_ms: 10

siege:
  app: "staging-app"
  query: "response_chars=500"
  max_concurrency: 3
  variants: ["puma", "unicorn"]
  settle_delay: 1
  drain_delay: 2
  run_duration: 5

logging:
  level: warn
  format: compact
"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    with_env(vec![], || {
        let config = ConfigLoader::new().from_file(file.path()).unwrap();

        assert_eq!(config.endpoint.server_address(), "127.0.0.1:8088");
        assert_eq!(config.endpoint.max_response_chars, Some(100_000));
        assert_eq!(config.endpoint.defaults.cpu_ms, 10);
        // Unspecified defaults keep their stock values
        assert_eq!(config.endpoint.defaults.iowait_ms, 250);
        assert_eq!(config.endpoint.defaults.response_chars, 20_000);

        assert_eq!(config.siege.app, "staging-app");
        assert_eq!(config.siege.max_concurrency, 3);
        assert_eq!(config.siege.settle_delay, Duration::from_secs(1));
        assert_eq!(config.siege.drain_delay, Duration::from_secs(2));
        assert_eq!(config.siege.run_duration, Duration::from_secs(5));
        assert_eq!(config.siege.log_file, PathBuf::from("siege.log"));

        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.logging.format, LogFormat::Compact);
    });
}

#[test]
fn test_sample_config_round_trips() {
    let sample = FakeworkConfig::generate_sample();
    let parsed: FakeworkConfig = serde_yaml::from_str(&sample).unwrap();
    assert_eq!(parsed, FakeworkConfig::default());
}

#[test]
fn test_missing_file_is_read_error() {
    let err = ConfigLoader::new()
        .load(Some("/definitely/not/here/fakework.yaml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileReadError(_)));
}
