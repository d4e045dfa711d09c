use muxpod_config::{Config, ConfigError, LogLevel};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_save_then_load_preserves_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = Config {
        ssh: Some("-p 2222 dev@build-box".into()),
        poll_interval_ms: 250,
        track_cursor: true,
        log_level: LogLevel::Debug,
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("yaml.tmp").exists());
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_saved_yaml_is_readable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    Config::default().save_to(&path).unwrap();

    let yaml = fs::read_to_string(&path).unwrap();
    assert!(yaml.contains("tmux_path: tmux"));
    assert!(yaml.contains("log_level:"));
    assert!(!yaml.contains("ssh:"));
}

#[test]
fn test_empty_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "").unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "poll_interval_ms: [not, a, number]\n").unwrap();
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_invalid_values_fail_validation_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "scrollback_lines: 0\n").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
    assert!(err.to_string().contains("scrollback_lines"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        Config::load_from(&dir.path().join("absent.yaml")),
        Err(ConfigError::Io(_))
    ));
}
