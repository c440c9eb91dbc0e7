//! Unit tests for config module

use aciextract::{Config, HarvestMode};
use tempfile::TempDir;

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert!(!config.harvest.strict);
    assert_eq!(config.harvest.mode(), HarvestMode::Lenient);
    assert_eq!(config.output.file, "config.json");
    assert_eq!(config.output.indent, 4);
    assert_eq!(config.archive.max_document_mb, 512);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let toml_str = r#"
[harvest]
strict = true
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.harvest.mode(), HarvestMode::Strict);
    assert_eq!(config.output.indent, 4);
    assert_eq!(config.archive.max_document_mb, 512);
}

#[test]
fn config_serialization_roundtrip() {
    let mut config = Config::default();
    config.output.indent = 2;
    config.output.file = "fabric.json".to_string();
    let parsed: Config = toml::from_str(&config.to_toml().unwrap()).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn load_from_missing_file_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from(&temp.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn load_from_rejects_invalid_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[output]\nindent = 0\n").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("output.indent"));
}

#[test]
fn load_from_reports_parse_errors_with_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[output\n").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn save_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".config").join("aciextract").join("config.toml");
    let mut config = Config::default();
    config.archive.max_document_mb = 64;
    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), config);
}
