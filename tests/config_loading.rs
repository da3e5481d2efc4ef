//! Integration tests for config loading across all file formats.

use lbf::config::model::{ConfigStore, EnvironmentMode, Payload};
use lbf::config::sources::parse_config_str;
use lbf::config::validation::validate;
use serde_json::json;

fn load_example(name: &str) -> String {
    let path = format!("example/{name}");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"))
}

fn payload(value: serde_json::Value) -> Payload {
    serde_json::from_value(value).unwrap()
}

#[test]
fn yaml_example_loads_and_validates() {
    let content = load_example("lbf.yaml");
    let payload = parse_config_str("yaml", &content, "lbf.yaml").unwrap();
    validate(&payload).unwrap();

    let store = ConfigStore::from_payload(payload);
    assert_eq!(store.environment_mode().unwrap(), EnvironmentMode::Development);
    assert_eq!(store.home_path().unwrap().to_str(), Some("/srv/lbf"));
}

#[cfg(feature = "json")]
#[test]
fn json_example_loads_and_validates() {
    let content = load_example("lbf.json");
    let payload = parse_config_str("json", &content, "lbf.json").unwrap();
    validate(&payload).unwrap();
    assert_eq!(payload.len(), 3);
}

#[cfg(feature = "toml")]
#[test]
fn toml_example_loads_and_validates() {
    let content = load_example("lbf.toml");
    let payload = parse_config_str("toml", &content, "lbf.toml").unwrap();
    validate(&payload).unwrap();
    assert_eq!(payload.len(), 3);
}

#[cfg(all(feature = "json", feature = "toml"))]
#[test]
fn all_formats_produce_equivalent_payloads() {
    let yaml = parse_config_str("yaml", &load_example("lbf.yaml"), "yaml").unwrap();
    let json = parse_config_str("json", &load_example("lbf.json"), "json").unwrap();
    let toml = parse_config_str("toml", &load_example("lbf.toml"), "toml").unwrap();
    assert_eq!(yaml, json);
    assert_eq!(yaml, toml);
}

#[test]
fn unsupported_format_returns_error() {
    let result = parse_config_str("xml", "<lbf/>", "lbf.xml");
    assert!(result.is_err());
}

#[test]
fn file_load_then_runtime_load_merges_by_section() {
    let content = load_example("lbf.yaml");
    let mut store = ConfigStore::from_payload(parse_config_str("yaml", &content, "lbf.yaml").unwrap());

    store.load(payload(json!({"environment": {"mode": "MAINTENANCE"}})), false);

    assert_eq!(store.environment_mode().unwrap(), EnvironmentMode::Maintenance);
    // other sections untouched
    assert!(store.get("paths").is_some());
    assert!(store.get("datetime").is_some());
}

#[test]
fn overwrite_replaces_file_payload() {
    let content = load_example("lbf.yaml");
    let mut store = ConfigStore::from_payload(parse_config_str("yaml", &content, "lbf.yaml").unwrap());

    store.load(payload(json!({"cat": {"rat": "trap"}})), true);

    assert_eq!(store.keys().collect::<Vec<_>>(), vec!["cat"]);
    assert_eq!(store.environment_mode().unwrap(), EnvironmentMode::Production);
    assert!(store.home_path().is_none());
}
