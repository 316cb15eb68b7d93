use lumify::config::{Config, DefaultPolicy, Endpoints, load_config_from_yaml};
use lumify::credentials::LumifyCredentials;
use lumify::loader::load_job_from_yaml;
use serde_json::json;
use std::fs;
use std::time::Duration;

#[test]
fn test_load_job_from_yaml() {
    let yaml = r#"
parameters:
  operation: last30days
  topic: "{{ $json.topic }}"
  last30daysOptions:
    days: 7
    sources: [reddit, web]
items:
  - topic: AI agents
  - topic: Rust
continue_on_fail: true
"#;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("job.yaml");
    fs::write(&file_path, yaml).expect("Failed to write temp file");

    let job = load_job_from_yaml(&file_path).expect("Failed to load job");
    assert_eq!(job.parameters["operation"], json!("last30days"));
    assert_eq!(job.parameters["last30daysOptions"], json!({ "days": 7, "sources": ["reddit", "web"] }));
    assert_eq!(job.items.len(), 2);
    assert!(job.continue_on_fail);

    let ctx = job.into_context(Some(LumifyCredentials::new("lmfy-abc", None)));
    assert_eq!(ctx.items.len(), 2);
    assert!(ctx.continue_on_fail);
    assert_eq!(ctx.get_node_parameter("topic", 1), Some(json!("Rust")));
}

#[test]
fn test_job_without_items_runs_once() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("job.yaml");
    fs::write(&file_path, "parameters:\n  query: hello\n").unwrap();

    let job = load_job_from_yaml(&file_path).unwrap();
    assert!(!job.continue_on_fail);

    let ctx = job.into_context(None);
    assert_eq!(ctx.items.len(), 1);
    assert!(ctx.credentials.is_none());
}

#[test]
fn test_missing_job_file_reports_path() {
    let err = load_job_from_yaml("/definitely/not/here.yaml").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.yaml"));
}

#[test]
fn test_load_config_from_yaml() {
    let yaml = r#"
endpoints:
  search: http://localhost:8080/search.php
timeout_secs: 15
defaults: explicit_only
"#;
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("config.yaml");
    fs::write(&file_path, yaml).unwrap();

    let config = load_config_from_yaml(&file_path).expect("Failed to load config");
    assert_eq!(config.endpoints.search, "http://localhost:8080/search.php");
    assert_eq!(config.endpoints.last30days, Endpoints::default().last30days);
    assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    assert_eq!(config.defaults, DefaultPolicy::ExplicitOnly);
}

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.timeout(), None);
    assert_eq!(config.defaults, DefaultPolicy::CollectionDefaults);

    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("empty.yaml");
    fs::write(&file_path, "{}").unwrap();
    assert_eq!(load_config_from_yaml(&file_path).unwrap(), config);
}
