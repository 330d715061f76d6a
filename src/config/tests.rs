//! Unit tests for configuration loading and precedence.

use std::time::Duration;

use ortho_config::{MergeComposer, OrthoConfig};
use rstest::rstest;
use serde_json::{Value, json};

use super::{DEFAULT_API_BASE_URL, DashboardConfig, OperationMode};
use crate::api::error::DashboardError;
use crate::tui::Tab;

/// Applies a configuration layer to the composer based on the layer type.
fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"api_base_url": "http://default/api"})), ("file", json!({"api_base_url": "http://file/api"}))],
    "http://file/api",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"api_base_url": "http://file/api"})), ("environment", json!({"api_base_url": "http://env/api"}))],
    "http://env/api",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"api_base_url": "http://env/api"})), ("cli", json!({"api_base_url": "http://cli/api"}))],
    "http://cli/api",
    "CLI should override environment"
)]
fn test_layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value);
    }

    let config =
        DashboardConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    assert_eq!(config.api_base_url, expected, "{message}");
}

#[rstest]
fn partial_overrides_preserve_lower_values() {
    let mut composer = MergeComposer::new();
    composer.push_defaults(json!({"api_base_url": "http://default/api", "poll_interval_ms": 2500}));
    composer.push_cli(json!({"api_base_url": "http://cli/api"}));

    let config =
        DashboardConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

    assert_eq!(config.api_base_url, "http://cli/api");
    assert_eq!(config.poll_interval_ms, 2500, "default interval preserved");
}

#[rstest]
fn defaults_target_local_backend() {
    let config = DashboardConfig::default();
    let settings = config.resolve().expect("defaults should be valid");

    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(settings.poll_interval, Duration::from_secs(5));
    assert_eq!(settings.api.timeout(), Duration::from_secs(10));
    assert_eq!(settings.start_tab, Tab::Reviews);
}

#[rstest]
#[case::zero_poll(DashboardConfig { poll_interval_ms: 0, ..Default::default() })]
#[case::zero_timeout(DashboardConfig { request_timeout_secs: 0, ..Default::default() })]
#[case::bad_url(DashboardConfig { api_base_url: "localhost:8081".to_owned(), ..Default::default() })]
#[case::bad_tab(DashboardConfig { start_tab: Some("settings".to_owned()), ..Default::default() })]
fn resolve_rejects_invalid_values(#[case] config: DashboardConfig) {
    let result = config.resolve();
    assert!(
        matches!(result, Err(DashboardError::Configuration { .. })),
        "expected configuration error, got {result:?}"
    );
}

#[rstest]
fn resolve_honours_start_tab() {
    let config = DashboardConfig {
        start_tab: Some("Crawler".to_owned()),
        ..Default::default()
    };

    let settings = config.resolve().expect("config should be valid");
    assert_eq!(settings.start_tab, Tab::Crawler);
}

#[rstest]
#[case::dashboard(false, OperationMode::Dashboard)]
#[case::snapshot(true, OperationMode::StatusSnapshot)]
fn operation_mode_follows_status_once(#[case] status_once: bool, #[case] expected: OperationMode) {
    let config = DashboardConfig {
        status_once,
        ..Default::default()
    };

    assert_eq!(config.operation_mode(), expected);
}

/// Parses CLI arguments with the environment and config discovery isolated.
fn load_from_cli(cli_args: &[&str]) -> DashboardConfig {
    let temp_dir = tempfile::TempDir::new().expect("temp dir should be created");
    let home = temp_dir.path().to_string_lossy().to_string();
    let _guard = env_lock::lock_env([
        ("CRAWLDASH_START_TAB", None),
        ("HOME", Some(home.as_str())),
        ("XDG_CONFIG_HOME", Some(home.as_str())),
    ]);

    let mut args: Vec<std::ffi::OsString> = vec![std::ffi::OsString::from("crawldash")];
    args.extend(cli_args.iter().map(std::ffi::OsString::from));

    DashboardConfig::load_from_iter(args).expect("config should load")
}

#[rstest]
#[case::short(&["-s"])]
#[case::long(&["--status-once"])]
fn status_once_flag_selects_snapshot_mode(#[case] cli_args: &[&str]) {
    let config = load_from_cli(cli_args);

    assert_eq!(config.operation_mode(), OperationMode::StatusSnapshot);
}

#[rstest]
#[case::short(&["-t", "crawler"])]
#[case::long(&["--start-tab", "crawler"])]
fn start_tab_flag_selects_crawler_tab(#[case] cli_args: &[&str]) {
    let config = load_from_cli(cli_args);

    assert_eq!(config.operation_mode(), OperationMode::Dashboard);
    let settings = config.resolve().expect("config should be valid");
    assert_eq!(settings.start_tab, Tab::Crawler);
}
