//! Plugin and build configuration tests

use std::collections::HashMap;
use std::fs;

use serde_json::json;
use step_notify::config::{BuildEnv, ConfigError, PluginConfig, vars};
use step_notify::core::models::EvaluationInput;
use tempfile::TempDir;

use crate::common::fixtures::plugins_json;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let map: HashMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

// =============================================================================
// BUILDKITE_PLUGINS
// =============================================================================

#[test]
fn test_selects_this_plugin_among_others() {
    let json = plugins_json(&json!({
        "message": "hello <@jh>",
        "channel_name": "builds",
        "slack_token_env_var_name": "CUSTOM_TOKEN",
        "conditions": {"branches": ["main"], "exit_codes": [1, 2], "failed": true}
    }));

    let config = PluginConfig::from_plugins_json(&json).unwrap();
    assert_eq!(config.message, "hello <@jh>");
    assert_eq!(config.channel_name, "builds");
    assert_eq!(config.slack_token_env_var_name, "CUSTOM_TOKEN");
    assert_eq!(config.conditions.branches, ["main"]);
    assert_eq!(config.conditions.exit_codes, [1, 2]);
    assert!(config.conditions.failed);
}

#[test]
fn test_first_matching_entry_wins() {
    let json = json!([
        {"github.com/a/step-slack-notify-buildkite-plugin#v1": {"channel_name": "first"}},
        {"github.com/b/step-slack-notify-buildkite-plugin#v2": {"channel_name": "second"}},
    ])
    .to_string();

    let config = PluginConfig::from_plugins_json(&json).unwrap();
    assert_eq!(config.channel_name, "first");
}

#[test]
fn test_plugin_missing_from_list() {
    let json = json!([{"github.com/buildkite-plugins/docker-buildkite-plugin#v5.0.0": {}}]).to_string();
    let err = PluginConfig::from_plugins_json(&json).unwrap_err();
    assert!(matches!(err, ConfigError::PluginNotFound));
    assert_eq!(
        err.to_string(),
        "cannot find configuration for step-slack-notify-buildkite-plugin"
    );
}

#[test]
fn test_plugins_not_json() {
    let err = PluginConfig::from_plugins_json("not json").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPluginsJson(_)));
}

#[test]
fn test_plugin_settings_wrong_shape() {
    let json = plugins_json(&json!({"conditions": {"exit_codes": "1"}}));
    let err = PluginConfig::from_plugins_json(&json).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPluginConfig(_)));
}

#[test]
fn test_from_env() {
    let json = plugins_json(&json!({"message": "m", "channel_name": "c"}));
    let config = PluginConfig::from_env_with(env(&[(vars::PLUGINS, &json)])).unwrap();
    assert_eq!(config.channel_name, "c");

    let err = PluginConfig::from_env_with(env(&[])).unwrap_err();
    assert_eq!(err.to_string(), "BUILDKITE_PLUGINS is not set");
}

// =============================================================================
// TOML File
// =============================================================================

#[test]
fn test_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notify.toml");
    fs::write(
        &path,
        r##"
message = "deploy failed <@oncall>"
channel_name = "#alerts"

[conditions]
branches = ["main", "release"]
failed = true
"##,
    )
    .unwrap();

    let config = PluginConfig::from_toml_file(&path).unwrap();
    assert_eq!(config.message, "deploy failed <@oncall>");
    assert_eq!(config.channel_name, "#alerts");
    assert_eq!(config.slack_token_env_var_name, "SLACK_TOKEN");
    assert_eq!(config.conditions.branches, ["main", "release"]);
    assert!(config.conditions.exit_codes.is_empty());
    assert!(config.conditions.failed);
}

#[test]
fn test_toml_file_missing() {
    let dir = TempDir::new().unwrap();
    let err = PluginConfig::from_toml_file(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_toml_file_invalid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "message = [").unwrap();

    let err = PluginConfig::from_toml_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Toml { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

// =============================================================================
// Validation and Token
// =============================================================================

#[test]
fn test_validate() {
    let mut config = PluginConfig {
        message: "hi".to_string(),
        channel_name: "ci".to_string(),
        ..PluginConfig::default()
    };
    assert!(config.validate().is_ok());

    config.message = "  ".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::MissingSetting("message"))));

    config.channel_name = String::new();
    assert!(matches!(config.validate(), Err(ConfigError::MissingSetting("channel_name"))));
}

#[test]
fn test_custom_token_variable() {
    let config = PluginConfig {
        slack_token_env_var_name: "CUSTOM_TOKEN".to_string(),
        ..PluginConfig::default()
    };

    let token = config
        .slack_token(env(&[("SLACK_TOKEN", "wrong"), ("CUSTOM_TOKEN", "xoxb-right")]))
        .unwrap();
    assert_eq!(token, "xoxb-right");

    let err = config.slack_token(env(&[("SLACK_TOKEN", "wrong")])).unwrap_err();
    assert_eq!(err.to_string(), "blank slack token in $CUSTOM_TOKEN, aborting");
}

// =============================================================================
// Build Environment
// =============================================================================

#[test]
fn test_build_env() {
    let build = BuildEnv::from_env_with(env(&[
        (vars::EXIT_STATUS, "1"),
        (vars::BRANCH, "main"),
        (vars::BUILD_URL, "https://buildkite.com/acme/app/builds/42"),
        (vars::JOB_ID, "0190-job"),
        (vars::ORGANIZATION_SLUG, "acme"),
        (vars::PIPELINE_NAME, "app"),
        (vars::BUILD_NUMBER, "42"),
    ]));

    assert_eq!(build.input(), EvaluationInput::new("1", "main"));
    assert_eq!(build.build, crate::common::fixtures::build_info());
}
