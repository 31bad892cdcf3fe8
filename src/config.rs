//! Plugin and build configuration
//!
//! Buildkite hands plugin settings to the step as JSON in `BUILDKITE_PLUGINS`
//! and describes the build through `BUILDKITE_*` variables. Both are read
//! once at startup into plain structs; nothing below the CLI reads the
//! environment directly.
//!
//! For local runs the plugin settings can also come from a TOML file with
//! the same keys.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::models::{BuildInfo, ConditionSet, EvaluationInput};

/// Substring identifying this plugin's entry in `BUILDKITE_PLUGINS`
pub const PLUGIN_NAME: &str = "step-slack-notify-buildkite-plugin";

/// Variable holding the Slack token unless configured otherwise
pub const DEFAULT_TOKEN_VAR: &str = "SLACK_TOKEN";

/// Buildkite environment variable names
pub mod vars {
    /// JSON array of plugin configurations
    pub const PLUGINS: &str = "BUILDKITE_PLUGINS";
    /// Exit status of the step's command
    pub const EXIT_STATUS: &str = "BUILDKITE_COMMAND_EXIT_STATUS";
    /// Branch being built
    pub const BRANCH: &str = "BUILDKITE_BRANCH";
    /// Web URL of the build
    pub const BUILD_URL: &str = "BUILDKITE_BUILD_URL";
    /// Job ID of the step
    pub const JOB_ID: &str = "BUILDKITE_JOB_ID";
    /// Organization slug
    pub const ORGANIZATION_SLUG: &str = "BUILDKITE_ORGANIZATION_SLUG";
    /// Pipeline name
    pub const PIPELINE_NAME: &str = "BUILDKITE_PIPELINE_NAME";
    /// Build number
    pub const BUILD_NUMBER: &str = "BUILDKITE_BUILD_NUMBER";
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `BUILDKITE_PLUGINS` is not set
    #[error("{} is not set", vars::PLUGINS)]
    MissingPlugins,

    /// `BUILDKITE_PLUGINS` is not a JSON array of objects
    #[error("{} is not valid plugin JSON", vars::PLUGINS)]
    InvalidPluginsJson(#[source] serde_json::Error),

    /// No plugin entry belongs to this plugin
    #[error("cannot find configuration for {}", PLUGIN_NAME)]
    PluginNotFound,

    /// This plugin's entry has the wrong shape
    #[error("invalid plugin configuration")]
    InvalidPluginConfig(#[source] serde_json::Error),

    /// Config file could not be read
    #[error("failed to read {}", .path.display())]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML
    #[error("invalid config file {}", .path.display())]
    Toml {
        /// File that was parsed
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: toml::de::Error,
    },

    /// A required setting is empty
    #[error("missing required setting {0:?}")]
    MissingSetting(&'static str),

    /// The token variable is unset or blank
    #[error("blank slack token in ${0}, aborting")]
    MissingToken(String),
}

/// Settings for this plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Message template, may contain `<@name>` mentions
    #[serde(default)]
    pub message: String,

    /// Name of the channel to post to
    #[serde(default)]
    pub channel_name: String,

    /// Environment variable holding the Slack token
    #[serde(default = "default_token_var")]
    pub slack_token_env_var_name: String,

    /// When to notify
    #[serde(default)]
    pub conditions: ConditionSet,
}

fn default_token_var() -> String {
    DEFAULT_TOKEN_VAR.to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            message: String::new(),
            channel_name: String::new(),
            slack_token_env_var_name: default_token_var(),
            conditions: ConditionSet::default(),
        }
    }
}

impl PluginConfig {
    /// Extract this plugin's settings from the `BUILDKITE_PLUGINS` JSON
    ///
    /// The value is an array of single-key objects mapping a plugin
    /// reference (e.g. `github.com/org/step-slack-notify-buildkite-plugin#v1`)
    /// to its settings. The first entry whose key names this plugin is used.
    pub fn from_plugins_json(json: &str) -> Result<Self, ConfigError> {
        let plugins: Vec<Map<String, Value>> =
            serde_json::from_str(json).map_err(ConfigError::InvalidPluginsJson)?;

        let raw = plugins
            .into_iter()
            .flat_map(Map::into_iter)
            .find_map(|(key, value)| key.contains(PLUGIN_NAME).then_some(value))
            .ok_or(ConfigError::PluginNotFound)?;

        let config: Self = serde_json::from_value(raw).map_err(ConfigError::InvalidPluginConfig)?;
        Ok(config.normalized())
    }

    /// Read settings from `BUILDKITE_PLUGINS` through an environment lookup
    pub fn from_env_with<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let json = env(vars::PLUGINS).ok_or(ConfigError::MissingPlugins)?;
        Self::from_plugins_json(&json)
    }

    /// Read settings from a TOML file with the same keys as the plugin JSON
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.normalized())
    }

    /// Check that the settings needed to post are present
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_name.trim().is_empty() {
            return Err(ConfigError::MissingSetting("channel_name"));
        }
        if self.message.trim().is_empty() {
            return Err(ConfigError::MissingSetting("message"));
        }
        Ok(())
    }

    /// Look up the Slack token in the configured variable
    pub fn slack_token<F>(&self, env: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        env(&self.slack_token_env_var_name)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingToken(self.slack_token_env_var_name.clone()))
    }

    fn normalized(mut self) -> Self {
        if self.slack_token_env_var_name.trim().is_empty() {
            self.slack_token_env_var_name = default_token_var();
        }
        self
    }
}

/// What Buildkite tells the step about the build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnv {
    /// Exit status of the step's command, as text
    pub exit_status: String,
    /// Branch being built
    pub branch: String,
    /// Build metadata for the message footer
    pub build: BuildInfo,
}

impl BuildEnv {
    /// Read the build description from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read the build description through an environment lookup
    ///
    /// Unset variables read as empty strings.
    #[must_use]
    pub fn from_env_with<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| env(key).unwrap_or_default();
        Self {
            exit_status: get(vars::EXIT_STATUS),
            branch: get(vars::BRANCH),
            build: BuildInfo {
                build_url: get(vars::BUILD_URL),
                job_id: get(vars::JOB_ID),
                organization_slug: get(vars::ORGANIZATION_SLUG),
                pipeline_name: get(vars::PIPELINE_NAME),
                build_number: get(vars::BUILD_NUMBER),
            },
        }
    }

    /// Facts the conditions are evaluated against
    #[must_use]
    pub fn input(&self) -> EvaluationInput {
        EvaluationInput::new(self.exit_status.clone(), self.branch.clone())
    }
}
