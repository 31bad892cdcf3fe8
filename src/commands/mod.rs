//! Command implementations

mod check;
mod mentions;
mod notify;

use std::path::PathBuf;

use anyhow::Context;
use step_notify::config::PluginConfig;

pub use check::check;
pub use mentions::mentions;
pub use notify::notify;

/// Options shared by all commands
#[derive(Debug, Clone)]
pub struct Settings {
    /// TOML file to read plugin settings from, instead of `BUILDKITE_PLUGINS`
    pub config_file: Option<PathBuf>,
    /// Slack Web API endpoint
    pub api_url: String,
}

impl Settings {
    /// Load the plugin settings from the configured source
    pub fn load_config(&self) -> anyhow::Result<PluginConfig> {
        let config = match &self.config_file {
            Some(path) => PluginConfig::from_toml_file(path),
            None => PluginConfig::from_env_with(env_var),
        };
        config.context("failed to read config")
    }
}

/// Read a variable from the process environment
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
