//! List the mentions in a message

use step_notify::core::services::extract_mentions;
use step_notify::output::{MentionsResult, OutputMode};

use super::Settings;

/// Print the mentions found in `message`, or in the configured message
pub fn mentions(settings: &Settings, message: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let configured;
    let message = match message {
        Some(message) => message,
        None => {
            configured = settings.load_config()?.message;
            configured.as_str()
        },
    };

    let result = MentionsResult {
        mentions: extract_mentions(message).map(|t| t.as_str().to_string()).collect(),
    };
    result.render(mode);
    Ok(())
}
