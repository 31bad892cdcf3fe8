//! Notify command - the plugin's main entry point

use anyhow::Context;
use step_notify::adapters::SlackClient;
use step_notify::config::BuildEnv;
use step_notify::core::models::Verdict;
use step_notify::core::services::{Notification, compose_blocks, deliver};
use step_notify::output::{self, NotifyResult, OutputMode};

use super::{Settings, env_var};

/// Evaluate conditions and, if they match, post the notification
///
/// Skipping is a success. Any failure on the way to posting is an error,
/// and nothing is posted.
pub fn notify(settings: &Settings, dry_run: bool, mode: OutputMode) -> anyhow::Result<()> {
    let config = settings.load_config()?;
    let token = if dry_run {
        None
    } else {
        Some(config.slack_token(env_var)?)
    };

    let build = BuildEnv::from_env();
    let input = build.input();

    let verdict = config.conditions.evaluate(&input).context("failed to evaluate conditions")?;
    output::announce(verdict, mode);

    if let Verdict::Skip(reason) = verdict {
        log::info!("no conditions matching, exiting.");
        NotifyResult::Skipped { reason }.render(mode);
        return Ok(());
    }

    config.validate()?;

    let Some(token) = token else {
        let blocks = compose_blocks(&config.message, &build.build, &input);
        NotifyResult::DryRun {
            channel: config.channel_name.trim_start_matches('#').to_string(),
            text: config.message,
            blocks,
        }
        .render(mode);
        return Ok(());
    };

    let slack = SlackClient::with_base_url(token, &settings.api_url)
        .context("failed to create slack client")?;

    let delivery = deliver(
        &slack,
        &Notification {
            channel_name: &config.channel_name,
            message: &config.message,
            build: &build.build,
            input: &input,
        },
    )?;

    NotifyResult::Sent {
        channel: delivery.channel.name,
        channel_id: delivery.channel.id,
        ts: delivery.posted.ts,
        text: delivery.text,
    }
    .render(mode);
    Ok(())
}
