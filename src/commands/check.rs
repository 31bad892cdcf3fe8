//! Evaluate notification conditions without notifying

use anyhow::Context;
use step_notify::config::BuildEnv;
use step_notify::core::models::Verdict;
use step_notify::output::{CheckResult, OutputMode};

use super::Settings;

/// Evaluate the configured conditions against the current build
pub fn check(settings: &Settings, mode: OutputMode) -> anyhow::Result<()> {
    let config = settings.load_config()?;
    let build = BuildEnv::from_env();
    let input = build.input();

    let verdict = config.conditions.evaluate(&input).context("failed to evaluate conditions")?;

    let result = CheckResult {
        notify: verdict.should_notify(),
        reason: match verdict {
            Verdict::Notify => None,
            Verdict::Skip(reason) => Some(reason),
        },
        exit_status: input.exit_status,
        branch: input.branch,
    };
    result.render(mode);
    Ok(())
}
