//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON. Human output is meant for
//! the Buildkite job log, so section headers use its `--- ` group syntax.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{Block, Rejection, Verdict};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

const HEADER: &str = "--- :slack: Custom Slack Plugin:";

/// Print the log group header for a verdict
///
/// Printed before any network call, so the job log shows which way the
/// step went even if posting fails.
pub fn announce(verdict: Verdict, mode: OutputMode) {
    if mode == OutputMode::Json {
        return;
    }
    match verdict {
        Verdict::Notify => println!("{HEADER} sending out notification."),
        Verdict::Skip(_) => println!("{HEADER} no conditions matched, skipping,"),
    }
}

/// Result of a notify run
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotifyResult {
    /// Conditions did not match, nothing was sent
    Skipped {
        /// Constraint that rejected the build
        reason: Rejection,
    },
    /// The message was posted
    Sent {
        /// Channel name
        channel: String,
        /// Channel ID
        channel_id: String,
        /// Message timestamp
        ts: String,
        /// Final message text
        text: String,
    },
    /// Dry run: the message that would have been posted
    DryRun {
        /// Channel name
        channel: String,
        /// Final message text
        text: String,
        /// Blocks that would have been posted
        blocks: Vec<Block>,
    },
}

impl NotifyResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        match self {
            Self::Skipped { reason } => {
                println!("{} {reason}", "Skipped:".yellow().bold());
            },
            Self::Sent {
                channel,
                channel_id,
                ts,
                ..
            } => {
                println!("{} #{channel} ({channel_id}) at {ts}", "Posted to".green().bold());
            },
            Self::DryRun {
                channel,
                text,
                blocks,
            } => {
                println!("{} would post to #{channel}:\n", "Dry run:".cyan().bold());
                println!("{text}\n");
                println!("{}", serde_json::to_string_pretty(blocks).unwrap_or_default());
            },
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Result of evaluating conditions without notifying
#[derive(Debug, Serialize)]
pub struct CheckResult {
    /// Whether a notification would be sent
    pub notify: bool,
    /// Constraint that rejected the build, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Rejection>,
    /// Exit status evaluated
    pub exit_status: String,
    /// Branch evaluated
    pub branch: String,
}

impl CheckResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("branch {:?}, exit status {:?}", self.branch, self.exit_status);
        match self.reason {
            None => println!("{}", "Conditions matched: would notify".green().bold()),
            Some(reason) => {
                println!("{} {reason}", "Conditions not matched:".yellow().bold());
            },
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Mentions found in a message
#[derive(Debug, Serialize)]
pub struct MentionsResult {
    /// Mention names in order of appearance
    pub mentions: Vec<String>,
}

impl MentionsResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.mentions.is_empty() {
            println!("No mentions found.");
            return;
        }
        for name in &self.mentions {
            println!("  @{name}");
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
