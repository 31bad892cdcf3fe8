//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{self, Settings};
use step_notify::adapters::slack::DEFAULT_API_URL;
use step_notify::output::OutputMode;

/// step-notify - Slack notifications for Buildkite steps
#[derive(Parser, Debug)]
#[command(
    name = "step-notify",
    version,
    about = "Slack notifications for Buildkite steps",
    long_about = "Post a Slack message when a Buildkite step finishes.\n\n\
                  Conditions on branch and exit status decide whether to notify.\n\
                  Mentions written as <@name> are resolved to Slack users or groups."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Read plugin settings from a TOML file instead of BUILDKITE_PLUGINS
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Slack Web API endpoint
    #[arg(long, global = true, env = "SLACK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate conditions and post the notification (default)
    Notify {
        /// Print the message instead of posting it
        #[arg(long)]
        dry_run: bool,
    },

    /// Evaluate conditions only
    Check,

    /// List the mentions in a message (defaults to the configured message)
    Mentions {
        /// Message to scan
        message: Option<String>,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let settings = Settings {
        config_file: cli.config,
        api_url: cli.api_url,
    };

    match cli.command {
        None => commands::notify(&settings, false, output_mode),
        Some(Command::Notify { dry_run }) => commands::notify(&settings, dry_run, output_mode),
        Some(Command::Check) => commands::check(&settings, output_mode),
        Some(Command::Mentions { message }) => {
            commands::mentions(&settings, message.as_deref(), output_mode)
        },
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": step_notify::VERSION
                    })
                );
            } else {
                println!("step-notify v{}", step_notify::VERSION);
            }
            Ok(())
        },
    }
}
