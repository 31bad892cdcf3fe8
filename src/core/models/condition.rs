//! Notification conditions
//!
//! A [`ConditionSet`] describes when a build step should notify. Every
//! configured constraint must hold; an unconfigured constraint always holds,
//! so the empty set notifies unconditionally.
//!
//! # Examples
//!
//! ```
//! use step_notify::core::models::{ConditionSet, EvaluationInput, Rejection, Verdict};
//!
//! let rules = ConditionSet {
//!     branches: vec!["main".to_string()],
//!     ..ConditionSet::default()
//! };
//!
//! let verdict = rules.evaluate(&EvaluationInput::new("1", "main")).unwrap();
//! assert_eq!(verdict, Verdict::Notify);
//!
//! let verdict = rules.evaluate(&EvaluationInput::new("1", "feature")).unwrap();
//! assert_eq!(verdict, Verdict::Skip(Rejection::Branch));
//! ```

use std::num::ParseIntError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while evaluating conditions
#[derive(Debug, Error)]
pub enum ConditionError {
    /// The exit status could not be read as an integer
    #[error("invalid exit status {status:?}")]
    InvalidExitStatus {
        /// The raw status text
        status: String,
        /// Underlying parse failure
        #[source]
        source: ParseIntError,
    },
}

/// Gating rules for a notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionSet {
    /// Exit codes that allow a notification (empty = any)
    pub exit_codes: Vec<i32>,

    /// Only notify when the step failed (non-zero exit status)
    pub failed: bool,

    /// Branches that allow a notification (empty = any)
    pub branches: Vec<String>,
}

/// Observed facts about the build step being reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationInput {
    /// Textual exit status as reported by the CI agent
    pub exit_status: String,
    /// Branch being built (may be empty)
    pub branch: String,
}

/// Which constraint rejected an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The branch is not one of the configured branches
    Branch,
    /// The exit code is not one of the configured exit codes
    ExitCode,
    /// Only failures notify, and the step succeeded
    Succeeded,
}

/// Outcome of evaluating a [`ConditionSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    /// All configured constraints hold
    Notify,
    /// A constraint rejected the input
    Skip(Rejection),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Branch => write!(f, "no branch conditions matching"),
            Self::ExitCode => write!(f, "no exit code conditions matching"),
            Self::Succeeded => write!(f, "step succeeded but only failures notify"),
        }
    }
}

impl Verdict {
    /// Whether a notification should be sent
    #[must_use]
    pub const fn should_notify(self) -> bool {
        matches!(self, Self::Notify)
    }
}

impl EvaluationInput {
    /// Create an input from an exit status and a branch
    #[must_use]
    pub fn new(exit_status: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            exit_status: exit_status.into(),
            branch: branch.into(),
        }
    }

    /// Parse the exit status as an integer
    ///
    /// The status is taken exactly as reported; surrounding whitespace makes
    /// it invalid.
    pub fn exit_code(&self) -> Result<i32, ConditionError> {
        self.exit_status.parse().map_err(|source| ConditionError::InvalidExitStatus {
            status: self.exit_status.clone(),
            source,
        })
    }

    /// Whether the step succeeded
    ///
    /// Only the literal status `0` is a success. Anything else, including
    /// `00`, `-0` or text that is not a number at all, is a failure.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.exit_status == "0"
    }
}

impl ConditionSet {
    /// Check whether no constraint is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exit_codes.is_empty() && !self.failed && self.branches.is_empty()
    }
}
