//! Condition evaluator - decides whether a build step notifies
//!
//! Pure logic with no I/O. Constraints are checked in a fixed order (branch,
//! exit code, failure flag) and the first one that rejects the input is
//! reported in the [`Verdict`].

use crate::core::models::{ConditionError, ConditionSet, EvaluationInput, Rejection, Verdict};

impl ConditionSet {
    /// Evaluate these conditions against a build step
    ///
    /// # Errors
    ///
    /// Returns [`ConditionError::InvalidExitStatus`] when exit codes are
    /// configured and the exit status is not an integer.
    pub fn evaluate(&self, input: &EvaluationInput) -> Result<Verdict, ConditionError> {
        if self.is_empty() {
            log::debug!("no conditions configured");
            return Ok(Verdict::Notify);
        }

        if !self.branches.is_empty() && !self.branches.iter().any(|b| *b == input.branch) {
            log::info!("{}", Rejection::Branch);
            return Ok(Verdict::Skip(Rejection::Branch));
        }

        if !self.exit_codes.is_empty() {
            let code = input.exit_code()?;
            if !self.exit_codes.contains(&code) {
                log::info!("{}", Rejection::ExitCode);
                return Ok(Verdict::Skip(Rejection::ExitCode));
            }
        }

        // Independent of exit_codes: a listed 0 does not override this.
        if self.failed && input.succeeded() {
            log::info!("{}", Rejection::Succeeded);
            return Ok(Verdict::Skip(Rejection::Succeeded));
        }

        Ok(Verdict::Notify)
    }
}

/// Decide whether `input` should produce a notification under `rules`
///
/// # Errors
///
/// See [`ConditionSet::evaluate`].
pub fn evaluate(input: &EvaluationInput, rules: &ConditionSet) -> Result<bool, ConditionError> {
    rules.evaluate(input).map(Verdict::should_notify)
}
