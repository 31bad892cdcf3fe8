//! Condition evaluation tests
//!
//! Table-driven cases for branch, exit code and failure constraints.

use step_notify::core::models::{
    ConditionError, ConditionSet, EvaluationInput, Rejection, Verdict,
};
use step_notify::core::services::evaluate;
use test_case::test_case;

use crate::common::fixtures::ConditionsBuilder;

fn conditions(branches: &[&str], exit_codes: &[i32], failed: bool) -> ConditionSet {
    let builder = ConditionsBuilder::new().branches(branches).exit_codes(exit_codes);
    if failed { builder.failed().build() } else { builder.build() }
}

// =============================================================================
// Evaluation Table
// =============================================================================

#[test_case("0", "main", &[], &[], false, true ; "no conditions")]
#[test_case("0", "main", &["main"], &[], false, true ; "ok specific branch")]
#[test_case("0", "main", &["foo", "main"], &[], false, true ; "ok specific branches")]
#[test_case("0", "other", &["main"], &[], false, false ; "nok specific branch")]
#[test_case("0", "other", &["main", "foo"], &[], false, false ; "nok specific branches")]
#[test_case("1", "main", &[], &[], true, true ; "ok failed")]
#[test_case("0", "main", &[], &[], true, false ; "nok failed")]
#[test_case("2", "main", &[], &[222, 2], false, true ; "ok exit codes")]
#[test_case("3", "main", &[], &[222, 2], false, false ; "nok exit codes")]
#[test_case("2", "main", &[], &[222, 2], true, true ; "ok exit codes and failed")]
#[test_case("0", "main", &[], &[222, 2], true, false ; "nok exit codes and failed")]
#[test_case("6", "foo", &["main", "foo"], &[222, 6], true, true ; "ok branches and exit codes")]
#[test_case("7", "foo", &["main", "foo"], &[222, 6], true, false ; "nok wrong exit code")]
#[test_case("6", "bar", &["main", "foo"], &[222, 6], true, false ; "nok wrong branch")]
fn test_evaluate(
    exit_status: &str,
    branch: &str,
    branches: &[&str],
    exit_codes: &[i32],
    failed: bool,
    expected: bool,
) {
    let rules = conditions(branches, exit_codes, failed);
    let input = EvaluationInput::new(exit_status, branch);
    assert_eq!(evaluate(&input, &rules).unwrap(), expected);
}

// =============================================================================
// Rejection Reasons
// =============================================================================

#[test_case("0", "dev", Rejection::Branch ; "branch checked first")]
#[test_case("5", "main", Rejection::ExitCode ; "exit code checked second")]
#[test_case("0", "main", Rejection::Succeeded ; "failure flag checked last")]
fn test_first_failing_constraint_is_reported(exit_status: &str, branch: &str, reason: Rejection) {
    let rules = conditions(&["main"], &[0, 1], true);
    let verdict = rules.evaluate(&EvaluationInput::new(exit_status, branch)).unwrap();
    assert_eq!(verdict, Verdict::Skip(reason));
}

#[test]
fn test_verdict_notify() {
    let verdict = ConditionSet::default().evaluate(&EvaluationInput::new("0", "")).unwrap();
    assert!(verdict.should_notify());
}

// =============================================================================
// Exit Status Parsing
// =============================================================================

#[test_case("abc" ; "letters")]
#[test_case("" ; "empty")]
#[test_case("1.5" ; "decimal")]
fn test_non_numeric_status_is_fatal_with_exit_codes(status: &str) {
    let rules = conditions(&[], &[1], false);
    let err = rules.evaluate(&EvaluationInput::new(status, "main")).unwrap_err();
    assert!(matches!(err, ConditionError::InvalidExitStatus { .. }));
    assert!(err.to_string().contains("invalid exit status"));
}

#[test_case(" 2" ; "leading space")]
#[test_case("2\n" ; "trailing newline")]
fn test_status_with_whitespace_is_invalid(status: &str) {
    let rules = conditions(&[], &[2], false);
    let err = rules.evaluate(&EvaluationInput::new(status, "main")).unwrap_err();
    assert!(matches!(err, ConditionError::InvalidExitStatus { .. }));
}

#[test_case("0", true ; "zero")]
#[test_case("1", false ; "one")]
#[test_case("-1", false ; "negative")]
#[test_case("255", false ; "high")]
#[test_case("", false ; "empty counts as failure")]
#[test_case("killed", false ; "text counts as failure")]
#[test_case("00", false ; "padded zero")]
#[test_case("-0", false ; "negative zero")]
#[test_case("+0", false ; "signed zero")]
#[test_case(" 0", false ; "spaced zero")]
fn test_succeeded(status: &str, expected: bool) {
    assert_eq!(EvaluationInput::new(status, "main").succeeded(), expected);
}

// =============================================================================
// Config Deserialization
// =============================================================================

#[test]
fn test_conditions_deserialize_with_defaults() {
    let rules: ConditionSet = serde_json::from_str(r#"{"failed": true}"#).unwrap();
    assert!(rules.failed);
    assert!(rules.exit_codes.is_empty());
    assert!(rules.branches.is_empty());
    assert!(!rules.is_empty());

    let rules: ConditionSet = serde_json::from_str("{}").unwrap();
    assert!(rules.is_empty());
}

#[test_case("00" ; "padded zero")]
#[test_case("-0" ; "negative zero")]
#[test_case("+0" ; "signed zero")]
fn test_failure_flag_only_skips_literal_zero(status: &str) {
    let rules = conditions(&[], &[], true);
    assert!(evaluate(&EvaluationInput::new(status, "main"), &rules).unwrap());
    assert!(!evaluate(&EvaluationInput::new("0", "main"), &rules).unwrap());
}
