//! Error types for rule evaluation.

use thiserror::Error;

/// Errors raised while building or evaluating rules.
///
/// A password that fails a rule is not an error: it is reported as a
/// [`RuleFailure`](crate::RuleFailure) in the validation result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    #[error("Invalid/unsupported operator [{0}] passed")]
    UnsupportedOperator(String),
    #[error("Rule [{rule_id}] has no operator to compare its measured value with")]
    MissingOperator { rule_id: String },
    #[error("Validation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
