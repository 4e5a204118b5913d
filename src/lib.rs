//! Rule-based password validation library
//!
//! Passwords are checked against an ordered set of composable rules. Each
//! rule measures something about the password (its length, the number of
//! digits, the longest run of consecutive characters...), compares it with
//! a threshold and, on failure, renders a human-readable message.
//!
//! # Features
//!
//! - `async` (default): Enables cancellable validation and channel delivery
//! - `tracing`: Enables logging via tracing crate
//! - `serde`: Enables serializing validation results
//!
//! # Example
//!
//! ```rust
//! use pwd_rules::{rules, ComparisonOperator, ConfigUpdate, Validator, ValidatorOptions};
//!
//! // Defaults plus a stricter consecutive-run rule replacing the stock one
//! let validator = Validator::new(ValidatorOptions {
//!     config: Some(ConfigUpdate::new().override_rules(true)),
//!     rules: Some(vec![rules::consecutive_run_max_length().rule(ComparisonOperator::Lt, 2)]),
//! });
//!
//! let result = validator.validate("ABCDeCCC12").expect("rules are well formed");
//! assert!(!result.pass());
//! for message in result.messages() {
//!     println!("{message}");
//! }
//! ```

mod codec;
mod config;
mod defaults;
mod error;
mod metrics;
mod operator;
mod rule;
pub mod rules;
mod template;
mod validator;
mod value;

// Public API
pub use codec::{fold_case, CodeSequence, Range, ASCII_DIGITS, ASCII_LOWERCASE, ASCII_UPPERCASE};
pub use config::{ConfigUpdate, ValidatorConfig};
pub use defaults::{default_rules, MAX_LENGTH, MIN_LENGTH, SPECIAL_CHARS, SPECIAL_CHAR_CODES};
pub use error::{Result, ValidatorError};
pub use metrics::{
    count_digits, count_lowercase, count_uppercase, longest_consecutive_run, longest_repeated_run,
};
pub use operator::{compare, loose_cmp, ComparisonOperator, COMPARISON_OPERATORS};
pub use rule::{
    define_rule, IdentityPatch, Measure, Rule, RuleFactory, RuleIdentity, RuleKind,
    ValidationInput,
};
pub use template::substitute;
pub use validator::{RuleFailure, ValidationResult, Validator, ValidatorOptions};
pub use value::{CheckValue, Float, Scalar};
