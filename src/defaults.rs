//! Default rule set and special characters.

use crate::operator::ComparisonOperator::*;
use crate::rule::Rule;
use crate::rules;

/// Characters accepted by the default special character rule.
pub const SPECIAL_CHARS: [char; 30] = [
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '{', '}', '|', ':', '"', '<',
    '>', '?', '-', '=', '[', ']', '\\', ';', '\'', ',', '.', '/',
];

/// [`SPECIAL_CHARS`] as character codes.
pub const SPECIAL_CHAR_CODES: [u32; 30] = [
    33, 64, 35, 36, 37, 94, 38, 42, 40, 41, 95, 43, 123, 125, 124, 58, 34, 60, 62, 63, 45, 61,
    91, 93, 92, 59, 39, 44, 46, 47,
];

pub const MIN_LENGTH: i64 = 8;
pub const MAX_LENGTH: i64 = 32;

/// Builds the default rule set.
///
/// A fresh list is returned on every call; validators never share it.
pub fn default_rules() -> Vec<Rule> {
    vec![
        rules::number_of_chars().rule(Le, MAX_LENGTH),
        rules::number_of_chars().rule(Ge, MIN_LENGTH),
        rules::number_of_uppercase().rule(Ge, 1),
        rules::number_of_lowercase().rule(Ge, 1),
        rules::number_of_digits().rule(Ge, 2),
        rules::consecutive_run_max_length().rule(Lt, 3),
        rules::repeated_run_max_length().rule(Lt, 3),
        rules::string_chars().rule(ShouldContainAny, SPECIAL_CHARS.as_slice()),
    ]
}
