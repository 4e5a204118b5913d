//! Length rule - counts the characters of the password.

use crate::rule::{define_rule, RuleFactory, RuleIdentity, ValidationInput};
use crate::value::CheckValue;

pub const NUMBER_OF_CHARS_ID: &str = "numberOfChars";

/// Measures the number of characters.
pub fn number_of_chars() -> RuleFactory {
    define_rule(
        |input: &ValidationInput<'_>| CheckValue::from(input.codes.len()),
        RuleIdentity::new(NUMBER_OF_CHARS_ID)
            .with_message("Password length should be [:operator] [:check_value] character(s)"),
    )
}
