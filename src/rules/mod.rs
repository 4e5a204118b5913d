//! Built-in rule factories
//!
//! Each family measures one aspect of a password. The factories carry the
//! stock identities and message templates; thresholds are chosen when a
//! rule is built from them.

mod charset;
mod length;
mod pattern;
mod variety;

pub use charset::{string_chars, STRING_CHARS_ID};
pub use length::{number_of_chars, NUMBER_OF_CHARS_ID};
pub use pattern::{
    consecutive_run_max_length, repeated_run_max_length, CONSECUTIVE_RUN_ID, REPEATED_RUN_ID,
};
pub use variety::{
    number_of_digits, number_of_lowercase, number_of_uppercase, NUMBER_OF_DIGITS_ID,
    NUMBER_OF_LOWERCASE_ID, NUMBER_OF_UPPERCASE_ID,
};

#[cfg(test)]
pub(crate) fn evaluate(rule: &crate::Rule, text: &str) -> Option<String> {
    let codes = crate::CodeSequence::encode(text);
    rule.evaluate(&crate::ValidationInput::new(text, &codes))
        .expect("built-in rules always have an operator")
}
