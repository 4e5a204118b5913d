//! Character set rule - the password must contain one of a set of characters.

use crate::rule::{define_rule, RuleFactory, RuleIdentity, RuleKind, ValidationInput};
use crate::value::CheckValue;

pub const STRING_CHARS_ID: &str = "stringChars";

/// Compares the password's characters with a set of characters.
///
/// Rules built from this factory take the characters as their threshold
/// (a list of characters or a string) and compare them, as codes, with the
/// password's own codes. Use it with `should-contain-any`.
pub fn string_chars() -> RuleFactory {
    define_rule(
        |input: &ValidationInput<'_>| CheckValue::from(input.codes.as_slice()),
        RuleIdentity::new(STRING_CHARS_ID).with_message("Password [:operator] [:check_value]"),
    )
    .with_kind(RuleKind::CharacterSetMembership)
}
