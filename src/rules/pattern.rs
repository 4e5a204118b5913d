//! Pattern rules - longest consecutive and repeated character runs.

use crate::metrics::{longest_consecutive_run, longest_repeated_run};
use crate::rule::{define_rule, RuleFactory, RuleIdentity, ValidationInput};
use crate::value::CheckValue;

pub const CONSECUTIVE_RUN_ID: &str = "consecutiveCharSubStringLength";
pub const REPEATED_RUN_ID: &str = "repetitiveCharSubStringMaxLength";

/// Measures the longest run of consecutive characters ("abc", "123").
pub fn consecutive_run_max_length() -> RuleFactory {
    define_rule(
        |input: &ValidationInput<'_>| CheckValue::from(longest_consecutive_run(input.codes)),
        RuleIdentity::new(CONSECUTIVE_RUN_ID).with_message(
            "Length of any consecutive character sub-string should be [:operator] [:check_value]",
        ),
    )
}

/// Measures the longest run of one repeated character ("aaa").
pub fn repeated_run_max_length() -> RuleFactory {
    define_rule(
        |input: &ValidationInput<'_>| CheckValue::from(longest_repeated_run(input.codes)),
        RuleIdentity::new(REPEATED_RUN_ID).with_message(
            "Length of any repetitive character sub-string should be [:operator] [:check_value]",
        ),
    )
}
