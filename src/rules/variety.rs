//! Character variety rules - count uppercase, lowercase and digit characters.

use crate::metrics::{count_digits, count_lowercase, count_uppercase};
use crate::rule::{define_rule, RuleFactory, RuleIdentity, ValidationInput};
use crate::value::CheckValue;

pub const NUMBER_OF_UPPERCASE_ID: &str = "numberOfUpperCaseCharacters";
pub const NUMBER_OF_LOWERCASE_ID: &str = "numberOfLowerCaseCharacters";
pub const NUMBER_OF_DIGITS_ID: &str = "numberOfDigits";

/// Measures the number of ASCII uppercase letters.
pub fn number_of_uppercase() -> RuleFactory {
    define_rule(
        |input: &ValidationInput<'_>| CheckValue::from(count_uppercase(input.codes)),
        RuleIdentity::new(NUMBER_OF_UPPERCASE_ID)
            .with_message("Uppercase characters in password should be [:operator] [:check_value]"),
    )
}

/// Measures the number of ASCII lowercase letters.
pub fn number_of_lowercase() -> RuleFactory {
    define_rule(
        |input: &ValidationInput<'_>| CheckValue::from(count_lowercase(input.codes)),
        RuleIdentity::new(NUMBER_OF_LOWERCASE_ID)
            .with_message("Lowercase characters in password should be [:operator] [:check_value]"),
    )
}

/// Measures the number of ASCII digits.
pub fn number_of_digits() -> RuleFactory {
    define_rule(
        |input: &ValidationInput<'_>| CheckValue::from(count_digits(input.codes)),
        RuleIdentity::new(NUMBER_OF_DIGITS_ID)
            .with_message("Digits in password should be [:operator] [:check_value]"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::ComparisonOperator::*;
    use crate::rules::evaluate;

    #[test]
    fn test_missing_uppercase() {
        let rule = number_of_uppercase().rule(Ge, 1);
        let reason = evaluate(&rule, "lowercase123!").expect("should fail");
        assert!(reason.contains("Uppercase"));
        assert_eq!(evaluate(&rule, "Lowercase123!"), None);
    }

    #[test]
    fn test_missing_lowercase() {
        let rule = number_of_lowercase().rule(Ge, 1);
        let reason = evaluate(&rule, "UPPERCASE123!").expect("should fail");
        assert_eq!(reason, "Lowercase characters in password should be >= 1");
    }

    #[test]
    fn test_digits_threshold() {
        let rule = number_of_digits().rule(Ge, 2);
        assert_eq!(
            evaluate(&rule, "OneDigit1"),
            Some("Digits in password should be >= 2".to_string())
        );
        assert_eq!(evaluate(&rule, "TwoDigits12"), None);
    }
}
