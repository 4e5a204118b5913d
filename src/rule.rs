//! Rule factories and rule instances.
//!
//! A rule is defined in two stages. [`define_rule`] pairs a measurement
//! function with a [`RuleIdentity`] and returns a [`RuleFactory`]; the factory
//! then builds any number of immutable [`Rule`]s, each carrying its own
//! operator and threshold.
//!
//! # Example
//!
//! ```rust
//! use pwd_rules::{define_rule, CheckValue, CodeSequence, RuleIdentity, ValidationInput};
//!
//! let not_qwerty = define_rule(
//!     |input: &ValidationInput<'_>| CheckValue::Bool(!input.text.eq_ignore_ascii_case("qwerty")),
//!     RuleIdentity::new("notQwerty").with_message("Please enter a strong password"),
//! );
//! let rule = not_qwerty.instance();
//!
//! let codes = CodeSequence::encode("QWERTY");
//! let input = ValidationInput::new("QWERTY", &codes);
//! assert_eq!(
//!     rule.evaluate(&input).unwrap().as_deref(),
//!     Some("Please enter a strong password")
//! );
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::codec::CodeSequence;
use crate::error::{Result, ValidatorError};
use crate::operator::{compare, ComparisonOperator};
use crate::template::substitute;
use crate::value::{CheckValue, Scalar};

/// The string being validated together with its character codes.
#[derive(Debug, Clone, Copy)]
pub struct ValidationInput<'a> {
    pub text: &'a str,
    pub codes: &'a CodeSequence,
}

impl<'a> ValidationInput<'a> {
    pub fn new(text: &'a str, codes: &'a CodeSequence) -> Self {
        Self { text, codes }
    }
}

/// Measurement function wrapped by a rule.
pub type Measure = dyn Fn(&ValidationInput<'_>) -> CheckValue + Send + Sync;

/// Identity shared by every rule built from the same factory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleIdentity {
    pub id: String,
    /// Failure message template; `[:check_value]`, `[:operator]` and `[:id]`
    /// are substituted.
    pub message: Option<String>,
}

impl RuleIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), message: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Message template, falling back to a generic one naming the rule.
    pub fn template(&self) -> Cow<'_, str> {
        match &self.message {
            Some(message) => Cow::Borrowed(message),
            None => Cow::Owned(format!("Validation [{}] failed", self.id)),
        }
    }

    fn patched(&self, patch: &IdentityPatch) -> Self {
        Self {
            id: patch.id.clone().unwrap_or_else(|| self.id.clone()),
            message: patch.message.clone().or_else(|| self.message.clone()),
        }
    }
}

/// Per-instance overrides of a factory's [`RuleIdentity`]. Set fields win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityPatch {
    pub id: Option<String>,
    pub message: Option<String>,
}

impl IdentityPatch {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// How a rule turns its measured value into a verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Compare the measured value with the threshold.
    #[default]
    Comparison,
    /// Compare the input's own codes with the threshold's characters
    /// converted to codes.
    CharacterSetMembership,
}

/// Builds [`Rule`]s sharing one measurement and identity.
#[derive(Clone)]
pub struct RuleFactory {
    identity: RuleIdentity,
    kind: RuleKind,
    measure: Arc<Measure>,
}

/// Wraps a measurement function into a reusable rule factory.
pub fn define_rule<F>(measure: F, identity: RuleIdentity) -> RuleFactory
where
    F: Fn(&ValidationInput<'_>) -> CheckValue + Send + Sync + 'static,
{
    RuleFactory {
        identity,
        kind: RuleKind::Comparison,
        measure: Arc::new(measure),
    }
}

impl RuleFactory {
    pub(crate) fn with_kind(mut self, kind: RuleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn identity(&self) -> &RuleIdentity {
        &self.identity
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Builds a rule instance. Fields set in `overrides` replace the
    /// factory's identity for this instance only.
    pub fn build(
        &self,
        operator: Option<ComparisonOperator>,
        threshold: Option<CheckValue>,
        overrides: Option<IdentityPatch>,
    ) -> Rule {
        let identity = match overrides {
            Some(patch) => self.identity.patched(&patch),
            None => self.identity.clone(),
        };
        Rule {
            identity,
            kind: self.kind,
            operator,
            threshold,
            measure: Arc::clone(&self.measure),
        }
    }

    /// Builds a rule comparing with `operator` against `threshold`.
    pub fn rule(&self, operator: ComparisonOperator, threshold: impl Into<CheckValue>) -> Rule {
        self.build(Some(operator), Some(threshold.into()), None)
    }

    /// Builds a rule with no operator or threshold, for measurements that
    /// return a boolean verdict.
    pub fn instance(&self) -> Rule {
        self.build(None, None, None)
    }
}

impl fmt::Debug for RuleFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleFactory")
            .field("identity", &self.identity)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Key under which duplicate rules collapse: `(id, operator, threshold)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct DuplicateKey {
    id: String,
    operator: Option<ComparisonOperator>,
    threshold: Option<CheckValue>,
}

/// Key under which a later rule overrides an earlier one: `(id, operator)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct OverrideKey {
    id: String,
    operator: Option<ComparisonOperator>,
}

static NO_THRESHOLD: CheckValue = CheckValue::List(Vec::new());

/// An immutable, parameterised check.
///
/// Cloning is cheap: the measurement function is shared.
#[derive(Clone)]
pub struct Rule {
    identity: RuleIdentity,
    kind: RuleKind,
    operator: Option<ComparisonOperator>,
    threshold: Option<CheckValue>,
    measure: Arc<Measure>,
}

impl Rule {
    pub fn id(&self) -> &str {
        &self.identity.id
    }

    pub fn identity(&self) -> &RuleIdentity {
        &self.identity
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn operator(&self) -> Option<ComparisonOperator> {
        self.operator
    }

    pub fn threshold(&self) -> Option<&CheckValue> {
        self.threshold.as_ref()
    }

    /// Evaluates the rule against one input.
    ///
    /// Returns `Ok(None)` when the input passes and `Ok(Some(message))` with
    /// the rendered failure message when it does not. A boolean measurement
    /// is the verdict itself; any other measurement is compared with the
    /// threshold.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::MissingOperator`] if the measurement is not a
    /// boolean and the rule was built without an operator.
    pub fn evaluate(&self, input: &ValidationInput<'_>) -> Result<Option<String>> {
        let passed = match (self.measure)(input) {
            CheckValue::Bool(verdict) => verdict,
            measured => {
                let operator = self.operator.ok_or_else(|| ValidatorError::MissingOperator {
                    rule_id: self.identity.id.clone(),
                })?;
                let threshold = self.threshold.as_ref().unwrap_or(&NO_THRESHOLD);
                match self.kind {
                    RuleKind::Comparison => compare(&measured, operator, threshold),
                    RuleKind::CharacterSetMembership => {
                        let codes: Vec<Scalar> = input.codes.iter().map(Scalar::from).collect();
                        compare(&CheckValue::List(codes), operator, &character_codes(threshold))
                    }
                }
            }
        };

        if passed {
            return Ok(None);
        }
        Ok(Some(self.render_message()))
    }

    fn render_message(&self) -> String {
        let id = CheckValue::Text(self.identity.id.clone());
        let operator = self.operator.map(|op| CheckValue::from(op.as_str()));
        let mut bindings = vec![("id", &id)];
        if let Some(threshold) = &self.threshold {
            bindings.push(("check_value", threshold));
        }
        if let Some(operator) = &operator {
            bindings.push(("operator", operator));
        }
        substitute(&self.identity.template(), bindings)
    }

    /// `(id, operator)` rendered for diagnostics.
    pub fn signature(&self) -> String {
        match self.operator {
            Some(op) => format!("{}|{}", self.identity.id, op),
            None => self.identity.id.clone(),
        }
    }

    pub(crate) fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey {
            id: self.identity.id.clone(),
            operator: self.operator,
            threshold: self.threshold.clone(),
        }
    }

    pub(crate) fn override_key(&self) -> OverrideKey {
        OverrideKey {
            id: self.identity.id.clone(),
            operator: self.operator,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("identity", &self.identity)
            .field("kind", &self.kind)
            .field("operator", &self.operator)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

/// Converts a character-set threshold into codes: each list element
/// contributes the code of its first character, a scalar contributes the
/// codes of all its characters.
fn character_codes(threshold: &CheckValue) -> CheckValue {
    let codes: Vec<Scalar> = match threshold {
        CheckValue::List(items) => items
            .iter()
            .filter_map(|item| item.to_string().chars().next())
            .map(|c| Scalar::from(u32::from(c)))
            .collect(),
        other => CodeSequence::encode(&other.to_string())
            .iter()
            .map(Scalar::from)
            .collect(),
    };
    CheckValue::List(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use ComparisonOperator::*;

    fn evaluate(rule: &Rule, text: &str) -> Result<Option<String>> {
        let codes = CodeSequence::encode(text);
        rule.evaluate(&ValidationInput::new(text, &codes))
    }

    fn constant(value: CheckValue, id: &str) -> RuleFactory {
        define_rule(move |_: &ValidationInput<'_>| value.clone(), RuleIdentity::new(id))
    }

    #[test]
    fn test_rule_carries_identity_operator_and_threshold() {
        let factory = define_rule(
            |_: &ValidationInput<'_>| CheckValue::Bool(true),
            RuleIdentity::new("testRule").with_message("Custom message"),
        );
        let rule = factory.rule(Eq, 2);

        assert_eq!(rule.id(), "testRule");
        assert_eq!(rule.operator(), Some(Eq));
        assert_eq!(rule.threshold(), Some(&CheckValue::Number(2)));
        assert_eq!(rule.kind(), RuleKind::Comparison);
    }

    #[test]
    fn test_instance_without_parameters() {
        let rule = constant(CheckValue::Bool(true), "testRule").instance();
        assert_eq!(rule.operator(), None);
        assert_eq!(rule.threshold(), None);
    }

    #[test]
    fn test_measure_called_once_with_input() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let factory = define_rule(
            move |input: &ValidationInput<'_>| {
                seen.fetch_add(1, Ordering::SeqCst);
                assert_eq!(input.text, "test");
                assert_eq!(input.codes.as_slice(), &[116, 101, 115, 116]);
                CheckValue::Bool(true)
            },
            RuleIdentity::new("testRule"),
        );

        evaluate(&factory.rule(Lt, 2), "test").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_boolean_measure_short_circuits() {
        let factory = constant(CheckValue::Bool(true), "testRule");
        assert_eq!(evaluate(&factory.instance(), "test"), Ok(None));
        assert_eq!(evaluate(&factory.rule(Eq, false), "test"), Ok(None));
        assert_eq!(evaluate(&factory.rule(Lt, -100), "test"), Ok(None));
    }

    #[test]
    fn test_false_measure_renders_message() {
        let factory = define_rule(
            |_: &ValidationInput<'_>| CheckValue::Bool(false),
            RuleIdentity::new("testRule").with_message("Validation failed"),
        );
        assert_eq!(
            evaluate(&factory.instance(), "test"),
            Ok(Some("Validation failed".to_string()))
        );
    }

    #[test]
    fn test_failed_comparison_uses_default_message() {
        let rule = constant(CheckValue::Number(5), "testRule").rule(Lt, 3);
        assert_eq!(
            evaluate(&rule, "test"),
            Ok(Some("Validation [testRule] failed".to_string()))
        );
    }

    #[test]
    fn test_message_placeholders() {
        let factory = define_rule(
            |input: &ValidationInput<'_>| CheckValue::from(input.codes.len()),
            RuleIdentity::new("len").with_message("[:id]: length should be [:operator] [:check_value]"),
        );
        assert_eq!(
            evaluate(&factory.rule(Ge, 8), "short"),
            Ok(Some("len: length should be >= 8".to_string()))
        );
        assert_eq!(evaluate(&factory.rule(Ge, 8), "long enough"), Ok(None));
    }

    #[test]
    fn test_fractional_threshold() {
        let factory = define_rule(
            |input: &ValidationInput<'_>| {
                let distinct: std::collections::HashSet<u32> = input.codes.iter().collect();
                CheckValue::from(distinct.len() as f64 / input.codes.len().max(1) as f64)
            },
            RuleIdentity::new("distinctRatio").with_message("[:id] should be [:operator] [:check_value]"),
        );
        let rule = factory.rule(Ge, 0.5);

        assert_eq!(rule.threshold(), Some(&CheckValue::from(0.5)));
        assert_eq!(evaluate(&rule, "abcd"), Ok(None));
        assert_eq!(
            evaluate(&rule, "aaaa"),
            Ok(Some("distinctRatio should be >= 0.5".to_string()))
        );
    }

    #[test]
    fn test_duplicate_key_keeps_threshold_types_apart() {
        let factory = constant(CheckValue::Number(5), "testRule");
        let int = factory.rule(Ge, 2).duplicate_key();
        let float = factory.rule(Ge, 2.0).duplicate_key();
        let text = factory.rule(Ge, "2").duplicate_key();

        assert_ne!(int, float);
        assert_ne!(int, text);
        assert_ne!(float, text);
        assert_eq!(float, factory.rule(Ge, 2.0).duplicate_key());
    }

    #[test]
    fn test_missing_operator_is_an_error() {
        let rule = constant(CheckValue::Number(5), "testRule").instance();
        assert_eq!(
            evaluate(&rule, "test"),
            Err(ValidatorError::MissingOperator { rule_id: "testRule".to_string() })
        );
    }

    #[test]
    fn test_missing_threshold_never_matches() {
        let factory = constant(CheckValue::Number(5), "testRule");
        let rule = factory.build(Some(IsIn), None, None);
        assert!(evaluate(&rule, "test").unwrap().is_some());
    }

    #[test]
    fn test_overrides_win_over_factory_identity() {
        let factory = define_rule(
            |_: &ValidationInput<'_>| CheckValue::Bool(false),
            RuleIdentity::new("base").with_message("base message"),
        );
        let rule = factory.build(None, None, Some(IdentityPatch::default().message("custom")));

        assert_eq!(rule.id(), "base");
        assert_eq!(evaluate(&rule, "x"), Ok(Some("custom".to_string())));
        assert_eq!(factory.identity().message.as_deref(), Some("base message"));

        let renamed = factory.build(None, None, Some(IdentityPatch::default().id("renamed")));
        assert_eq!(renamed.id(), "renamed");
    }

    #[test]
    fn test_character_set_membership_compares_input_codes() {
        let factory = define_rule(
            |input: &ValidationInput<'_>| CheckValue::from(input.codes.len()),
            RuleIdentity::new("chars").with_message("Password [:operator] [:check_value]"),
        )
        .with_kind(RuleKind::CharacterSetMembership);
        let rule = factory.rule(ShouldContainAny, vec!['!', '#']);

        assert_eq!(evaluate(&rule, "abc#"), Ok(None));
        assert_eq!(
            evaluate(&rule, "abc"),
            Ok(Some("Password should-contain-any !, #".to_string()))
        );
    }

    #[test]
    fn test_character_set_scalar_threshold_uses_every_char() {
        let factory = define_rule(
            |_: &ValidationInput<'_>| CheckValue::Number(0),
            RuleIdentity::new("chars"),
        )
        .with_kind(RuleKind::CharacterSetMembership);
        let rule = factory.rule(ShouldContainAny, "xyz");

        assert_eq!(evaluate(&rule, "aaz"), Ok(None));
        assert!(evaluate(&rule, "abc").unwrap().is_some());
    }

    #[test]
    fn test_comparison_kind_does_not_use_input_codes() {
        // same measurement as above, but as a plain comparison it compares 0
        let rule = constant(CheckValue::Number(0), "chars").rule(ShouldContainAny, "xyz");
        assert!(evaluate(&rule, "aaz").unwrap().is_some());
    }

    #[test]
    fn test_character_codes() {
        assert_eq!(
            character_codes(&CheckValue::from(vec!["!", "", "ab"])),
            CheckValue::from(vec![33u32, 97])
        );
        assert_eq!(character_codes(&CheckValue::from(5)), CheckValue::from(vec![53u32]));
    }
}
