//! Rule set composition and password validation.

use indexmap::IndexMap;
use secrecy::{ExposeSecret, SecretString};
use std::hash::Hash;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::codec::CodeSequence;
use crate::config::{ConfigUpdate, ValidatorConfig};
use crate::defaults::default_rules;
use crate::error::{Result, ValidatorError};
use crate::operator::ComparisonOperator;
use crate::rule::{Rule, ValidationInput};
use crate::value::CheckValue;

/// A rule that rejected the password.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RuleFailure {
    pub rule_id: String,
    pub operator: Option<ComparisonOperator>,
    pub threshold: Option<CheckValue>,
    pub message: String,
}

/// Outcome of one [`Validator::validate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidationResult {
    errors: Vec<RuleFailure>,
    pass: bool,
    config: ValidatorConfig,
}

impl ValidationResult {
    fn new(errors: Vec<RuleFailure>, config: ValidatorConfig) -> Self {
        Self {
            pass: errors.is_empty(),
            errors,
            config,
        }
    }

    /// Failures in rule order.
    pub fn errors(&self) -> &[RuleFailure] {
        &self.errors
    }

    /// `true` iff no rule failed.
    pub fn pass(&self) -> bool {
        self.pass
    }

    /// Configuration the validator had when the result was produced.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Failure messages in rule order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_str())
    }
}

/// Construction parameters for a [`Validator`].
#[derive(Debug, Clone, Default)]
pub struct ValidatorOptions {
    /// Applied over the default configuration.
    pub config: Option<ConfigUpdate>,
    /// Set over the default rules, following the resulting configuration.
    pub rules: Option<Vec<Rule>>,
}

/// Validates passwords against an ordered rule set.
///
/// The rule list and configuration are only changed through `&mut self`
/// methods, so they cannot change while a validation is running. Callers
/// sharing a validator across threads provide their own locking.
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidatorConfig,
    rules: Vec<Rule>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorOptions::default())
    }
}

impl Validator {
    /// Creates a validator starting from the default configuration and the
    /// default rules.
    ///
    /// The options' configuration is applied first, then its rules are set,
    /// so with `merge_rules` disabled and no rules the validator starts empty.
    pub fn new(options: ValidatorOptions) -> Self {
        let mut validator = Self {
            config: ValidatorConfig::default(),
            rules: default_rules(),
        };
        if let Some(update) = options.config {
            validator.update_config(update);
        }
        validator.set_rules(options.rules.unwrap_or_default());
        validator
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Shallow-merges `update` into the configuration. Already set rules are
    /// not recomposed.
    pub fn update_config(&mut self, update: ConfigUpdate) {
        self.config.apply(&update);
    }

    /// Rebuilds the rule list from `rules`.
    ///
    /// With `merge_rules` the new rules are appended to the current ones,
    /// otherwise they replace them. Then `merge_duplicate_rules` collapses
    /// rules sharing `(id, operator, threshold)` and `override_rules`
    /// collapses rules sharing `(id, operator)`. Collapsing keeps the
    /// position of the first rule with a key and the value of the last.
    pub fn set_rules(&mut self, rules: Vec<Rule>) {
        let mut merged = if self.config.merge_rules {
            let mut current = std::mem::take(&mut self.rules);
            current.extend(rules);
            current
        } else {
            rules
        };

        if self.config.merge_duplicate_rules {
            merged = collapse_by(merged, Rule::duplicate_key);
        }
        if self.config.override_rules {
            merged = collapse_by(merged, Rule::override_key);
        }
        self.rules = merged;
    }

    /// Validates `password` against every rule in order.
    ///
    /// With `check_all` disabled, evaluation stops at the first failing rule
    /// and later rules are never run.
    ///
    /// # Errors
    ///
    /// Propagates the first rule evaluation error.
    pub fn validate(&self, password: &str) -> Result<ValidationResult> {
        self.run(password, || false)
    }

    /// Validates a secret password without exposing it to the caller.
    pub fn validate_secret(&self, password: &SecretString) -> Result<ValidationResult> {
        self.validate(password.expose_secret())
    }

    /// Like [`validate`](Self::validate), checking `token` before each rule.
    ///
    /// # Errors
    ///
    /// [`ValidatorError::Cancelled`] once the token is cancelled, or the first
    /// rule evaluation error.
    #[cfg(feature = "async")]
    pub fn validate_with_cancel(
        &self,
        password: &str,
        token: Option<&CancellationToken>,
    ) -> Result<ValidationResult> {
        self.run(password, || token.is_some_and(CancellationToken::is_cancelled))
    }

    /// Validates and sends the outcome over `tx`.
    #[cfg(feature = "async")]
    pub async fn validate_tx(
        &self,
        password: &SecretString,
        token: CancellationToken,
        tx: mpsc::Sender<Result<ValidationResult>>,
    ) {
        #[cfg(feature = "tracing")]
        tracing::info!("validation is about to start...");

        let outcome = self.validate_with_cancel(password.expose_secret(), Some(&token));

        if let Err(e) = tx.send(outcome).await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send validation result: {}", e);
            #[cfg(not(feature = "tracing"))]
            let _ = e;
        }
    }

    fn run(&self, password: &str, cancelled: impl Fn() -> bool) -> Result<ValidationResult> {
        let codes = CodeSequence::encode(password);
        let input = ValidationInput::new(password, &codes);
        let mut errors = Vec::new();

        for rule in &self.rules {
            if cancelled() {
                return Err(ValidatorError::Cancelled);
            }

            #[cfg(feature = "tracing")]
            tracing::debug!("Executing [{}]", rule.signature());

            let message = match rule.evaluate(&input) {
                Ok(message) => message,
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Rule [{}] failed to evaluate: {}", rule.id(), e);
                    return Err(e);
                }
            };

            if let Some(message) = message {
                errors.push(RuleFailure {
                    rule_id: rule.id().to_string(),
                    operator: rule.operator(),
                    threshold: rule.threshold().cloned(),
                    message,
                });
                if !self.config.check_all {
                    break;
                }
            }
        }

        Ok(ValidationResult::new(errors, self.config))
    }
}

/// Collapses `rules` by `key`, keeping the first position and last value of
/// each key.
fn collapse_by<K, F>(rules: Vec<Rule>, key: F) -> Vec<Rule>
where
    K: Hash + Eq,
    F: Fn(&Rule) -> K,
{
    let before = rules.len();
    let mut collapsed: IndexMap<K, Rule> = IndexMap::with_capacity(before);
    for rule in rules {
        collapsed.insert(key(&rule), rule);
    }

    #[cfg(feature = "tracing")]
    if collapsed.len() < before {
        tracing::debug!("Collapsed {} rule(s)", before - collapsed.len());
    }

    collapsed.into_values().collect()
}



#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_result_serializes_to_json() {
        let result = Validator::default().validate("ABCDeCCC12").unwrap();
        let json = serde_json::to_value(&result).expect("serializable");

        assert_eq!(json["pass"], false);
        assert_eq!(json["config"]["check_all"], true);
        let consecutive = json["errors"]
            .as_array()
            .expect("errors array")
            .iter()
            .find(|e| e["rule_id"] == "consecutiveCharSubStringLength")
            .expect("consecutive failure");
        assert_eq!(consecutive["operator"], "<");
        assert_eq!(consecutive["threshold"], 3);
    }
}
