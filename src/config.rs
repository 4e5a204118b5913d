//! Validator configuration.

/// Options controlling how a [`Validator`](crate::Validator) composes and
/// evaluates its rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValidatorConfig {
    /// Run every rule and collect all failures instead of stopping at the
    /// first one.
    pub check_all: bool,
    /// Collapse rules sharing `(id, operator, threshold)`.
    pub merge_duplicate_rules: bool,
    /// Append newly set rules to the current ones instead of replacing them.
    pub merge_rules: bool,
    /// Collapse rules sharing `(id, operator)` so a later threshold replaces
    /// an earlier one.
    pub override_rules: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            check_all: true,
            merge_duplicate_rules: true,
            merge_rules: true,
            override_rules: false,
        }
    }
}

impl ValidatorConfig {
    /// Shallow-merges `update` into this configuration.
    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(v) = update.check_all {
            self.check_all = v;
        }
        if let Some(v) = update.merge_duplicate_rules {
            self.merge_duplicate_rules = v;
        }
        if let Some(v) = update.merge_rules {
            self.merge_rules = v;
        }
        if let Some(v) = update.override_rules {
            self.override_rules = v;
        }
    }
}

/// Partial configuration; unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub check_all: Option<bool>,
    pub merge_duplicate_rules: Option<bool>,
    pub merge_rules: Option<bool>,
    pub override_rules: Option<bool>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check_all(mut self, value: bool) -> Self {
        self.check_all = Some(value);
        self
    }

    pub fn merge_duplicate_rules(mut self, value: bool) -> Self {
        self.merge_duplicate_rules = Some(value);
        self
    }

    pub fn merge_rules(mut self, value: bool) -> Self {
        self.merge_rules = Some(value);
        self
    }

    pub fn override_rules(mut self, value: bool) -> Self {
        self.override_rules = Some(value);
        self
    }
}

impl From<ValidatorConfig> for ConfigUpdate {
    fn from(config: ValidatorConfig) -> Self {
        Self {
            check_all: Some(config.check_all),
            merge_duplicate_rules: Some(config.merge_duplicate_rules),
            merge_rules: Some(config.merge_rules),
            override_rules: Some(config.override_rules),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert!(config.check_all);
        assert!(config.merge_duplicate_rules);
        assert!(config.merge_rules);
        assert!(!config.override_rules);
    }

    #[test]
    fn test_apply_only_touches_set_fields() {
        let mut config = ValidatorConfig::default();
        config.apply(&ConfigUpdate::new().check_all(false).override_rules(true));

        assert!(!config.check_all);
        assert!(config.override_rules);
        assert!(config.merge_rules);
        assert!(config.merge_duplicate_rules);
    }

    #[test]
    fn test_full_update_replaces_config() {
        let target = ValidatorConfig {
            check_all: false,
            merge_duplicate_rules: false,
            merge_rules: false,
            override_rules: true,
        };
        let mut config = ValidatorConfig::default();
        config.apply(&target.into());
        assert_eq!(config, target);
    }
}
