//! Rule configuration: per-rule enable flags and the shot comment (A/B/C)
//! parameters.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rule_names;

/// Validated shot comment rule parameters.
///
/// - `a`: diameter that is assumed to need no shot blasting
/// - `b`: diameter that is assumed to need shot blasting (kept for the
///   `a < b` invariant; the hole-count rule does not read it)
/// - `c`: total hole count from which comment 33 becomes mandatory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRule {
    a: f64,
    b: f64,
    c: u32,
    ignore_when_relief_at_least_38: bool,
}

impl ShotRule {
    pub fn new(
        a: f64,
        b: f64,
        c: i64,
        ignore_when_relief_at_least_38: bool,
    ) -> Result<Self, ConfigError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(ConfigError::NotNumeric);
        }
        if a <= 0.0 || b <= 0.0 || c <= 0 {
            return Err(ConfigError::NotPositive { a, b, c });
        }
        if a >= b {
            return Err(ConfigError::NotAscending { a, b });
        }
        let c = u32::try_from(c).map_err(|_| ConfigError::NotNumeric)?;
        Ok(Self {
            a,
            b,
            c,
            ignore_when_relief_at_least_38,
        })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> u32 {
        self.c
    }

    pub fn ignore_when_relief_at_least_38(&self) -> bool {
        self.ignore_when_relief_at_least_38
    }
}

impl Default for ShotRule {
    fn default() -> Self {
        Self {
            a: 15.0,
            b: 18.0,
            c: 2,
            ignore_when_relief_at_least_38: true,
        }
    }
}

/// Serialized form of [`ShotRule`]; validated by [`ShotRuleSettings::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotRuleSettings {
    pub a: f64,
    pub b: f64,
    pub c: i64,
    pub ignore_when_relief_at_least_38: bool,
}

impl Default for ShotRuleSettings {
    fn default() -> Self {
        let rule = ShotRule::default();
        Self {
            a: rule.a,
            b: rule.b,
            c: i64::from(rule.c),
            ignore_when_relief_at_least_38: rule.ignore_when_relief_at_least_38,
        }
    }
}

impl ShotRuleSettings {
    pub fn validate(&self) -> Result<ShotRule, ConfigError> {
        ShotRule::new(self.a, self.b, self.c, self.ignore_when_relief_at_least_38)
    }
}

/// Serialized rule configuration, as stored in a settings file.
///
/// ```toml
/// [rules]
/// round_drill = false
///
/// [shot_rule]
/// a = 15.0
/// b = 18.0
/// c = 2
/// ignore_when_relief_at_least_38 = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    /// Rule name (or legacy key) to enabled flag. Absent rules are enabled.
    pub rules: BTreeMap<String, bool>,
    pub shot_rule: ShotRuleSettings,
}

/// Validated configuration consumed by the rule engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleConfiguration {
    disabled: BTreeSet<&'static str>,
    shot_rule: ShotRule,
}

impl RuleConfiguration {
    pub fn new(shot_rule: ShotRule) -> Self {
        Self {
            disabled: BTreeSet::new(),
            shot_rule,
        }
    }

    /// Validates settings into a configuration.
    ///
    /// Unknown rule keys and invalid shot rule parameters are rejected.
    pub fn from_settings(settings: &RuleSettings) -> Result<Self, ConfigError> {
        let mut config = Self::new(settings.shot_rule.validate()?);
        for (key, enabled) in &settings.rules {
            config.set_enabled(key, *enabled)?;
        }
        Ok(config)
    }

    /// Enables or disables a rule by name or legacy key.
    pub fn set_enabled(&mut self, key: &str, enabled: bool) -> Result<(), ConfigError> {
        let names = rule_names::resolve(key).ok_or_else(|| ConfigError::UnknownRule {
            name: key.to_string(),
        })?;
        for name in names {
            if enabled {
                self.disabled.remove(name);
            } else {
                self.disabled.insert(name);
            }
        }
        Ok(())
    }

    /// Absent rules are enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.contains(name)
    }

    pub fn disabled_rules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.disabled.iter().copied()
    }

    pub fn shot_rule(&self) -> &ShotRule {
        &self.shot_rule
    }

    pub fn set_shot_rule(&mut self, shot_rule: ShotRule) {
        self.shot_rule = shot_rule;
    }

    /// Converts back to the serialized form, listing every rule explicitly.
    pub fn to_settings(&self) -> RuleSettings {
        RuleSettings {
            rules: rule_names::ALL
                .iter()
                .map(|name| ((*name).to_string(), self.is_enabled(name)))
                .collect(),
            shot_rule: ShotRuleSettings {
                a: self.shot_rule.a,
                b: self.shot_rule.b,
                c: i64::from(self.shot_rule.c),
                ignore_when_relief_at_least_38: self.shot_rule.ignore_when_relief_at_least_38,
            },
        }
    }
}
