//! Rule registry.
//!
//! # Thread Safety
//!
//! Rules are `Send + Sync` and the registry is only read during validation,
//! so one registry can be shared by reference across worker threads.

use std::collections::BTreeSet;

use cutlist_model::RuleConfiguration;

use super::{
    DateCheck, DecimalRelief, DiaDimension, DimensionLimit, DrillFormat, DrillMix, DrillWorkSize,
    FileMix, FileRule, GrooveConsistency, MachineThickness, PlasmaRelief, RoundDrill, RowRule,
    RuleDescriptor, RuleScope, SabiComment, ShotComment, ShotDimension, ShotMix, ThicknessGrade,
};

/// Ordered row and file rules plus the set of disabled rule names.
pub struct RuleRegistry {
    row_rules: Vec<Box<dyn RowRule>>,
    file_rules: Vec<Box<dyn FileRule>>,
    disabled: BTreeSet<String>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            row_rules: Vec::new(),
            file_rules: Vec::new(),
            disabled: BTreeSet::new(),
        }
    }

    /// Every built-in rule in evaluation order, all enabled.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register_row(Box::new(ThicknessGrade));
        registry.register_row(Box::new(PlasmaRelief));
        registry.register_row(Box::new(DiaDimension));
        registry.register_row(Box::new(SabiComment));
        registry.register_row(Box::new(DimensionLimit));
        registry.register_row(Box::new(DecimalRelief));
        registry.register_row(Box::new(DrillFormat));
        registry.register_row(Box::new(DrillMix));
        registry.register_row(Box::new(DateCheck));
        registry.register_row(Box::new(ShotDimension));
        registry.register_row(Box::new(MachineThickness));
        registry.register_row(Box::new(ShotComment));
        registry.register_row(Box::new(DrillWorkSize));
        registry.register_row(Box::new(RoundDrill));

        registry.register_file(Box::new(FileMix));
        registry.register_file(Box::new(GrooveConsistency));
        registry.register_file(Box::new(ShotMix::fifteen_eighteen()));
        registry.register_file(Box::new(ShotMix::eighteen_twentytwo()));
        registry
    }

    /// The standard registry filtered by a configuration's enable map.
    pub fn for_configuration(config: &RuleConfiguration) -> Self {
        let mut registry = Self::standard();
        for name in config.disabled_rules() {
            registry.disable(name);
        }
        registry
    }

    /// Registers a row rule.
    ///
    /// A rule with the same name is replaced in place; otherwise the rule runs
    /// after the ones already registered.
    pub fn register_row(&mut self, rule: Box<dyn RowRule>) {
        match self.row_rules.iter().position(|r| r.name() == rule.name()) {
            Some(index) => self.row_rules[index] = rule,
            None => self.row_rules.push(rule),
        }
    }

    /// Registers a file rule, replacing one with the same name.
    pub fn register_file(&mut self, rule: Box<dyn FileRule>) {
        match self.file_rules.iter().position(|r| r.name() == rule.name()) {
            Some(index) => self.file_rules[index] = rule,
            None => self.file_rules.push(rule),
        }
    }

    /// Re-enables a rule. Returns false when no rule has that name.
    pub fn enable(&mut self, name: &str) -> bool {
        self.disabled.remove(name);
        self.contains(name)
    }

    /// Disables a rule. Returns false when no rule has that name.
    pub fn disable(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            return false;
        }
        self.disabled.insert(name.to_string());
        true
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.contains(name) && !self.disabled.contains(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rule_names().any(|rule| rule == name)
    }

    /// Enabled row rules in evaluation order.
    pub fn row_rules(&self) -> impl Iterator<Item = &dyn RowRule> + '_ {
        self.row_rules
            .iter()
            .filter(|rule| !self.disabled.contains(rule.name()))
            .map(|rule| rule.as_ref())
    }

    /// Enabled file rules in evaluation order.
    pub fn file_rules(&self) -> impl Iterator<Item = &dyn FileRule> + '_ {
        self.file_rules
            .iter()
            .filter(|rule| !self.disabled.contains(rule.name()))
            .map(|rule| rule.as_ref())
    }

    /// Names of all registered rules, row rules first.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.row_rules
            .iter()
            .map(|rule| rule.name())
            .chain(self.file_rules.iter().map(|rule| rule.name()))
    }

    /// Listing of every registered rule with its enabled state.
    pub fn descriptors(&self) -> Vec<RuleDescriptor> {
        let rows = self.row_rules.iter().map(|rule| RuleDescriptor {
            name: rule.name(),
            label: rule.label(),
            scope: RuleScope::Row,
            enabled: !self.disabled.contains(rule.name()),
        });
        let files = self.file_rules.iter().map(|rule| RuleDescriptor {
            name: rule.name(),
            label: rule.label(),
            scope: RuleScope::File,
            enabled: !self.disabled.contains(rule.name()),
        });
        rows.chain(files).collect()
    }

    /// Number of registered rules, enabled or not.
    pub fn len(&self) -> usize {
        self.row_rules.len() + self.file_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_rules.is_empty() && self.file_rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutlist_model::rule_names;

    #[test]
    fn test_standard_order_matches_rule_names() {
        let registry = RuleRegistry::standard();
        let names: Vec<&str> = registry.rule_names().collect();
        assert_eq!(names, rule_names::ALL);
        assert_eq!(registry.len(), rule_names::ALL.len());
        assert_eq!(registry.row_rules().count(), 14);
        assert_eq!(registry.file_rules().count(), 4);
    }

    #[test]
    fn test_disable_and_enable() {
        let mut registry = RuleRegistry::standard();
        assert!(registry.disable(rule_names::DATE_CHECK));
        assert!(!registry.is_enabled(rule_names::DATE_CHECK));
        assert!(
            registry
                .row_rules()
                .all(|rule| rule.name() != rule_names::DATE_CHECK)
        );
        assert!(registry.enable(rule_names::DATE_CHECK));
        assert!(registry.is_enabled(rule_names::DATE_CHECK));
        assert!(!registry.disable("no_such_rule"));
    }

    #[test]
    fn test_for_configuration_applies_legacy_keys() {
        let mut config = RuleConfiguration::default();
        config.set_enabled("drill_check", false).unwrap();
        config.set_enabled(rule_names::SHOT_MIX_18_22, false).unwrap();
        let registry = RuleRegistry::for_configuration(&config);
        assert!(!registry.is_enabled(rule_names::DRILL_FORMAT));
        assert!(!registry.is_enabled(rule_names::DRILL_MIX));
        assert_eq!(registry.file_rules().count(), 3);

        let descriptors = registry.descriptors();
        assert_eq!(descriptors.len(), 18);
        assert_eq!(descriptors[0].name, rule_names::THICKNESS_GRADE);
        assert_eq!(descriptors[17].scope, RuleScope::File);
        assert!(!descriptors[17].enabled);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = RuleRegistry::standard();
        registry.register_row(Box::new(DateCheck));
        assert_eq!(registry.len(), 18);
        assert!(RuleRegistry::new().is_empty());
    }
}
