use apkguard_types::Severity;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    High,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RulePolicy {
    pub enabled: bool,
    /// Replaces the template severity when set.
    pub severity: Option<Severity>,
}

impl RulePolicy {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            severity: None,
        }
    }

    pub fn with_severity(severity: Severity) -> Self {
        Self {
            enabled: true,
            severity: Some(severity),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub fail_on: FailOn,
    pub max_findings: usize,
    pub link_verification: bool,
    /// Per-rule overrides. Rules without an entry are enabled at their template severity.
    pub rules: BTreeMap<String, RulePolicy>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            fail_on: FailOn::High,
            max_findings: 500,
            link_verification: true,
            rules: BTreeMap::new(),
        }
    }
}

impl EffectiveConfig {
    pub fn rule_policy(&self, rule_key: &str) -> Option<&RulePolicy> {
        self.rules.get(rule_key)
    }

    pub fn is_enabled(&self, rule_key: &str) -> bool {
        self.rule_policy(rule_key).is_none_or(|p| p.enabled)
    }
}
