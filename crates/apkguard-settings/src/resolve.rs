use crate::model::ApkguardConfigV1;
use anyhow::Context;
use apkguard_domain::policy::{EffectiveConfig, FailOn, RulePolicy};
use apkguard_types::{Severity, lookup_template};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Command-line overrides. They win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub proxy: Option<String>,
    /// Disable TLS certificate verification.
    pub insecure: bool,
    /// Disable app-link verification.
    pub offline: bool,
    pub max_findings: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkSettings {
    pub proxy: Option<String>,
    pub verify_tls: bool,
    pub timeout: Duration,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            proxy: None,
            verify_tls: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub network: NetworkSettings,
}

pub fn resolve_config(
    cfg: ApkguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let mut effective = EffectiveConfig::default();

    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    // per-rule overrides
    for (rule_key, rc) in cfg.rules.iter() {
        if lookup_template(rule_key).is_none() {
            anyhow::bail!("unknown rule key in [rules]: {rule_key}");
        }
        let mut policy = RulePolicy::enabled();
        if let Some(enabled) = rc.enabled {
            policy.enabled = enabled;
        }
        if let Some(sev) = rc.severity.as_deref() {
            policy.severity = Some(
                parse_severity(sev).with_context(|| format!("invalid severity for {rule_key}"))?,
            );
        }
        effective.rules.insert(rule_key.clone(), policy);
    }

    effective.link_verification =
        !overrides.offline && cfg.network.link_verification.unwrap_or(true);

    let timeout_secs = cfg.network.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        anyhow::bail!("network.timeout_secs must be greater than zero");
    }

    let network = NetworkSettings {
        proxy: overrides.proxy.or(cfg.network.proxy),
        verify_tls: !overrides.insecure && cfg.network.verify_tls.unwrap_or(true),
        timeout: Duration::from_secs(timeout_secs),
    };

    Ok(ResolvedConfig { effective, network })
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "secure" => Ok(Severity::Secure),
        "warning" | "warn" => Ok(Severity::Warning),
        "high" => Ok(Severity::High),
        other => anyhow::bail!("unknown severity: {other} (expected info|secure|warning|high)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "high" => Ok(FailOn::High),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected high|warning)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;
    use apkguard_types::ids;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let resolved = resolve_config(ApkguardConfigV1::default(), Overrides::default())
            .expect("resolve");
        assert_eq!(resolved.effective.fail_on, FailOn::High);
        assert_eq!(resolved.effective.max_findings, 500);
        assert!(resolved.effective.link_verification);
        assert!(resolved.effective.rules.is_empty());
        assert_eq!(resolved.network, NetworkSettings::default());
    }

    #[test]
    fn full_config_is_applied() {
        let cfg = parse_config_toml(
            r#"
fail_on = "warning"
max_findings = 10

[network]
proxy = "http://127.0.0.1:8080"
verify_tls = false
timeout_secs = 9
link_verification = false

[rules.task_affinity_set]
enabled = false

[rules.clear_text_traffic]
severity = "warning"
"#,
        )
        .expect("parse");

        let resolved = resolve_config(cfg, Overrides::default()).expect("resolve");
        let eff = &resolved.effective;
        assert_eq!(eff.fail_on, FailOn::Warning);
        assert_eq!(eff.max_findings, 10);
        assert!(!eff.link_verification);
        assert!(!eff.is_enabled(ids::RULE_TASK_AFFINITY_SET));
        assert_eq!(
            eff.rule_policy(ids::RULE_CLEAR_TEXT_TRAFFIC).and_then(|p| p.severity),
            Some(Severity::Warning)
        );
        assert_eq!(resolved.network.proxy.as_deref(), Some("http://127.0.0.1:8080"));
        assert!(!resolved.network.verify_tls);
        assert_eq!(resolved.network.timeout, Duration::from_secs(9));
    }

    #[test]
    fn overrides_win_over_config() {
        let cfg = parse_config_toml(
            r#"
max_findings = 10
[network]
proxy = "http://config:8080"
"#,
        )
        .expect("parse");
        let overrides = Overrides {
            proxy: Some("http://cli:3128".to_string()),
            insecure: true,
            offline: true,
            max_findings: Some(3),
        };

        let resolved = resolve_config(cfg, overrides).expect("resolve");
        assert_eq!(resolved.effective.max_findings, 3);
        assert!(!resolved.effective.link_verification);
        assert!(!resolved.network.verify_tls);
        assert_eq!(resolved.network.proxy.as_deref(), Some("http://cli:3128"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_rule = parse_config_toml("[rules.not_a_rule]\nenabled = false\n").expect("parse");
        assert!(resolve_config(bad_rule, Overrides::default()).is_err());

        let bad_severity =
            parse_config_toml("[rules.app_is_debuggable]\nseverity = \"fatal\"\n").expect("parse");
        let err = resolve_config(bad_severity, Overrides::default()).expect_err("should fail");
        assert!(format!("{err:#}").contains("app_is_debuggable"));

        let bad_fail_on = parse_config_toml("fail_on = \"error\"\n").expect("parse");
        assert!(resolve_config(bad_fail_on, Overrides::default()).is_err());

        let zero_timeout = parse_config_toml("[network]\ntimeout_secs = 0\n").expect("parse");
        assert!(resolve_config(zero_timeout, Overrides::default()).is_err());
    }

    #[test]
    fn unknown_top_level_keys_are_tolerated() {
        assert!(parse_config_toml("future_option = 1\n").is_ok());
    }
}
