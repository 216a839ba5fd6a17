//! The `explain` use case: look up a rule key's template.

use apkguard_render::markup_to_plain;
use apkguard_types::{RuleTemplate, Severity, all_rule_keys, lookup_template};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found a template for the rule key.
    Found {
        rule_key: String,
        template: RuleTemplate,
    },
    /// Unknown rule key; includes the available keys.
    NotFound {
        identifier: String,
        available_rule_keys: &'static [&'static str],
    },
}

/// Look up the template for a rule key.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match lookup_template(identifier) {
        Some(template) => ExplainOutput::Found {
            rule_key: identifier.to_string(),
            template,
        },
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_rule_keys: all_rule_keys(),
        },
    }
}

/// Format a template for terminal display. Placeholders are left as `{0}`, `{1}`, ...
pub fn format_explanation(rule_key: &str, template: &RuleTemplate) -> String {
    let title = markup_to_plain(template.title);
    let mut out = String::new();

    out.push_str(rule_key);
    out.push('\n');
    out.push_str(&"=".repeat(rule_key.len()));
    out.push_str("\n\n");
    out.push_str(&format!("Severity: {}\n", severity_label(template.severity)));
    out.push_str(&format!("Title:    {title}\n"));
    out.push_str(&format!("Name:     {}\n\n", template.name));
    out.push_str("Description\n");
    out.push_str("-----------\n");
    out.push_str(template.description);
    out.push('\n');

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, rule_keys: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown rule key: {}\n\n", identifier));
    out.push_str("Available rule keys:\n");
    for key in rule_keys {
        out.push_str(&format!("  - {}\n", key));
    }

    out
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Secure => "secure",
        Severity::Warning => "warning",
        Severity::High => "high",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_found(output: ExplainOutput) -> (String, RuleTemplate) {
        match output {
            ExplainOutput::Found { rule_key, template } => (rule_key, template),
            ExplainOutput::NotFound { identifier, .. } => panic!("unexpected miss: {identifier}"),
        }
    }

    #[test]
    fn explain_known_rule_key() {
        let (key, template) = unwrap_found(run_explain("app_is_debuggable"));
        assert_eq!(key, "app_is_debuggable");
        assert_eq!(template.severity, Severity::High);
    }

    #[test]
    fn explain_unknown() {
        match run_explain("not_a_real_rule") {
            ExplainOutput::NotFound {
                identifier,
                available_rule_keys,
            } => {
                assert_eq!(identifier, "not_a_real_rule");
                assert!(available_rule_keys.contains(&"explicitly_exported"));
            }
            ExplainOutput::Found { .. } => panic!("should not be found"),
        }
    }

    #[test]
    fn format_explanation_output() {
        let (key, template) = unwrap_found(run_explain("app_is_debuggable"));
        let formatted = format_explanation(&key, &template);
        assert!(formatted.starts_with("app_is_debuggable\n=================\n"));
        assert!(formatted.contains("Severity: high"));
        assert!(formatted.contains("Title:    Debug Enabled For App [android:debuggable=true]"));
        assert!(formatted.contains("Description\n-----------\n"));
        assert!(!formatted.contains("<br>"));
    }

    #[test]
    fn format_not_found_output() {
        let formatted = format_not_found("missing", &["rule_one", "rule_two"]);
        assert!(formatted.contains("Unknown rule key: missing"));
        assert!(formatted.contains("  - rule_one\n"));
        assert!(formatted.contains("  - rule_two\n"));
    }
}
