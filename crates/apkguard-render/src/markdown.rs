use crate::text::{escape_markdown, markup_to_markdown};
use crate::{RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Apkguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    let exported = &report.data.exported;
    out.push_str(&format!(
        "- Verdict: **{}**\n- Findings: {} (emitted) / {} (total)\n- Exported: {} activities, {} services, {} receivers, {} providers\n\n",
        verdict,
        report.data.findings_emitted,
        report.data.findings_total,
        exported.activities,
        exported.services,
        exported.receivers,
        exported.providers,
    ));

    if let Some(e) = &report.data.error {
        out.push_str(&format!("> Analysis failed: {}\n\n", escape_markdown(e)));
    }
    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if !report.data.exported_activities.is_empty() {
        out.push_str("## Exported activities\n\n");
        for name in &report.data.exported_activities {
            out.push_str(&format!("- {}\n", escape_markdown(name)));
        }
        out.push('\n');
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Secure => "SECURE",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::High => "HIGH",
        };

        out.push_str(&format!(
            "- [{}] `{}`: {}\n",
            sev,
            f.rule,
            markup_to_markdown(&f.title)
        ));
        if !f.description.is_empty() {
            out.push_str(&format!("  - {}\n", markup_to_markdown(&f.description)));
        }
    }

    out
}
