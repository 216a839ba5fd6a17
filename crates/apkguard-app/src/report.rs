use anyhow::Context;
use apkguard_render::{
    RenderableData, RenderableExportedCounts, RenderableFinding, RenderableReport,
    RenderableSeverity, RenderableVerdictStatus,
};
use apkguard_types::{
    AnalysisStatus, ApkguardData, ApkguardReport, Finding, SCHEMA_REPORT_V1, Severity, ToolMeta,
    Verdict,
};
use time::OffsetDateTime;

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "apkguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

pub fn parse_report_json(text: &str) -> anyhow::Result<ApkguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse apkguard report")
}

pub fn serialize_report(report: &ApkguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// A report for an analysis that did not complete: no findings, failing verdict, and the
/// aborting error recorded in `data.error`.
pub fn failed_report(started_at: OffsetDateTime, message: &str) -> ApkguardReport {
    ApkguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        status: AnalysisStatus::Failed,
        verdict: Verdict::Fail,
        findings: Vec::new(),
        data: ApkguardData {
            error: Some(message.to_string()),
            ..ApkguardData::default()
        },
    }
}

pub fn to_renderable(report: &ApkguardReport) -> RenderableReport {
    let counts = &report.data.exported_counts;
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
            exported: RenderableExportedCounts {
                activities: counts.exported_activities,
                services: counts.exported_services,
                receivers: counts.exported_receivers,
                providers: counts.exported_providers,
            },
            exported_activities: report.data.exported_activities.clone(),
            error: report.data.error.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Secure => RenderableSeverity::Secure,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::High => RenderableSeverity::High,
        },
        rule: f.rule.clone(),
        title: f.title.clone(),
        description: f.description.clone(),
    }
}
