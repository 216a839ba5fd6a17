//! The `check` use case: classify a manifest snapshot and produce a report.

use anyhow::Context;
use apkguard_domain::model::AnalysisInput;
use apkguard_settings::{Overrides, ResolvedConfig};
use apkguard_types::{AnalysisStatus, ApkguardReport, ReportEnvelope, SCHEMA_REPORT_V1, Verdict};
use time::OffsetDateTime;
use tracing::error;

use crate::fetch::ReqwestFetcher;
use crate::report::{failed_report, tool_meta};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Analysis input JSON: manifest tree snapshot, namespace, SDK bounds, main activity.
    pub input_text: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: ApkguardReport,
    pub resolved_config: ResolvedConfig,
}

/// Run the check use case: parse config and input, analyze, produce the report.
///
/// Config and input errors are returned. An analysis that aborts on the manifest itself still
/// produces a report, with status `failed` and no findings.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        apkguard_settings::ApkguardConfigV1::default()
    } else {
        apkguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = apkguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;

    let analysis_input: AnalysisInput =
        serde_json::from_str(input.input_text).context("parse analysis input json")?;

    let fetcher = ReqwestFetcher::new(resolved.network.clone());
    let outcome = apkguard_domain::analyze(&analysis_input, &resolved.effective, Some(&fetcher));
    let report = match outcome {
        Ok(domain_report) => ReportEnvelope {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: tool_meta(),
            started_at,
            finished_at: OffsetDateTime::now_utc(),
            status: AnalysisStatus::Completed,
            verdict: domain_report.verdict,
            findings: domain_report.findings,
            data: domain_report.data,
        },
        Err(err) => {
            error!(error = %err, "manifest analysis failed");
            failed_report(started_at, &err.to_string())
        }
    };

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}

/// Exit code for a finished report: a failed analysis is a runtime error (1).
pub fn report_exit_code(report: &ApkguardReport) -> i32 {
    match report.status {
        AnalysisStatus::Failed => 1,
        AnalysisStatus::Completed => verdict_exit_code(report.verdict),
    }
}
