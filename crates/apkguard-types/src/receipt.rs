use indexmap::{IndexMap, IndexSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for apkguard reports.
pub const SCHEMA_REPORT_V1: &str = "apkguard.report.v1";

/// Severity levels carried by the rule templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Secure,
    Warning,
    High,
}

/// A rule hit before rendering: rule key plus the positional arguments its template consumes.
///
/// `component_args` fill the template title and name, `extra_args` fill the description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExposureFinding {
    pub rule_key: String,
    pub component_args: Vec<String>,
    pub extra_args: Vec<String>,
}

impl ExposureFinding {
    pub fn new(rule_key: &str, component_args: Vec<String>, extra_args: Vec<String>) -> Self {
        Self {
            rule_key: rule_key.to_string(),
            component_args,
            extra_args,
        }
    }

    /// A finding that names nothing beyond its rule.
    pub fn bare(rule_key: &str) -> Self {
        Self::new(rule_key, Vec::new(), Vec::new())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub rule: String,
    pub severity: Severity,
    pub title: String,
    pub name: String,
    pub description: String,

    /// Positional component arguments the title was rendered from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component: Vec<String>,

    /// Stable identifier intended for dedup and trending: a hash of the rule key and arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

/// Whether the analysis ran to completion. A failed analysis carries no findings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Completed,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Exported component counts keyed by component kind. Activity aliases count as activities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExportedCounts {
    pub exported_activities: u32,
    pub exported_services: u32,
    pub exported_receivers: u32,
    pub exported_providers: u32,
}

impl ExportedCounts {
    pub fn total(&self) -> u32 {
        self.exported_activities
            + self.exported_services
            + self.exported_receivers
            + self.exported_providers
    }
}

/// Deep-link surface of one activity, collected from its browsable intent-filters.
///
/// Every set keeps first-seen order. `well_known_candidates` maps a verification URL to the
/// origin it would prove ownership of.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BrowsableLinkProfile {
    /// Declared schemes with the separator appended, e.g. `https://`.
    pub schemes: IndexSet<String>,
    pub mime_types: IndexSet<String>,
    pub hosts: IndexSet<String>,
    pub ports: IndexSet<String>,
    pub paths: IndexSet<String>,
    pub path_prefixes: IndexSet<String>,
    pub path_patterns: IndexSet<String>,
    pub browsable: bool,
    pub well_known_candidates: IndexMap<String, String>,
}

/// Apkguard-specific summary payload for the report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApkguardData {
    pub exported_activities: Vec<String>,
    pub exported_counts: ExportedCounts,
    pub browsable_activities: IndexMap<String, BrowsableLinkProfile>,

    pub findings_total: u32,
    pub findings_emitted: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated_reason: Option<String>,

    /// Set when the analysis failed; the message of the aborting error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A generic report envelope.
///
/// Keeping this generic allows apkguard to embed tool-specific data while still enforcing a
/// stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = ApkguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub status: AnalysisStatus,
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub data: TData,
}

pub type ApkguardReport = ReportEnvelope<ApkguardData>;
