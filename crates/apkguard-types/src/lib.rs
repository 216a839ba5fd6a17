//! Stable DTOs and IDs used across the apkguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable rule keys
//! - the rule template registry used to render findings
//! - Android API level naming

#![forbid(unsafe_code)]

pub mod ids;
pub mod receipt;
pub mod sdk;
pub mod templates;

pub use receipt::{
    AnalysisStatus, ApkguardData, ApkguardReport, BrowsableLinkProfile, ExportedCounts,
    ExposureFinding, Finding, ReportEnvelope, SCHEMA_REPORT_V1, Severity, ToolMeta, Verdict,
};
pub use templates::{RuleTemplate, all_rule_keys, lookup_template, render_finding};
