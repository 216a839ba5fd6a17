//! Use case orchestration for apkguard.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain,
//! and render layers, plus the HTTP fetcher the domain's link verification runs against.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod fetch;
mod render;
mod report;

pub use check::{CheckInput, CheckOutput, report_exit_code, run_check, verdict_exit_code};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use fetch::ReqwestFetcher;
pub use render::{render_annotations, render_markdown};
pub use report::{failed_report, parse_report_json, serialize_report, to_renderable};
