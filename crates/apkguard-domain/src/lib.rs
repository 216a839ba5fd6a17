//! Pure manifest exposure classification.
//!
//! Input: a manifest tree materialized elsewhere, plus SDK bounds and the main activity.
//! Output: ordered findings, exported-component summaries, and the browsable-activity map.
//!
//! The only side effect is app-link verification, which goes through the
//! [`links::AssetLinkFetcher`] seam.

#![forbid(unsafe_code)]

pub mod checks;
pub mod error;
pub mod fingerprint;
pub mod links;
pub mod model;
pub mod policy;
pub mod registry;
pub mod report;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{analyze, classify, evaluate};
pub use error::AnalysisError;
