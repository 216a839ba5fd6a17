//! Config parsing and policy resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{ApkguardConfigV1, NetworkConfig, RuleConfig};
pub use resolve::{NetworkSettings, Overrides, ResolvedConfig};

/// Parse `apkguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<ApkguardConfigV1> {
    let cfg: ApkguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine and the network settings used by the fetcher.
pub fn resolve_config(
    cfg: ApkguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
