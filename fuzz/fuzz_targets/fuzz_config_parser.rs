//! Fuzz target for `apkguard.toml` parsing and resolution.
//!
//! Goal: Parsing and resolving should **never panic** on any input.
//! Invalid configs must come back as errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(cfg) = apkguard_settings::parse_config_toml(text) {
            let _ = apkguard_settings::resolve_config(cfg, apkguard_settings::Overrides::default());
        }
    }
});
