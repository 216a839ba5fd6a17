//! Fuzz target for offline manifest analysis.
//!
//! Goal: Any analysis input that deserializes must analyze without panicking. Without a
//! fetcher no network requests are made.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_analysis_input
//! ```

#![no_main]

use apkguard_domain::model::AnalysisInput;
use apkguard_domain::policy::EffectiveConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = serde_json::from_slice::<AnalysisInput>(data) else {
        return;
    };
    if let Ok(report) = apkguard_domain::analyze(&input, &EffectiveConfig::default(), None) {
        assert!(report.data.findings_emitted <= report.data.findings_total);
        assert_eq!(report.findings.len() as u32, report.data.findings_emitted);
    }
});
