use apkguard_types::{
    ApkguardData, BrowsableLinkProfile, ExportedCounts, ExposureFinding, Finding, Severity,
    Verdict,
};
use indexmap::IndexMap;

/// Raw classifier output for one manifest, before rendering and policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub findings: Vec<ExposureFinding>,
    pub exported_activities: Vec<String>,
    pub exported_counts: ExportedCounts,
    pub browsable_activities: IndexMap<String, BrowsableLinkProfile>,
}

#[derive(Clone, Debug, Default)]
pub struct SeverityCounts {
    pub info: u32,
    pub secure: u32,
    pub warning: u32,
    pub high: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Info => counts.info += 1,
                Severity::Secure => counts.secure += 1,
                Severity::Warning => counts.warning += 1,
                Severity::High => counts.high += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub data: ApkguardData,
    pub counts: SeverityCounts,
}
