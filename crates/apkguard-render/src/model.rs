#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    Info,
    Secure,
    Warning,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub severity: RenderableSeverity,
    pub rule: String,
    /// May contain the inline markup used by the rule templates (`<b>`, `<br>`).
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableExportedCounts {
    pub activities: u32,
    pub services: u32,
    pub receivers: u32,
    pub providers: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub findings_emitted: u32,
    pub findings_total: u32,
    pub truncated_reason: Option<String>,
    pub exported: RenderableExportedCounts,
    pub exported_activities: Vec<String>,
    /// Set when the analysis failed.
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub findings: Vec<RenderableFinding>,
    pub data: RenderableData,
}
