use crate::text::markup_to_plain;
use crate::{RenderableReport, RenderableSeverity};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} title=apkguard {rule}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(error) = &report.data.error {
        out.push(format!(
            "::error title=apkguard::analysis failed: {}",
            escape_data(error)
        ));
    }

    for f in &report.findings {
        let level = match f.severity {
            RenderableSeverity::High => "error",
            RenderableSeverity::Warning => "warning",
            RenderableSeverity::Info | RenderableSeverity::Secure => "notice",
        };

        let message = escape_data(&markup_to_plain(&f.title));
        let title = escape_property(&format!("apkguard {}", f.rule));
        out.push(format!("::{} title={}::{}", level, title, message));
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
