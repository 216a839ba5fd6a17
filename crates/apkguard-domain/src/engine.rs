use crate::checks::{activity, application, exposure, manifest_wide, platform};
use crate::error::AnalysisError;
use crate::fingerprint::fingerprint_for_exposure;
use crate::links::{self, AssetLinkFetcher};
use crate::model::{
    AnalysisInput, ApplicationDefaults, ComponentDescriptor, ComponentKind, ManifestDocument,
    ManifestNode, SdkBounds,
};
use crate::policy::{EffectiveConfig, FailOn};
use crate::registry::{PermissionRegistry, build_registry, declared_permissions};
use crate::report::{Classification, DomainReport, SeverityCounts};
use apkguard_types::{ApkguardData, ExportedCounts, Finding, Severity, Verdict, render_finding};
use tracing::{info, warn};

const MANIFEST_ROOT: &str = "manifest";

/// Walk the manifest and classify every component.
///
/// Findings come out in report order: platform, then per application its flags followed by
/// each component (activity checks first), then manifest-wide checks. With no fetcher the
/// link profiles are still collected but nothing is verified.
pub fn classify(
    document: &ManifestDocument,
    registry: &PermissionRegistry,
    main_activity: Option<&str>,
    sdk: SdkBounds,
    fetcher: Option<&dyn AssetLinkFetcher>,
) -> Result<Classification, AnalysisError> {
    let ns = document.namespace.as_str();
    if ns.is_empty() {
        return Err(AnalysisError::EmptyNamespace);
    }
    let root = &document.root;
    if root.tag != MANIFEST_ROOT {
        return Err(AnalysisError::UnexpectedRoot {
            found: root.tag.clone(),
        });
    }

    let mut out = Classification::default();
    platform::run(sdk, &mut out.findings);

    let mut latch = application::BackupLatch::default();
    for app_node in root.descendants("application") {
        let app = ApplicationDefaults::from_node(app_node, ns);
        application::run(&app, &mut latch, &mut out.findings);

        for child in &app_node.children {
            let Some(component) = ComponentDescriptor::from_node(child, ns, main_activity) else {
                continue;
            };

            if component.tag.kind() == ComponentKind::Activity {
                link_checks(child, &component, ns, fetcher, &mut out)?;
                activity::run(&component, sdk, &mut out.findings);
            }

            let Some(hit) = exposure::classify_component(&component, &app, registry, sdk) else {
                continue;
            };
            if hit.decision.counted {
                increment(&mut out.exported_counts, component.tag.kind());
            }
            if hit.lists_activity(&component) {
                out.exported_activities.push(component.name.clone());
            }
            out.findings.push(hit.finding);
        }
    }

    manifest_wide::run(root, ns, &mut out.findings);

    Ok(out)
}

fn link_checks(
    node: &ManifestNode,
    component: &ComponentDescriptor,
    ns: &str,
    fetcher: Option<&dyn AssetLinkFetcher>,
    out: &mut Classification,
) -> Result<(), AnalysisError> {
    let profile = links::extract_link_profile(node, ns);

    if let Some(fetcher) = fetcher {
        let outcomes = links::verify(&component.name, &profile.well_known_candidates, fetcher)?;
        out.findings.extend(
            outcomes
                .iter()
                .filter_map(|o| o.to_finding(&component.name)),
        );
    }

    if profile.browsable {
        out.browsable_activities
            .insert(component.name.clone(), profile);
    }
    Ok(())
}

fn increment(counts: &mut ExportedCounts, kind: ComponentKind) {
    let slot = match kind {
        ComponentKind::Activity => &mut counts.exported_activities,
        ComponentKind::Service => &mut counts.exported_services,
        ComponentKind::Receiver => &mut counts.exported_receivers,
        ComponentKind::Provider => &mut counts.exported_providers,
    };
    *slot += 1;
}

/// Build the registry, classify, and evaluate one analysis input.
pub fn analyze(
    input: &AnalysisInput,
    cfg: &EffectiveConfig,
    fetcher: Option<&dyn AssetLinkFetcher>,
) -> Result<DomainReport, AnalysisError> {
    info!(namespace = %input.namespace, "manifest analysis started");

    let registry = build_registry(&declared_permissions(&input.manifest, &input.namespace));
    let fetcher = if cfg.link_verification { fetcher } else { None };

    let classification = classify(
        &input.document(),
        &registry,
        input.main_activity.as_deref(),
        input.sdk,
        fetcher,
    )?;
    Ok(evaluate(classification, cfg))
}

/// Render findings through the template table and apply rule policy, truncation, and verdict.
pub fn evaluate(classification: Classification, cfg: &EffectiveConfig) -> DomainReport {
    let mut findings: Vec<Finding> = Vec::new();

    for hit in &classification.findings {
        if !cfg.is_enabled(&hit.rule_key) {
            continue;
        }
        let Some(mut finding) = render_finding(hit, Some(fingerprint_for_exposure(hit))) else {
            warn!(rule = %hit.rule_key, "no template found for rule key");
            continue;
        };
        if let Some(severity) = cfg.rule_policy(&hit.rule_key).and_then(|p| p.severity) {
            finding.severity = severity;
        }
        findings.push(finding);
    }

    let total = findings.len() as u32;

    // Insertion order is report order; truncation keeps the first N.
    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let verdict = compute_verdict(&emitted, cfg.fail_on);
    let counts = SeverityCounts::from_findings(&emitted);

    let data = ApkguardData {
        exported_activities: classification.exported_activities,
        exported_counts: classification.exported_counts,
        browsable_activities: classification.browsable_activities,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        truncated_reason,
        error: None,
    };

    DomainReport {
        verdict,
        findings: emitted,
        data,
        counts,
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_high = findings.iter().any(|f| f.severity == Severity::High);
    if has_high {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::High => Verdict::Warn,
        };
    }

    Verdict::Pass
}
