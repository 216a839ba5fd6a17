use apkguard_types::ExposureFinding;
use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a rule hit.
///
/// Identity fields:
/// - rule key
/// - component arguments (label, component name, permission text)
///
/// Extra arguments are left out: they carry run-dependent values such as HTTP status codes.
pub fn fingerprint_for_exposure(finding: &ExposureFinding) -> String {
    let mut parts = vec![finding.rule_key.as_str()];
    parts.extend(finding.component_args.iter().map(String::as_str));
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
