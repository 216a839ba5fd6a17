use crate::model::ManifestNode;
use apkguard_types::{ExposureFinding, ids};
use indexmap::IndexMap;

const SECRET_CODE_SCHEME: &str = "android_secret_code";
const PRIORITY_THRESHOLD: u64 = 100;

pub fn run(root: &ManifestNode, ns: &str, out: &mut Vec<ExposureFinding>) {
    grant_uri_permissions(root, ns, out);
    data_elements(root, ns, out);
    intent_priorities(root, ns, out);
    action_priorities(root, ns, out);
}

fn grant_uri_permissions(root: &ManifestNode, ns: &str, out: &mut Vec<ExposureFinding>) {
    for grant in root.descendants("grant-uri-permission") {
        let hit = if grant.attr(ns, "pathPrefix") == Some("/") {
            "pathPrefix=/"
        } else if grant.attr(ns, "path") == Some("/") {
            "path=/"
        } else if grant.attr(ns, "pathPattern") == Some("*") {
            "path=*"
        } else {
            continue;
        };
        out.push(ExposureFinding::new(
            ids::RULE_IMPROPER_PROVIDER_PERMISSION,
            vec![hit.to_string()],
            Vec::new(),
        ));
    }
}

fn data_elements(root: &ManifestNode, ns: &str, out: &mut Vec<ExposureFinding>) {
    for data in root.descendants("data") {
        if data.attr(ns, "scheme") == Some(SECRET_CODE_SCHEME) {
            let host = data.attr(ns, "host").unwrap_or_default();
            out.push(ExposureFinding::new(
                ids::RULE_DIALER_CODE_FOUND,
                vec![host.to_string()],
                Vec::new(),
            ));
        } else if let Some(port) = data.attr(ns, "port") {
            out.push(ExposureFinding::new(
                ids::RULE_SMS_RECEIVER_PORT_FOUND,
                vec![port.to_string()],
                Vec::new(),
            ));
        }
    }
}

/// A priority above the threshold, written as an all-digit string.
fn high_priority(node: &ManifestNode, ns: &str) -> Option<String> {
    let value = node.attr(ns, "priority")?;
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // Digit strings too long for u64 are still above the threshold.
    let high = value.parse::<u64>().map_or(true, |v| v > PRIORITY_THRESHOLD);
    high.then(|| value.to_string())
}

fn intent_priorities(root: &ManifestNode, ns: &str, out: &mut Vec<ExposureFinding>) {
    let mut seen: IndexMap<String, u32> = IndexMap::new();
    for filter in root.descendants("intent-filter") {
        if let Some(priority) = high_priority(filter, ns) {
            *seen.entry(priority).or_insert(0) += 1;
        }
    }
    for (priority, count) in seen {
        out.push(ExposureFinding::new(
            ids::RULE_HIGH_INTENT_PRIORITY_FOUND,
            vec![priority, count.to_string()],
            Vec::new(),
        ));
    }
}

fn action_priorities(root: &ManifestNode, ns: &str, out: &mut Vec<ExposureFinding>) {
    for action in root.descendants("action") {
        if let Some(priority) = high_priority(action, ns) {
            out.push(ExposureFinding::new(
                ids::RULE_HIGH_ACTION_PRIORITY_FOUND,
                vec![priority],
                Vec::new(),
            ));
        }
    }
}
