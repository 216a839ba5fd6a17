//! Fuzz target for app-link extraction and host validation.
//!
//! Goal: Extraction should **never panic**, and every verification candidate it produces must
//! point at the well-known path of a host that passes validation.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_link_profile
//! ```

#![no_main]

use apkguard_domain::links::{WELL_KNOWN_PATH, extract_link_profile};
use apkguard_domain::model::ManifestNode;
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

/// One `<data>` element; `None` leaves the attribute out.
#[derive(Arbitrary, Debug)]
struct DataInput {
    scheme: Option<String>,
    host: Option<String>,
    port: Option<String>,
    path: Option<String>,
    path_prefix: Option<String>,
    path_pattern: Option<String>,
    mime_type: Option<String>,
}

#[derive(Arbitrary, Debug)]
struct FilterInput {
    browsable: bool,
    data: Vec<DataInput>,
}

fn data_node(input: DataInput) -> ManifestNode {
    let attrs = [
        ("android:scheme", input.scheme),
        ("android:host", input.host),
        ("android:port", input.port),
        ("android:path", input.path),
        ("android:pathPrefix", input.path_prefix),
        ("android:pathPattern", input.path_pattern),
        ("android:mimeType", input.mime_type),
    ];
    attrs
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .fold(ManifestNode::new("data"), |n, (k, v)| n.with_attr(k, &v))
}

fuzz_target!(|filters: Vec<FilterInput>| {
    // Limit input size to keep fuzzing fast
    if filters.len() > 8 || filters.iter().any(|f| f.data.len() > 16) {
        return;
    }

    let mut activity = ManifestNode::new("activity").with_attr("android:name", "fuzz.Activity");
    for filter in filters {
        let mut node = ManifestNode::new("intent-filter");
        if filter.browsable {
            node = node.with_child(
                ManifestNode::new("category")
                    .with_attr("android:name", "android.intent.category.BROWSABLE"),
            );
        }
        for data in filter.data {
            node = node.with_child(data_node(data));
        }
        activity = activity.with_child(node);
    }

    let profile = extract_link_profile(&activity, "android");
    for (url, origin) in &profile.well_known_candidates {
        assert!(url.ends_with(WELL_KNOWN_PATH));
        assert!(url.starts_with(origin.as_str()));
    }
});
