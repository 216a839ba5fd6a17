//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Protection-level code resolution in the permission registry
//! - Export resolution for explicitly private components and the main activity
//! - Exported counts growing by exactly one per counted component

use crate::engine::classify;
use crate::model::{ManifestDocument, ManifestNode, SdkBounds};
use crate::registry::{DeclaredPermission, ProtectionTier, build_registry};
use crate::test_support::node;
use apkguard_types::ids;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_permission_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,8}(\\.[a-z]{1,8}){0,2}").expect("valid regex")
}

fn arb_code() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0x00000000".to_string()),
        Just("0x00000001".to_string()),
        Just("0x00000002".to_string()),
        Just("0x00000003".to_string()),
        prop::string::string_regex("0x[0-9a-f]{8}").expect("valid regex"),
        Just("signature|privileged".to_string()),
    ]
}

fn arb_component_tag() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("activity"),
        Just("activity-alias"),
        Just("service"),
        Just("receiver"),
        Just("provider"),
    ]
}

fn arb_sdk() -> impl Strategy<Value = SdkBounds> {
    (prop::option::of(1u32..36), prop::option::of(1u32..36))
        .prop_map(|(min_sdk, target_sdk)| SdkBounds { min_sdk, target_sdk })
}

/// A component element with arbitrary export-relevant attributes.
fn arb_component(name: String) -> impl Strategy<Value = ManifestNode> {
    (
        arb_component_tag(),
        prop::option::of(prop_oneof![Just("true"), Just("false"), Just("yes")]),
        prop::option::of(prop_oneof![Just("p.normal"), Just("p.sig"), Just("p.unknown")]),
        any::<bool>(),
    )
        .prop_map(move |(tag, exported, permission, intent_filter)| {
            let mut n = node(tag, &[("android:name", name.as_str())]);
            if let Some(e) = exported {
                n = n.with_attr("android:exported", e);
            }
            if let Some(p) = permission {
                n = n.with_attr("android:permission", p);
            }
            if intent_filter {
                n = n.with_child(node("intent-filter", &[]));
            }
            n
        })
}

fn document(components: Vec<ManifestNode>) -> ManifestDocument {
    let app = components
        .into_iter()
        .fold(node("application", &[]), |a, c| a.with_child(c));
    ManifestDocument {
        namespace: "android".to_string(),
        root: node("manifest", &[])
            .with_child(node(
                "permission",
                &[("android:name", "p.normal"), ("android:protectionLevel", "0x00000000")],
            ))
            .with_child(node(
                "permission",
                &[("android:name", "p.sig"), ("android:protectionLevel", "0x00000002")],
            ))
            .with_child(app),
    }
}

fn is_export_rule(key: &str) -> bool {
    key.starts_with("exported_") || key == ids::RULE_EXPLICITLY_EXPORTED
}

proptest! {
    #[test]
    fn registry_tier_matches_code(name in arb_permission_name(), code in arb_code()) {
        let registry = build_registry(&[DeclaredPermission {
            name: Some(name.clone()),
            protection_level: Some(code.clone()),
        }]);

        let expected = match code.as_str() {
            "0x00000000" => Some(ProtectionTier::Normal),
            "0x00000001" => Some(ProtectionTier::Dangerous),
            "0x00000002" => Some(ProtectionTier::Signature),
            "0x00000003" => Some(ProtectionTier::SignatureOrSystem),
            _ => None,
        };
        prop_assert_eq!(registry.tier(&name), expected);
        prop_assert_eq!(registry.len(), usize::from(expected.is_some()));
    }

    #[test]
    fn explicitly_private_components_are_never_exported(
        tag in arb_component_tag(),
        intent_filter in any::<bool>(),
        sdk in arb_sdk(),
    ) {
        let mut c = node(tag, &[("android:name", "a.Private"), ("android:exported", "false")]);
        if intent_filter {
            c = c.with_child(node("intent-filter", &[]));
        }
        let doc = document(vec![c]);
        let registry = build_registry(&crate::registry::declared_permissions(&doc.root, "android"));

        let out = classify(&doc, &registry, None, sdk, None).expect("classify");
        prop_assert!(out.exported_activities.is_empty());
        prop_assert_eq!(out.exported_counts.total(), 0);
        prop_assert!(!out.findings.iter().any(|f| is_export_rule(&f.rule_key)));
    }

    #[test]
    fn main_activity_has_no_export_finding(
        exported in prop::option::of(Just("true")),
        sdk in arb_sdk(),
    ) {
        let mut c = node("activity", &[("android:name", "a.Main")])
            .with_child(node("intent-filter", &[]));
        if let Some(e) = exported {
            c = c.with_attr("android:exported", e);
        }
        let doc = document(vec![c]);
        let registry = build_registry(&crate::registry::declared_permissions(&doc.root, "android"));

        let out = classify(&doc, &registry, Some("a.Main"), sdk, None).expect("classify");
        prop_assert!(!out.findings.iter().any(|f| is_export_rule(&f.rule_key)));
        prop_assert!(out.exported_activities.is_empty());
    }

    #[test]
    fn counts_grow_by_one_per_counted_component(
        components in prop::collection::vec(
            (0usize..1000).prop_flat_map(|i| arb_component(format!("c.C{i}"))),
            0..12,
        ),
        sdk in arb_sdk(),
    ) {
        let mut previous = 0;
        for n in 0..=components.len() {
            let doc = document(components[..n].to_vec());
            let registry = build_registry(&crate::registry::declared_permissions(&doc.root, "android"));
            let out = classify(&doc, &registry, None, sdk, None).expect("classify");

            let total = out.exported_counts.total();
            prop_assert!(total == previous || total == previous + 1);
            previous = total;
        }
    }
}
