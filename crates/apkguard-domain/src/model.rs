use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_NAMESPACE: &str = "android";

/// One element of the materialized manifest tree.
///
/// Attribute keys are namespace-qualified (`android:exported`). Children keep document order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestNode {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<ManifestNode>,
}

impl ManifestNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_child(mut self, child: ManifestNode) -> Self {
        self.children.push(child);
        self
    }

    /// Attribute `ns:local`. An empty value reads as absent.
    pub fn attr(&self, ns: &str, local: &str) -> Option<&str> {
        self.attributes
            .get(&format!("{ns}:{local}"))
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Direct children with the given tag.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a ManifestNode> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// All descendants (excluding `self`) with the given tag, in document order.
    pub fn descendants<'a>(&'a self, tag: &str) -> Vec<&'a ManifestNode> {
        let mut out = Vec::new();
        collect_descendants(self, tag, &mut out);
        out
    }
}

fn collect_descendants<'a>(node: &'a ManifestNode, tag: &str, out: &mut Vec<&'a ManifestNode>) {
    for child in &node.children {
        if child.tag == tag {
            out.push(child);
        }
        collect_descendants(child, tag, out);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkBounds {
    #[serde(default)]
    pub min_sdk: Option<u32>,
    #[serde(default)]
    pub target_sdk: Option<u32>,
}

/// The manifest tree plus the namespace prefix its attribute keys use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestDocument {
    pub namespace: String,
    pub root: ManifestNode,
}

/// Snapshot handed over by the manifest parser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisInput {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub main_activity: Option<String>,
    #[serde(default)]
    pub sdk: SdkBounds,
    pub manifest: ManifestNode,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl AnalysisInput {
    pub fn document(&self) -> ManifestDocument {
        ManifestDocument {
            namespace: self.namespace.clone(),
            root: self.manifest.clone(),
        }
    }
}

/// Tri-state boolean attribute. Only the exact strings `true` and `false` are explicit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolAttr {
    True,
    False,
    Unset,
}

impl BoolAttr {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("true") => BoolAttr::True,
            Some("false") => BoolAttr::False,
            _ => BoolAttr::Unset,
        }
    }

    pub fn is_true(self) -> bool {
        self == BoolAttr::True
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Activity,
    Service,
    Receiver,
    Provider,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentTag {
    Activity,
    ActivityAlias,
    Service,
    Receiver,
    Provider,
}

impl ComponentTag {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "activity" => Some(ComponentTag::Activity),
            "activity-alias" => Some(ComponentTag::ActivityAlias),
            "service" => Some(ComponentTag::Service),
            "receiver" => Some(ComponentTag::Receiver),
            "provider" => Some(ComponentTag::Provider),
            _ => None,
        }
    }

    pub fn kind(self) -> ComponentKind {
        match self {
            ComponentTag::Activity | ComponentTag::ActivityAlias => ComponentKind::Activity,
            ComponentTag::Service => ComponentKind::Service,
            ComponentTag::Receiver => ComponentKind::Receiver,
            ComponentTag::Provider => ComponentKind::Provider,
        }
    }

    /// Human label used in finding titles.
    pub fn label(self) -> &'static str {
        match self {
            ComponentTag::Activity => "Activity",
            ComponentTag::ActivityAlias => "Activity-Alias",
            ComponentTag::Service => "Service",
            ComponentTag::Receiver => "Broadcast Receiver",
            ComponentTag::Provider => "Content Provider",
        }
    }

    /// Suffix turning the article "A" into "An" in descriptions.
    pub fn article_suffix(self) -> &'static str {
        match self.kind() {
            ComponentKind::Activity => "n",
            _ => "",
        }
    }
}

/// Everything the classifier reads from a component element, read once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub tag: ComponentTag,
    pub name: String,
    pub exported: BoolAttr,
    pub permission: Option<String>,
    pub has_intent_filter: bool,
    pub is_main_activity: bool,
    pub launch_mode: Option<String>,
    pub task_affinity: Option<String>,
}

impl ComponentDescriptor {
    /// Returns `None` when the element is not a component.
    pub fn from_node(node: &ManifestNode, ns: &str, main_activity: Option<&str>) -> Option<Self> {
        let tag = ComponentTag::from_tag(&node.tag)?;
        let name = node.attr(ns, "name").unwrap_or_default().to_string();
        let is_activity = tag.kind() == ComponentKind::Activity;

        Some(Self {
            tag,
            is_main_activity: main_activity.is_some_and(|m| m == name),
            name,
            exported: BoolAttr::parse(node.attr(ns, "exported")),
            permission: node.attr(ns, "permission").map(str::to_string),
            has_intent_filter: node.children_named("intent-filter").next().is_some(),
            launch_mode: is_activity
                .then(|| node.attr(ns, "launchMode").map(str::to_string))
                .flatten(),
            task_affinity: is_activity
                .then(|| node.attr(ns, "taskAffinity").map(str::to_string))
                .flatten(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationDefaults {
    pub permission: Option<String>,
    pub allow_backup: BoolAttr,
    pub uses_cleartext_traffic: bool,
    pub debuggable: bool,
    pub direct_boot_aware: bool,
    pub network_security_config: Option<String>,
    pub test_only: bool,
}

impl ApplicationDefaults {
    pub fn from_node(node: &ManifestNode, ns: &str) -> Self {
        let flag = |local: &str| BoolAttr::parse(node.attr(ns, local)).is_true();
        Self {
            permission: node.attr(ns, "permission").map(str::to_string),
            allow_backup: BoolAttr::parse(node.attr(ns, "allowBackup")),
            uses_cleartext_traffic: flag("usesCleartextTraffic"),
            debuggable: flag("debuggable"),
            direct_boot_aware: flag("directBootAware"),
            network_security_config: node.attr(ns, "networkSecurityConfig").map(str::to_string),
            test_only: flag("testOnly"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_attribute_reads_as_absent() {
        let node = ManifestNode::new("activity")
            .with_attr("android:taskAffinity", "")
            .with_attr("android:name", "a.B");
        assert_eq!(node.attr("android", "taskAffinity"), None);
        assert_eq!(node.attr("android", "name"), Some("a.B"));
        assert_eq!(node.attr("other", "name"), None);
    }

    #[test]
    fn descendants_walk_in_document_order() {
        let root = ManifestNode::new("manifest")
            .with_child(
                ManifestNode::new("application").with_child(
                    ManifestNode::new("activity")
                        .with_child(ManifestNode::new("data").with_attr("android:host", "one")),
                ),
            )
            .with_child(ManifestNode::new("data").with_attr("android:host", "two"));

        let hosts: Vec<_> = root
            .descendants("data")
            .into_iter()
            .filter_map(|n| n.attr("android", "host"))
            .collect();
        assert_eq!(hosts, vec!["one", "two"]);
    }

    #[test]
    fn exported_tristate_only_accepts_exact_literals() {
        assert_eq!(BoolAttr::parse(Some("true")), BoolAttr::True);
        assert_eq!(BoolAttr::parse(Some("false")), BoolAttr::False);
        assert_eq!(BoolAttr::parse(Some("TRUE")), BoolAttr::Unset);
        assert_eq!(BoolAttr::parse(None), BoolAttr::Unset);
    }

    #[test]
    fn descriptor_reads_intent_filters_from_direct_children_only() {
        let nested = ManifestNode::new("service")
            .with_attr("android:name", "a.S")
            .with_child(ManifestNode::new("meta-data").with_child(ManifestNode::new("intent-filter")));
        let d = ComponentDescriptor::from_node(&nested, "android", None).expect("component");
        assert!(!d.has_intent_filter);
        assert_eq!(d.launch_mode, None);

        let direct = ManifestNode::new("activity-alias")
            .with_attr("android:name", "a.Main")
            .with_attr("android:launchMode", "singleTask")
            .with_child(ManifestNode::new("intent-filter"));
        let d = ComponentDescriptor::from_node(&direct, "android", Some("a.Main")).expect("component");
        assert!(d.has_intent_filter);
        assert!(d.is_main_activity);
        assert_eq!(d.tag.kind(), ComponentKind::Activity);
        assert_eq!(d.launch_mode.as_deref(), Some("singleTask"));
    }

    #[test]
    fn non_component_tags_are_ignored() {
        let node = ManifestNode::new("meta-data");
        assert!(ComponentDescriptor::from_node(&node, "android", None).is_none());
    }

    #[test]
    fn input_defaults_namespace() {
        let input: AnalysisInput =
            serde_json::from_str(r#"{"manifest":{"tag":"manifest"}}"#).expect("parse input");
        assert_eq!(input.namespace, DEFAULT_NAMESPACE);
        assert_eq!(input.sdk, SdkBounds::default());
        assert!(input.manifest.children.is_empty());
    }
}
