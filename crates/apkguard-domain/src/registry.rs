//! Permission name to protection tier lookup, built once per manifest.

use crate::model::ManifestNode;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProtectionTier {
    Normal,
    Dangerous,
    Signature,
    SignatureOrSystem,
}

impl ProtectionTier {
    /// Compiled `protectionLevel` codes. Any other code is unrecognized.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0x00000000" => Some(ProtectionTier::Normal),
            "0x00000001" => Some(ProtectionTier::Dangerous),
            "0x00000002" => Some(ProtectionTier::Signature),
            "0x00000003" => Some(ProtectionTier::SignatureOrSystem),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProtectionTier::Normal => "normal",
            ProtectionTier::Dangerous => "dangerous",
            ProtectionTier::Signature => "signature",
            ProtectionTier::SignatureOrSystem => "signatureOrSystem",
        }
    }
}

/// A `<permission>` declaration as found in the manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredPermission {
    pub name: Option<String>,
    pub protection_level: Option<String>,
}

impl DeclaredPermission {
    pub fn from_node(node: &ManifestNode, ns: &str) -> Self {
        Self {
            name: node.attr(ns, "name").map(str::to_string),
            protection_level: node.attr(ns, "protectionLevel").map(str::to_string),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermissionRecord {
    pub name: String,
    pub tier: ProtectionTier,
}

#[derive(Clone, Debug, Default)]
pub struct PermissionRegistry {
    tiers: BTreeMap<String, ProtectionTier>,
}

impl PermissionRegistry {
    pub fn tier(&self, name: &str) -> Option<ProtectionTier> {
        self.tiers.get(name).copied()
    }

    pub fn records(&self) -> Vec<PermissionRecord> {
        self.tiers
            .iter()
            .map(|(name, tier)| PermissionRecord {
                name: name.clone(),
                tier: *tier,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Build the registry. The last declaration of a name wins; a declaration with an
/// unrecognized code leaves the name unknown. Nameless declarations are skipped.
pub fn build_registry(declared: &[DeclaredPermission]) -> PermissionRegistry {
    let mut tiers = BTreeMap::new();

    for decl in declared {
        let Some(name) = decl.name.as_deref() else {
            continue;
        };
        let tier = match decl.protection_level.as_deref() {
            Some(code) => ProtectionTier::from_code(code),
            None => Some(ProtectionTier::Normal),
        };
        match tier {
            Some(tier) => {
                tiers.insert(name.to_string(), tier);
            }
            None => {
                tiers.remove(name);
            }
        }
    }

    PermissionRegistry { tiers }
}

/// Collect every `<permission>` element in the document.
pub fn declared_permissions(root: &ManifestNode, ns: &str) -> Vec<DeclaredPermission> {
    root.descendants("permission")
        .into_iter()
        .map(|n| DeclaredPermission::from_node(n, ns))
        .collect()
}
