//! Exported-component resolution as a decision table over `(route, protection)`.

use crate::model::{ApplicationDefaults, BoolAttr, ComponentDescriptor, ComponentTag, SdkBounds};
use crate::registry::{PermissionRegistry, ProtectionTier};
use apkguard_types::ids;
use apkguard_types::sdk::ANDROID_4_2_LEVEL;
use apkguard_types::ExposureFinding;

/// How a component came to be reachable from other applications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportRoute {
    Explicit,
    IntentFilter,
    /// Provider exported by default: `min_sdk < 17` and `target_sdk < 17`.
    LegacyProvider,
    /// Provider exported by default on old platforms only: `min_sdk < 17 <= target_sdk`.
    ProviderNewTarget,
}

/// The permission guarding an exported component. Component scope never falls back to
/// application scope, even when the component permission is unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protection {
    Component(ProtectionTier),
    ComponentUnknown,
    App(ProtectionTier),
    AppUnknown,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportDecision {
    pub rule_key: &'static str,
    /// Whether the component counts as exported for its kind.
    pub counted: bool,
}

/// Outcome of classifying one component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentExposure {
    pub route: ExportRoute,
    pub decision: ExportDecision,
    pub finding: ExposureFinding,
}

impl ComponentExposure {
    /// Counted activity exposures on the explicit and intent-filter routes.
    pub fn lists_activity(&self, component: &ComponentDescriptor) -> bool {
        self.decision.counted
            && component.tag.kind() == crate::model::ComponentKind::Activity
            && matches!(self.route, ExportRoute::Explicit | ExportRoute::IntentFilter)
    }
}

pub fn export_route(component: &ComponentDescriptor, sdk: SdkBounds) -> Option<ExportRoute> {
    match component.exported {
        BoolAttr::True if component.is_main_activity => None,
        BoolAttr::True => Some(ExportRoute::Explicit),
        BoolAttr::False => None,
        BoolAttr::Unset if component.has_intent_filter => {
            (!component.is_main_activity).then_some(ExportRoute::IntentFilter)
        }
        BoolAttr::Unset => {
            if component.tag != ComponentTag::Provider {
                return None;
            }
            let (Some(min), Some(target)) = (sdk.min_sdk, sdk.target_sdk) else {
                return None;
            };
            if min >= ANDROID_4_2_LEVEL {
                return None;
            }
            if target < ANDROID_4_2_LEVEL {
                Some(ExportRoute::LegacyProvider)
            } else {
                Some(ExportRoute::ProviderNewTarget)
            }
        }
    }
}

pub fn resolve_protection(
    component: &ComponentDescriptor,
    app: &ApplicationDefaults,
    registry: &PermissionRegistry,
) -> Protection {
    if let Some(perm) = component.permission.as_deref() {
        return match registry.tier(perm) {
            Some(tier) => Protection::Component(tier),
            None => Protection::ComponentUnknown,
        };
    }
    if let Some(perm) = app.permission.as_deref() {
        return match registry.tier(perm) {
            Some(tier) => Protection::App(tier),
            None => Protection::AppUnknown,
        };
    }
    Protection::None
}

pub fn decide(route: ExportRoute, protection: Protection) -> ExportDecision {
    use ExportRoute::{Explicit, IntentFilter, LegacyProvider, ProviderNewTarget};
    use ProtectionTier::{Dangerous, Normal, Signature, SignatureOrSystem};

    let rule_key = match (route, protection) {
        (Explicit | IntentFilter, Protection::Component(Normal)) => ids::RULE_EXPORTED_PERMISSION_NORMAL,
        (Explicit | IntentFilter, Protection::Component(Dangerous)) => {
            ids::RULE_EXPORTED_PERMISSION_DANGEROUS
        }
        (Explicit | IntentFilter, Protection::Component(Signature)) => {
            ids::RULE_EXPORTED_PERMISSION_SIGNATURE
        }
        (Explicit | IntentFilter, Protection::Component(SignatureOrSystem)) => {
            ids::RULE_EXPORTED_PERMISSION_SIGNATURE_OR_SYSTEM
        }
        (Explicit | IntentFilter, Protection::ComponentUnknown) => {
            ids::RULE_EXPORTED_PERMISSION_NOT_DEFINED
        }
        (Explicit | IntentFilter, Protection::App(Normal)) => ids::RULE_EXPORTED_PERMISSION_NORMAL_APP,
        (Explicit | IntentFilter, Protection::App(Dangerous)) => {
            ids::RULE_EXPORTED_PERMISSION_DANGEROUS_APP
        }
        (Explicit | IntentFilter, Protection::App(Signature)) => {
            ids::RULE_EXPORTED_PERMISSION_SIGNATURE_APP
        }
        (Explicit | IntentFilter, Protection::App(SignatureOrSystem)) => {
            ids::RULE_EXPORTED_PERMISSION_SIGNATURE_OR_SYSTEM_APP
        }
        (Explicit | IntentFilter, Protection::AppUnknown) => ids::RULE_EXPORTED_PERMISSION_UNKNOWN_APP,
        (Explicit, Protection::None) => ids::RULE_EXPLICITLY_EXPORTED,
        (IntentFilter, Protection::None) => ids::RULE_EXPORTED_INTENT_FILTER,

        (LegacyProvider, Protection::Component(Normal)) => ids::RULE_PROVIDER_NORMAL,
        (LegacyProvider, Protection::Component(Dangerous)) => ids::RULE_PROVIDER_DANGEROUS,
        (LegacyProvider, Protection::Component(Signature)) => ids::RULE_PROVIDER_SIGNATURE,
        (LegacyProvider, Protection::Component(SignatureOrSystem)) => {
            ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM
        }
        (LegacyProvider, Protection::ComponentUnknown) => ids::RULE_PROVIDER_UNKNOWN,
        (LegacyProvider, Protection::App(Normal)) => ids::RULE_PROVIDER_NORMAL_APP,
        (LegacyProvider, Protection::App(Dangerous)) => ids::RULE_PROVIDER_DANGEROUS_APP,
        (LegacyProvider, Protection::App(Signature)) => ids::RULE_PROVIDER_SIGNATURE_APP,
        (LegacyProvider, Protection::App(SignatureOrSystem)) => {
            ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM_APP
        }
        (LegacyProvider, Protection::AppUnknown) => ids::RULE_PROVIDER_UNKNOWN_APP,
        (LegacyProvider, Protection::None) => ids::RULE_PROVIDER,

        (ProviderNewTarget, Protection::Component(Normal)) => ids::RULE_PROVIDER_NORMAL_NEW,
        (ProviderNewTarget, Protection::Component(Dangerous)) => ids::RULE_PROVIDER_DANGEROUS_NEW,
        (ProviderNewTarget, Protection::Component(Signature)) => ids::RULE_PROVIDER_SIGNATURE_NEW,
        (ProviderNewTarget, Protection::Component(SignatureOrSystem)) => {
            ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM_NEW
        }
        (ProviderNewTarget, Protection::ComponentUnknown) => ids::RULE_PROVIDER_UNKNOWN_NEW,
        (ProviderNewTarget, Protection::App(Normal)) => ids::RULE_PROVIDER_NORMAL_APP_NEW,
        (ProviderNewTarget, Protection::App(Dangerous)) => ids::RULE_PROVIDER_DANGEROUS_APP_NEW,
        (ProviderNewTarget, Protection::App(Signature)) => ids::RULE_PROVIDER_SIGNATURE_APP_NEW,
        (ProviderNewTarget, Protection::App(SignatureOrSystem)) => {
            ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM_APP_NEW
        }
        (ProviderNewTarget, Protection::AppUnknown) => ids::RULE_PROVIDER_UNKNOWN_APP_NEW,
        (ProviderNewTarget, Protection::None) => ids::RULE_PROVIDER_NEW,
    };

    // Signature-tier protection is trusted; everything else counts as exported.
    let counted = !matches!(
        protection,
        Protection::Component(Signature | SignatureOrSystem)
            | Protection::App(Signature | SignatureOrSystem)
    );

    ExportDecision { rule_key, counted }
}

/// Classify one component. `None` when it is not exported (or exempt as the main activity).
pub fn classify_component(
    component: &ComponentDescriptor,
    app: &ApplicationDefaults,
    registry: &PermissionRegistry,
    sdk: SdkBounds,
) -> Option<ComponentExposure> {
    let route = export_route(component, sdk)?;
    let protection = resolve_protection(component, app, registry);
    let decision = decide(route, protection);

    let label = component.tag.label().to_string();
    let mut component_args = vec![label.clone(), component.name.clone()];
    if let Some(text) = permission_text(component, app, protection) {
        component_args.push(text);
    }

    let mut extra_args = vec![component.tag.article_suffix().to_string(), label.clone()];
    if decision.rule_key == ids::RULE_EXPORTED_INTENT_FILTER {
        extra_args.push(label);
    }

    Some(ComponentExposure {
        route,
        decision,
        finding: ExposureFinding::new(decision.rule_key, component_args, extra_args),
    })
}

fn permission_text(
    component: &ComponentDescriptor,
    app: &ApplicationDefaults,
    protection: Protection,
) -> Option<String> {
    let (name, tier) = match protection {
        Protection::Component(tier) => (component.permission.as_deref()?, Some(tier)),
        Protection::ComponentUnknown => (component.permission.as_deref()?, None),
        Protection::App(tier) => (app.permission.as_deref()?, Some(tier)),
        Protection::AppUnknown => (app.permission.as_deref()?, None),
        Protection::None => return None,
    };
    Some(match tier {
        Some(tier) => format!("Permission: {name}, protectionLevel: {}", tier.as_str()),
        None => format!("Permission: {name}"),
    })
}
