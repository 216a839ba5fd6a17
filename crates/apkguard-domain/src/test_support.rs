use crate::links::{AssetLinkFetcher, FetchError, FetchedResponse};
use crate::model::{ApplicationDefaults, BoolAttr, ComponentDescriptor, ComponentTag, ManifestNode};
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

pub fn node(tag: &str, attrs: &[(&str, &str)]) -> ManifestNode {
    attrs
        .iter()
        .fold(ManifestNode::new(tag), |n, (k, v)| n.with_attr(k, v))
}

pub fn data(attrs: &[(&str, &str)]) -> ManifestNode {
    node("data", attrs)
}

pub fn browsable_filter(data: Vec<ManifestNode>) -> ManifestNode {
    let filter = node("intent-filter", &[])
        .with_child(node("action", &[("android:name", "android.intent.action.VIEW")]))
        .with_child(node("category", &[("android:name", "android.intent.category.BROWSABLE")]));
    data.into_iter().fold(filter, |f, d| f.with_child(d))
}

/// `<manifest>` with the given `<permission>` declarations and one `<application>`.
pub fn manifest(permissions: Vec<ManifestNode>, application: ManifestNode) -> ManifestNode {
    permissions
        .into_iter()
        .fold(ManifestNode::new("manifest"), |m, p| m.with_child(p))
        .with_child(application)
}

pub fn permission(name: &str, code: Option<&str>) -> ManifestNode {
    match code {
        Some(code) => node(
            "permission",
            &[("android:name", name), ("android:protectionLevel", code)],
        ),
        None => node("permission", &[("android:name", name)]),
    }
}

pub fn component(tag: ComponentTag, name: &str) -> ComponentDescriptor {
    ComponentDescriptor {
        tag,
        name: name.to_string(),
        exported: BoolAttr::Unset,
        permission: None,
        has_intent_filter: false,
        is_main_activity: false,
        launch_mode: None,
        task_affinity: None,
    }
}

pub fn app_defaults() -> ApplicationDefaults {
    ApplicationDefaults {
        permission: None,
        allow_backup: BoolAttr::False,
        uses_cleartext_traffic: false,
        debuggable: false,
        direct_boot_aware: false,
        network_security_config: None,
        test_only: false,
    }
}

/// Canned responses keyed by URL; records every request in order.
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Result<(u16, String), String>>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), Ok((status, body.to_string())));
        self
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.responses
            .insert(url.to_string(), Err("connection refused".to_string()));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("lock").clone()
    }
}

impl AssetLinkFetcher for FakeFetcher {
    fn fetch(&self, url: &Url) -> Result<FetchedResponse, FetchError> {
        self.requested.lock().expect("lock").push(url.to_string());
        match self.responses.get(url.as_str()) {
            Some(Ok((status, body))) => Ok(FetchedResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(Err(message)) => Err(FetchError::Transport {
                url: url.to_string(),
                message: message.clone(),
            }),
            None => Ok(FetchedResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}
