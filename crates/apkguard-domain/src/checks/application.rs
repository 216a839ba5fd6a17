use crate::model::{ApplicationDefaults, BoolAttr};
use apkguard_types::{ExposureFinding, ids};

/// One-way latch set by the first application with `allowBackup="false"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackupLatch {
    disabled: bool,
}

impl BackupLatch {
    pub fn is_set(&self) -> bool {
        self.disabled
    }
}

pub fn run(app: &ApplicationDefaults, latch: &mut BackupLatch, out: &mut Vec<ExposureFinding>) {
    if app.uses_cleartext_traffic {
        out.push(ExposureFinding::bare(ids::RULE_CLEAR_TEXT_TRAFFIC));
    }
    if app.direct_boot_aware {
        out.push(ExposureFinding::bare(ids::RULE_DIRECT_BOOT_AWARE));
    }
    if let Some(config) = app.network_security_config.as_deref() {
        out.push(ExposureFinding::new(
            ids::RULE_HAS_NETWORK_SECURITY,
            vec![config.to_string()],
            Vec::new(),
        ));
    }
    if app.debuggable {
        out.push(ExposureFinding::bare(ids::RULE_APP_IS_DEBUGGABLE));
    }
    match app.allow_backup {
        BoolAttr::True => out.push(ExposureFinding::bare(ids::RULE_APP_ALLOWBACKUP)),
        BoolAttr::False => latch.disabled = true,
        BoolAttr::Unset if !latch.disabled => {
            out.push(ExposureFinding::bare(ids::RULE_ALLOWBACKUP_NOT_SET))
        }
        BoolAttr::Unset => {}
    }
    if app.test_only {
        out.push(ExposureFinding::bare(ids::RULE_APP_IN_TEST_MODE));
    }
}
