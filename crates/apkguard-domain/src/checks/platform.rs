use crate::model::SdkBounds;
use apkguard_types::sdk::{ANDROID_8_0_LEVEL, ANDROID_10_0_LEVEL, android_version_label};
use apkguard_types::{ExposureFinding, ids};

/// Minimum-SDK warning. At most one of the two rules fires.
pub fn run(sdk: SdkBounds, out: &mut Vec<ExposureFinding>) {
    let Some(min) = sdk.min_sdk else { return };

    let rule = if min < ANDROID_8_0_LEVEL {
        ids::RULE_VULNERABLE_OS_VERSION
    } else if min < ANDROID_10_0_LEVEL {
        ids::RULE_VULNERABLE_OS_VERSION2
    } else {
        return;
    };

    out.push(ExposureFinding::new(
        rule,
        vec![android_version_label(min).to_string(), min.to_string()],
        Vec::new(),
    ));
}
