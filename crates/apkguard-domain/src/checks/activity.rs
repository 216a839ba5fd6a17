use crate::model::{BoolAttr, ComponentDescriptor, SdkBounds};
use apkguard_types::sdk::{ANDROID_5_0_LEVEL, ANDROID_8_0_LEVEL, ANDROID_9_0_LEVEL, ANDROID_10_0_LEVEL};
use apkguard_types::{ExposureFinding, ids};

const SINGLE_TASK: &str = "singleTask";
const SINGLE_INSTANCE: &str = "singleInstance";

/// Target SDK used by the task hijacking checks: target, else min, else API 26.
pub fn effective_target(sdk: SdkBounds) -> u32 {
    sdk.target_sdk.or(sdk.min_sdk).unwrap_or(ANDROID_8_0_LEVEL)
}

/// Launch mode and task affinity checks. Link-verification findings come before these and
/// are produced by the engine.
pub fn run(activity: &ComponentDescriptor, sdk: SdkBounds, out: &mut Vec<ExposureFinding>) {
    let name = || vec![activity.name.clone()];
    let launch_mode = activity.launch_mode.as_deref();

    if activity.task_affinity.is_some() {
        out.push(ExposureFinding::new(ids::RULE_TASK_AFFINITY_SET, name(), Vec::new()));
    }

    // Unknown min_sdk is assumed vulnerable.
    let affected_sdk = sdk.min_sdk.is_none_or(|min| min < ANDROID_5_0_LEVEL);
    if affected_sdk && matches!(launch_mode, Some(SINGLE_TASK | SINGLE_INSTANCE)) {
        out.push(ExposureFinding::new(ids::RULE_NON_STANDARD_LAUNCHMODE, name(), Vec::new()));
    }

    let target = effective_target(sdk);
    if target < ANDROID_9_0_LEVEL && launch_mode == Some(SINGLE_TASK) {
        out.push(ExposureFinding::new(
            ids::RULE_TASK_HIJACKING,
            name(),
            vec![target.to_string()],
        ));
    }

    if target < ANDROID_10_0_LEVEL
        && activity.exported == BoolAttr::True
        && (launch_mode != Some(SINGLE_INSTANCE) || activity.task_affinity.is_some())
    {
        out.push(ExposureFinding::new(
            ids::RULE_TASK_HIJACKING2,
            name(),
            vec![target.to_string()],
        ));
    }
}
