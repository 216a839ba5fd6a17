//! Stable identifiers for manifest rules.
//!
//! Rule keys are snake_case and double as template keys in [`crate::templates`].

// Platform
pub const RULE_VULNERABLE_OS_VERSION: &str = "vulnerable_os_version";
pub const RULE_VULNERABLE_OS_VERSION2: &str = "vulnerable_os_version2";

// Application flags
pub const RULE_CLEAR_TEXT_TRAFFIC: &str = "clear_text_traffic";
pub const RULE_DIRECT_BOOT_AWARE: &str = "direct_boot_aware";
pub const RULE_HAS_NETWORK_SECURITY: &str = "has_network_security";
pub const RULE_APP_IS_DEBUGGABLE: &str = "app_is_debuggable";
pub const RULE_APP_ALLOWBACKUP: &str = "app_allowbackup";
pub const RULE_ALLOWBACKUP_NOT_SET: &str = "allowbackup_not_set";
pub const RULE_APP_IN_TEST_MODE: &str = "app_in_test_mode";

// Activities
pub const RULE_WELL_KNOWN_ASSETLINKS: &str = "well_known_assetlinks";
pub const RULE_TASK_AFFINITY_SET: &str = "task_affinity_set";
pub const RULE_NON_STANDARD_LAUNCHMODE: &str = "non_standard_launchmode";
pub const RULE_TASK_HIJACKING: &str = "task_hijacking";
pub const RULE_TASK_HIJACKING2: &str = "task_hijacking2";

// Explicit or intent-filter exposure, component-level permission
pub const RULE_EXPORTED_PERMISSION_NORMAL: &str = "exported_protected_permission_normal";
pub const RULE_EXPORTED_PERMISSION_DANGEROUS: &str = "exported_protected_permission_dangerous";
pub const RULE_EXPORTED_PERMISSION_SIGNATURE: &str = "exported_protected_permission_signature";
pub const RULE_EXPORTED_PERMISSION_SIGNATURE_OR_SYSTEM: &str =
    "exported_protected_permission_signatureorsystem";
pub const RULE_EXPORTED_PERMISSION_NOT_DEFINED: &str = "exported_protected_permission_not_defined";

// Explicit or intent-filter exposure, application-level permission
pub const RULE_EXPORTED_PERMISSION_NORMAL_APP: &str = "exported_protected_permission_normal_app_level";
pub const RULE_EXPORTED_PERMISSION_DANGEROUS_APP: &str =
    "exported_protected_permission_dangerous_app_level";
pub const RULE_EXPORTED_PERMISSION_SIGNATURE_APP: &str = "exported_protected_permission";
pub const RULE_EXPORTED_PERMISSION_SIGNATURE_OR_SYSTEM_APP: &str =
    "exported_protected_permission_signatureorsystem_app_level";
pub const RULE_EXPORTED_PERMISSION_UNKNOWN_APP: &str = "exported_protected_permission_app_level";

// Unprotected exposure
pub const RULE_EXPLICITLY_EXPORTED: &str = "explicitly_exported";
pub const RULE_EXPORTED_INTENT_FILTER: &str = "exported_intent_filter_exists";

// Providers exported by default (targetSdk < 17)
pub const RULE_PROVIDER: &str = "exported_provider";
pub const RULE_PROVIDER_NORMAL: &str = "exported_provider_normal";
pub const RULE_PROVIDER_DANGEROUS: &str = "exported_provider_danger";
pub const RULE_PROVIDER_SIGNATURE: &str = "exported_provider_signature";
pub const RULE_PROVIDER_SIGNATURE_OR_SYSTEM: &str = "exported_provider_signatureorsystem";
pub const RULE_PROVIDER_UNKNOWN: &str = "exported_provider_unknown";
pub const RULE_PROVIDER_NORMAL_APP: &str = "exported_provider_normal_app";
pub const RULE_PROVIDER_DANGEROUS_APP: &str = "exported_provider_danger_appl";
pub const RULE_PROVIDER_SIGNATURE_APP: &str = "exported_provider_signature_appl";
pub const RULE_PROVIDER_SIGNATURE_OR_SYSTEM_APP: &str = "exported_provider_signatureorsystem_app";
pub const RULE_PROVIDER_UNKNOWN_APP: &str = "exported_provider_unknown_app";

// Providers exported by default on old platforms (minSdk < 17, targetSdk >= 17)
pub const RULE_PROVIDER_NEW: &str = "exported_provider_2";
pub const RULE_PROVIDER_NORMAL_NEW: &str = "exported_provider_normal_new";
pub const RULE_PROVIDER_DANGEROUS_NEW: &str = "exported_provider_danger_new";
pub const RULE_PROVIDER_SIGNATURE_NEW: &str = "exported_provider_signature_new";
pub const RULE_PROVIDER_SIGNATURE_OR_SYSTEM_NEW: &str = "exported_provider_signatureorsystem_new";
pub const RULE_PROVIDER_UNKNOWN_NEW: &str = "exported_provider_unknown_new";
pub const RULE_PROVIDER_NORMAL_APP_NEW: &str = "exported_provider_normal_app_new";
pub const RULE_PROVIDER_DANGEROUS_APP_NEW: &str = "exported_provider_danger_app_new";
pub const RULE_PROVIDER_SIGNATURE_APP_NEW: &str = "exported_provider_signature_app_new";
pub const RULE_PROVIDER_SIGNATURE_OR_SYSTEM_APP_NEW: &str =
    "exported_provider_signatureorsystem_app_new";
pub const RULE_PROVIDER_UNKNOWN_APP_NEW: &str = "exported_provider_unknown_app_new";

// Manifest-wide
pub const RULE_IMPROPER_PROVIDER_PERMISSION: &str = "improper_provider_permission";
pub const RULE_DIALER_CODE_FOUND: &str = "dialer_code_found";
pub const RULE_SMS_RECEIVER_PORT_FOUND: &str = "sms_receiver_port_found";
pub const RULE_HIGH_INTENT_PRIORITY_FOUND: &str = "high_intent_priority_found";
pub const RULE_HIGH_ACTION_PRIORITY_FOUND: &str = "high_action_priority_found";
