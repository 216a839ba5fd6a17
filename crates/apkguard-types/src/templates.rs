//! Rule template registry.
//!
//! Maps rule keys to the title, name, description, and severity used to render a finding.
//! Titles and names substitute the finding's component arguments (`{0}`, `{1}`, ...);
//! descriptions substitute its extra arguments.

use crate::ids;
use crate::receipt::{ExposureFinding, Finding, Severity};

/// Rendering template for a single rule key.
#[derive(Debug, Clone, Copy)]
pub struct RuleTemplate {
    pub title: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
}

const fn template(
    severity: Severity,
    title: &'static str,
    name: &'static str,
    description: &'static str,
) -> RuleTemplate {
    RuleTemplate {
        title,
        name,
        description,
        severity,
    }
}

// Shared descriptions for the exported-component rules. Extra args: (article, kind).
const DESC_PERMISSION_NORMAL: &str = "\
A{0} {1} is found to be shared with other apps on the device therefore leaving it accessible \
to any other application on the device. It is protected by a permission. However, the \
protection level of the permission is set to normal. This means that a malicious application \
can request and obtain the permission and interact with the component. If it was set to \
signature, only applications signed with the same certificate could obtain the permission.";

const DESC_PERMISSION_DANGEROUS: &str = "\
A{0} {1} is found to be shared with other apps on the device therefore leaving it accessible \
to any other application on the device. It is protected by a permission. However, the \
protection level of the permission is set to dangerous. This means that a malicious \
application can request and obtain the permission and interact with the component. If it was \
set to signature, only applications signed with the same certificate could obtain the \
permission.";

const DESC_PERMISSION_SIGNATURE: &str = "\
A{0} {1} is found to be exported, but is protected by a permission with protection level \
signature. Only applications signed with the same certificate can obtain the permission.";

const DESC_PERMISSION_SIGNATURE_OR_SYSTEM: &str = "\
A{0} {1} is found to be exported, but is protected by a permission with protection level \
signatureOrSystem. Only applications signed with the same certificate or installed in the \
system image can obtain the permission. The signature level is recommended instead, because \
system-image applications are outside the developer's control.";

const DESC_PERMISSION_NOT_DEFINED: &str = "\
A{0} {1} is found to be shared with other apps on the device therefore leaving it accessible \
to any other application on the device. It is protected by a permission which is not defined \
in the analysed application. As a result, the protection level of the permission should be \
checked where it is defined. If it is set to normal or dangerous, a malicious application can \
request and obtain the permission and interact with the component.";

const DESC_UNPROTECTED: &str = "\
A{0} {1} is found to be shared with other apps on the device therefore leaving it accessible \
to any other application on the device.";

const DESC_INTENT_FILTER: &str = "\
A{0} {1} is found to be shared with other apps on the device therefore leaving it accessible \
to any other application on the device. The presence of an intent-filter indicates that the \
{2} is explicitly exported.";

const DESC_DEFAULT_EXPORT_LEGACY: &str = "\
A{0} {1} would be exported by default on devices running API level 16 or lower, because the \
application targets an API level below 17 and the provider does not set android:exported.";

const DESC_DEFAULT_EXPORT_NEW_TARGET: &str = "\
A{0} {1} would be exported by default on devices running API level 16 or lower. The \
application targets API level 17 or higher, where providers are private by default, but its \
minimum SDK still allows installation on older platforms that export it. Set \
android:exported explicitly.";

const TITLE_PERMISSION_CHECK: &str = "\
<b>{0}</b> ({1}) is protected by a permission, but the protection level of the permission \
should be checked. [{2}]";
const TITLE_PERMISSION_CHECK_APP: &str = "\
<b>{0}</b> ({1}) is protected by a permission at the application level, but the protection \
level of the permission should be checked. [{2}]";
const TITLE_PERMISSION_OK: &str = "<b>{0}</b> ({1}) is protected by a permission. [{2}]";
const TITLE_PERMISSION_OK_APP: &str =
    "<b>{0}</b> ({1}) is protected by a permission at the application level. [{2}]";
const TITLE_UNPROTECTED: &str = "<b>{0}</b> ({1}) is not protected.";
const TITLE_DEFAULT_EXPORT: &str = "\
<b>{0}</b> ({1}) would not be protected if the application ran on a device where it is \
exported by default.";
const TITLE_DEFAULT_EXPORT_PERMISSION: &str = "\
<b>{0}</b> ({1}) is protected by a permission, which may be weak if the component is \
exported by default. [{2}]";
const TITLE_DEFAULT_EXPORT_PERMISSION_OK: &str = "\
<b>{0}</b> ({1}) is protected by a permission if exported by default. [{2}]";

const NAME_PERMISSION: &str = "{0} ({1}) is protected by a permission.";
const NAME_UNPROTECTED: &str = "{0} ({1}) is not protected.";

/// Look up the rendering template for a rule key.
///
/// Returns `None` if the rule key is not recognized.
pub fn lookup_template(rule_key: &str) -> Option<RuleTemplate> {
    use Severity::{High, Info, Warning};

    let t = match rule_key {
        // Platform
        ids::RULE_VULNERABLE_OS_VERSION => template(
            High,
            "App can be installed on a vulnerable unpatched Android version Android {0}, [minSdk={1}]",
            "App can be installed on a vulnerable unpatched Android version {0}, [minSdk={1}]",
            "\
This application can be installed on an older version of Android that has multiple \
unfixed vulnerabilities. These devices won't receive reasonable security updates from \
Google. Support an Android version above 8.0, API 26 to receive reasonable security updates.",
        ),
        ids::RULE_VULNERABLE_OS_VERSION2 => template(
            Warning,
            "App can be installed on an older Android version Android {0}, [minSdk={1}]",
            "App can be installed on an older Android version {0}, [minSdk={1}]",
            "\
This application can be installed on an older version of Android that has multiple \
vulnerabilities. Support an Android version above 10, API 29 to receive reasonable \
security updates.",
        ),

        // Application flags
        ids::RULE_CLEAR_TEXT_TRAFFIC => template(
            High,
            "Clear text traffic is Enabled For App<br>[android:usesCleartextTraffic=true]",
            "Clear text traffic is Enabled For App [android:usesCleartextTraffic=true]",
            "\
The app intends to use cleartext network traffic, such as cleartext HTTP, FTP stacks, \
DownloadManager, and MediaPlayer. Cleartext traffic lacks confidentiality, authenticity, \
and protections against tampering; a network attacker can eavesdrop on transmitted data \
and also modify it without being detected.",
        ),
        ids::RULE_DIRECT_BOOT_AWARE => template(
            Info,
            "App is direct-boot aware <br>[android:directBootAware=true]",
            "App is direct-boot aware [android:directBootAware=true]",
            "\
This app can run before the user unlocks the device. Data stored in device-protected \
storage is available during direct boot; make sure nothing sensitive is kept there.",
        ),
        ids::RULE_HAS_NETWORK_SECURITY => template(
            Info,
            "App has a Network Security Configuration<br>[android:networkSecurityConfig={0}]",
            "App has a Network Security Configuration [android:networkSecurityConfig={0}]",
            "\
The Network Security Configuration feature lets apps customize their network security \
settings in a safe, declarative configuration file without modifying app code. These \
settings can be configured for specific domains and for a specific app.",
        ),
        ids::RULE_APP_IS_DEBUGGABLE => template(
            High,
            "Debug Enabled For App<br>[android:debuggable=true]",
            "Debug Enabled For App [android:debuggable=true]",
            "\
Debugging was enabled on the app which makes it easier for reverse engineers to hook a \
debugger to it. This allows dumping a stack trace and accessing debugging helper classes.",
        ),
        ids::RULE_APP_ALLOWBACKUP => template(
            Warning,
            "Application Data can be Backed up<br>[android:allowBackup=true]",
            "Application Data can be Backed up [android:allowBackup=true]",
            "\
This flag allows anyone to backup your application data via adb. It allows users who have \
enabled USB debugging to copy application data off of the device.",
        ),
        ids::RULE_ALLOWBACKUP_NOT_SET => template(
            Warning,
            "Application Data can be Backed up<br>[android:allowBackup] flag is missing.",
            "Application Data can be Backed up [android:allowBackup] flag is missing.",
            "\
The flag [android:allowBackup] should be set to false. By default it is set to true and \
allows anyone to backup your application data via adb. It allows users who have enabled \
USB debugging to copy application data off of the device.",
        ),
        ids::RULE_APP_IN_TEST_MODE => template(
            High,
            "Application is in Test Mode <br>[android:testOnly=true]",
            "Application is in Test Mode [android:testOnly=true]",
            "\
The application is marked as test only. It may expose functionality or data outside of \
itself that would cause a security hole.",
        ),

        // Activities
        ids::RULE_WELL_KNOWN_ASSETLINKS => template(
            High,
            "App Link assetlinks.json file not found<br>[android:name={0}]<br>[android:host={1}]",
            "App Link assetlinks.json file not found [android:name={0}] [android:host={1}]",
            "\
App Link asset verification URL ({0}) not found or configured incorrectly. (Status Code: \
{1}). App Links allow users to be redirected from a web URL or email to the mobile app. If \
the assetlinks.json file is missing or misconfigured for the host or domain, a malicious \
app can hijack such URLs. This may lead to phishing attacks and leak sensitive data in the \
URI, such as PII, OAuth tokens, and magic-link or password-reset tokens. Verify the App \
Link domain by hosting the assetlinks.json file and enable verification via \
[android:autoVerify=\"true\"] in the activity intent-filter.",
        ),
        ids::RULE_TASK_AFFINITY_SET => template(
            Warning,
            "TaskAffinity is set for activity <br>(<b>{0}</b>)",
            "TaskAffinity is set for activity ({0})",
            "\
If taskAffinity is set, then other applications could read the Intents sent to Activities \
belonging to another task. Always use the default setting, keeping the affinity as the \
package name, in order to prevent sensitive information inside sent or received Intents \
from being read by another application.",
        ),
        ids::RULE_NON_STANDARD_LAUNCHMODE => template(
            Warning,
            "Launch Mode of activity (<b>{0}</b>) is not standard.",
            "Launch Mode of activity ({0}) is not standard.",
            "\
An Activity should not have the launch mode attribute set to \"singleTask\" or \
\"singleInstance\" as it becomes the root Activity and it is possible for other \
applications to read the contents of the calling Intent. The \"standard\" launch mode is \
required when sensitive information is included in an Intent.",
        ),
        ids::RULE_TASK_HIJACKING => template(
            High,
            "Activity (<b>{0}</b>) is vulnerable to Android Task Hijacking/StrandHogg.",
            "Activity ({0}) is vulnerable to Android Task Hijacking/StrandHogg.",
            "\
An Activity should not have the launch mode attribute set to \"singleTask\". It is then \
possible for other applications to place a malicious activity on top of the activity stack \
resulting in Task Hijacking/StrandHogg 1.0 vulnerability. This makes the application an \
easy target for phishing attacks. The vulnerability can be remediated by either setting the \
launch mode attribute to \"singleInstance\" or by setting an empty taskAffinity \
(taskAffinity=\"\") attribute. You can also update the target SDK version ({0}) of the app to \
28 or higher to fix this issue at platform level.",
        ),
        ids::RULE_TASK_HIJACKING2 => template(
            High,
            "Activity (<b>{0}</b>) is vulnerable to StrandHogg 2.0",
            "Activity ({0}) is vulnerable to StrandHogg 2.0",
            "\
Activity is found to be vulnerable to StrandHogg 2.0 task hijacking vulnerability. When \
vulnerable, it is possible for other applications to place a malicious activity on top of \
the activity stack of the vulnerable application. This makes the application an easy target \
for phishing attacks. The vulnerability can be remediated by setting the launch mode \
attribute to \"singleInstance\" and by setting an empty taskAffinity (taskAffinity=\"\"). \
You can also update the target SDK version ({0}) of the app to 29 or higher to fix this \
issue at platform level.",
        ),

        // Explicit or intent-filter exposure, component-level permission
        ids::RULE_EXPORTED_PERMISSION_NORMAL => {
            template(Warning, TITLE_PERMISSION_CHECK, NAME_PERMISSION, DESC_PERMISSION_NORMAL)
        }
        ids::RULE_EXPORTED_PERMISSION_DANGEROUS => template(
            Warning,
            TITLE_PERMISSION_CHECK,
            NAME_PERMISSION,
            DESC_PERMISSION_DANGEROUS,
        ),
        ids::RULE_EXPORTED_PERMISSION_SIGNATURE => {
            template(Info, TITLE_PERMISSION_OK, NAME_PERMISSION, DESC_PERMISSION_SIGNATURE)
        }
        ids::RULE_EXPORTED_PERMISSION_SIGNATURE_OR_SYSTEM => template(
            Warning,
            TITLE_PERMISSION_OK,
            NAME_PERMISSION,
            DESC_PERMISSION_SIGNATURE_OR_SYSTEM,
        ),
        ids::RULE_EXPORTED_PERMISSION_NOT_DEFINED => template(
            Warning,
            TITLE_PERMISSION_CHECK,
            NAME_PERMISSION,
            DESC_PERMISSION_NOT_DEFINED,
        ),

        // Explicit or intent-filter exposure, application-level permission
        ids::RULE_EXPORTED_PERMISSION_NORMAL_APP => template(
            Warning,
            TITLE_PERMISSION_CHECK_APP,
            NAME_PERMISSION,
            DESC_PERMISSION_NORMAL,
        ),
        ids::RULE_EXPORTED_PERMISSION_DANGEROUS_APP => template(
            Warning,
            TITLE_PERMISSION_CHECK_APP,
            NAME_PERMISSION,
            DESC_PERMISSION_DANGEROUS,
        ),
        ids::RULE_EXPORTED_PERMISSION_SIGNATURE_APP => template(
            Info,
            TITLE_PERMISSION_OK_APP,
            NAME_PERMISSION,
            DESC_PERMISSION_SIGNATURE,
        ),
        ids::RULE_EXPORTED_PERMISSION_SIGNATURE_OR_SYSTEM_APP => template(
            Warning,
            TITLE_PERMISSION_OK_APP,
            NAME_PERMISSION,
            DESC_PERMISSION_SIGNATURE_OR_SYSTEM,
        ),
        ids::RULE_EXPORTED_PERMISSION_UNKNOWN_APP => template(
            Warning,
            TITLE_PERMISSION_CHECK_APP,
            NAME_PERMISSION,
            DESC_PERMISSION_NOT_DEFINED,
        ),

        // Unprotected exposure
        ids::RULE_EXPLICITLY_EXPORTED => {
            template(Warning, TITLE_UNPROTECTED, NAME_UNPROTECTED, DESC_UNPROTECTED)
        }
        ids::RULE_EXPORTED_INTENT_FILTER => {
            template(Warning, TITLE_UNPROTECTED, NAME_UNPROTECTED, DESC_INTENT_FILTER)
        }

        // Providers exported by default, targetSdk < 17
        ids::RULE_PROVIDER => template(
            Warning,
            TITLE_DEFAULT_EXPORT,
            NAME_UNPROTECTED,
            DESC_DEFAULT_EXPORT_LEGACY,
        ),
        ids::RULE_PROVIDER_NORMAL
        | ids::RULE_PROVIDER_DANGEROUS
        | ids::RULE_PROVIDER_UNKNOWN
        | ids::RULE_PROVIDER_NORMAL_APP
        | ids::RULE_PROVIDER_DANGEROUS_APP
        | ids::RULE_PROVIDER_UNKNOWN_APP => template(
            Warning,
            TITLE_DEFAULT_EXPORT_PERMISSION,
            NAME_PERMISSION,
            DESC_DEFAULT_EXPORT_LEGACY,
        ),
        ids::RULE_PROVIDER_SIGNATURE
        | ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM
        | ids::RULE_PROVIDER_SIGNATURE_APP
        | ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM_APP => template(
            Info,
            TITLE_DEFAULT_EXPORT_PERMISSION_OK,
            NAME_PERMISSION,
            DESC_DEFAULT_EXPORT_LEGACY,
        ),

        // Providers exported by default on old platforms, targetSdk >= 17
        ids::RULE_PROVIDER_NEW => template(
            Warning,
            TITLE_DEFAULT_EXPORT,
            NAME_UNPROTECTED,
            DESC_DEFAULT_EXPORT_NEW_TARGET,
        ),
        ids::RULE_PROVIDER_NORMAL_NEW
        | ids::RULE_PROVIDER_DANGEROUS_NEW
        | ids::RULE_PROVIDER_UNKNOWN_NEW
        | ids::RULE_PROVIDER_NORMAL_APP_NEW
        | ids::RULE_PROVIDER_DANGEROUS_APP_NEW
        | ids::RULE_PROVIDER_UNKNOWN_APP_NEW => template(
            Warning,
            TITLE_DEFAULT_EXPORT_PERMISSION,
            NAME_PERMISSION,
            DESC_DEFAULT_EXPORT_NEW_TARGET,
        ),
        ids::RULE_PROVIDER_SIGNATURE_NEW
        | ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM_NEW
        | ids::RULE_PROVIDER_SIGNATURE_APP_NEW
        | ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM_APP_NEW => template(
            Info,
            TITLE_DEFAULT_EXPORT_PERMISSION_OK,
            NAME_PERMISSION,
            DESC_DEFAULT_EXPORT_NEW_TARGET,
        ),

        // Manifest-wide
        ids::RULE_IMPROPER_PROVIDER_PERMISSION => template(
            Warning,
            "Improper Content Provider Permissions<br>[{0}]",
            "Improper Content Provider Permissions [{0}]",
            "\
A content provider permission was set to allow access from any other app on the device. \
Content providers may contain sensitive information about an app and therefore should not \
be shared.",
        ),
        ids::RULE_DIALER_CODE_FOUND => template(
            Warning,
            "Dailer Code: {0} Found <br>[android:scheme=\"android_secret_code\"]",
            "Dailer Code: {0} Found [android:scheme=\"android_secret_code\"]",
            "\
A secret code was found in the manifest. These codes, when entered into the dialer, grant \
access to hidden content that may contain sensitive information.",
        ),
        ids::RULE_SMS_RECEIVER_PORT_FOUND => template(
            Warning,
            "Data SMS Receiver Set on Port: {0} Found<br>[android:port]",
            "Data SMS Receiver Set on Port: {0} Found [android:port]",
            "\
A binary SMS receiver is configured to listen on a port. Binary SMS messages sent to a \
device are processed by the application in whichever way the developer chooses. The data \
in this SMS should be properly validated by the application. Furthermore, the application \
should assume that the SMS being received is from an untrusted source.",
        ),
        ids::RULE_HIGH_INTENT_PRIORITY_FOUND => template(
            Warning,
            "High Intent Priority ({0}) - {{{1}}} Hit(s)<br>[android:priority]",
            "High Intent Priority ({0}) - {{{1}}} Hit(s) [android:priority]",
            "\
By setting an intent priority higher than another intent, the app effectively overrides \
other requests.",
        ),
        ids::RULE_HIGH_ACTION_PRIORITY_FOUND => template(
            Warning,
            "High Action Priority ({0})<br>[android:priority] ",
            "High Action Priority ({0}) [android:priority] ",
            "\
By setting an action priority higher than another action, the app effectively overrides \
other requests.",
        ),

        _ => return None,
    };
    Some(t)
}

/// List all rule keys that have a template.
pub fn all_rule_keys() -> &'static [&'static str] {
    &[
        ids::RULE_VULNERABLE_OS_VERSION,
        ids::RULE_VULNERABLE_OS_VERSION2,
        ids::RULE_CLEAR_TEXT_TRAFFIC,
        ids::RULE_DIRECT_BOOT_AWARE,
        ids::RULE_HAS_NETWORK_SECURITY,
        ids::RULE_APP_IS_DEBUGGABLE,
        ids::RULE_APP_ALLOWBACKUP,
        ids::RULE_ALLOWBACKUP_NOT_SET,
        ids::RULE_APP_IN_TEST_MODE,
        ids::RULE_WELL_KNOWN_ASSETLINKS,
        ids::RULE_TASK_AFFINITY_SET,
        ids::RULE_NON_STANDARD_LAUNCHMODE,
        ids::RULE_TASK_HIJACKING,
        ids::RULE_TASK_HIJACKING2,
        ids::RULE_EXPORTED_PERMISSION_NORMAL,
        ids::RULE_EXPORTED_PERMISSION_DANGEROUS,
        ids::RULE_EXPORTED_PERMISSION_SIGNATURE,
        ids::RULE_EXPORTED_PERMISSION_SIGNATURE_OR_SYSTEM,
        ids::RULE_EXPORTED_PERMISSION_NOT_DEFINED,
        ids::RULE_EXPORTED_PERMISSION_NORMAL_APP,
        ids::RULE_EXPORTED_PERMISSION_DANGEROUS_APP,
        ids::RULE_EXPORTED_PERMISSION_SIGNATURE_APP,
        ids::RULE_EXPORTED_PERMISSION_SIGNATURE_OR_SYSTEM_APP,
        ids::RULE_EXPORTED_PERMISSION_UNKNOWN_APP,
        ids::RULE_EXPLICITLY_EXPORTED,
        ids::RULE_EXPORTED_INTENT_FILTER,
        ids::RULE_PROVIDER,
        ids::RULE_PROVIDER_NORMAL,
        ids::RULE_PROVIDER_DANGEROUS,
        ids::RULE_PROVIDER_SIGNATURE,
        ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM,
        ids::RULE_PROVIDER_UNKNOWN,
        ids::RULE_PROVIDER_NORMAL_APP,
        ids::RULE_PROVIDER_DANGEROUS_APP,
        ids::RULE_PROVIDER_SIGNATURE_APP,
        ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM_APP,
        ids::RULE_PROVIDER_UNKNOWN_APP,
        ids::RULE_PROVIDER_NEW,
        ids::RULE_PROVIDER_NORMAL_NEW,
        ids::RULE_PROVIDER_DANGEROUS_NEW,
        ids::RULE_PROVIDER_SIGNATURE_NEW,
        ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM_NEW,
        ids::RULE_PROVIDER_UNKNOWN_NEW,
        ids::RULE_PROVIDER_NORMAL_APP_NEW,
        ids::RULE_PROVIDER_DANGEROUS_APP_NEW,
        ids::RULE_PROVIDER_SIGNATURE_APP_NEW,
        ids::RULE_PROVIDER_SIGNATURE_OR_SYSTEM_APP_NEW,
        ids::RULE_PROVIDER_UNKNOWN_APP_NEW,
        ids::RULE_IMPROPER_PROVIDER_PERMISSION,
        ids::RULE_DIALER_CODE_FOUND,
        ids::RULE_SMS_RECEIVER_PORT_FOUND,
        ids::RULE_HIGH_INTENT_PRIORITY_FOUND,
        ids::RULE_HIGH_ACTION_PRIORITY_FOUND,
    ]
}

/// Render a rule hit through its template.
///
/// Returns `None` when the rule key has no template; the caller decides how to report that.
pub fn render_finding(finding: &ExposureFinding, fingerprint: Option<String>) -> Option<Finding> {
    let t = lookup_template(&finding.rule_key)?;
    Some(Finding {
        rule: finding.rule_key.clone(),
        severity: t.severity,
        title: fill(t.title, &escape_args(&finding.component_args)),
        name: fill(t.name, &finding.component_args),
        description: fill(t.description, &escape_args(&finding.extra_args)),
        component: finding.component_args.clone(),
        fingerprint,
    })
}

/// Titles and descriptions are markup, so arguments taken from the manifest are
/// entity-escaped before substitution. Names are plain text and take arguments as-is.
fn escape_args(args: &[String]) -> Vec<String> {
    args.iter()
        .map(|a| a.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;"))
        .collect()
}

/// Substitute `{N}` placeholders with positional arguments. `{{` and `}}` escape braces;
/// placeholders without a matching argument render empty.
fn fill(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut index = String::new();
                while let Some(&d) = chars.peek() {
                    chars.next();
                    if d == '}' {
                        break;
                    }
                    index.push(d);
                }
                if let Some(arg) = index.parse::<usize>().ok().and_then(|i| args.get(i)) {
                    out.push_str(arg);
                }
            }
            other => out.push(other),
        }
    }

    out
}
