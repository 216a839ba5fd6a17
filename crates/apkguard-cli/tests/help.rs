use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the apkguard binary.
#[allow(deprecated)]
fn apkguard_cmd() -> Command {
    Command::cargo_bin("apkguard").unwrap()
}

#[test]
fn help_works() {
    apkguard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("explain"));
}

#[test]
fn check_help_lists_network_flags() {
    apkguard_cmd()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--offline"))
        .stdout(predicate::str::contains("--proxy"))
        .stdout(predicate::str::contains("--insecure"));
}

#[test]
fn explain_known_rule() {
    apkguard_cmd()
        .args(["explain", "explicitly_exported"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Severity: warning"))
        .stdout(predicate::str::contains("Description"));
}

#[test]
fn explain_unknown_rule_fails() {
    apkguard_cmd()
        .args(["explain", "no_such_rule"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown rule key: no_such_rule"))
        .stderr(predicate::str::contains("app_is_debuggable"));
}

#[test]
fn schema_prints_report_schema() {
    apkguard_cmd()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("browsable_activities"));
}

#[test]
fn schema_prints_config_schema() {
    apkguard_cmd()
        .args(["schema", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("link_verification"));
}
