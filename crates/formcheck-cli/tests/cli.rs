//! Integration tests for the formcheck binary.

use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/profile.toml")
}

/// A command isolated from the user's real config directory.
fn formcheck(home: &TempDir) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("formcheck");
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR");
    cmd
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_flag() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Live form validation"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_is_usage_error() {
    let home = TempDir::new().unwrap();
    formcheck(&home).assert().code(2);
}

// ── check ─────────────────────────────────────────────────────────────────────

#[test]
fn short_name_shows_custom_message() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("check")
        .arg(fixture())
        .args(["--set", "name=A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form #profile"))
        .stdout(predicate::str::contains("\u{2717} name"))
        .stdout(predicate::str::contains("shows: Invalid name"))
        .stdout(predicate::str::contains("submit disabled"));
}

#[test]
fn short_job_shows_native_message() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("check")
        .arg(fixture())
        .args(["--set", "job=x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shows: Please lengthen this text"));
}

#[test]
fn valid_values_enable_submit() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("check")
        .arg(fixture())
        .args(["--set", "name=Anna", "--set", "job=Explorer", "--fail-on-invalid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 2 input(s) invalid, submit enabled"));
}

#[test]
fn fail_on_invalid_exits_five() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("check")
        .arg(fixture())
        .args(["--set", "name=A", "--fail-on-invalid"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("1 of 1 form(s) invalid"));
}

#[test]
fn submit_is_always_prevented() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("check")
        .arg(fixture())
        .args(["--all", "--submit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Submit of form #profile prevented"))
        .stdout(predicate::str::contains("shows: Please fill out this field."));
}

#[test]
fn json_output() {
    let home = TempDir::new().unwrap();
    let assert = formcheck(&home)
        .args(["--output-format", "json", "check"])
        .arg(fixture())
        .args(["--set", "name=A", "--submit"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let form = &value["forms"][0];
    assert_eq!(form["label"], "#profile");
    assert_eq!(form["submit_disabled"], true);
    assert_eq!(form["inputs"][0]["id"], "name");
    assert_eq!(form["inputs"][0]["error_text"], "Invalid name");
    assert_eq!(form["inputs"][0]["error_visible"], true);
    assert_eq!(value["submits"][0]["default_prevented"], true);
    assert!(value.get("html").is_none());
}

#[test]
fn html_shows_rendered_error() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("check")
        .arg(fixture())
        .args(["--set", "name=A", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("popup__input_type_error"))
        .stdout(predicate::str::contains("popup__error_visible"));
}

#[test]
fn settings_file_overrides_config() {
    let home = TempDir::new().unwrap();
    let settings = home.path().join("settings.toml");
    std::fs::write(
        &settings,
        r#"
form_selector = ".no-such-form"
input_selector = ".popup__input"
submit_button_selector = ".popup__button"
inactive_button_class = "popup__button_disabled"
input_error_class = "popup__input_type_error"
error_class = "popup__error_visible"
"#,
    )
    .unwrap();

    formcheck(&home)
        .arg("check")
        .arg(fixture())
        .arg("--settings")
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("No forms matched"));
}

#[test]
fn incomplete_settings_file_is_config_error() {
    let home = TempDir::new().unwrap();
    let settings = home.path().join("settings.toml");
    std::fs::write(&settings, "form_selector = \".popup__form\"\n").unwrap();

    formcheck(&home)
        .arg("check")
        .arg(fixture())
        .arg("--settings")
        .arg(&settings)
        .assert()
        .code(4);
}

// ── failures ─────────────────────────────────────────────────────────────────

#[test]
fn missing_fixture_exits_three() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .args(["check", "does-not-exist.toml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Fixture not found"));
}

#[test]
fn unknown_element_exits_three() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("check")
        .arg(fixture())
        .args(["--set", "nickname=Bob"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nickname"));
}

#[test]
fn malformed_assignment_exits_two() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("check")
        .arg(fixture())
        .args(["--set", "name"])
        .assert()
        .code(2);
}

#[test]
fn missing_explicit_config_exits_four() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("--config")
        .arg(home.path().join("absent.toml"))
        .arg("check")
        .arg(fixture())
        .assert()
        .code(4);
}

// ── clear ─────────────────────────────────────────────────────────────────────

#[test]
fn clear_hides_errors_and_disables_submit() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .arg("clear")
        .arg(fixture())
        .args(["--set", "name=A", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 form(s)"))
        .stdout(predicate::str::contains("popup__button_disabled"))
        .stdout(predicate::str::contains("popup__error_visible").not())
        .stdout(predicate::str::contains("popup__input_type_error").not());
}

// ── init / config ─────────────────────────────────────────────────────────────

#[test]
fn init_then_config_get() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("nested/formcheck.toml");

    formcheck(&home)
        .arg("--config")
        .arg(&path)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));
    assert!(path.exists());

    formcheck(&home)
        .arg("--config")
        .arg(&path)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    formcheck(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "get", "validation.form_selector"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".popup__form"));
}

#[test]
fn config_reads_environment() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .env("FORMCHECK_NAME_RULE__MAX_LEN", "12")
        .args(["config", "get", "name_rule.max_len"])
        .assert()
        .success()
        .stdout(predicate::str::diff("12\n"));
}

#[test]
fn config_unknown_key_exits_four() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .args(["config", "get", "nope"])
        .assert()
        .code(4);
}

#[test]
fn config_path_honours_flag() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("fc.toml");
    std::fs::write(&path, "").unwrap();
    formcheck(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fc.toml"));
}

// ── completions ───────────────────────────────────────────────────────────────

#[test]
fn completions_bash() {
    let home = TempDir::new().unwrap();
    formcheck(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("formcheck"));
}
