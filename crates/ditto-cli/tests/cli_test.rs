//! Integration tests for the `ditto` binary.
//!
//! Each test points `XDG_CONFIG_HOME` at a fresh temporary directory so the
//! user's real config file is never read or written.

use std::path::Path;
use std::process::{Command, Output};

// -----------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------

fn ditto(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ditto"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("DITTO_PLAN")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run ditto binary")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "ditto failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("stdout should be utf-8")
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[test]
fn cart_for_starter_selection() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = stdout(&ditto(
        tmp.path(),
        &["cart", "--plan", "starter", "--select", "charts-uk,pre-release", "--json"],
    ));
    let cart: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(cart["total"], 44);
    assert_eq!(cart["items"][0]["name"], "Charts UK/Ireland");
    assert_eq!(cart["items"][1]["name"], "Pre-release Downloads");
}

#[test]
fn selecting_an_included_service_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = ditto(tmp.path(), &["cart", "--plan", "pro", "--select", "youtube"]);
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("youtube is already included"), "{err}");
}

#[test]
fn rls_rejects_hidden_services() {
    let tmp = tempfile::TempDir::new().unwrap();
    for add_on in ["auto-release", "release-protection"] {
        let output = ditto(
            tmp.path(),
            &["--plan", "ditto-plus-rls", "cart", "--select", add_on],
        );
        assert!(!output.status.success(), "{add_on} should be rejected");
        let err = String::from_utf8_lossy(&output.stderr);
        assert!(err.contains(&format!("{add_on} is not available")), "{err}");
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn unknown_add_on_is_rejected() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = ditto(tmp.path(), &["cart", "--select", "charts-mars"]);
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("charts-mars"), "{err}");
}

#[test]
fn init_writes_config_used_by_later_commands() {
    let tmp = tempfile::TempDir::new().unwrap();
    stdout(&ditto(tmp.path(), &["init", "--plan", "ditto-plus-rls"]));
    assert!(tmp.path().join("ditto/config.toml").exists());

    let again = ditto(tmp.path(), &["init"]);
    assert!(!again.status.success(), "init without --force should fail");

    let out = stdout(&ditto(tmp.path(), &["features"]));
    assert!(out.contains("Distribution options (Ditto+ RLS plan)"), "{out}");
    assert!(!out.contains("Auto-release"), "{out}");
}

#[test]
fn env_plan_overrides_config_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    stdout(&ditto(tmp.path(), &["init", "--plan", "label"]));

    let output = Command::new(env!("CARGO_BIN_EXE_ditto"))
        .args(["services", "--json"])
        .env("XDG_CONFIG_HOME", tmp.path())
        .env("DITTO_PLAN", "starter")
        .output()
        .unwrap();
    let view: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(view["plan"], "starter");
    assert!(view.get("providers").is_none());
}

#[test]
fn stores_filter_by_status() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = stdout(&ditto(tmp.path(), &["stores", "--status", "rejected", "--json"]));
    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
    let ids: Vec<&str> = doc["delivered"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["apple-music", "shazam", "itunes"]);
    assert_eq!(doc["summary"]["available"], 7);
}

#[test]
fn labels_add_and_select() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = stdout(&ditto(
        tmp.path(),
        &["labels", "--add", "New Label", "--select", "New Label"],
    ));
    assert!(out.contains("* New Label"), "{out}");
}

#[test]
fn labels_duplicate_add_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = ditto(tmp.path(), &["labels", "--add", "Drumcode"]);
    assert!(!output.status.success());
    let err = String::from_utf8_lossy(&output.stderr);
    assert!(err.contains("already exists"), "{err}");
}

#[test]
fn purchased_view_is_static() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = stdout(&ditto(tmp.path(), &["purchased", "--plan", "pro"]));
    assert!(out.contains("Charts Registration Worldwide"), "{out}");
    assert!(out.contains("active"), "{out}");
}

#[test]
fn completions_generate_for_bash() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = stdout(&ditto(tmp.path(), &["completions", "bash"]));
    assert!(out.contains("ditto"), "completion script should mention ditto");
}

#[test]
fn screen_routes_plan_and_purchased_variants() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = stdout(&ditto(tmp.path(), &["screen", "label"]));
    assert!(out.contains("Services (Label plan)"), "{out}");

    let out = stdout(&ditto(tmp.path(), &["screen", "purchased"]));
    assert!(out.contains("Purchased services"), "{out}");
}
