//! Integration tests for the topiclens binary

mod utils;

use predicates::prelude::*;
use serde_json::json;
use utils::{mixed_catalog, video, write_json, write_text};

#[test]
fn test_text_report_lists_categories() {
    let catalog = write_json(&mixed_catalog());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topiclens");
    cmd.arg(catalog.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("TOPIC PERFORMANCE (3 topics)"))
        .stdout(predicate::str::contains("DOUBLE DOWN (1)"))
        .stdout(predicate::str::contains("Productivity"))
        .stdout(predicate::str::contains("UNTAPPED (1)"))
        .stdout(predicate::str::contains("Email Marketing"))
        .stdout(predicate::str::contains("STOP MAKING (1)"));
}

#[test]
fn test_json_report_parses() {
    let catalog = write_json(&mixed_catalog());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topiclens");
    cmd.arg("--format").arg("json").arg(catalog.path());

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    for key in ["double_down", "untapped", "resurface", "stop_making", "investigate"] {
        assert!(parsed[key].is_array(), "missing {}", key);
    }
    assert_eq!(parsed["double_down"][0]["topic"], "Productivity");
    assert_eq!(parsed["untapped"][0]["topic"], "Email Marketing");
    assert_eq!(parsed["stop_making"][0]["topic"], "Crypto");
    assert!(parsed["baseline"]["mean"].as_f64().unwrap() > 10_000.0);
}

#[test]
fn test_wrapped_catalog_is_accepted() {
    let catalog = write_json(&json!({ "videos": mixed_catalog() }));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topiclens");
    cmd.arg(catalog.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("TOPIC PERFORMANCE (3 topics)"));
}

#[test]
fn test_zero_metrics_fall_back_to_frequency() {
    let catalog = write_json(&json!([
        video("a", 0.0, None, &["mindset"]),
        video("b", 0.0, None, &["mindset", "habits"]),
    ]));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topiclens");
    cmd.arg(catalog.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("NOT ENOUGH PERFORMANCE DATA"))
        .stdout(predicate::str::contains("Mindset"))
        .stdout(predicate::str::contains("TOPIC PERFORMANCE").not());
}

#[test]
fn test_empty_catalog_fails() {
    let catalog = write_json(&json!([]));

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topiclens");
    cmd.arg(catalog.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("catalog is empty"));
}

#[test]
fn test_malformed_catalog_fails() {
    let catalog = write_text("{ not json");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topiclens");
    cmd.arg(catalog.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid catalog"));
}

#[test]
fn test_config_file_overrides_thresholds() {
    let catalog = write_json(&mixed_catalog());
    // Nothing clears a double-down bar this high
    let config = write_text("double_down_min_z = 5.0\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topiclens");
    cmd.arg("--config").arg(config.path()).arg(catalog.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("DOUBLE DOWN").not())
        .stdout(predicate::str::contains("INVESTIGATE (1)"));
}

#[test]
fn test_invalid_config_fails() {
    let catalog = write_json(&mixed_catalog());
    let config = write_text("prior_strength = -2.0\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topiclens");
    cmd.arg("--config").arg(config.path()).arg(catalog.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("prior_strength"));
}

#[test]
fn test_invalid_as_of_fails() {
    let catalog = write_json(&mixed_catalog());

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topiclens");
    cmd.arg("--as-of").arg("yesterday").arg(catalog.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --as-of date"));
}

#[test]
fn test_missing_catalog_argument() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("topiclens");
    cmd.assert().failure();
}
