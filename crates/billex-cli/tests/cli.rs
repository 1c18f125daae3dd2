//! End-to-end tests for the offline subcommands.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn billex() -> Command {
    let mut cmd = Command::cargo_bin("billex").unwrap();
    cmd.env_remove("HF_TOKEN")
        .env_remove("BILLEX_TARGET_LANGUAGE")
        .env_remove("BILLEX_TESSERACT_CMD");
    cmd
}

#[test]
fn test_extract_text_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bill.txt");
    std::fs::write(&input, "Total Due: Rs.450.00 before 15/09/2024").unwrap();

    billex()
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "Electricity Bill""#))
        .stdout(predicate::str::contains(r#""amount_due": "Rs.450.00""#))
        .stdout(predicate::str::contains(r#""due_date": "15/09/2024""#));
}

#[test]
fn test_extract_without_fields() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("receipt.txt");
    std::fs::write(&input, "Thank you for your payment").unwrap();

    billex()
        .args(["extract", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Electricity Bill,Not found,Not found"));
}

#[test]
fn test_extract_rejects_images() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bill.png");
    std::fs::write(&input, b"\x89PNG\r\n\x1a\n").unwrap();

    billex()
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("billex process"));
}

#[test]
fn test_missing_input() {
    billex()
        .args(["extract", "/nonexistent/bill.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_preview_text_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bill.txt");
    std::fs::write(&input, "Net Amount Payable Rs.698.00").unwrap();

    billex()
        .args(["preview", "--json"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""kind": "plain_text""#))
        .stdout(predicate::str::contains("Net Amount Payable Rs.698.00"));
}

#[test]
fn test_config_roundtrip() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("billex").join("config.json");
    let config = config.to_str().unwrap();

    billex()
        .args(["--config", config, "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not created"));

    billex()
        .args(["--config", config, "config", "init"])
        .assert()
        .success();

    billex()
        .args(["--config", config, "config", "get", "translation.target_language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"telugu\""));

    billex()
        .args(["--config", config, "config", "set", "generation.max_new_tokens", "64"])
        .assert()
        .success();

    billex()
        .args(["--config", config, "config", "get", "generation.max_new_tokens"])
        .assert()
        .success()
        .stdout(predicate::str::contains("64"));

    billex()
        .args(["--config", config, "config", "set", "generation.no_such_key", "1"])
        .assert()
        .failure();

    billex()
        .args(["--config", config, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}
