#![allow(missing_docs)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn keystream_cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_keystream-cli"))
}

#[test]
fn test_generate_text_output() {
    keystream_cli()
        .arg("generate")
        .arg("abc")
        .arg("--stretch")
        .arg("0")
        .arg("--count")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("index       39"))
        .stdout(predicate::str::contains("Key 2 for seed 'abc' is at index 92"));
}

#[test]
fn test_generate_json_output() {
    let output = keystream_cli()
        .arg("generate")
        .arg("abc")
        .arg("--stretch")
        .arg("0")
        .arg("-n")
        .arg("1")
        .arg("--format")
        .arg("json")
        .output()
        .expect("Failed to run keystream-cli");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
    assert_eq!(report["config"]["seed"], "abc");
    assert_eq!(report["config"]["algorithm"], "md5");
    assert_eq!(report["keys"][0]["index"], 39);
    assert_eq!(report["keys"][0]["ordinal"], 1);
}

#[test]
fn test_config_file_with_flag_override() {
    // 1. Write a default configuration for the seed
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("keystream.json");
    keystream_cli()
        .arg("init-config")
        .arg("--path")
        .arg(&config_path)
        .arg("abc")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written"));
    assert!(config_path.exists());

    // 2. Run from the file, overriding the stretch and writing to a file
    let output_path = temp_dir.path().join("keys.txt");
    keystream_cli()
        .arg("generate")
        .arg("--config")
        .arg(&config_path)
        .arg("--stretch")
        .arg("0")
        .arg("--count")
        .arg("1")
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    let rendered = fs::read_to_string(&output_path).expect("Failed to read output file");
    assert!(rendered.contains("Key 1 for seed 'abc' is at index 39"));
}

#[test]
fn test_rejects_zero_memory() {
    keystream_cli()
        .arg("generate")
        .arg("abc")
        .arg("--memory")
        .arg("0")
        .assert()
        .failure();
}

#[test]
fn test_reports_exhausted_index_space() {
    keystream_cli()
        .arg("generate")
        .arg("abc")
        .arg("--stretch")
        .arg("0")
        .arg("--max-index")
        .arg("500")
        .arg("--count")
        .arg("1")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_missing_seed_fails() {
    keystream_cli().arg("generate").assert().failure();
}

#[test]
fn test_generate_from_config_without_seed() {
    // 1. Write a configuration with the default (empty) seed
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("keystream.json");
    keystream_cli()
        .arg("init-config")
        .arg("--path")
        .arg(&config_path)
        .assert()
        .success();

    // 2. The same file drives a run as written
    keystream_cli()
        .arg("generate")
        .arg("--config")
        .arg(&config_path)
        .arg("--stretch")
        .arg("0")
        .arg("-n")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Key 1 for seed '' is at index"));
}
