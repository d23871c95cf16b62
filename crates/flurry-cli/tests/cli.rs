//! Integration tests driving the `flurry` binary.

use std::process::{Command, Output};

fn run_flurry(args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_flurry");
    Command::new(bin)
        .args(args)
        .env_remove("FLURRY_EPOCH")
        .env_remove("FLURRY_NODE_ID")
        .env_remove("FLURRY_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run flurry binary")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn generate_at_epoch_prints_known_ids() {
    let output = run_flurry(&[
        "generate",
        "--node-id",
        "277",
        "--count",
        "2",
        "--timestamp",
        "1420070400000",
    ]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["1134592", "1134593"]);
}

#[test]
fn generate_defaults_to_one_id() {
    let output = run_flurry(&["generate", "--node-id", "1"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].parse::<u64>().is_ok());
}

#[test]
fn deconstruct_prints_json() {
    let output = run_flurry(&["deconstruct", "1134593", "--node-id", "0"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({
            "id": 1_134_593_u64,
            "timestamp": 1_420_070_400_000_i64,
            "node_id": 277,
            "seq": 1,
            "epoch": 1_420_070_400_000_i64,
        })
    );
}

#[test]
fn deconstruct_uses_the_configured_epoch() {
    let output = run_flurry(&["deconstruct", "4194304", "--epoch", "0", "--node-id", "0"]);
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout_lines(&output)[0]).unwrap();
    assert_eq!(parsed["timestamp"], 1);
    assert_eq!(parsed["epoch"], 0);
}

#[test]
fn deconstruct_rejects_malformed_ids() {
    let output = run_flurry(&["deconstruct", "not-a-number", "--node-id", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("InvalidIdentifier"));
}

#[test]
fn node_id_is_reduced() {
    let output = run_flurry(&["node-id", "--node-id", "2047"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["1023"]);
}

#[test]
fn node_id_env_var_is_honored() {
    let output = Command::new(env!("CARGO_BIN_EXE_flurry"))
        .arg("node-id")
        .env("FLURRY_NODE_ID", "1024")
        .output()
        .expect("failed to run flurry binary");
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["0"]);
}
