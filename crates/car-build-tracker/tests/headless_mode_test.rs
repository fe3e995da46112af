/*
[INPUT]:  car-build-tracker binary with --headless and a fixture config
[OUTPUT]: Process exit status and JSON snapshot output verification
[POS]:    Integration test layer - binary smoke tests
[UPDATE]: When changing CLI flags or headless output
*/

use std::process::Command;

use car_build_core::{ProgressSnapshot, Stage};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn headless_mode_prints_one_snapshot_per_step() {
    let binary_path = env!("CARGO_BIN_EXE_car-build-tracker");

    let output = Command::new(binary_path)
        .arg("--config")
        .arg(fixture("fast.yaml"))
        .arg("--headless")
        .arg("--max-ticks")
        .arg("1")
        .output()
        .expect("Failed to start car-build-tracker binary");

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let snapshots: Vec<ProgressSnapshot> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("snapshot line is JSON"))
        .collect();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].stage, Stage::Suspension);
    assert_eq!(snapshots[1].stage, Stage::SuspensionFrame);
    assert_eq!(snapshots[1].milestones, vec!["Fitted frame", "Retrieved suspension"]);
}

#[test]
fn headless_mode_clamps_zero_interval() {
    let binary_path = env!("CARGO_BIN_EXE_car-build-tracker");

    let output = Command::new(binary_path)
        .arg("--config")
        .arg(fixture("fast.yaml"))
        .arg("--headless")
        .arg("--interval")
        .arg("0")
        .arg("--max-ticks")
        .arg("0")
        .arg("--log-level")
        .arg("warn")
        .output()
        .expect("Failed to start car-build-tracker binary");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("clamped"), "stderr: {stderr}");
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
}

#[test]
fn missing_config_file_fails() {
    let binary_path = env!("CARGO_BIN_EXE_car-build-tracker");

    let output = Command::new(binary_path)
        .arg("--config")
        .arg(fixture("does-not-exist.yaml"))
        .arg("--headless")
        .output()
        .expect("Failed to start car-build-tracker binary");

    assert!(!output.status.success());
}

#[test]
fn max_ticks_requires_headless() {
    let binary_path = env!("CARGO_BIN_EXE_car-build-tracker");

    let output = Command::new(binary_path)
        .arg("--max-ticks")
        .arg("3")
        .output()
        .expect("Failed to start car-build-tracker binary");

    assert!(!output.status.success());
}
