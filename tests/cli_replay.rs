use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_adaptive_cli"))
}

fn fixture_file(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

#[test]
fn simulate_rewind_succeeds() {
    let output = cli()
        .args(["simulate", "--script", "rewind"])
        .output()
        .expect("failed to run adaptive_cli simulate");
    assert!(
        output.status.success(),
        "CLI exited with {:?}",
        output.status.code()
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    let json: Value = serde_json::from_str(stdout.trim()).expect("replay report JSON payload");
    let frames = json["frames"].as_array().expect("frames array");
    assert_eq!(frames.len(), 12);
    assert_eq!(frames[0]["applied"], false);
    assert_eq!(frames[1]["applied"], true);
    assert_eq!(json["final_snapshot"]["pending"], 0);
    assert_eq!(json["final_snapshot"]["property"], "frequency");
}

#[test]
fn simulate_detects_mismatch() {
    let output = cli()
        .args([
            "simulate",
            "--script",
            &fixture_file("rewind_incorrect.json"),
        ])
        .output()
        .expect("failed to run mismatch simulate");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("stderr UTF-8");
    assert!(
        stderr.contains("\"failures\""),
        "expected failures JSON in stderr, got {stderr}"
    );
}

#[test]
fn simulate_tempo_mode() {
    let output = cli()
        .args(["simulate", "--script", "rewind", "--no-adjust-pitch"])
        .output()
        .expect("failed to run tempo simulate");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("report JSON");
    assert_eq!(json["final_snapshot"]["property"], "tempo");
}

#[test]
fn simulate_rejects_invalid_initial_rate() {
    let output = cli()
        .args(["simulate", "--script", "rewind", "--initial-rate", "3.0"])
        .output()
        .expect("failed to run simulate");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn simulate_missing_script_fails() {
    let output = cli()
        .args(["simulate", "--script", "does_not_exist"])
        .output()
        .expect("failed to run simulate");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("stderr UTF-8");
    assert!(stderr.contains("not found"), "unexpected stderr: {stderr}");
}

#[test]
fn dump_config_prints_defaults() {
    let output = cli()
        .args(["dump-config"])
        .output()
        .expect("failed to run dump-config");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("config JSON");
    assert_eq!(json["adaptive_speed"]["average_count"], 6);
    assert_eq!(json["adaptive_speed"]["adjust_pitch"], true);
}

#[test]
fn dump_config_reads_default_asset() {
    let workdir = std::env::temp_dir().join(format!("adaptive_cli_assets_{}", std::process::id()));
    let assets = workdir.join("assets");
    std::fs::create_dir_all(&assets).expect("create assets dir");
    std::fs::write(
        assets.join("adaptive_speed.json"),
        r#"{"adaptive_speed": {"initial_rate": 1.5, "adjust_pitch": false}}"#,
    )
    .expect("write config asset");

    let output = cli()
        .args(["dump-config"])
        .current_dir(&workdir)
        .output()
        .expect("failed to run dump-config");
    let _ = std::fs::remove_dir_all(&workdir);

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("config JSON");
    assert_eq!(json["adaptive_speed"]["initial_rate"], 1.5);
    assert_eq!(json["adaptive_speed"]["adjust_pitch"], false);
    assert_eq!(json["adaptive_speed"]["average_count"], 6);
}

#[test]
fn list_scripts_includes_fixtures() {
    let output = cli()
        .args(["list-scripts"])
        .output()
        .expect("failed to run list-scripts");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    assert!(stdout.lines().any(|line| line == "rewind"));
}
