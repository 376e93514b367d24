//! Command line tests against the installed `telemetry-viewer` binary

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn telemetry_viewer(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_telemetry-viewer"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn ride_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "logger boot v5").unwrap();
    writeln!(file, ">23|01:100,12.4,0,0,0,0,0,0,0,52.3700,4.8950,10<7F").unwrap();
    writeln!(file, ">23|01:101,12.3,0,0").unwrap();
    writeln!(file, ">23|01:102,12.2,0,0,0,0,0,0,0,52.3702,4.8953,20<7F").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_help_names_binary() {
    let output = telemetry_viewer(&[]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("telemetry-viewer <COMMAND>"));
}

#[test]
fn test_fields_json() {
    let output = telemetry_viewer(&["fields", "--format", "json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"supercapsVoltage\""));
}

#[test]
fn test_inspect_json() {
    let ride = ride_file();
    let path = ride.path().to_str().unwrap();

    let output = telemetry_viewer(&["-q", "inspect", path, "--format", "json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let dataset = &report["datasets"][0];
    assert_eq!(dataset["records"], 2);
    assert_eq!(dataset["has_gps"], true);
    assert_eq!(dataset["lines_malformed"], 1);
}

#[test]
fn test_config_cannot_lower_min_fields() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[ingest]\nmin_fields = 3").unwrap();
    config.flush().unwrap();
    let ride = ride_file();

    let output = telemetry_viewer(&[
        "-q",
        "-c",
        config.path().to_str().unwrap(),
        "inspect",
        ride.path().to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("min_fields"), "{}", stderr);
}
