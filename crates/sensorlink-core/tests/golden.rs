use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Value, json};

use sensorlink_core::decode_values;

#[derive(Deserialize)]
struct GoldenInput {
    port: u8,
    bytes: Vec<i64>,
}

fn golden_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
        .join(name)
}

fn run_golden(name: &str) {
    let dir = golden_dir(name);
    let input_json = fs::read_to_string(dir.join("input.json")).expect("read input.json");
    let input: GoldenInput = serde_json::from_str(&input_json).expect("parse input.json");
    let expected_json = fs::read_to_string(dir.join("expected.json")).expect("read expected.json");
    let expected: Value = serde_json::from_str(&expected_json).expect("parse expected.json");

    let actual = match decode_values(&input.bytes, input.port) {
        Ok(fields) => serde_json::to_value(fields).expect("serialize fields"),
        Err(err) => json!({ "error": err.to_string() }),
    };

    assert_eq!(actual, expected, "golden mismatch in {name}");
}

#[test]
fn golden_reference() {
    run_golden("reference");
}

#[test]
fn golden_all_zero() {
    run_golden("all_zero");
}

#[test]
fn golden_saturated() {
    run_golden("saturated");
}

#[test]
fn golden_negative_temperature() {
    run_golden("negative_temperature");
}

#[test]
fn golden_trailing_bytes() {
    run_golden("trailing_bytes");
}

#[test]
fn golden_firmware_frame() {
    run_golden("firmware_frame");
}

#[test]
fn golden_truncated() {
    run_golden("truncated");
}

#[test]
fn golden_invalid_byte() {
    run_golden("invalid_byte");
}
