use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Deserialize;
use serde_json::json;

use sensorlink_core::decode_values;

#[derive(Deserialize)]
struct GoldenInput {
    port: u8,
    bytes: Vec<i64>,
}

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.json");
        if !input.exists() {
            continue;
        }
        let output = path.join("expected.json");
        regenerate_one(&input, &output)?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, output: &Path) -> Result<(), String> {
    let raw = fs::read_to_string(input)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    let golden: GoldenInput = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid golden input {}: {}", input.display(), err))?;
    let value = match decode_values(&golden.bytes, golden.port) {
        Ok(fields) => serde_json::to_value(fields)
            .map_err(|err| format!("JSON serialization failed: {}", err))?,
        Err(err) => json!({ "error": err.to_string() }),
    };
    let json = serde_json::to_string(&value)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
