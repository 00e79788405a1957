//! xT-GK batch runner
//!
//! Event file (JSON array of StatsBomb-style records) → xT-GK report (JSON)

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use xtgk_core::{analyze_values, AnalyzeResponse, PitchZoneGrid, ValuationConfig};

/// Read raw event records. Accepts a bare array or `{ "events": [...] }`.
pub fn load_events(path: &Path) -> Result<Vec<serde_json::Value>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse JSON: {}", path.display()))?;

    match value {
        serde_json::Value::Array(items) => Ok(items),
        serde_json::Value::Object(mut map) => match map.remove("events") {
            Some(serde_json::Value::Array(items)) => Ok(items),
            _ => bail!("Expected a JSON array or an object with an \"events\" array"),
        },
        _ => bail!("Expected a JSON array or an object with an \"events\" array"),
    }
}

/// Load a config file; `.yaml`/`.yml` are read as YAML, anything else as JSON.
pub fn load_config(path: &Path) -> Result<ValuationConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let is_yaml = matches!(path.extension().and_then(|e| e.to_str()), Some("yaml") | Some("yml"));
    let config = if is_yaml {
        ValuationConfig::from_yaml_str(&text)
    } else {
        ValuationConfig::from_json_str(&text)
    };
    config.with_context(|| format!("Invalid config: {}", path.display()))
}

pub fn run_analysis(events_path: &Path, config: ValuationConfig) -> Result<AnalyzeResponse> {
    config.validate().context("Invalid config")?;
    let records = load_events(events_path)?;
    tracing::info!(records = records.len(), path = %events_path.display(), "Loaded events");

    analyze_values(records, config).context("Analysis failed")
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}

/// Grid rows (one per length zone) for display.
pub fn grid_rows(grid: &PitchZoneGrid) -> Vec<Vec<f64>> {
    grid.values().chunks(grid.width_zones()).map(|row| row.to_vec()).collect()
}
