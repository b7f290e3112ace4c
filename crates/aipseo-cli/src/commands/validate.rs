//! `aipseo validate`

use serde_json::{json, Value};
use std::path::Path;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Minimum length of a manifest tool id
pub const MIN_TOOL_ID_LEN: usize = 8;

const REQUIRED_FIELDS: [&str; 2] = ["tool_id", "version"];

/// Check a manifest, returning every problem found
pub fn validate_manifest(manifest: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    for field in REQUIRED_FIELDS {
        if manifest.get(field).is_none() {
            errors.push(format!("Missing required field: '{}'", field));
        }
    }

    if let Some(tool_id) = manifest.get("tool_id") {
        let valid = tool_id
            .as_str()
            .is_some_and(|id| id.chars().count() >= MIN_TOOL_ID_LEN);
        if !valid {
            errors.push(format!(
                "Invalid tool_id: Must be a string of at least {} characters",
                MIN_TOOL_ID_LEN
            ));
        }
    }

    if manifest.get("version").is_some_and(|v| !v.is_string()) {
        errors.push("Invalid version: Must be a string".to_string());
    }

    if manifest.get("settings").is_some_and(|s| !s.is_object()) {
        errors.push("Invalid settings: Must be an object".to_string());
    }

    if manifest.get("endpoints").is_some_and(|e| !e.is_array()) {
        errors.push("Invalid endpoints: Must be an array".to_string());
    }

    errors
}

/// Read a JSON file, naming the path on failure
pub async fn read_manifest(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    let contents = tokio::fs::read_to_string(path).await?;
    serde_json::from_str(&contents).map_err(|_| CliError::InvalidJson(path.to_path_buf()))
}

pub async fn run(ctx: &mut Context, file: &Path) -> Result<()> {
    let manifest = read_manifest(file).await?;

    let errors = if manifest.is_object() {
        validate_manifest(&manifest)
    } else {
        vec!["Manifest must be a JSON object".to_string()]
    };
    if !errors.is_empty() {
        return Err(CliError::Validation {
            path: file.to_path_buf(),
            errors,
        });
    }

    let summary = json!({
        "file": file.display().to_string(),
        "valid": true,
        "tool_id": manifest["tool_id"],
        "version": manifest["version"],
    });

    if !ctx.output.is_json() {
        let file = ctx.output.bold(file.display().to_string());
        ctx.output.line(format!("Validation passed for '{}'", file))?;
    }
    ctx.output.render(&summary)
}
