//! `aipseo init`

use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Length of a generated tool id
pub const TOOL_ID_LEN: usize = 12;

/// Manifest version written by `init`
pub const MANIFEST_VERSION: &str = "1.0.0";

/// A fresh manifest with a random tool id
pub fn new_manifest() -> Value {
    json!({
        "tool_id": seo_api::generate_id(TOOL_ID_LEN),
        "version": MANIFEST_VERSION,
        "settings": {"api_enabled": true},
        "endpoints": [],
    })
}

pub async fn run(ctx: &mut Context, output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        return Err(CliError::FileExists(output.to_path_buf()));
    }

    let manifest = new_manifest();
    write_manifest(output, &manifest).await?;
    info!("Wrote manifest to {:?}", output);

    if ctx.output.is_json() {
        return ctx.output.json(&manifest);
    }

    ctx.output
        .line(format!("Created aipseo manifest at '{}'", output.display()))?;
    ctx.output
        .field("Tool ID", manifest["tool_id"].as_str().unwrap_or_default())?;
    Ok(())
}

/// Write a manifest as two-space indented JSON with sorted keys
async fn write_manifest(path: &Path, manifest: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, manifest_text(manifest)?).await?;
    Ok(())
}

fn manifest_text(manifest: &Value) -> Result<String> {
    let mut contents = serde_json::to_string_pretty(&sort_keys(manifest))?;
    contents.push('\n');
    Ok(contents)
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}
