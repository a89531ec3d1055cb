//! CLI command implementations

pub mod configure;
pub mod report;
pub mod score;
pub mod simulate;
pub mod terraform;

use std::path::Path;

use anyhow::{Context, Result};
use carbon_lib::models::CloudResource;
use carbon_lib::parsers::parse_file;

/// Read a billing export and parse it into resources
pub fn load_resources(path: &Path) -> Result<Vec<CloudResource>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let resources = parse_file(&content, filename)?;
    Ok(resources)
}
