//! `mapgen.json` loading.
//!
//! ```json
//! {
//!   "unmapped": "placeholder",
//!   "indent": "\t",
//!   "nameMatching": "caseSensitive",
//!   "flattenMembers": false,
//!   "maxDepth": 8
//! }
//! ```
//!
//! Every field is optional. Engine options sit at the top level next to the
//! driver's own.

use anyhow::{Context, Result};
use mapgen_emitter::{DEFAULT_INDENT, UnmappedPolicy};
use mapgen_solver::MappingOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "mapgen.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverOptions {
    pub unmapped: UnmappedPolicy,
    /// One level of indentation in generated bodies.
    pub indent: String,
    #[serde(flatten)]
    pub mapping: MappingOptions,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            unmapped: UnmappedPolicy::default(),
            indent: DEFAULT_INDENT.to_string(),
            mapping: MappingOptions::default(),
        }
    }
}

pub fn parse_options(source: &str) -> Result<DriverOptions> {
    let options = serde_json::from_str(source).context("failed to parse mapgen options JSON")?;
    Ok(options)
}

pub fn load_options(path: &Path) -> Result<DriverOptions> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read mapgen options: {}", path.display()))?;
    parse_options(&source)
        .with_context(|| format!("failed to parse mapgen options: {}", path.display()))
}

/// Nearest `mapgen.json` in `start` or one of its ancestors.
pub fn find_options_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Options governing files under `dir`: the nearest `mapgen.json`, or the
/// defaults when there is none.
pub fn resolve_options(dir: &Path) -> Result<DriverOptions> {
    match find_options_file(dir) {
        Some(path) => load_options(&path),
        None => Ok(DriverOptions::default()),
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
