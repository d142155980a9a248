//! Map list loading: one map per line, optional `.bsp` suffix.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::manifest::split_lines;
use crate::resource_path::MAP_EXTENSION;

/// Turns map-list text into map names, in order, duplicates kept.
///
/// Each line is trimmed and a trailing `.bsp` is stripped. Blank lines are skipped.
pub fn parse_map_list(text: &str) -> Vec<String> {
    let suffix = format!(".{MAP_EXTENSION}");
    split_lines(text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.strip_suffix(suffix.as_str()).unwrap_or(line).to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Reads and parses the map list at `path`.
pub fn load_map_list(path: &Path) -> Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read map list {}", path.display()))?;
    let maps = parse_map_list(&text);
    tracing::debug!("loaded {} map names from {}", maps.len(), path.display());
    Ok(maps)
}
