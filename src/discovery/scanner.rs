//! File system scanner for style configurations.
//!
//! Recursively scans directories for `.qr.yaml`, `.qr.yml` and `.qr.json`
//! files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Double extensions recognised as style configurations.
pub const CONFIG_SUFFIXES: [&str; 3] = [".qr.yaml", ".qr.yml", ".qr.json"];

/// Whether `path` names a style configuration.
pub fn is_config_file(path: &Path) -> bool {
    let Some(filename) = path.file_name().and_then(|f| f.to_str()) else {
        return false;
    };
    let lower = filename.to_ascii_lowercase();
    CONFIG_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// Scan a directory for style configurations, sorted by path.
pub fn scan_directory(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }

    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_config_file(p))
        .collect();

    found.sort();
    found
}
