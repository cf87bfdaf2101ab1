//! Discovery of style configuration files.
//!
//! Command-line inputs may name configuration files directly or
//! directories to scan. Explicit files are taken as given; directories
//! contribute every `*.qr.yaml`, `*.qr.yml` and `*.qr.json` beneath them.
//!
//! # Example
//!
//! ```ignore
//! use qrstyle::discovery::discover_configs;
//!
//! let configs = discover_configs(&[PathBuf::from("codes/")])?;
//! for path in &configs {
//!     let config = StyleConfig::load(path)?;
//! }
//! ```

mod scanner;

use std::path::PathBuf;

use crate::error::{QrError, Result};

pub use scanner::{is_config_file, scan_directory, CONFIG_SUFFIXES};

/// Resolve inputs to a list of configuration files.
///
/// Duplicates are dropped, keeping the first occurrence. A missing input is
/// an error; a directory with no configurations contributes nothing.
pub fn discover_configs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let scanned = scan_directory(input);
            tracing::debug!(dir = %input.display(), count = scanned.len(), "scanned");
            found.extend(scanned);
        } else if input.is_file() {
            found.push(input.clone());
        } else {
            return Err(QrError::Io {
                path: input.clone(),
                message: "No such file or directory".to_string(),
            });
        }
    }

    let mut seen = std::collections::HashSet::new();
    found.retain(|p| seen.insert(p.clone()));
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_mixed_inputs() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("codes")).unwrap();
        fs::write(dir.path().join("codes/a.qr.yaml"), "text: a").unwrap();
        fs::write(dir.path().join("codes/b.qr.json"), "{}").unwrap();

        // Explicit files need not follow the naming convention
        let explicit = dir.path().join("custom.yaml");
        fs::write(&explicit, "text: c").unwrap();

        let found = discover_configs(&[
            dir.path().join("codes"),
            explicit.clone(),
            dir.path().join("codes/a.qr.yaml"),
        ])
        .unwrap();

        assert_eq!(found.len(), 3);
        assert_eq!(found[2], explicit);
    }

    #[test]
    fn test_discover_missing_input() {
        let dir = tempdir().unwrap();
        let err = discover_configs(&[dir.path().join("missing.qr.yaml")]).unwrap_err();
        assert!(matches!(err, QrError::Io { .. }));
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(discover_configs(&[dir.path().to_path_buf()]).unwrap().is_empty());
    }
}
