//! Init command implementation.
//!
//! Writes a commented sample configuration to start from.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{QrError, Result};
use crate::output::{display_path, Printer};

/// File name written by `qrstyle init`.
pub const EXAMPLE_FILENAME: &str = "example.qr.yaml";

const EXAMPLE_CONFIG: &str = r##"# qrstyle configuration. Render with: qrstyle render example.qr.yaml
text: https://example.com

# Output size in pixels (50..=5000)
size: 512

# Error correction: L, M, Q or H
ecc: Q

# Quiet zone, in modules
margin: 4

# Run `qrstyle list` for every pattern and template
pattern: rounded-square
corner_pattern: gear
corner_dot_pattern: circle

foreground:
  type: linear
  angle: 45
  stops:
    - { offset: 0, color: "#1d4ed8" }
    - { offset: 100, color: "#9333ea" }
background: "#ffffff"
eye_color: "#111827"

# Logo overlay; modules underneath are cleared when `excavate` is set
# image:
#   src: logo.png
#   width: 96
#   height: 96
#   excavate: true

# template: frame

export:
  dpi: 300
  jpeg_quality: 92
"##;

/// Write a sample configuration (example.qr.yaml)
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing example.qr.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let target = args.path.join(EXAMPLE_FILENAME);

    if target.exists() && !args.force {
        return Err(QrError::Io {
            path: target,
            message: "already exists (use --force to overwrite)".to_string(),
        });
    }

    if !args.path.exists() {
        fs::create_dir_all(&args.path).map_err(|e| QrError::Io {
            path: args.path.clone(),
            message: format!("Failed to create directory: {}", e),
        })?;
    }

    fs::write(&target, EXAMPLE_CONFIG).map_err(|e| QrError::Io {
        path: target.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.status("Created", &display_path(&target));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfigFormat, CornerPatternId, EccLevel, PatternId, StyleConfig};
    use tempfile::tempdir;

    #[test]
    fn test_example_config_parses() {
        let config = StyleConfig::parse(EXAMPLE_CONFIG, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.text, "https://example.com");
        assert_eq!(config.size, 512);
        assert_eq!(config.ecc, EccLevel::Q);
        assert_eq!(config.pattern, PatternId::RoundedSquare);
        assert_eq!(config.corner_pattern, CornerPatternId::Gear);
        assert!(config.foreground_spec().is_gradient());
        assert_eq!(config.export.dpi, 300.0);
    }

    #[test]
    fn test_init_writes_example() {
        let dir = tempdir().unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &Printer::plain()).unwrap();

        let content = fs::read_to_string(dir.path().join(EXAMPLE_FILENAME)).unwrap();
        assert!(content.contains("text: https://example.com"));
    }

    #[test]
    fn test_init_errors_if_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(EXAMPLE_FILENAME), "text: mine").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        assert!(run(args, &Printer::plain()).is_err());

        let content = fs::read_to_string(dir.path().join(EXAMPLE_FILENAME)).unwrap();
        assert_eq!(content, "text: mine");
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(EXAMPLE_FILENAME), "text: mine").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        run(args, &Printer::plain()).unwrap();

        let content = fs::read_to_string(dir.path().join(EXAMPLE_FILENAME)).unwrap();
        assert!(content.contains("corner_pattern: gear"));
    }
}
