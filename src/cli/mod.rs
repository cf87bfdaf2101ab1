pub mod completions;
pub mod init;
pub mod list;
pub mod render;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::discovery::{discover_configs, CONFIG_SUFFIXES};
use crate::error::{QrError, Result};
use crate::types::{CornerDotPatternId, CornerPatternId, PatternId, StyleConfig};

/// qrstyle - Styled QR code renderer
#[derive(Parser, Debug)]
#[command(name = "qrstyle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log pipeline steps (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render codes to SVG, PNG, JPEG or PDF
    Render(render::RenderArgs),

    /// Check codes are scannable before publishing
    Validate(validate::ValidateArgs),

    /// List module patterns, eye patterns and templates
    List(list::ListArgs),

    /// Write a sample configuration (example.qr.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Flags that override configuration file values.
#[derive(Args, Debug, Default, Clone)]
pub struct StyleOverrides {
    /// Text to encode
    #[arg(long)]
    pub text: Option<String>,

    /// Output size in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Module pattern (see `qrstyle list`)
    #[arg(long)]
    pub pattern: Option<String>,

    /// Eye ring pattern
    #[arg(long)]
    pub corner: Option<String>,

    /// Eye dot pattern
    #[arg(long)]
    pub corner_dot: Option<String>,

    /// Template id
    #[arg(long)]
    pub template: Option<String>,
}

impl StyleOverrides {
    /// Apply the flags that were given.
    pub fn apply(&self, config: &mut StyleConfig) {
        if let Some(text) = &self.text {
            config.text = text.clone();
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(pattern) = &self.pattern {
            config.pattern = PatternId::from_name(pattern);
        }
        if let Some(corner) = &self.corner {
            config.corner_pattern = CornerPatternId::from_name(corner);
        }
        if let Some(dot) = &self.corner_dot {
            config.corner_dot_pattern = CornerDotPatternId::from_name(dot);
        }
        if let Some(template) = &self.template {
            config.template = Some(template.clone());
        }
    }
}

/// A configuration ready to render, with the name its outputs take.
#[derive(Debug, Clone)]
pub struct Job {
    pub name: String,
    pub source: Option<PathBuf>,
    pub config: StyleConfig,
}

/// Resolve command-line inputs to jobs.
///
/// With no inputs, `--text` alone describes a single job named `qr`.
/// Relative image paths resolve against each configuration's directory.
pub fn load_jobs(inputs: &[PathBuf], overrides: &StyleOverrides) -> Result<Vec<Job>> {
    if inputs.is_empty() {
        if overrides.text.is_none() {
            return Err(QrError::Parse {
                message: "Nothing to render".to_string(),
                help: Some("Pass config files or directories, or use --text".to_string()),
            });
        }
        let mut config = StyleConfig::default();
        overrides.apply(&mut config);
        config.export.asset_root = std::env::current_dir().ok();
        return Ok(vec![Job {
            name: "qr".to_string(),
            source: None,
            config,
        }]);
    }

    let paths = discover_configs(inputs)?;
    if paths.is_empty() {
        return Err(QrError::Parse {
            message: "No configuration files found".to_string(),
            help: Some(format!("Config files end in {}", CONFIG_SUFFIXES.join(", "))),
        });
    }

    let mut jobs = Vec::with_capacity(paths.len());
    for path in paths {
        let mut config = StyleConfig::load(&path)?;
        overrides.apply(&mut config);
        config.export.asset_root = path.parent().map(Path::to_path_buf);
        jobs.push(Job {
            name: job_name(&path),
            source: Some(path),
            config,
        });
    }
    Ok(jobs)
}

/// Output base name: the file name without its config suffix.
pub fn job_name(path: &Path) -> String {
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();
    let lower = filename.to_ascii_lowercase();

    for suffix in CONFIG_SUFFIXES {
        if lower.ends_with(suffix) && filename.len() > suffix.len() {
            return filename[..filename.len() - suffix.len()].to_string();
        }
    }

    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "qr".to_string())
}
