//! Render command implementation.
//!
//! Loads each configuration, renders it once and exports every requested
//! format to the output directory as `<name>.<ext>`.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{QrError, Result};
use crate::export::{export, ExportFormat, ExportSize};
use crate::output::{display_path, plural, Printer};
use crate::render::{render, RenderContext};
use crate::validation::{print_diagnostics, validate_full};

use super::{load_jobs, Job, StyleOverrides};

/// Render codes to SVG, PNG, JPEG or PDF
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Config files or directories to scan for *.qr.yaml / *.qr.json
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub style: StyleOverrides,

    /// Output formats, comma separated
    #[arg(long, short, value_enum, value_delimiter = ',', default_value = "svg")]
    pub format: Vec<ExportFormat>,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,

    /// Run pre-publication checks and skip codes that fail
    #[arg(long)]
    pub validate: bool,
}

pub async fn run(args: RenderArgs, printer: &Printer) -> Result<()> {
    let jobs = load_jobs(&args.inputs, &args.style)?;

    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| QrError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let mut written = 0;
    let mut rejected = 0;

    for job in &jobs {
        if args.validate {
            printer.status("Validating", &job.name);
            let report = validate_full(&job.config, &job.config.export).await;
            if !report.is_ok() {
                print_diagnostics(&report, printer);
            }
            if report.has_errors() {
                rejected += 1;
                continue;
            }
        }

        written += render_job(job, &args, printer).await?;
    }

    printer.status(
        "Finished",
        &format!(
            "{} to {}",
            plural(written, "file", "files"),
            display_path(&args.output)
        ),
    );

    if rejected > 0 {
        return Err(QrError::Validation {
            message: format!("{} failed validation", plural(rejected, "code", "codes")),
            help: Some("Run `qrstyle validate` for details".to_string()),
        });
    }

    Ok(())
}

async fn render_job(job: &Job, args: &RenderArgs, printer: &Printer) -> Result<usize> {
    let config = &job.config;
    printer.status(
        "Rendering",
        &format!(
            "{} {}",
            job.name,
            printer.dim(&format!(
                "({}/{}/{}, {}px)",
                config.pattern, config.corner_pattern, config.corner_dot_pattern, config.size
            ))
        ),
    );

    let result = render(config, RenderContext::Preview)?;
    let size = ExportSize::square(config.size);

    let mut count = 0;
    for format in &args.format {
        let bytes = export(&result, *format, size, &config.export).await?;
        let path = args.output.join(format!("{}.{}", job.name, format.extension()));
        fs::write(&path, &bytes).map_err(|e| QrError::Io {
            path: path.clone(),
            message: format!("Failed to write output: {}", e),
        })?;
        printer.wrote(&path, bytes.len());
        count += 1;
    }

    Ok(count)
}
