//! Validate command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::error::{QrError, Result};
use crate::output::{plural, Printer};
use crate::validation::{print_diagnostics, validate_full};

use super::{load_jobs, StyleOverrides};

/// Check codes are scannable before publishing
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Config files or directories to scan
    pub inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub style: StyleOverrides,
}

pub async fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let jobs = load_jobs(&args.inputs, &args.style)?;
    let mut failed = 0;

    for job in &jobs {
        printer.status("Validating", &job.name);
        let report = validate_full(&job.config, &job.config.export).await;
        print_diagnostics(&report, printer);
        if report.has_errors() {
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(QrError::Validation {
            message: format!(
                "{} of {} failed",
                failed,
                plural(jobs.len(), "code", "codes")
            ),
            help: Some("Fix the errors above before publishing".to_string()),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_validate_clean_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.qr.yaml");
        fs::write(
            &path,
            "text: https://example.com\nsize: 400\npattern: square\ncorner_pattern: square\ncorner_dot_pattern: square\n",
        )
        .unwrap();

        let args = ValidateArgs {
            inputs: vec![path],
            style: StyleOverrides::default(),
        };
        run(args, &Printer::plain()).await.unwrap();
    }

    #[tokio::test]
    async fn test_validate_fails_on_errors() {
        let args = ValidateArgs {
            inputs: Vec::new(),
            style: StyleOverrides {
                text: Some("https://example.com".to_string()),
                size: Some(20),
                ..Default::default()
            },
        };
        let err = run(args, &Printer::plain()).await.unwrap_err();
        assert!(matches!(err, QrError::Validation { .. }));
    }
}
