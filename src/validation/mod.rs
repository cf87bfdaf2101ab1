//! Pre-publication validation for style configurations.
//!
//! Runs a suite of configuration checks and, on request, a decode check of
//! the rendered output. Used by `qrstyle validate` and `qrstyle render
//! --validate`.

mod checks;
mod verify;
mod warning;

pub use checks::{LOGO_BUDGET, MIN_CONTRAST, MIN_QUIET_ZONE};
pub use verify::{decode_bitmap, verify_decodes};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::export::ExportOptions;
use crate::output::{plural, Printer};
use crate::render::{render, RenderContext};
use crate::types::StyleConfig;

/// Run all configuration checks.
pub fn validate_config(config: &StyleConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_size(config));
    result.merge(checks::check_text(config));
    result.merge(checks::check_contrast(config));
    result.merge(checks::check_quiet_zone(config));
    result.merge(checks::check_logo_coverage(config));
    result.merge(checks::check_template(config));

    result
}

/// Configuration checks followed by a decode check of a verification
/// render. The decode check is skipped when the configuration already has
/// errors.
pub async fn validate_full(config: &StyleConfig, options: &ExportOptions) -> ValidationResult {
    let mut result = validate_config(config);
    if result.has_errors() {
        return result;
    }

    let outcome = match render(config, RenderContext::Verification) {
        Ok(rendered) => verify_decodes(&rendered, &config.text, options).await,
        Err(e) => Err(e),
    };
    match outcome {
        Ok(verified) => result.merge(verified),
        Err(e) => result.push(
            Diagnostic::error("qrstyle::verify::undecodable", e.to_string())
                .with_help("The code could not be rendered for verification"),
        ),
    }

    result
}

/// Print diagnostics and a summary line to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        printer.diagnostic(d);
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        printer.error(
            "Failed",
            &format!(
                "{}, {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
        );
    } else if warnings > 0 {
        printer.warning("Passed", &plural(warnings, "warning", "warnings"));
    } else {
        printer.status("Passed", "no issues");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CornerDotPatternId, CornerPatternId, PatternId};

    #[test]
    fn test_validate_default_config() {
        let result = validate_config(&StyleConfig::new("https://example.com"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_collects_everything() {
        let mut config = StyleConfig::new("");
        config.size = 10;
        config.margin = 0;
        config.template = Some("missing".to_string());

        let result = validate_config(&config);
        assert_eq!(result.error_count(), 2);
        assert_eq!(result.warning_count(), 2);
    }

    #[tokio::test]
    async fn test_validate_full_decodes() {
        let mut config = StyleConfig::new("hello world");
        config.pattern = PatternId::Square;
        config.corner_pattern = CornerPatternId::Square;
        config.corner_dot_pattern = CornerDotPatternId::Square;

        let result = validate_full(&config, &ExportOptions::default()).await;
        assert!(!result.has_errors(), "{:?}", result);
    }

    #[tokio::test]
    async fn test_validate_full_skips_decode_on_errors() {
        let config = StyleConfig::new("");
        let result = validate_full(&config, &ExportOptions::default()).await;
        assert!(result.has_code("qrstyle::validate::empty-text"));
        assert!(!result.has_code("qrstyle::verify::undecodable"));
    }
}
