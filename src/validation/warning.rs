//! Diagnostics raised by config checks and scan verification.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// One finding about a config or a rendered code.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable code such as `qrstyle::validate::contrast`.
    pub code: String,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    /// A finding that blocks rendering.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// A finding that still allows rendering.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Diagnostics gathered for one render request.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Append the findings of a later stage, keeping their order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// True when nothing at all was reported.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_result_is_clean() {
        let result = ValidationResult::new();
        assert!(result.is_ok());
        assert!(!result.has_errors());
        assert_eq!(result.iter().count(), 0);
    }

    #[test]
    fn test_warnings_alone_do_not_block() {
        let mut result = ValidationResult::new();
        result.push(Diagnostic::warning(
            "qrstyle::validate::quiet-zone",
            "margin of 1 module",
        ));
        result.push(Diagnostic::warning(
            "qrstyle::validate::contrast",
            "contrast 1.2:1",
        ));

        assert!(!result.is_ok());
        assert!(!result.has_errors());
        assert_eq!(result.warning_count(), 2);
        assert!(result.has_code("qrstyle::validate::contrast"));
        assert!(!result.has_code("qrstyle::verify::undecodable"));
    }

    #[test]
    fn test_merge_keeps_stage_order() {
        let mut checks = ValidationResult::new();
        checks.push(Diagnostic::warning(
            "qrstyle::validate::unknown-template",
            "no template 'badge'",
        ));

        let mut verify = ValidationResult::new();
        verify.push(
            Diagnostic::error("qrstyle::verify::undecodable", "no code found")
                .with_help("Raise the error correction level"),
        );

        checks.merge(verify);
        assert!(checks.has_errors());
        assert_eq!(checks.error_count(), 1);
        assert_eq!(checks.warning_count(), 1);

        let codes: Vec<&str> = checks.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(
            codes,
            ["qrstyle::validate::unknown-template", "qrstyle::verify::undecodable"]
        );
        let last = checks.iter().last().and_then(|d| d.help.as_deref());
        assert_eq!(last, Some("Raise the error correction level"));
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
