//! Configuration checks.
//!
//! Each check takes a `&StyleConfig` and returns a `ValidationResult`.

use crate::encode::encode;
use crate::export::{ExportSize, MAX_EXPORT_SIZE, MIN_EXPORT_SIZE};
use crate::render::{compute_excavation, effective_ecc, RenderContext};
use crate::template::TemplateRegistry;
use crate::types::{Colour, StyleConfig};

use super::warning::{Diagnostic, ValidationResult};

/// Minimum WCAG contrast between foreground and background.
pub const MIN_CONTRAST: f32 = 3.0;

/// Minimum recommended quiet zone, in modules.
pub const MIN_QUIET_ZONE: u32 = 2;

/// Share of the ECC recovery budget a logo may consume.
pub const LOGO_BUDGET: f32 = 0.8;

/// Check the output size is exportable.
pub fn check_size(config: &StyleConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if let Err(e) = ExportSize::square(config.size).validate() {
        result.push(
            Diagnostic::error("qrstyle::validate::size", e.to_string()).with_help(format!(
                "Use a size between {} and {} pixels",
                MIN_EXPORT_SIZE, MAX_EXPORT_SIZE
            )),
        );
    }

    result
}

/// Check there is something to encode.
pub fn check_text(config: &StyleConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if config.text.trim().is_empty() {
        result.push(
            Diagnostic::error("qrstyle::validate::empty-text", "No text to encode")
                .with_help("Set `text` in the config or pass --text"),
        );
    }

    result
}

/// Check the foreground stands out from the background.
pub fn check_contrast(config: &StyleConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    let fg = config.foreground_spec().primary(Colour::BLACK);
    let bg = config.background_spec().primary(Colour::WHITE);
    let ratio = fg.contrast_ratio(bg);

    if ratio < MIN_CONTRAST {
        result.push(
            Diagnostic::warning(
                "qrstyle::validate::contrast",
                format!(
                    "Contrast between {} and {} is {:.2}:1, below {}:1",
                    fg, bg, ratio, MIN_CONTRAST
                ),
            )
            .with_help("Scanners need dark modules on a light background; increase the contrast"),
        );
    }

    result
}

/// Check the quiet zone is wide enough.
pub fn check_quiet_zone(config: &StyleConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    // Templates draw their own padding around the code
    let framed = config
        .template
        .as_deref()
        .and_then(TemplateRegistry::get)
        .is_some();
    if config.margin < MIN_QUIET_ZONE && !framed {
        result.push(
            Diagnostic::warning(
                "qrstyle::validate::quiet-zone",
                format!("Margin of {} module(s) is below {}", config.margin, MIN_QUIET_ZONE),
            )
            .with_help("Use a margin of at least 2 modules (4 is standard)"),
        );
    }

    result
}

/// Check an excavating logo leaves enough modules for error correction.
pub fn check_logo_coverage(config: &StyleConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(image) = config.image.as_ref().filter(|img| img.excavate) else {
        return result;
    };
    if !image.is_usable() || config.size == 0 {
        return result;
    }

    let ecc = effective_ecc(config.ecc, true, RenderContext::Verification);
    // Empty or oversized text is reported by other checks
    let Ok(grid) = encode(&config.text, ecc) else {
        return result;
    };

    let n = grid.size();
    let placement = compute_excavation(n, config.margin, config.size, image);
    let cleared = (0..n)
        .flat_map(|y| (0..n).map(move |x| (x, y)))
        .filter(|&(x, y)| placement.excavation.contains(x, y))
        .count();
    let coverage = cleared as f32 / (n * n) as f32;
    let budget = ecc.recovery() * LOGO_BUDGET;

    if coverage > budget {
        result.push(
            Diagnostic::warning(
                "qrstyle::validate::logo-coverage",
                format!(
                    "Logo clears {:.1}% of modules; level {} tolerates about {:.1}%",
                    coverage * 100.0,
                    ecc,
                    budget * 100.0
                ),
            )
            .with_help("Shrink the logo or raise `ecc` to H"),
        );
    }

    result
}

/// Check the template id names a known template.
pub fn check_template(config: &StyleConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if let Some(id) = config.template.as_deref() {
        if TemplateRegistry::get(id).is_none() {
            let known: Vec<_> = TemplateRegistry::all().iter().map(|t| t.id).collect();
            result.push(
                Diagnostic::warning(
                    "qrstyle::validate::unknown-template",
                    format!("Unknown template '{}'; rendering without one", id),
                )
                .with_help(format!("Known templates: {}", known.join(", "))),
            );
        }
    }

    result
}
