//! Decode check: rasterize the code and read it back.

use std::time::Duration;

use image::{DynamicImage, RgbaImage};

use crate::error::{QrError, Result};
use crate::export::{rasterize, ExportOptions, ExportSize};
use crate::render::RenderResult;
use crate::types::Colour;

use super::warning::{Diagnostic, ValidationResult};

/// Decode every code found in `img`.
pub fn decode_bitmap(img: &RgbaImage) -> Vec<String> {
    let luma = DynamicImage::ImageRgba8(img.clone()).to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        luma.width() as usize,
        luma.height() as usize,
        |x, y| luma.get_pixel(x as u32, y as u32).0[0],
    );

    prepared
        .detect_grids()
        .into_iter()
        .filter_map(|grid| match grid.decode() {
            Ok((_, content)) => Some(content),
            Err(e) => {
                tracing::debug!(error = %e, "grid failed to decode");
                None
            }
        })
        .collect()
}

/// Rasterize `result` on white and check it decodes back to `expected`.
pub async fn verify_decodes(
    result: &RenderResult,
    expected: &str,
    options: &ExportOptions,
) -> Result<ValidationResult> {
    let size = ExportSize::square(result.size);
    let svg = crate::export::to_svg(result, size)?;
    let svg = crate::export::inline_images(
        &svg,
        Duration::from_secs(options.image_timeout_secs),
        options.asset_root.as_deref(),
    )
    .await?;
    let timeout = Duration::from_secs(options.decode_timeout_secs);
    let img = rasterize(svg, size, Some(Colour::WHITE), timeout).await?;

    let task = tokio::task::spawn_blocking(move || decode_bitmap(&img));
    let decoded = match tokio::time::timeout(timeout, task).await {
        Ok(Ok(decoded)) => decoded,
        Ok(Err(e)) => {
            return Err(QrError::Rasterize {
                message: format!("Decoder task failed: {}", e),
            })
        }
        Err(_) => {
            return Err(QrError::Timeout {
                seconds: timeout.as_secs(),
            })
        }
    };

    let mut out = ValidationResult::new();
    if decoded.iter().any(|content| content == expected) {
        tracing::debug!(size = result.size, "decode check passed");
        return Ok(out);
    }

    let message = match decoded.first() {
        None => "Rendered code could not be decoded".to_string(),
        Some(other) => format!("Rendered code decodes to '{}', expected '{}'", other, expected),
    };
    out.push(
        Diagnostic::error("qrstyle::verify::undecodable", message)
            .with_help("Raise contrast, shrink the logo or choose plainer patterns"),
    );
    Ok(out)
}
