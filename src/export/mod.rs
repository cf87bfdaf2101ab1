//! Export of rendered codes to SVG, PNG, JPEG and PDF.
//!
//! Every format goes through the same size validation. Raster and PDF
//! output inline external images first, then rasterize on the blocking
//! pool under a timeout.

mod inline;
mod pdf;
mod raster;
mod size;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{QrError, Result};
use crate::render::RenderResult;

pub use inline::inline_images;
pub use pdf::{mm_to_pt, px_to_mm, write_pdf};
pub use raster::{encode_jpeg, encode_png, rasterize, rasterize_blocking, RasterFormat};
pub use size::{ExportSize, MAX_EXPORT_SIZE, MIN_EXPORT_SIZE};

/// Export tuning; all fields have defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Upper bound on one rasterization.
    pub decode_timeout_secs: u64,
    /// Upper bound on loading one external image.
    pub image_timeout_secs: u64,
    /// Pixel density used to size PDF pages.
    pub dpi: f32,
    pub jpeg_quality: u8,
    /// Directory relative image paths resolve against.
    #[serde(skip)]
    pub asset_root: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            decode_timeout_secs: 30,
            image_timeout_secs: 10,
            dpi: 96.0,
            jpeg_quality: 92,
            asset_root: None,
        }
    }
}

impl ExportOptions {
    fn decode_timeout(&self) -> Duration {
        Duration::from_secs(self.decode_timeout_secs)
    }

    fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }
}

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Svg,
    Png,
    #[value(alias = "jpg")]
    #[serde(alias = "jpg")]
    Jpeg,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Svg,
        ExportFormat::Png,
        ExportFormat::Jpeg,
        ExportFormat::Pdf,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Pdf => "pdf",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            "jpeg" | "jpg" => Ok(ExportFormat::Jpeg),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(QrError::Parse {
                message: format!("Unknown export format '{}'", s),
                help: Some("Use svg, png, jpeg or pdf".to_string()),
            }),
        }
    }
}

/// The document as rendered, without resizing.
pub fn to_vector_string(result: &RenderResult) -> String {
    result.to_svg_string()
}

/// The document serialized at `size`; only the root `width`/`height`
/// change, the geometry scales through the `viewBox`.
pub fn to_svg(result: &RenderResult, size: ExportSize) -> Result<String> {
    let size = size.validate()?;
    Ok(result
        .document
        .clone()
        .set("width", size.width)
        .set("height", size.height)
        .to_string())
}

/// Base64 `data:` URI form of an SVG string.
pub fn to_data_uri(svg: &str) -> String {
    inline::to_data_uri("image/svg+xml", svg.as_bytes())
}

async fn rasterized(
    result: &RenderResult,
    size: ExportSize,
    prefill: Option<crate::types::Colour>,
    options: &ExportOptions,
) -> Result<image::RgbaImage> {
    let svg = to_svg(result, size)?;
    let svg = inline_images(&svg, options.image_timeout(), options.asset_root.as_deref()).await?;
    rasterize(svg, size, prefill, options.decode_timeout()).await
}

/// Rasterize to PNG or JPEG at exactly `size`.
pub async fn to_raster(
    result: &RenderResult,
    format: RasterFormat,
    size: ExportSize,
    options: &ExportOptions,
) -> Result<Vec<u8>> {
    let img = rasterized(result, size, format.prefill(), options).await?;
    match format {
        RasterFormat::Png => encode_png(&img),
        RasterFormat::Jpeg => encode_jpeg(&img, options.jpeg_quality),
    }
}

/// Single-page PDF at `size` pixels, converted to a page size via the
/// configured DPI.
pub async fn to_page_format(
    result: &RenderResult,
    size: ExportSize,
    options: &ExportOptions,
) -> Result<Vec<u8>> {
    let img = rasterized(result, size, Some(crate::types::Colour::WHITE), options).await?;
    write_pdf(&img, options.dpi, options.jpeg_quality)
}

/// Export in any format.
pub async fn export(
    result: &RenderResult,
    format: ExportFormat,
    size: ExportSize,
    options: &ExportOptions,
) -> Result<Vec<u8>> {
    tracing::debug!(%format, width = size.width, height = size.height, "exporting");
    match format {
        ExportFormat::Svg => to_svg(result, size).map(String::into_bytes),
        ExportFormat::Png => to_raster(result, RasterFormat::Png, size, options).await,
        ExportFormat::Jpeg => to_raster(result, RasterFormat::Jpeg, size, options).await,
        ExportFormat::Pdf => to_page_format(result, size, options).await,
    }
}
