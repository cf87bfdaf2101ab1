//! SVG rasterization and PNG/JPEG encoding.
//!
//! A fresh pixmap is allocated for every call at exactly the requested
//! dimensions and dropped once its pixels are copied out.

use std::io::Cursor;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;

use crate::error::{QrError, Result};
use crate::types::Colour;

use super::size::ExportSize;

/// Bitmap output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    /// Colour painted under the drawing; `None` keeps transparency.
    pub fn prefill(self) -> Option<Colour> {
        match self {
            RasterFormat::Png => None,
            RasterFormat::Jpeg => Some(Colour::WHITE),
        }
    }
}

static FONTS: LazyLock<Arc<usvg::fontdb::Database>> = LazyLock::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system fonts");
    Arc::new(db)
});

/// Rasterize on the blocking pool, giving up after `timeout`.
pub async fn rasterize(
    svg: String,
    size: ExportSize,
    prefill: Option<Colour>,
    timeout: Duration,
) -> Result<RgbaImage> {
    let task = tokio::task::spawn_blocking(move || rasterize_blocking(&svg, size, prefill));
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(QrError::Rasterize {
            message: format!("Rasterizer task failed: {}", e),
        }),
        Err(_) => Err(QrError::Timeout {
            seconds: timeout.as_secs(),
        }),
    }
}

/// Parse `svg` and draw it scaled to fill `size`.
pub fn rasterize_blocking(svg: &str, size: ExportSize, prefill: Option<Colour>) -> Result<RgbaImage> {
    let options = usvg::Options {
        fontdb: Arc::clone(&FONTS),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| QrError::Rasterize {
        message: format!("Invalid SVG: {}", e),
    })?;

    let mut pixmap = Pixmap::new(size.width, size.height).ok_or_else(|| QrError::Rasterize {
        message: format!("Cannot allocate a {}x{} pixmap", size.width, size.height),
    })?;
    if let Some(colour) = prefill {
        pixmap.fill(Color::from_rgba8(colour.r, colour.g, colour.b, colour.a));
    }

    let tree_size = tree.size();
    let transform = Transform::from_scale(
        size.width as f32 / tree_size.width(),
        size.height as f32 / tree_size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(size.width, size.height, rgba).ok_or_else(|| QrError::Rasterize {
        message: "Pixel buffer does not match the requested size".to_string(),
    })
}

/// Encode a bitmap as PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(|e| QrError::Rasterize {
            message: format!("Failed to encode PNG: {}", e),
        })?;
    Ok(buf.into_inner())
}

/// Encode a bitmap as baseline JPEG, flattening alpha.
pub fn encode_jpeg(img: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| QrError::Rasterize {
            message: format!("Failed to encode JPEG: {}", e),
        })?;
    Ok(buf.into_inner())
}
