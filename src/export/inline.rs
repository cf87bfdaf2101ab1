//! Inline external `<image>` references as base64 data URIs.
//!
//! The rasterizer never touches the network or the filesystem: every image
//! is resolved here first. A reference that cannot be loaded is removed from
//! the document and logged.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures_util::future::join_all;
use quick_xml::escape::{escape, unescape};
use regex::{Captures, NoExpand, Regex};

use crate::error::{QrError, Result};

const IMAGE_TAG: &str = r#"<image\b[^>]*?(?:/>|>\s*</image>)"#;
const HREF_ATTR: &str = r#"\bhref="([^"]*)""#;

/// Replace every external `<image href>` in `svg` with an inline data URI.
///
/// Relative paths resolve against `root` (or the working directory).
/// Loads run concurrently, each bounded by `timeout`.
pub async fn inline_images(svg: &str, timeout: Duration, root: Option<&Path>) -> Result<String> {
    let tag_re = compile(IMAGE_TAG)?;
    let href_re = compile(HREF_ATTR)?;

    let mut pending: Vec<String> = Vec::new();
    for tag in tag_re.find_iter(svg) {
        if let Some(raw) = href_re.captures(tag.as_str()).and_then(|c| c.get(1)) {
            let href = attr_value(raw.as_str());
            if !href.starts_with("data:") && !pending.iter().any(|p| *p == href) {
                pending.push(href);
            }
        }
    }
    if pending.is_empty() {
        return Ok(svg.to_string());
    }

    let loads = pending.iter().map(|href| async move {
        let loaded = match tokio::time::timeout(timeout, load(href, root)).await {
            Ok(Ok(uri)) => Some(uri),
            Ok(Err(e)) => {
                tracing::warn!(href = %href, error = %e, "dropping image that failed to load");
                None
            }
            Err(_) => {
                tracing::warn!(href = %href, timeout_secs = timeout.as_secs(), "dropping image that timed out");
                None
            }
        };
        (href.clone(), loaded)
    });
    let resolved: HashMap<String, Option<String>> = join_all(loads).await.into_iter().collect();

    let out = tag_re.replace_all(svg, |caps: &Captures| {
        let tag = &caps[0];
        let Some(raw) = href_re.captures(tag).and_then(|c| c.get(1)) else {
            return tag.to_string();
        };
        match resolved.get(&attr_value(raw.as_str())) {
            Some(Some(uri)) => href_re
                .replace(tag, NoExpand(&format!("href=\"{}\"", escape(uri.as_str()))))
                .into_owned(),
            Some(None) => String::new(),
            None => tag.to_string(),
        }
    });
    Ok(out.into_owned())
}

/// Attribute text as written in the document, with XML entities decoded.
fn attr_value(raw: &str) -> String {
    match unescape(raw) {
        Ok(value) => value.into_owned(),
        Err(e) => {
            tracing::debug!(href = raw, error = %e, "href left undecoded");
            raw.to_string()
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| QrError::Rasterize {
        message: format!("Bad image pattern: {}", e),
    })
}

async fn load(href: &str, root: Option<&Path>) -> Result<String> {
    let bytes = if href.starts_with("http://") || href.starts_with("https://") {
        fetch(href).await?
    } else {
        let path = resolve_path(href, root);
        tokio::fs::read(&path).await.map_err(|e| QrError::Io {
            path: path.clone(),
            message: format!("Failed to read image: {}", e),
        })?
    };

    let mime = sniff_mime(&bytes).ok_or_else(|| QrError::Parse {
        message: format!("Unrecognised image data in {}", href),
        help: Some("Use PNG, JPEG, GIF, WebP or SVG images".to_string()),
    })?;
    tracing::debug!(href, mime, bytes = bytes.len(), "inlined image");
    Ok(to_data_uri(mime, &bytes))
}

async fn fetch(url: &str) -> Result<Vec<u8>> {
    let http_error = |e: reqwest::Error| QrError::Io {
        path: PathBuf::from(url),
        message: format!("Failed to fetch image: {}", e),
    };
    let response = reqwest::get(url).await.map_err(http_error)?;
    let response = response.error_for_status().map_err(http_error)?;
    let bytes = response.bytes().await.map_err(http_error)?;
    Ok(bytes.to_vec())
}

fn resolve_path(href: &str, root: Option<&Path>) -> PathBuf {
    let raw = href.strip_prefix("file://").unwrap_or(href);
    let path = PathBuf::from(raw);
    match root {
        Some(root) if path.is_relative() => root.join(path),
        _ => path,
    }
}

/// Mime type from the leading bytes.
fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if let Ok(format) = image::guess_format(bytes) {
        return Some(format.to_mime_type());
    }
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]);
    let head = head.trim_start();
    if head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
        return Some("image/svg+xml");
    }
    None
}

/// `data:` URI for `bytes` of type `mime`.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(&png_bytes()), Some("image/png"));
        assert_eq!(sniff_mime(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>"), Some("image/svg+xml"));
        assert_eq!(sniff_mime(b"not an image"), None);
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/assets");
        assert_eq!(resolve_path("logo.png", Some(root)), PathBuf::from("/assets/logo.png"));
        assert_eq!(resolve_path("file:///tmp/logo.png", Some(root)), PathBuf::from("/tmp/logo.png"));
        assert_eq!(resolve_path("logo.png", None), PathBuf::from("logo.png"));
    }

    #[tokio::test]
    async fn test_inline_local_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), png_bytes()).unwrap();

        let svg = r#"<svg><image href="logo.png" width="10" height="10"/></svg>"#;
        let out = inline_images(svg, Duration::from_secs(5), Some(dir.path())).await.unwrap();
        assert!(out.contains("href=\"data:image/png;base64,"));
        assert!(out.contains("width=\"10\""));
    }

    #[tokio::test]
    async fn test_escaped_href_resolves() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a&b.png"), png_bytes()).unwrap();

        let svg = r#"<svg><image href="a&amp;b.png" width="10"/></svg>"#;
        let out = inline_images(svg, Duration::from_secs(5), Some(dir.path())).await.unwrap();
        assert!(out.contains("href=\"data:image/png;base64,"), "{}", out);
        assert!(!out.contains("a&amp;b.png"));
    }

    #[test]
    fn test_attr_value_decodes_entities() {
        assert_eq!(attr_value("logo.png?w=64&amp;h=64"), "logo.png?w=64&h=64");
        assert_eq!(attr_value("plain.png"), "plain.png");
    }

    #[tokio::test]
    async fn test_missing_image_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let svg = r#"<svg><rect/><image href="missing.png" width="10"/></svg>"#;
        let out = inline_images(svg, Duration::from_secs(5), Some(dir.path())).await.unwrap();
        assert_eq!(out, "<svg><rect/></svg>");
    }

    #[tokio::test]
    async fn test_data_uri_untouched() {
        let svg = r#"<svg><image href="data:image/png;base64,AAAA"/></svg>"#;
        let out = inline_images(svg, Duration::from_secs(1), None).await.unwrap();
        assert_eq!(out, svg);
    }

    #[test]
    fn test_to_data_uri() {
        assert_eq!(to_data_uri("image/svg+xml", b"<svg/>"), "data:image/svg+xml;base64,PHN2Zy8+");
    }
}
