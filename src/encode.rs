//! Encoder boundary.
//!
//! Turning text into a module matrix is delegated to the `qrcode` crate; the
//! rest of the pipeline only ever sees a `ModuleGrid`.

use qrcode::{EcLevel, QrCode};

use crate::error::{QrError, Result};
use crate::types::{EccLevel, ModuleGrid};

impl From<EccLevel> for EcLevel {
    fn from(level: EccLevel) -> Self {
        match level {
            EccLevel::L => EcLevel::L,
            EccLevel::M => EcLevel::M,
            EccLevel::Q => EcLevel::Q,
            EccLevel::H => EcLevel::H,
        }
    }
}

/// Encode `text` at the given error correction level.
///
/// Deterministic: the same input always yields the same grid.
pub fn encode(text: &str, ecc: EccLevel) -> Result<ModuleGrid> {
    if text.is_empty() {
        return Err(QrError::Encode {
            message: "Empty text".to_string(),
            help: Some("Provide the text or URL to encode".to_string()),
        });
    }

    let code = QrCode::with_error_correction_level(text.as_bytes(), ecc.into()).map_err(|e| {
        QrError::Encode {
            message: format!("Cannot encode {} bytes at level {}: {}", text.len(), ecc, e),
            help: Some("Shorten the text or lower the error correction level".to_string()),
        }
    })?;

    let size = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == qrcode::Color::Dark)
        .collect();

    tracing::debug!(size, %ecc, "encoded module grid");
    ModuleGrid::new(size, modules)
}
