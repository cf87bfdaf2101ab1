//! qrstyle - Styled QR code renderer
//!
//! Encodes text into a module grid, draws it as SVG with custom module
//! shapes, eye patterns, gradients, logo excavation and optional framing
//! templates, then exports to SVG, PNG, JPEG or PDF.
//!
//! ```ignore
//! use qrstyle::{render, export, ExportFormat, ExportSize, RenderContext, StyleConfig};
//!
//! let config = StyleConfig::new("https://example.com");
//! let result = render(&config, RenderContext::Preview)?;
//! let png = export(&result, ExportFormat::Png, ExportSize::square(600), &config.export).await?;
//! ```

pub mod cli;
pub mod discovery;
pub mod encode;
pub mod error;
pub mod export;
pub mod output;
pub mod render;
pub mod template;
pub mod types;
pub mod validation;

pub use discovery::discover_configs;
pub use encode::encode;
pub use error::{QrError, Result};
pub use export::{
    export, to_data_uri, to_page_format, to_raster, to_svg, to_vector_string, ExportFormat,
    ExportOptions, ExportSize, RasterFormat,
};
pub use render::{render, RenderContext, RenderResult};
pub use template::{TemplateDefinition, TemplateRegistry};
pub use types::{
    ColorSpec, Colour, CornerDotPatternId, CornerPatternId, EccLevel, ImageSettings, ModuleGrid,
    PatternId, StyleConfig,
};
pub use validation::{validate_config, validate_full, Diagnostic, Severity, ValidationResult};
