use miette::Diagnostic;
use thiserror::Error;

/// Main error type for qrstyle operations
#[derive(Error, Diagnostic, Debug)]
pub enum QrError {
    #[error("IO error: {0}")]
    #[diagnostic(code(qrstyle::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(qrstyle::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(qrstyle::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid size: {message}")]
    #[diagnostic(
        code(qrstyle::size),
        help("Width and height must be equal and within 50..=5000 pixels")
    )]
    InvalidSize { message: String },

    #[error("Encode error: {message}")]
    #[diagnostic(code(qrstyle::encode))]
    Encode {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Rasterize error: {message}")]
    #[diagnostic(code(qrstyle::rasterize))]
    Rasterize { message: String },

    #[error("Rasterization timed out after {seconds}s")]
    #[diagnostic(code(qrstyle::timeout))]
    Timeout { seconds: u64 },

    #[error("Validation failed: {message}")]
    #[diagnostic(code(qrstyle::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, QrError>;
