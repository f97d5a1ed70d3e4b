//! Error types for placard

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlacardError>;

/// Main error type for placard
#[derive(Debug, Error)]
pub enum PlacardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Invalid dimensions {width}x{height}: values for width or height must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// Problems with the options a generator is built from
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no font option specified")]
    MissingFont,

    #[error("margin ratio must be below 1.0, got {0}")]
    InvalidMarginRatio(f64),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file could not be read: {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid font data")]
    InvalidData,
}

/// Measurement and drawing errors raised by a rasterizer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Font data could not be parsed for rendering")]
    InvalidFont,

    #[error("Outline extraction failed")]
    OutlineExtractionFailed,

    #[error("Pixmap creation failed for {width}x{height}")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Canvas is {width}x{height} but the source buffer holds {len} bytes")]
    CanvasMismatch { width: u32, height: u32, len: usize },

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
