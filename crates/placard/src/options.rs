//! Generator configuration
//!
//! Options are plain data, filled in the `..Default::default()` way and
//! resolved once by [`crate::ImageGenerator::new`]:
//!
//! - a missing color falls back to [`DEFAULT_FOREGROUND`] / [`DEFAULT_BACKGROUND`]
//! - a missing or negative margin ratio falls back to [`DEFAULT_MARGIN_RATIO`]
//! - a margin ratio of 1.0 or more (or NaN) is rejected
//! - a missing font is rejected
//!
//! Colors are `Option`s rather than "alpha 0 means unset", so
//! `Some(Color::rgba(0, 0, 0, 0))` really is a transparent color.

use std::path::PathBuf;
use std::sync::Arc;

use image::DynamicImage;
use placard_core::{
    error::{ConfigError, Result},
    Color, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_MARGIN_RATIO,
};
use placard_fontdb::Font;

/// Where the generator's font comes from
#[derive(Debug, Clone)]
pub enum FontSource {
    /// Raw TrueType/OpenType bytes
    Data(Vec<u8>),
    /// A font file on disk, read once at construction
    Path(PathBuf),
    /// A font that's already parsed, e.g. from a [`placard_fontdb::FontDatabase`]
    Loaded(Arc<Font>),
}

impl FontSource {
    pub(crate) fn load(self) -> Result<Arc<Font>> {
        match self {
            FontSource::Data(data) => Ok(Arc::new(Font::from_data(data)?)),
            FontSource::Path(path) => {
                log::debug!("Loading font from {}", path.display());
                Ok(Arc::new(Font::from_file(&path)?))
            },
            FontSource::Loaded(font) => Ok(font),
        }
    }
}

/// Everything an [`crate::ImageGenerator`] is built from
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    pub font: Option<FontSource>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    /// Drawn over the background color, fill-cropped to each canvas
    pub background_image: Option<DynamicImage>,
    /// Fraction of each dimension kept free of text, in `[0, 1)`
    pub margin_ratio: Option<f64>,
}

impl GeneratorOptions {
    /// Options with a font file and every other setting at its default
    pub fn with_font_path(path: impl Into<PathBuf>) -> Self {
        Self {
            font: Some(FontSource::Path(path.into())),
            ..Default::default()
        }
    }

    /// Options with in-memory font bytes and every other setting at its default
    pub fn with_font_data(data: Vec<u8>) -> Self {
        Self {
            font: Some(FontSource::Data(data)),
            ..Default::default()
        }
    }
}

/// Options after defaulting and validation
#[derive(Debug, Clone)]
pub(crate) struct ResolvedOptions {
    pub foreground: Color,
    pub background: Color,
    pub background_image: Option<DynamicImage>,
    pub margin_ratio: f64,
}

pub(crate) fn resolve(options: GeneratorOptions) -> Result<(FontSource, ResolvedOptions)> {
    let margin_ratio = match options.margin_ratio {
        None => DEFAULT_MARGIN_RATIO,
        Some(ratio) if ratio.is_nan() || ratio >= 1.0 => {
            return Err(ConfigError::InvalidMarginRatio(ratio).into())
        },
        Some(ratio) if ratio < 0.0 => DEFAULT_MARGIN_RATIO,
        Some(ratio) => ratio,
    };
    let font = options.font.ok_or(ConfigError::MissingFont)?;

    Ok((
        font,
        ResolvedOptions {
            foreground: options.foreground.unwrap_or(DEFAULT_FOREGROUND),
            background: options.background.unwrap_or(DEFAULT_BACKGROUND),
            background_image: options.background_image,
            margin_ratio,
        },
    ))
}
