//! placard: placeholder images with auto-fitted, centered text
//!
//! Give it a font once, then ask for as many placeholders as you like.
//! Each call fills a fresh canvas with the background color, lays an
//! optional background image over it (scaled to cover, cropped at the
//! center), and draws the text at the largest size that leaves the
//! configured margin free.
//!
//! ```no_run
//! use placard::{Color, GeneratorOptions, ImageGenerator};
//!
//! let generator = ImageGenerator::new(GeneratorOptions {
//!     foreground: Some(Color::rgba(150, 150, 150, 255)),
//!     background: Some(Color::rgba(204, 204, 204, 255)),
//!     margin_ratio: Some(0.2),
//!     ..GeneratorOptions::with_font_path("DejaVuSans.ttf")
//! })?;
//!
//! let canvas = generator.generate("Lorem ipsum!", 400, 200)?;
//! std::fs::write("lorem.png", placard::export::encode_png(&canvas)?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod export;
pub mod generator;
pub mod options;

pub use generator::ImageGenerator;
pub use options::{FontSource, GeneratorOptions};

pub use placard_core::{
    error::{self, ConfigError, FontLoadError, RenderError},
    Canvas, Color, FitResult, FitSolver, PlacardError, Result, DEFAULT_BACKGROUND,
    DEFAULT_FOREGROUND, DEFAULT_MARGIN_RATIO, MAX_FONT_SIZE,
};
pub use placard_fontdb::{Font, FontDatabase};
pub use placard_render_skia::SkiaRasterizer;
