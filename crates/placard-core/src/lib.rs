//! placard core: the pieces every placeholder generator is built from
//!
//! A placeholder is a fixed-size canvas with a background and one line of
//! text, sized as large as the canvas allows. This crate holds everything
//! that doesn't depend on a particular font parser or rasterizer:
//!
//! - [`Canvas`] - the RGBA8 buffer a generation call produces
//! - [`fit::FitSolver`] - the auto-fit search for the largest point size
//! - [`traits::FontRef`] and [`traits::TextRasterizer`] - the collaborator seams
//! - [`error`] - the error taxonomy shared by all placard crates
//!
//! ```
//! use placard_core::{Canvas, Color};
//!
//! let canvas = Canvas::filled(4, 2, Color::rgba(204, 204, 204, 255));
//! assert_eq!(canvas.pixel(3, 1), Some(Color::rgba(204, 204, 204, 255)));
//! ```

pub mod canvas;
pub mod error;
pub mod fit;
pub mod traits;

pub use canvas::Canvas;
pub use error::{PlacardError, Result};
pub use fit::{FitResult, FitSolver, FONT_SIZE_STEP, MAX_FONT_SIZE};
pub use traits::{FontRef, TextRasterizer};

/// Points are pixels at this resolution
pub const DEFAULT_DPI: f32 = 72.0;

/// Fraction of each canvas dimension kept free of text
pub const DEFAULT_MARGIN_RATIO: f64 = 0.2;

/// Text color used when none is configured
pub const DEFAULT_FOREGROUND: Color = Color::rgba(0x96, 0x96, 0x96, 0xff);

/// Background color used when none is configured
pub const DEFAULT_BACKGROUND: Color = Color::rgba(0xcc, 0xcc, 0xcc, 0xff);

pub mod types {
    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;
}

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }
}
