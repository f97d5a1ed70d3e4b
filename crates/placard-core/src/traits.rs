//! The contracts that connect the generator to its collaborators
//!
//! - [`FontRef`] - A parsed, read-only outline font
//! - [`TextRasterizer`] - Measures strings and draws them onto a [`Canvas`]
//!
//! Both are `Send + Sync`: one font and one rasterizer serve every
//! concurrent generation call, so neither may hold per-call state.

use crate::{error::Result, types::GlyphId, Canvas, Color, DEFAULT_DPI};

/// Read-only access to font data, horizontal metrics and pair kerning
///
/// ```ignore
/// struct MyFont {
///     data: Vec<u8>,
/// }
///
/// impl FontRef for MyFont {
///     fn data(&self) -> &[u8] {
///         &self.data
///     }
///
///     fn units_per_em(&self) -> u16 {
///         2048
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> {
///         Some(ch as u32)
///     }
///
///     fn advance_width(&self, glyph_id: GlyphId) -> f32 {
///         1200.0
///     }
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    fn data(&self) -> &[u8];

    /// Size of the font's design grid
    ///
    /// Advances are divided by this to turn font units into ems.
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    ///
    /// Returns None when the font doesn't contain this character.
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// Horizontal advance of a glyph in font units
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    /// Pair adjustment between two adjacent glyphs in font units
    ///
    /// Added to the pen position after `left` and before `right`.
    /// Fonts without kerning data return 0.
    fn kerning(&self, _left: GlyphId, _right: GlyphId) -> f32 {
        0.0
    }

    /// Face within a collection file (0 for single fonts)
    fn face_index(&self) -> u32 {
        0
    }

    /// How many glyphs this font contains
    fn glyph_count(&self) -> Option<u32> {
        None
    }
}

/// Text measurement and drawing engine
///
/// Sizes are typographic points; the rasterizer owns the conversion to
/// pixels through [`TextRasterizer::point_to_pixels`]. Outlines are always
/// drawn unhinted so that a width measured during fitting is the width
/// that ends up on the canvas.
pub trait TextRasterizer: Send + Sync {
    /// Used in logs and error messages
    fn name(&self) -> &'static str;

    /// Resolution used for point to pixel conversion
    fn dpi(&self) -> f32 {
        DEFAULT_DPI
    }

    /// Converts a point size into pixels at [`TextRasterizer::dpi`]
    fn point_to_pixels(&self, size: f32) -> f32 {
        size * self.dpi() / DEFAULT_DPI
    }

    /// Pixel advance of `text` at `size`, without touching any canvas
    fn measure(&self, font: &dyn FontRef, text: &str, size: f32) -> Result<f32>;

    /// Draws `text` with its baseline starting at `origin` (canvas pixels)
    ///
    /// Pixels outside the canvas are clipped.
    fn draw(
        &self,
        font: &dyn FontRef,
        text: &str,
        size: f32,
        origin: (i32, i32),
        color: Color,
        canvas: &mut Canvas,
    ) -> Result<()>;
}
