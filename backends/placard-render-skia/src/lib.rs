//! Skia rasterizer - unhinted outlines filled by tiny-skia
//!
//! Measurement sums glyph advances plus pair kerning; drawing pulls each
//! glyph outline out of skrifa, places it on the pen line, fills the whole
//! string as one path and composites the coverage onto the caller's
//! [`Canvas`]. Both read the same pen positions, so a string drawn at a
//! fitted size is exactly as wide as it measured.

use kurbo::{BezPath, PathEl};
use skrifa::{
    instance::{LocationRef, Size},
    outline::{DrawSettings, OutlinePen},
    MetadataProvider,
};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use placard_core::{
    error::{RenderError, Result},
    traits::{FontRef, TextRasterizer},
    types::GlyphId,
    Canvas, Color, DEFAULT_DPI,
};

/// tiny-skia powered [`TextRasterizer`]
///
/// Holds no drawing state between calls; every `draw` allocates its own
/// scratch pixmap, so one instance can serve concurrent generations.
#[derive(Debug, Clone, Copy)]
pub struct SkiaRasterizer {
    dpi: f32,
}

impl SkiaRasterizer {
    /// Rasterizer at 72 dpi, where one point is one pixel
    pub fn new() -> Self {
        Self { dpi: DEFAULT_DPI }
    }

    pub fn with_dpi(dpi: f32) -> Self {
        Self { dpi }
    }

    /// Lays `text` out on a pen line starting at 0
    ///
    /// Returns each glyph with its pen x in pixels, and the total advance.
    /// Kerning between a pair moves the pen before the right glyph.
    /// Characters the font can't map use glyph 0.
    fn pen_positions(
        font: &dyn FontRef,
        text: &str,
        px: f32,
    ) -> Result<(Vec<(GlyphId, f32)>, f32)> {
        let upem = font.units_per_em();
        if upem == 0 {
            return Err(RenderError::InvalidFont.into());
        }
        let scale = px / upem as f32;

        let mut glyphs = Vec::with_capacity(text.len());
        let mut pen_x = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            let glyph_id = font.glyph_id(ch).unwrap_or(0);
            if let Some(left) = previous {
                pen_x += font.kerning(left, glyph_id) * scale;
            }
            glyphs.push((glyph_id, pen_x));
            pen_x += font.advance_width(glyph_id) * scale;
            previous = Some(glyph_id);
        }

        Ok((glyphs, pen_x))
    }

    /// Builds the outline of `text` in canvas coordinates
    fn text_path(
        &self,
        font: &dyn FontRef,
        text: &str,
        size: f32,
        origin: (i32, i32),
    ) -> Result<BezPath> {
        let px = self.point_to_pixels(size);
        let (glyphs, _) = Self::pen_positions(font, text, px)?;

        let font_ref = skrifa::FontRef::from_index(font.data(), font.face_index())
            .map_err(|_| RenderError::InvalidFont)?;
        let outlines = font_ref.outline_glyphs();

        // hinting would snap outlines away from the measured advances
        let settings = || DrawSettings::unhinted(Size::new(px), LocationRef::default());

        let mut path = BezPath::new();
        for (glyph_id, pen_x) in glyphs {
            let Some(glyph) = outlines.get(skrifa::GlyphId::new(glyph_id)) else {
                log::trace!("Skia: no outline for glyph {}", glyph_id);
                continue;
            };
            let mut pen = PathPen {
                path: &mut path,
                dx: origin.0 as f64 + pen_x as f64,
                baseline: origin.1 as f64,
            };
            glyph
                .draw(settings(), &mut pen)
                .map_err(|_| RenderError::OutlineExtractionFailed)?;
        }

        Ok(path)
    }
}

impl Default for SkiaRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRasterizer for SkiaRasterizer {
    fn name(&self) -> &'static str {
        "skia"
    }

    fn dpi(&self) -> f32 {
        self.dpi
    }

    fn measure(&self, font: &dyn FontRef, text: &str, size: f32) -> Result<f32> {
        let (_, width) = Self::pen_positions(font, text, self.point_to_pixels(size))?;
        Ok(width)
    }

    fn draw(
        &self,
        font: &dyn FontRef,
        text: &str,
        size: f32,
        origin: (i32, i32),
        color: Color,
        canvas: &mut Canvas,
    ) -> Result<()> {
        let path = self.text_path(font, text, size, origin)?;

        // Translate kurbo's path format into tiny-skia's native format
        let mut builder = PathBuilder::new();
        for element in path.elements() {
            match *element {
                PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
                PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
                PathEl::QuadTo(ctrl, end) => {
                    builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
                },
                PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                    c1.x as f32,
                    c1.y as f32,
                    c2.x as f32,
                    c2.y as f32,
                    end.x as f32,
                    end.y as f32,
                ),
                PathEl::ClosePath => builder.close(),
            }
        }

        // whitespace only, nothing to fill
        let Some(skia_path) = builder.finish() else {
            log::debug!("Skia: '{}' has no visible outline", text);
            return Ok(());
        };

        let (width, height) = (canvas.width(), canvas.height());
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(RenderError::PixmapCreationFailed { width, height })?;
        let paint = Paint {
            anti_alias: true,
            ..Default::default()
        };
        pixmap.fill_path(
            &skia_path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );

        log::debug!(
            "Skia: drawing '{}' at {}pt from ({}, {})",
            text,
            size,
            origin.0,
            origin.1
        );

        // only the alpha channel matters, the color comes from `color`
        for (i, px) in pixmap.data().chunks_exact(4).enumerate() {
            let coverage = px[3];
            if coverage == 0 {
                continue;
            }
            let x = (i % width as usize) as i32;
            let y = (i / width as usize) as i32;
            canvas.blend_coverage(x, y, color, coverage);
        }

        Ok(())
    }
}

/// Bridge between skrifa's outline commands and a kurbo path
///
/// Font units point up, canvas rows grow down: y is mirrored around the
/// baseline and x is shifted to the pen position.
struct PathPen<'a> {
    path: &'a mut BezPath,
    dx: f64,
    baseline: f64,
}

impl PathPen<'_> {
    fn point(&self, x: f32, y: f32) -> (f64, f64) {
        (self.dx + x as f64, self.baseline - y as f64)
    }
}

impl OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let c = self.point(cx0, cy0);
        let p = self.point(x, y);
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let c0 = self.point(cx0, cy0);
        let c1 = self.point(cx1, cy1);
        let p = self.point(x, y);
        self.path.curve_to(c0, c1, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
