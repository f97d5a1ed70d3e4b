//! The pixel buffer a generation call draws into

use crate::{
    error::{RenderError, Result},
    Color,
};

/// Straight (non-premultiplied) RGBA8 pixels in row-major order
///
/// A canvas is created fresh for every generation call and handed to the
/// caller by value once drawing is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// A fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// A canvas covered in a single color
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let mut canvas = Self::new(width, height);
        canvas.fill(color);
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Replaces every pixel with `color`, alpha included
    pub fn fill(&mut self, color: Color) {
        let rgba = [color.r, color.g, color.b, color.a];
        for pixel in self.data.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Replaces the whole canvas with an RGBA8 buffer of identical size
    pub fn copy_from_rgba(&mut self, src: &[u8]) -> Result<()> {
        if src.len() != self.data.len() {
            return Err(RenderError::CanvasMismatch {
                width: self.width,
                height: self.height,
                len: src.len(),
            }
            .into());
        }
        self.data.copy_from_slice(src);
        Ok(())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let idx = self.index(x as i64, y as i64)?;
        let px = &self.data[idx..idx + 4];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    /// Writes a pixel, ignoring coordinates outside the canvas
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(idx) = self.index(x as i64, y as i64) {
            self.data[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Composites `color` over the pixel at `(x, y)` scaled by `coverage`
    ///
    /// Coverage 255 with an opaque color writes the color unchanged;
    /// coverage 0 leaves the pixel untouched. Out-of-bounds writes are clipped.
    pub fn blend_coverage(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        if coverage == 0 {
            return;
        }
        let Some(idx) = self.index(x as i64, y as i64) else {
            return;
        };

        let src_a = coverage as u32 * color.a as u32 / 255;
        if src_a == 0 {
            return;
        }
        let dst = &mut self.data[idx..idx + 4];
        let dst_weight = dst[3] as u32 * (255 - src_a) / 255;
        let out_a = src_a + dst_weight;

        let mix = |src: u8, dst: u8| -> u8 {
            ((src as u32 * src_a + dst as u32 * dst_weight + out_a / 2) / out_a).min(255) as u8
        };
        dst[0] = mix(color.r, dst[0]);
        dst[1] = mix(color.g, dst[1]);
        dst[2] = mix(color.b, dst[2]);
        dst[3] = out_a.min(255) as u8;
    }

    /// Iterates over all pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| Color::rgba(px[0], px[1], px[2], px[3]))
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * 4)
    }
}
