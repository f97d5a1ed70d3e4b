//! Finding the largest point size that fits a pixel box
//!
//! The search walks down from [`MAX_FONT_SIZE`] in [`FONT_SIZE_STEP`]
//! increments. The first phase drops sizes whose nominal pixel height
//! exceeds the box; the second keeps dropping while the measured string
//! is wider than the box. The first size that fits wins, so ties at the
//! boundary always resolve to the larger size.

use crate::{
    error::Result,
    traits::{FontRef, TextRasterizer},
};

/// Absolute ceiling for placeholder text, regardless of canvas size
pub const MAX_FONT_SIZE: f32 = 512.0;

/// Granularity of the descent
pub const FONT_SIZE_STEP: f32 = 2.0;

/// Chosen point size and the pixel width the text renders at that size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub size: f32,
    pub width: u32,
}

impl FitResult {
    /// No positive size fits the box
    pub const NONE: FitResult = FitResult {
        size: 0.0,
        width: 0,
    };

    pub fn is_none(&self) -> bool {
        self.size <= 0.0
    }
}

/// Descending fixed-step size search
#[derive(Debug, Clone, Copy)]
pub struct FitSolver {
    max_size: f32,
    step: f32,
}

impl FitSolver {
    pub fn new() -> Self {
        Self {
            max_size: MAX_FONT_SIZE,
            step: FONT_SIZE_STEP,
        }
    }

    /// Largest size whose line height fits `usable_height` and whose
    /// rendered width fits `usable_width`
    ///
    /// Returns [`FitResult::NONE`] when the descent reaches zero without a
    /// fit. Measurement failures are returned as errors.
    pub fn find_max_fit(
        &self,
        rasterizer: &dyn TextRasterizer,
        font: &dyn FontRef,
        text: &str,
        usable_width: u32,
        usable_height: u32,
    ) -> Result<FitResult> {
        let mut size = self.max_size;

        // never let the nominal line height exceed the box
        while size > 0.0
            && (rasterizer.point_to_pixels(size).floor() as i64) > i64::from(usable_height)
        {
            size -= self.step;
        }
        log::debug!(
            "fit: height {} clamps '{}' to {}pt",
            usable_height,
            text,
            size
        );

        while size > 0.0 {
            let measured = rasterizer.measure(font, text, size)?;
            let width = measured.max(0.0).floor() as u32;
            if width <= usable_width {
                log::debug!(
                    "fit: '{}' is {}px wide at {}pt (budget {}px)",
                    text,
                    width,
                    size,
                    usable_width
                );
                return Ok(FitResult { size, width });
            }
            size -= self.step;
        }

        log::debug!(
            "fit: no size fits '{}' into {}x{}",
            text,
            usable_width,
            usable_height
        );
        Ok(FitResult::NONE)
    }
}

impl Default for FitSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RenderError, types::GlyphId, Canvas, Color};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockFont;

    impl FontRef for MockFont {
        fn data(&self) -> &[u8] {
            &[]
        }

        fn units_per_em(&self) -> u16 {
            1000
        }

        fn glyph_id(&self, ch: char) -> Option<GlyphId> {
            Some(ch as u32)
        }

        fn advance_width(&self, _glyph_id: GlyphId) -> f32 {
            500.0
        }
    }

    /// Every character is half an em wide
    struct HalfEmRasterizer {
        calls: AtomicUsize,
        fail: bool,
    }

    impl HalfEmRasterizer {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    impl TextRasterizer for HalfEmRasterizer {
        fn name(&self) -> &'static str {
            "half-em"
        }

        fn measure(&self, _font: &dyn FontRef, text: &str, size: f32) -> Result<f32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RenderError::BackendError("measure failed".into()).into());
            }
            Ok(text.chars().count() as f32 * size * 0.5)
        }

        fn draw(
            &self,
            _font: &dyn FontRef,
            _text: &str,
            _size: f32,
            _origin: (i32, i32),
            _color: Color,
            _canvas: &mut Canvas,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn fit(text: &str, width: u32, height: u32) -> FitResult {
        FitSolver::new()
            .find_max_fit(&HalfEmRasterizer::new(), &MockFont, text, width, height)
            .unwrap()
    }

    #[test]
    fn test_ceiling_applies_to_huge_boxes() {
        let result = fit("ab", 10_000, 10_000);
        assert_eq!(result.size, MAX_FONT_SIZE);
        assert_eq!(result.width, 512);
    }

    #[test]
    fn test_height_clamp() {
        // 2 chars at half an em: width = size, so only height limits
        let result = fit("ab", 1000, 160);
        assert_eq!(result.size, 160.0);
        assert_eq!(result.width, 160);
    }

    #[test]
    fn test_height_clamp_odd_budget_rounds_down_to_step() {
        let result = fit("ab", 1000, 161);
        assert_eq!(result.size, 160.0);
    }

    #[test]
    fn test_width_fit() {
        // 12 chars, width = 6 * size; 320 / 6 = 53.3, largest even size is 52
        let result = fit("Lorem ipsum!", 320, 160);
        assert_eq!(result.size, 52.0);
        assert_eq!(result.width, 312);
    }

    #[test]
    fn test_exact_boundary_keeps_larger_size() {
        // 4 chars at 100pt measure exactly 200px
        let result = fit("abcd", 200, 1000);
        assert_eq!(result.size, 100.0);
        assert_eq!(result.width, 200);
    }

    #[test]
    fn test_result_never_exceeds_budget() {
        for width in [1u32, 7, 33, 128, 399, 1024] {
            for height in [1u32, 10, 99, 512, 4096] {
                let result = fit("Placeholder", width, height);
                assert!(result.size <= MAX_FONT_SIZE);
                assert!(result.width <= width);
                if !result.is_none() {
                    assert!(result.size.floor() as u32 <= height);
                }
            }
        }
    }

    #[test]
    fn test_zero_budget_returns_none() {
        assert!(fit("abc", 0, 100).is_none());
        assert!(fit("abc", 100, 0).is_none());
        assert_eq!(fit("abc", 100, 0), FitResult::NONE);
    }

    #[test]
    fn test_height_clamp_skips_measurement() {
        let rasterizer = HalfEmRasterizer::new();
        FitSolver::new()
            .find_max_fit(&rasterizer, &MockFont, "ab", 1000, 20)
            .unwrap();
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_measurement_error_propagates() {
        let result = FitSolver::new().find_max_fit(
            &HalfEmRasterizer::failing(),
            &MockFont,
            "ab",
            100,
            100,
        );
        assert!(result.is_err());
    }
}
