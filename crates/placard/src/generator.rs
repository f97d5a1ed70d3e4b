//! The compositor: background, background image, fitted text

use std::sync::Arc;

use image::{imageops::FilterType, RgbaImage};
use placard_core::{
    error::{PlacardError, Result},
    traits::TextRasterizer,
    Canvas, Color, FitSolver,
};
use placard_fontdb::Font;
use placard_render_skia::SkiaRasterizer;

use crate::export;
use crate::options::{resolve, GeneratorOptions, ResolvedOptions};

/// Generates placeholder images from one font and one set of options
///
/// Construction does all the I/O; [`ImageGenerator::generate`] is pure and
/// may be called from many threads at once.
pub struct ImageGenerator {
    font: Arc<Font>,
    options: ResolvedOptions,
    rasterizer: Box<dyn TextRasterizer>,
    solver: FitSolver,
}

impl ImageGenerator {
    /// Builds a generator that draws with [`SkiaRasterizer`]
    pub fn new(options: GeneratorOptions) -> Result<Self> {
        Self::with_rasterizer(options, SkiaRasterizer::new())
    }

    /// Builds a generator around a custom text rasterizer
    pub fn with_rasterizer<R>(options: GeneratorOptions, rasterizer: R) -> Result<Self>
    where
        R: TextRasterizer + 'static,
    {
        let (source, options) = resolve(options)?;
        let font = source.load()?;

        log::info!(
            "Placeholder generator ready: {} rasterizer, margin {}, foreground {:?}, background {:?}{}",
            rasterizer.name(),
            options.margin_ratio,
            options.foreground,
            options.background,
            if options.background_image.is_some() {
                ", with background image"
            } else {
                ""
            }
        );

        Ok(Self {
            font,
            options,
            rasterizer: Box::new(rasterizer),
            solver: FitSolver::default(),
        })
    }

    pub fn font(&self) -> &Arc<Font> {
        &self.font
    }

    pub fn foreground(&self) -> Color {
        self.options.foreground
    }

    pub fn background(&self) -> Color {
        self.options.background
    }

    pub fn margin_ratio(&self) -> f64 {
        self.options.margin_ratio
    }

    /// Renders `text` centered on a `width` x `height` placeholder
    ///
    /// A zero dimension takes the value of the other one, so
    /// `generate(text, 0, 200)` yields a 200x200 square. Negative
    /// dimensions, or both zero, are rejected. Empty text produces only
    /// the background layers.
    pub fn generate(&self, text: &str, width: i32, height: i32) -> Result<Canvas> {
        let (width, height) = canvas_size(width, height)?;

        let mut canvas = Canvas::filled(width, height, self.options.background);

        if let Some(background_image) = &self.options.background_image {
            let fitted = background_image
                .resize_to_fill(width, height, FilterType::Lanczos3)
                .to_rgba8();
            canvas.copy_from_rgba(fitted.as_raw())?;
        }

        if !text.is_empty() {
            self.draw_text(&mut canvas, text)?;
        }

        Ok(canvas)
    }

    /// Same as [`ImageGenerator::generate`], returned as an `image` buffer
    pub fn generate_image(&self, text: &str, width: i32, height: i32) -> Result<RgbaImage> {
        export::to_rgba_image(self.generate(text, width, height)?)
    }

    fn draw_text(&self, canvas: &mut Canvas, text: &str) -> Result<()> {
        let (width, height) = (canvas.width(), canvas.height());
        let keep = 1.0 - self.options.margin_ratio;
        let usable_width = (width as f64 * keep) as u32;
        let usable_height = (height as f64 * keep) as u32;

        let fit = self.solver.find_max_fit(
            self.rasterizer.as_ref(),
            self.font.as_ref(),
            text,
            usable_width,
            usable_height,
        )?;
        if fit.is_none() {
            log::warn!(
                "'{}' does not fit into {}x{}, leaving the text out",
                text,
                usable_width,
                usable_height
            );
            return Ok(());
        }

        // half the nominal size stands in for the glyph block height
        let approx_height = self.rasterizer.point_to_pixels(fit.size / 2.0).floor();
        let x = width as f64 / 2.0 - fit.width as f64 / 2.0;
        let y = height as f64 / 2.0 + approx_height as f64 / 2.0;
        let origin = (x as i32, y as i32);

        log::debug!(
            "Placing '{}' at {}pt ({}px wide) with origin {:?} on {}x{}",
            text,
            fit.size,
            fit.width,
            origin,
            width,
            height
        );

        self.rasterizer.draw(
            self.font.as_ref(),
            text,
            fit.size,
            origin,
            self.options.foreground,
            canvas,
        )
    }
}

impl std::fmt::Debug for ImageGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageGenerator")
            .field("font", &self.font)
            .field("rasterizer", &self.rasterizer.name())
            .field("foreground", &self.options.foreground)
            .field("background", &self.options.background)
            .field("margin_ratio", &self.options.margin_ratio)
            .field(
                "background_image",
                &self.options.background_image.as_ref().map(|img| (img.width(), img.height())),
            )
            .finish()
    }
}

/// Validates requested dimensions, squaring when one side is zero
fn canvas_size(width: i32, height: i32) -> Result<(u32, u32)> {
    if width < 0 || height < 0 || (width == 0 && height == 0) {
        return Err(PlacardError::InvalidDimensions { width, height });
    }

    let (width, height) = match (width, height) {
        (0, h) => (h, h),
        (w, 0) => (w, w),
        (w, h) => (w, h),
    };
    Ok((width as u32, height as u32))
}
