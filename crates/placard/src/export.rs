//! Turning a canvas into an `image` buffer or PNG bytes

use image::{ImageEncoder, RgbaImage};
use placard_core::{
    error::{ExportError, Result},
    Canvas,
};

/// Moves the canvas pixels into an [`RgbaImage`] without copying
pub fn to_rgba_image(canvas: Canvas) -> Result<RgbaImage> {
    let (width, height) = (canvas.width(), canvas.height());
    RgbaImage::from_raw(width, height, canvas.into_raw()).ok_or_else(|| {
        ExportError::EncodingFailed(format!(
            "canvas buffer does not match {}x{} RGBA",
            width, height
        ))
        .into()
    })
}

/// Encodes the canvas as an RGBA PNG
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>> {
    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(
            canvas.as_bytes(),
            canvas.width(),
            canvas.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use placard_core::Color;

    #[test]
    fn test_to_rgba_image_keeps_pixels() {
        let mut canvas = Canvas::filled(3, 2, Color::rgba(1, 2, 3, 255));
        canvas.put_pixel(2, 1, Color::rgba(9, 8, 7, 6));

        let img = to_rgba_image(canvas).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 255]);
        assert_eq!(img.get_pixel(2, 1).0, [9, 8, 7, 6]);
    }

    #[test]
    fn test_encode_png_round_trips_through_decoder() {
        let canvas = Canvas::filled(4, 4, Color::rgba(204, 204, 204, 255));
        let png = encode_png(&canvas).unwrap();

        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), canvas.as_bytes());
    }
}
