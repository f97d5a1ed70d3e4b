//! Integration tests for the Skia rasterizer against a real font

use std::path::PathBuf;

use placard_core::{traits::TextRasterizer, Canvas, Color};
use placard_fontdb::Font;
use placard_render_skia::SkiaRasterizer;

fn load_test_font() -> Option<Font> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fonts/DejaVuSans.ttf");
    if !path.exists() {
        eprintln!("Skipping test: font not found at {:?}", path);
        return None;
    }
    Some(Font::from_file(&path).expect("load test font"))
}

/// Bounding box (min_x, min_y, max_x, max_y) of pixels that differ from `bg`
fn ink_bounds(canvas: &Canvas, bg: Color) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            if canvas.pixel(x, y) != Some(bg) {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    bounds
}

#[test]
fn test_measure_grows_with_size() {
    let Some(font) = load_test_font() else { return };
    let rasterizer = SkiaRasterizer::new();

    let mut last = 0.0;
    for size in [8.0, 16.0, 32.0, 64.0, 128.0, 512.0] {
        let width = rasterizer.measure(&font, "Lorem ipsum!", size).unwrap();
        assert!(width > last, "width must grow with size ({size}pt)");
        last = width;
    }
}

#[test]
fn test_measure_applies_font_kerning() {
    let Some(font) = load_test_font() else { return };
    let rasterizer = SkiaRasterizer::new();

    let single = |text: &str| rasterizer.measure(&font, text, 200.0).unwrap();
    assert!(single("AV") < single("A") + single("V"));

    // DejaVu Sans kerns W-A, A-V and V-Y by -243 units in total at 2048 upem
    let separate: f32 = "WAVY".chars().map(|ch| single(&ch.to_string())).sum();
    let kerned = single("WAVY");
    let expected = -243.0 * 200.0 / 2048.0;
    assert!(
        ((kerned - separate) - expected).abs() < 0.01,
        "kerning {} px, expected {} px",
        kerned - separate,
        expected
    );
}

#[test]
fn test_kerned_pair_draws_within_measured_width() {
    let Some(font) = load_test_font() else { return };
    let rasterizer = SkiaRasterizer::new();
    let bg = Color::white();
    let mut canvas = Canvas::filled(300, 120, bg);

    rasterizer
        .draw(&font, "AV", 80.0, (10, 100), Color::black(), &mut canvas)
        .unwrap();

    let (x0, _, x1, _) = ink_bounds(&canvas, bg).expect("text drawn");
    let measured = rasterizer.measure(&font, "AV", 80.0).unwrap();
    assert!(x0 >= 10);
    // the kerned 'V' still ends inside the kerned advance
    assert!((x1 as f32) < 10.0 + measured, "ink ends at {x1}, measured {measured}");
}

#[test]
fn test_draw_places_ink_above_baseline() {
    let Some(font) = load_test_font() else { return };
    let rasterizer = SkiaRasterizer::new();
    let bg = Color::white();
    let mut canvas = Canvas::filled(200, 100, bg);

    rasterizer
        .draw(&font, "HH", 48.0, (20, 70), Color::black(), &mut canvas)
        .unwrap();

    let (x0, y0, x1, y1) = ink_bounds(&canvas, bg).expect("text drawn");
    let measured = rasterizer.measure(&font, "HH", 48.0).unwrap();

    assert!(x0 >= 20, "ink starts at the origin, got {x0}");
    assert!((x1 as f32) < 20.0 + measured, "ink stays within the advance");
    // capitals sit on the baseline and reach roughly 0.73em above it
    assert!(y1 <= 70, "no descenders in 'HH', got bottom {y1}");
    assert!(y0 < 40 && y0 > 25, "cap height around 35px, got top {y0}");
}

#[test]
fn test_draw_uses_requested_color() {
    let Some(font) = load_test_font() else { return };
    let rasterizer = SkiaRasterizer::new();
    let fg = Color::rgba(150, 150, 150, 255);
    let mut canvas = Canvas::filled(120, 120, Color::rgba(204, 204, 204, 255));

    rasterizer
        .draw(&font, "I", 100.0, (30, 100), fg, &mut canvas)
        .unwrap();

    // the stem of a 100px 'I' is several pixels wide and fully covered
    assert!(canvas.pixels().any(|px| px == fg));
}

#[test]
fn test_draw_whitespace_is_noop() {
    let Some(font) = load_test_font() else { return };
    let rasterizer = SkiaRasterizer::new();
    let mut canvas = Canvas::filled(50, 50, Color::white());
    let before = canvas.clone();

    rasterizer
        .draw(&font, "   ", 30.0, (0, 40), Color::black(), &mut canvas)
        .unwrap();

    assert_eq!(canvas, before);
}

#[test]
fn test_draw_clips_at_canvas_edges() {
    let Some(font) = load_test_font() else { return };
    let rasterizer = SkiaRasterizer::new();
    let mut canvas = Canvas::filled(30, 30, Color::white());

    rasterizer
        .draw(&font, "WWWW", 80.0, (-10, 60), Color::black(), &mut canvas)
        .unwrap();

    assert_eq!(canvas.as_bytes().len(), 30 * 30 * 4);
}
