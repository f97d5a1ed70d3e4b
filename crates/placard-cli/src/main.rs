//! placard CLI - write a placeholder PNG from the command line

mod cli;

use std::fs::File;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use placard::{export, Color, FontSource, GeneratorOptions, ImageGenerator};

use cli::Cli;

fn main() -> Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    run(&args)
}

fn run(args: &Cli) -> Result<()> {
    log::debug!("{:?}", args);

    let background_image = match &args.background_image {
        Some(path) => Some(
            image::open(path)
                .with_context(|| format!("reading background image {}", path.display()))?,
        ),
        None => None,
    };

    let generator = ImageGenerator::new(GeneratorOptions {
        font: Some(FontSource::Path(args.font_file.clone())),
        foreground: Some(parse_color(&args.foreground)?),
        background: Some(parse_color(&args.background)?),
        background_image,
        margin_ratio: Some(args.margin),
    })?;

    let canvas = generator.generate(&args.text, args.width, args.height)?;
    let png = export::encode_png(&canvas)?;

    match &args.output_file {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            file.write_all(&png)?;
        },
        None => io::stdout().lock().write_all(&png)?,
    }

    if !args.quiet {
        let target = args
            .output_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".to_string());
        eprintln!(
            "✓ {}x{} placeholder written to {} ({} bytes)",
            canvas.width(),
            canvas.height(),
            target,
            png.len()
        );
    }

    Ok(())
}

/// Parses `RRGGBB` or `RRGGBBAA`, with or without a leading `#`
fn parse_color(color_str: &str) -> Result<Color> {
    let hex = color_str.trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("Color must be in RRGGBB or RRGGBBAA format, got '{}'", color_str);
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .with_context(|| format!("Invalid color format: '{}'", color_str))
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 255 };

    Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
}
