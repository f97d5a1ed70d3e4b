//! CLI argument definitions using Clap v4

use clap::Parser;
use std::path::PathBuf;

/// placard - placeholder images with auto-fitted text
#[derive(Parser, Debug)]
#[command(name = "placard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Text to render (empty for a background-only placeholder)
    #[arg(default_value = "")]
    pub text: String,

    /// Font file path (.ttf, .otf)
    #[arg(short = 'f', long = "font-file")]
    pub font_file: PathBuf,

    /// Canvas width in pixels (0 = same as height)
    #[arg(short = 'W', long = "width", default_value = "400")]
    pub width: i32,

    /// Canvas height in pixels (0 = same as width)
    #[arg(short = 'H', long = "height", default_value = "200")]
    pub height: i32,

    /// Text color (RRGGBB or RRGGBBAA)
    #[arg(short = 'c', long = "foreground", default_value = "969696")]
    pub foreground: String,

    /// Background color (RRGGBB or RRGGBBAA)
    #[arg(short = 'b', long = "background", default_value = "CCCCCC")]
    pub background: String,

    /// Fraction of each dimension kept free of text
    #[arg(short = 'm', long = "margin", default_value = "0.2")]
    pub margin: f64,

    /// Image drawn behind the text, scaled to cover and cropped at the center
    #[arg(short = 'i', long = "background-image")]
    pub background_image: Option<PathBuf>,

    /// Output PNG path (stdout if omitted)
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Silent mode (no progress info)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(long = "verbose")]
    pub verbose: bool,
}
