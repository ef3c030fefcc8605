//! Command-line argument definitions and type conversions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use wallmaker_core::{CropRect, OutputFormat, Size};

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Lossless, keeps transparency
    Png,
    /// Lossy, honours --quality
    #[value(alias = "jpg")]
    Jpeg,
    /// Uncompressed Windows bitmap
    Bmp,
    /// Lossless, keeps transparency
    #[value(alias = "tif")]
    Tiff,
}

impl FormatArg {
    pub fn to_output_format(self) -> OutputFormat {
        match self {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Bmp => OutputFormat::Bmp,
            FormatArg::Tiff => OutputFormat::Tiff,
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "wallmaker")]
#[command(version, about = "Turn photos into wallpapers at exact display resolutions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Adjust, crop and scale an image, then write the wallpaper next to it
    Export(ExportArgs),
    /// List the resolution catalog
    Resolutions {
        /// Show portrait resolutions instead of landscape ones
        #[arg(long)]
        vertical: bool,

        /// TOML file with session defaults (`vertical_orientation` sets the default)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List input extensions and output formats
    Formats,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Source image
    pub input: PathBuf,

    /// Target size as WIDTHxHEIGHT, e.g. 2560x1440
    #[arg(long, short = 'r', conflicts_with = "preset")]
    pub resolution: Option<Size>,

    /// Catalog resolution by name, e.g. "Full HD" or "Ultrawide QHD"
    #[arg(long, short = 'p')]
    pub preset: Option<String>,

    /// Crop rectangle in source pixels as X,Y,WIDTH,HEIGHT
    /// (default: largest centered crop matching the target aspect)
    #[arg(long, allow_hyphen_values = true)]
    pub crop: Option<CropRect>,

    /// Brightness (-100 to 100)
    #[arg(long, short = 'b', allow_hyphen_values = true)]
    pub brightness: Option<i32>,

    /// Contrast (-100 to 100)
    #[arg(long, short = 'c', allow_hyphen_values = true)]
    pub contrast: Option<i32>,

    /// Saturation (-100 to 100, -100 = grayscale)
    #[arg(long, short = 's', allow_hyphen_values = true)]
    pub saturation: Option<i32>,

    /// Output format (default: chosen from the input extension)
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<FormatArg>,

    /// JPEG quality (1-100, out-of-range values are clamped)
    #[arg(long, short = 'q', allow_hyphen_values = true)]
    pub quality: Option<i32>,

    /// TOML file with session defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}
