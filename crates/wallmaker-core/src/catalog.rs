//! Supported resolutions, output formats and input extensions.
//!
//! A [`Catalog`] is built once with [`Catalog::new`] and then shared by
//! reference (usually behind an `Arc`). It is never mutated after
//! construction, so it can be read from any thread without locking.
//!
//! Output formats are a closed enum; each variant carries a static
//! [`FormatInfo`] capability record.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::transform::Size;

/// Encodings a wallpaper can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
    Bmp,
    #[serde(alias = "tif")]
    Tiff,
}

/// Capabilities of an [`OutputFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// File extension written for this format, without the dot.
    pub extension: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Whether a quality factor influences the encoding.
    pub supports_quality: bool,
    /// Whether the alpha channel is preserved.
    pub supports_transparency: bool,
}

const PNG_INFO: FormatInfo = FormatInfo {
    extension: "png",
    description: "PNG (Portable Network Graphics)",
    supports_quality: false,
    supports_transparency: true,
};

const JPEG_INFO: FormatInfo = FormatInfo {
    extension: "jpg",
    description: "JPEG (Joint Photographic Experts Group)",
    supports_quality: true,
    supports_transparency: false,
};

const BMP_INFO: FormatInfo = FormatInfo {
    extension: "bmp",
    description: "BMP (Windows Bitmap)",
    supports_quality: false,
    supports_transparency: false,
};

const TIFF_INFO: FormatInfo = FormatInfo {
    extension: "tiff",
    description: "TIFF (Tagged Image File Format)",
    supports_quality: false,
    supports_transparency: true,
};

impl OutputFormat {
    /// All formats in declaration order.
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Png,
        OutputFormat::Jpeg,
        OutputFormat::Bmp,
        OutputFormat::Tiff,
    ];

    /// Capability record for this format.
    pub fn info(self) -> &'static FormatInfo {
        match self {
            OutputFormat::Png => &PNG_INFO,
            OutputFormat::Jpeg => &JPEG_INFO,
            OutputFormat::Bmp => &BMP_INFO,
            OutputFormat::Tiff => &TIFF_INFO,
        }
    }

    /// Extension written for this format.
    pub fn extension(self) -> &'static str {
        self.info().extension
    }

    /// The matching `image` crate format.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
            OutputFormat::Tiff => image::ImageFormat::Tiff,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Bmp => "BMP",
            OutputFormat::Tiff => "TIFF",
        };
        f.write_str(name)
    }
}

/// Error returned when a format name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output format {0:?} (expected png, jpeg, bmp or tiff)")]
pub struct UnknownFormatError(String);

impl FromStr for OutputFormat {
    type Err = UnknownFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "bmp" => Ok(OutputFormat::Bmp),
            "tiff" | "tif" => Ok(OutputFormat::Tiff),
            _ => Err(UnknownFormatError(s.to_string())),
        }
    }
}

/// Landscape or portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// A display resolution offered as an export target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    /// Short name, e.g. "Full HD".
    pub name: String,
    /// Long description, e.g. "1920 × 1080 (Full HD)".
    pub description: String,
    pub orientation: Orientation,
}

impl Resolution {
    /// A horizontal resolution with the standard description.
    pub fn new(width: u32, height: u32, name: &str) -> Self {
        Self {
            width,
            height,
            name: name.to_string(),
            description: format!("{width} × {height} ({name})"),
            orientation: Orientation::Horizontal,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Suffix appended to exported file names, e.g. `_1920x1080`.
    pub fn suffix(&self) -> String {
        crate::encode::resolution_suffix(self.size())
    }
}

const STANDARD_RESOLUTIONS: &[(u32, u32, &str)] = &[
    (1280, 720, "HD"),
    (1366, 768, "WXGA"),
    (1920, 1080, "Full HD"),
    (2560, 1440, "QHD"),
    (3840, 2160, "4K UHD"),
    (4096, 2160, "Cinema 4K"),
    (7680, 4320, "8K UHD"),
    (1920, 1200, "WUXGA"),
    (2560, 1600, "WQXGA"),
    (3840, 2400, "WQUXGA"),
    (2256, 1504, "3:2 Tablet"),
    (2880, 1920, "3:2 High-res"),
    (3000, 2000, "3:2 Ultra"),
    (2560, 1080, "Ultrawide"),
    (3440, 1440, "Ultrawide QHD"),
    (5120, 2160, "5K Ultrawide"),
    (5120, 1440, "Super Ultrawide"),
];

const DEFAULT_MAPPING: &[(&str, OutputFormat)] = &[
    ("jpg", OutputFormat::Jpeg),
    ("jpeg", OutputFormat::Jpeg),
    ("jfif", OutputFormat::Jpeg),
    ("png", OutputFormat::Png),
    ("bmp", OutputFormat::Bmp),
    ("tiff", OutputFormat::Tiff),
    ("tif", OutputFormat::Tiff),
    // HEIF/HEIC convert to JPEG for compatibility
    ("heif", OutputFormat::Jpeg),
    ("heic", OutputFormat::Jpeg),
    // GIF converts to PNG to keep quality
    ("gif", OutputFormat::Png),
];

/// Index of "Full HD" in the standard catalog.
pub const DEFAULT_RESOLUTION_INDEX: usize = 2;

/// Immutable table of resolutions, formats and extension defaults.
#[derive(Debug, Clone)]
pub struct Catalog {
    resolutions: Vec<Resolution>,
    mapping: BTreeMap<String, OutputFormat>,
}

impl Catalog {
    /// The standard catalog: 17 horizontal resolutions and 10 input extensions.
    pub fn new() -> Self {
        let resolutions = STANDARD_RESOLUTIONS
            .iter()
            .map(|&(w, h, name)| Resolution::new(w, h, name))
            .collect();
        Self::with_resolutions(resolutions)
    }

    /// A catalog with a custom resolution list and the standard format tables.
    pub fn with_resolutions(resolutions: Vec<Resolution>) -> Self {
        let mapping = DEFAULT_MAPPING
            .iter()
            .map(|&(ext, format)| (ext.to_string(), format))
            .collect();
        Self {
            resolutions,
            mapping,
        }
    }

    /// Resolutions in declaration order.
    pub fn supported_resolutions(&self) -> &[Resolution] {
        &self.resolutions
    }

    /// Resolutions of one orientation, in declaration order.
    ///
    /// The standard catalog ships no vertical entries, so `Vertical` yields an
    /// empty list.
    pub fn resolutions_with_orientation(&self, orientation: Orientation) -> Vec<&Resolution> {
        self.resolutions
            .iter()
            .filter(|r| r.orientation == orientation)
            .collect()
    }

    pub fn resolution(&self, index: usize) -> Option<&Resolution> {
        self.resolutions.get(index)
    }

    /// Look up a resolution by its short name, ignoring case.
    pub fn find_resolution(&self, name: &str) -> Option<&Resolution> {
        let name = name.trim();
        self.resolutions
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    pub fn format_info(&self, format: OutputFormat) -> &'static FormatInfo {
        format.info()
    }

    /// True if `extension` (without the dot) is a known input extension.
    pub fn is_format_supported(&self, extension: &str) -> bool {
        self.mapping.contains_key(&extension.to_lowercase())
    }

    /// Extension to default output format table.
    pub fn default_output_mapping(&self) -> &BTreeMap<String, OutputFormat> {
        &self.mapping
    }

    /// Default output format for an input extension, ignoring case.
    pub fn default_format_for(&self, extension: &str) -> Option<OutputFormat> {
        self.mapping.get(&extension.to_lowercase()).copied()
    }

    /// Default output format for a file, keyed by its extension.
    pub fn default_format_for_path(&self, path: &Path) -> Option<OutputFormat> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| self.default_format_for(e))
    }

    pub fn supported_input_extensions(&self) -> BTreeSet<&str> {
        self.mapping.keys().map(String::as_str).collect()
    }

    pub fn supported_output_extensions(&self) -> BTreeSet<&'static str> {
        OutputFormat::ALL.iter().map(|f| f.extension()).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
