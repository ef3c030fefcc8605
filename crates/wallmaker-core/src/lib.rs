//! Wallmaker Core - Wallpaper image pipeline
//!
//! This crate turns a photo into a wallpaper at an exact display resolution:
//! decoding, brightness/contrast/saturation adjustment, crop and scale, and
//! encoding to PNG, JPEG, BMP or TIFF. [`session::Session`] ties the stages
//! together for an interactive caller.

pub mod adjustments;
pub mod catalog;
pub mod decode;
pub mod encode;
pub mod luma;
pub mod session;
pub mod settings;
pub mod transform;

pub use adjustments::{adjust, apply_adjustments};
pub use catalog::{Catalog, FormatInfo, Orientation, OutputFormat, Resolution, UnknownFormatError};
pub use decode::{decode_file, Bitmap, DecodeError, FilterType};
pub use encode::{encode_bitmap, output_path, resolution_suffix, write_bitmap, EncodeError, JpegQuality};
pub use session::{ErrorKind, Session, SessionError, SessionEvent, SessionListener};
pub use settings::{SessionDefaults, SettingsError};
pub use transform::{crop, crop_and_scale, fit_crop_rect, CropRect, GeometryError, Size};

/// Brightness, contrast and saturation for the adjustment engine.
///
/// Each value lives in -100..=100. Constructors and [`clamped`](Self::clamped)
/// enforce the range silently; out-of-range input is never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdjustmentParameters {
    /// Brightness offset (-100 to 100)
    pub brightness: i32,
    /// Contrast (-100 to 100)
    pub contrast: i32,
    /// Saturation (-100 to 100, -100 = grayscale)
    pub saturation: i32,
}

impl AdjustmentParameters {
    /// Lowest accepted value for every parameter.
    pub const MIN: i32 = -100;
    /// Highest accepted value for every parameter.
    pub const MAX: i32 = 100;

    /// Create parameters, clamping each value into range.
    pub fn new(brightness: i32, contrast: i32, saturation: i32) -> Self {
        Self {
            brightness,
            contrast,
            saturation,
        }
        .clamped()
    }

    /// Copy with every value clamped into range.
    pub fn clamped(self) -> Self {
        Self {
            brightness: clamp_adjustment(self.brightness),
            contrast: clamp_adjustment(self.contrast),
            saturation: clamp_adjustment(self.saturation),
        }
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Clamp a single adjustment value into -100..=100.
#[inline]
pub fn clamp_adjustment(value: i32) -> i32 {
    value.clamp(AdjustmentParameters::MIN, AdjustmentParameters::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustments_default() {
        let adj = AdjustmentParameters::default();
        assert!(adj.is_default());
        assert_eq!(adj, AdjustmentParameters::new(0, 0, 0));
    }

    #[test]
    fn test_adjustments_not_default() {
        let mut adj = AdjustmentParameters::default();
        adj.contrast = 1;
        assert!(!adj.is_default());
    }

    #[test]
    fn test_adjustments_clamp_on_construction() {
        let adj = AdjustmentParameters::new(150, -250, 42);
        assert_eq!(adj.brightness, 100);
        assert_eq!(adj.contrast, -100);
        assert_eq!(adj.saturation, 42);
    }

    #[test]
    fn test_clamped_fixes_direct_field_writes() {
        let mut adj = AdjustmentParameters::default();
        adj.saturation = 259;
        assert_eq!(adj.clamped().saturation, 100);
    }

    #[test]
    fn test_adjustments_deserialize_partial() {
        let adj: AdjustmentParameters = toml::from_str("brightness = 12").unwrap();
        assert_eq!(adj, AdjustmentParameters::new(12, 0, 0));
    }
}
