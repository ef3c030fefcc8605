//! Bitmap encoding for export.
//!
//! JPEG goes through the `image` crate's `JpegEncoder` so the quality factor
//! can be set; PNG, BMP and TIFF use the default encoders. Formats that cannot
//! carry transparency get the alpha channel stripped before encoding.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageBuffer, ImageEncoder, Rgb, Rgba};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::OutputFormat;
use crate::decode::{Bitmap, BYTES_PER_PIXEL};

/// Errors that can occur while encoding or writing a wallpaper.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The output file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The encoder rejected the image
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: OutputFormat,
        message: String,
    },
}

/// JPEG quality factor, always within 1..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct JpegQuality(u8);

impl JpegQuality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;
    pub const DEFAULT: JpegQuality = JpegQuality(85);

    /// Create a quality value, clamping into 1..=100.
    pub fn new(quality: i32) -> Self {
        Self::from(i64::from(quality))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for JpegQuality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i64> for JpegQuality {
    fn from(quality: i64) -> Self {
        // Clamped into 1..=100 first, so the cast is lossless
        Self(quality.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }
}

impl From<JpegQuality> for u8 {
    fn from(quality: JpegQuality) -> Self {
        quality.0
    }
}

/// Encode a bitmap into the bytes of `format`.
///
/// # Arguments
///
/// * `bitmap` - RGBA source image
/// * `format` - Target encoding
/// * `quality` - JPEG quality; ignored by the other formats
///
/// # Errors
///
/// Returns `InvalidDimensions` for an empty bitmap, `InvalidPixelData` for a
/// buffer that does not match the dimensions, and `EncodingFailed` if the
/// encoder itself fails.
pub fn encode_bitmap(
    bitmap: &Bitmap,
    format: OutputFormat,
    quality: JpegQuality,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = bitmap.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if bitmap.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: bitmap.pixels.len(),
        });
    }

    let failed = |e: image::ImageError| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    };

    let mut buffer = Cursor::new(Vec::new());

    if format == OutputFormat::Jpeg {
        let rgb = strip_alpha(&bitmap.pixels);
        JpegEncoder::new_with_quality(&mut buffer, quality.get())
            .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
            .map_err(failed)?;
        return Ok(buffer.into_inner());
    }

    let image = if format.info().supports_transparency {
        ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, bitmap.pixels.clone())
            .map(DynamicImage::ImageRgba8)
    } else {
        ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, strip_alpha(&bitmap.pixels))
            .map(DynamicImage::ImageRgb8)
    };
    let image = image.ok_or(EncodeError::InvalidPixelData {
        expected,
        actual: bitmap.pixels.len(),
    })?;

    image
        .write_to(&mut buffer, format.image_format())
        .map_err(failed)?;

    Ok(buffer.into_inner())
}

/// Encode a bitmap and write it to `path`.
///
/// The image is fully encoded in memory first, so an encoding failure never
/// leaves a file behind. Parent directories are not created.
pub fn write_bitmap(
    bitmap: &Bitmap,
    path: &Path,
    format: OutputFormat,
    quality: JpegQuality,
) -> Result<(), EncodeError> {
    let bytes = encode_bitmap(bitmap, format, quality)?;
    fs::write(path, &bytes).map_err(|source| EncodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!(
        "Wrote {} ({}x{}, {}, {} bytes)",
        path.display(),
        bitmap.width,
        bitmap.height,
        format,
        bytes.len()
    );
    Ok(())
}

fn strip_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / BYTES_PER_PIXEL * 3);
    for px in rgba.chunks_exact(BYTES_PER_PIXEL) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_bytes;

    fn gradient(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height) as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 255 / width) as u8,
                    (y * 255 / height) as u8,
                    128,
                    255,
                ]);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    // ===== Validation Tests =====

    #[test]
    fn test_encode_zero_dimensions() {
        let empty = Bitmap::new(0, 10, vec![]);
        for format in OutputFormat::ALL {
            assert!(matches!(
                encode_bitmap(&empty, format, JpegQuality::DEFAULT),
                Err(EncodeError::InvalidDimensions { width: 0, height: 10 })
            ));
        }
    }

    #[test]
    fn test_encode_short_buffer() {
        let bad = Bitmap {
            width: 10,
            height: 10,
            pixels: vec![0; 399],
        };
        assert!(matches!(
            encode_bitmap(&bad, OutputFormat::Png, JpegQuality::DEFAULT),
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 399
            })
        ));
    }

    // ===== Format Tests =====

    #[test]
    fn test_png_round_trip_is_lossless() {
        let mut img = gradient(23, 17);
        // Non-opaque pixel must survive
        img.pixels[3] = 77;
        let bytes = encode_bitmap(&img, OutputFormat::Png, JpegQuality::DEFAULT).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        let decoded = decode_bytes(&bytes).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_jpeg_markers() {
        let bytes = encode_bitmap(&gradient(40, 30), OutputFormat::Jpeg, JpegQuality::new(90)).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let img = Bitmap::filled(16, 16, [200, 100, 50, 0]);
        let bytes = encode_bitmap(&img, OutputFormat::Jpeg, JpegQuality::new(100)).unwrap();
        let decoded = decode_bytes(&bytes).unwrap();
        assert!(decoded.pixels.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_bmp_round_trip_is_opaque() {
        let img = gradient(8, 6);
        let bytes = encode_bitmap(&img, OutputFormat::Bmp, JpegQuality::DEFAULT).unwrap();
        assert_eq!(&bytes[0..2], b"BM");

        let decoded = decode_bytes(&bytes).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_tiff_round_trip() {
        let img = gradient(9, 7);
        let bytes = encode_bitmap(&img, OutputFormat::Tiff, JpegQuality::DEFAULT).unwrap();
        assert!(bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*"));

        let decoded = decode_bytes(&bytes).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_quality_clamping() {
        assert_eq!(JpegQuality::new(0).get(), 1);
        assert_eq!(JpegQuality::new(-5).get(), 1);
        assert_eq!(JpegQuality::new(255).get(), 100);
        assert_eq!(JpegQuality::new(1000).get(), 100);
        assert_eq!(JpegQuality::new(42).get(), 42);
        assert_eq!(JpegQuality::default().get(), 85);
    }

    // ===== File Tests =====

    #[test]
    fn test_write_bitmap_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        write_bitmap(&gradient(4, 4), &path, OutputFormat::Png, JpegQuality::DEFAULT).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_bitmap_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let result = write_bitmap(&gradient(4, 4), &path, OutputFormat::Png, JpegQuality::DEFAULT);
        assert!(matches!(result, Err(EncodeError::Io { .. })));
    }

    #[test]
    fn test_write_bitmap_encode_failure_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let bad = Bitmap {
            width: 2,
            height: 2,
            pixels: vec![0; 3],
        };
        assert!(write_bitmap(&bad, &path, OutputFormat::Png, JpegQuality::DEFAULT).is_err());
        assert!(!path.exists());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
