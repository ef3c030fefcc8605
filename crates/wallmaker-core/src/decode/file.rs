//! Decoding of raster files into the RGBA working representation.
//!
//! The container format is detected from the content rather than the file
//! name, so a mislabeled `.jpg` that is really a PNG still loads. EXIF
//! orientation is honoured for formats that carry it.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{Bitmap, DecodeError, ExifOrientation};

/// Read and decode an image file.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be read, and the errors of
/// [`decode_bytes`] otherwise.
pub fn decode_file(path: &Path) -> Result<Bitmap, DecodeError> {
    let bytes = std::fs::read(path).map_err(|e| DecodeError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let bitmap = decode_bytes(&bytes)?;
    log::debug!(
        "Decoded {} ({}x{})",
        path.display(),
        bitmap.width,
        bitmap.height
    );
    Ok(bitmap)
}

/// Decode an in-memory image, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the format cannot be detected
/// or has no decoder, `DecodeError::CorruptedFile` if the data is damaged,
/// and `DecodeError::EmptyImage` if the result has a zero dimension.
pub fn decode_bytes(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    let oriented = apply_orientation(img, orientation);
    into_bitmap(oriented)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::UnsupportedFormat);
    }

    reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::UnsupportedFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })
}

fn into_bitmap(img: DynamicImage) -> Result<Bitmap, DecodeError> {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }
    Ok(Bitmap::from_rgba_image(img.into_rgba8()))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `ExifOrientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> ExifOrientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(ExifOrientation::from)
            .unwrap_or_default(),
        Err(_) => ExifOrientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: ExifOrientation) -> DynamicImage {
    match orientation {
        ExifOrientation::Normal => img,
        ExifOrientation::FlipHorizontal => img.fliph(),
        ExifOrientation::Rotate180 => img.rotate180(),
        ExifOrientation::FlipVertical => img.flipv(),
        ExifOrientation::Transpose => img.rotate90().fliph(),
        ExifOrientation::Rotate90CW => img.rotate90(),
        ExifOrientation::Transverse => img.rotate270().fliph(),
        ExifOrientation::Rotate270CW => img.rotate270(),
    }
}
