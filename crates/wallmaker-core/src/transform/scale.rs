//! Resampling to exact output dimensions.
//!
//! Wallpapers are always produced at the exact target size. The aspect ratio
//! of the source region is not consulted: if the caller's crop does not match
//! the target shape the result is stretched. Use
//! [`fit_crop_rect`](super::fit_crop_rect) to get a matching crop.

use crate::decode::{Bitmap, FilterType};

use super::crop::{check_buffer, crop};
use super::{CropRect, GeometryError, Size};

/// Crop `rect` out of `image` and resample it to exactly `target`.
///
/// Uses the default smooth filter ([`FilterType::Lanczos3`]).
///
/// # Errors
///
/// Returns `GeometryError::InvalidTargetSize` for a zero target dimension,
/// checked before the crop, and the errors of [`crop`] otherwise.
pub fn crop_and_scale(image: &Bitmap, target: Size, rect: CropRect) -> Result<Bitmap, GeometryError> {
    crop_and_scale_with_filter(image, target, rect, FilterType::default())
}

/// [`crop_and_scale`] with an explicit interpolation filter.
pub fn crop_and_scale_with_filter(
    image: &Bitmap,
    target: Size,
    rect: CropRect,
    filter: FilterType,
) -> Result<Bitmap, GeometryError> {
    let target = target.validate()?;
    let cropped = crop(image, rect)?;
    resize(&cropped, target, filter)
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `target` - Output width and height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Returns
///
/// A new `Bitmap` with the specified dimensions.
pub fn resize(image: &Bitmap, target: Size, filter: FilterType) -> Result<Bitmap, GeometryError> {
    let target = target.validate()?;
    check_buffer(image)?;

    // Fast path: if dimensions match, just clone
    if image.dimensions() == (target.width, target.height) {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or(GeometryError::InvalidPixelData {
            expected: image.pixel_count() as usize * 4,
            actual: image.byte_size(),
        })?;

    let resized = image::imageops::resize(&rgba, target.width, target.height, filter.to_image_filter());

    log::debug!(
        "Resized {}x{} -> {} ({:?})",
        image.width,
        image.height,
        target,
        filter
    );

    Ok(Bitmap::from_rgba_image(resized))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
