//! Tonal adjustment algorithms
//!
//! Applies brightness, contrast and saturation to RGBA pixel data.
//!
//! ## Adjustment Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//!
//! Each stage works on integer channel values and clamps its result to
//! 0-255 before the next stage sees it, so the order changes the output.
//! A stage whose parameter is 0 is skipped. Alpha is never modified.

use crate::decode::{Bitmap, BYTES_PER_PIXEL};
use crate::luma::luma;
use crate::AdjustmentParameters;

/// Apply adjustments to `original`, returning a new bitmap.
///
/// The input is never modified. With all parameters at 0 the result is a
/// value-identical copy. Parameters outside -100..=100 are clamped first.
pub fn apply_adjustments(original: &Bitmap, params: &AdjustmentParameters) -> Bitmap {
    let mut result = original.clone();
    apply_adjustments_in_place(&mut result.pixels, params);
    result
}

/// Scalar form of [`apply_adjustments`].
pub fn adjust(original: &Bitmap, brightness: i32, contrast: i32, saturation: i32) -> Bitmap {
    apply_adjustments(
        original,
        &AdjustmentParameters::new(brightness, contrast, saturation),
    )
}

/// Apply adjustments to an owned RGBA buffer in place.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `params` - The adjustment values to apply
pub fn apply_adjustments_in_place(pixels: &mut [u8], params: &AdjustmentParameters) {
    let params = params.clamped();

    // Early exit if no adjustments
    if params.is_default() {
        return;
    }

    let offset = brightness_offset(params.brightness);
    let contrast = (params.contrast != 0).then(|| contrast_factor(params.contrast));
    let saturation = (params.saturation != 0).then(|| saturation_factor(params.saturation));

    for chunk in pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
        let mut rgb = [chunk[0] as i32, chunk[1] as i32, chunk[2] as i32];

        if offset != 0 {
            rgb = apply_brightness(rgb, offset);
        }
        if let Some(factor) = contrast {
            rgb = apply_contrast(rgb, factor);
        }
        if let Some(factor) = saturation {
            rgb = apply_saturation(rgb, factor);
        }

        chunk[0] = rgb[0] as u8;
        chunk[1] = rgb[1] as u8;
        chunk[2] = rgb[2] as u8;
    }
}

/// Per-channel offset for a brightness value.
///
/// Formula: `brightness * 255 / 100` with integer division.
#[inline]
pub fn brightness_offset(brightness: i32) -> i32 {
    brightness.clamp(AdjustmentParameters::MIN, AdjustmentParameters::MAX) * 255 / 100
}

/// Contrast multiplier for a contrast value.
///
/// Formula: `259 * (contrast + 255) / (255 * (259 - contrast))`.
/// The input is clamped to -100..=100 so the denominator never reaches zero.
#[inline]
pub fn contrast_factor(contrast: i32) -> f64 {
    let c = contrast.clamp(AdjustmentParameters::MIN, AdjustmentParameters::MAX) as f64;
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

/// Saturation multiplier for a saturation value.
///
/// Formula: `(saturation + 100) / 100`. -100 gives 0 (grayscale).
#[inline]
pub fn saturation_factor(saturation: i32) -> f64 {
    let s = saturation.clamp(AdjustmentParameters::MIN, AdjustmentParameters::MAX) as f64;
    (s + 100.0) / 100.0
}

#[inline]
fn clamp_channel(value: i32) -> i32 {
    value.clamp(0, 255)
}

#[inline]
fn apply_brightness(rgb: [i32; 3], offset: i32) -> [i32; 3] {
    rgb.map(|c| clamp_channel(c + offset))
}

#[inline]
fn apply_contrast(rgb: [i32; 3], factor: f64) -> [i32; 3] {
    rgb.map(|c| clamp_channel((factor * (c - 128) as f64 + 128.0) as i32))
}

#[inline]
fn apply_saturation(rgb: [i32; 3], factor: f64) -> [i32; 3] {
    let gray = luma(rgb[0], rgb[1], rgb[2]);
    rgb.map(|c| clamp_channel((gray as f64 + factor * (c - gray) as f64) as i32))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
