//! Image cropping operations.
//!
//! Crop rectangles are in source pixel coordinates and must lie entirely
//! inside the image. Nothing is clamped: a rectangle that reaches past an
//! edge is reported as [`GeometryError::CropOutOfBounds`].
//!
//! # Example
//!
//! ```ignore
//! // Crop the center 50x50 of a 100x100 image
//! let cropped = crop(&image, CropRect::new(25, 25, 50, 50))?;
//! ```

use crate::decode::{Bitmap, BYTES_PER_PIXEL};

use super::{CropRect, GeometryError, Size};

/// Extract the sub-image covered by `rect`.
///
/// # Errors
///
/// Returns `GeometryError::EmptyCrop` for a zero-area rectangle and
/// `GeometryError::CropOutOfBounds` if it is not fully inside the image.
pub fn crop(image: &Bitmap, rect: CropRect) -> Result<Bitmap, GeometryError> {
    check_buffer(image)?;
    let rect = rect.validate_within(image.width, image.height)?;

    // Fast path: full crop returns a clone
    if rect == CropRect::full(image.width, image.height) {
        return Ok(image.clone());
    }

    let src_stride = image.width as usize * BYTES_PER_PIXEL;
    let row_bytes = rect.width as usize * BYTES_PER_PIXEL;
    let left = rect.x as usize * BYTES_PER_PIXEL;
    let top = rect.y as usize;

    let mut output = Vec::with_capacity(row_bytes * rect.height as usize);

    // Copy pixel data row by row
    for y in top..top + rect.height as usize {
        let start = y * src_stride + left;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Ok(Bitmap::new(rect.width, rect.height, output))
}

/// Largest rectangle with the aspect ratio of `target`, centered in an
/// `image_width` x `image_height` image.
///
/// This is the crop the viewer proposes as soon as a resolution is chosen.
/// The result always fits inside the image and is at least 1x1 for a
/// non-empty image and a valid target.
pub fn fit_crop_rect(image_width: u32, image_height: u32, target: Size) -> CropRect {
    if image_width == 0 || image_height == 0 || !target.is_valid() {
        return CropRect::full(image_width, image_height);
    }

    let (iw, ih) = (image_width as u64, image_height as u64);
    let (tw, th) = (target.width as u64, target.height as u64);

    let (width, height) = if iw * th >= ih * tw {
        // Image is wider than the target: full height, trimmed width
        ((ih * tw / th).clamp(1, iw), ih)
    } else {
        // Image is taller than the target: full width, trimmed height
        (iw, (iw * th / tw).clamp(1, ih))
    };

    CropRect::new(
        ((iw - width) / 2) as i32,
        ((ih - height) / 2) as i32,
        width as u32,
        height as u32,
    )
}

pub(crate) fn check_buffer(image: &Bitmap) -> Result<(), GeometryError> {
    let expected = image.width as usize * image.height as usize * BYTES_PER_PIXEL;
    if image.pixels.len() != expected {
        return Err(GeometryError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity((width * height) as usize * BYTES_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Bitmap::new(width, height, pixels)
    }

    /// Strategy for an image size plus a crop rectangle inside it.
    fn image_and_rect() -> impl Strategy<Value = (u32, u32, CropRect)> {
        (1u32..=60, 1u32..=60).prop_flat_map(|(w, h)| {
            (0..w, 0..h).prop_flat_map(move |(x, y)| {
                (1..=w - x, 1..=h - y).prop_map(move |(cw, ch)| {
                    (w, h, CropRect::new(x as i32, y as i32, cw, ch))
                })
            })
        })
    }

    proptest! {
        /// Property: a contained rectangle always crops to exactly its size.
        #[test]
        fn prop_crop_matches_rect((w, h, rect) in image_and_rect()) {
            let img = create_test_image(w, h);
            let result = crop(&img, rect).unwrap();
            prop_assert_eq!(result.dimensions(), (rect.width, rect.height));
            prop_assert_eq!(result.byte_size(), (rect.width * rect.height) as usize * 4);
        }

        /// Property: cropped pixels are the source pixels at the offset position.
        #[test]
        fn prop_crop_pixels_from_source((w, h, rect) in image_and_rect()) {
            let img = create_test_image(w, h);
            let result = crop(&img, rect).unwrap();
            for y in 0..rect.height {
                for x in 0..rect.width {
                    prop_assert_eq!(
                        result.pixel(x, y).unwrap(),
                        img.pixel(rect.x as u32 + x, rect.y as u32 + y).unwrap()
                    );
                }
            }
        }

        /// Property: rectangles reaching past the right edge are rejected.
        #[test]
        fn prop_overhanging_rect_rejected(
            (w, h) in (1u32..=60, 1u32..=60),
            overhang in 1u32..=20,
        ) {
            let img = create_test_image(w, h);
            let rect = CropRect::new(0, 0, w + overhang, h);
            let rejected = matches!(crop(&img, rect), Err(GeometryError::CropOutOfBounds { .. }));
            prop_assert!(rejected);
        }

        /// Property: the fitted rectangle fits and matches the target aspect.
        #[test]
        fn prop_fit_crop_rect_fits(
            (iw, ih) in (1u32..=5000, 1u32..=5000),
            (tw, th) in (1u32..=8000, 1u32..=8000),
        ) {
            let rect = fit_crop_rect(iw, ih, Size::new(tw, th));
            prop_assert!(rect.fits_within(iw, ih));
            prop_assert!(!rect.is_empty());
            // One side spans the image
            prop_assert!(rect.width == iw || rect.height == ih);
        }
    }
}
