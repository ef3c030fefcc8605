//! Image transformation operations: cropping and scaling.
//!
//! This module turns the adjusted bitmap into the final wallpaper raster.
//!
//! # Transform Order
//!
//! When exporting a wallpaper, the pipeline runs in this order:
//! 1. Basic adjustments (already cached by the session)
//! 2. Crop to the caller's rectangle
//! 3. Resample to the exact target size
//!
//! # Coordinate System
//!
//! - Crop rectangles are in source pixel coordinates
//! - Origin is top-left corner
//! - Rectangles must be fully inside the image; they are never clamped

mod crop;
mod geometry;
mod scale;

pub use crop::{crop, fit_crop_rect};
pub use geometry::{CropRect, GeometryError, ParseGeometryError, Size};
pub use scale::{crop_and_scale, crop_and_scale_with_filter, resize};
