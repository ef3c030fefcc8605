//! Image decoding for Wallmaker.
//!
//! This module provides functionality for:
//! - Decoding any raster format the `image` crate was built with
//!   (JPEG, PNG, BMP, TIFF, GIF), detected from the file content
//! - Applying EXIF orientation so photos load upright
//! - The [`Bitmap`] type, the 8-bit RGBA working representation used by
//!   every later stage of the pipeline
//!
//! # Architecture
//!
//! Decoding is synchronous and runs on the caller's thread. HEIC/HEIF files
//! are accepted by the catalog's extension mapping but have no decoder
//! compiled in; loading one reports `DecodeError::UnsupportedFormat`.
//!
//! # Examples
//!
//! ```ignore
//! use wallmaker_core::decode::decode_file;
//!
//! let image = decode_file(Path::new("photo.jpg"))?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod file;
mod types;

pub use file::{decode_bytes, decode_file};
pub use types::{Bitmap, DecodeError, ExifOrientation, FilterType, BYTES_PER_PIXEL};
