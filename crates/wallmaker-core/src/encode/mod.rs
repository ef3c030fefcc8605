//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Encoding a [`Bitmap`](crate::decode::Bitmap) to PNG, JPEG, BMP or TIFF
//! - Writing the result next to its source file under a resolution-tagged name
//!
//! # Examples
//!
//! ```ignore
//! use wallmaker_core::encode::{output_path, resolution_suffix, write_bitmap, JpegQuality};
//!
//! let path = output_path(source, &resolution_suffix(target), OutputFormat::Jpeg);
//! write_bitmap(&wallpaper, &path, OutputFormat::Jpeg, JpegQuality::new(90))?;
//! ```

mod codec;
mod naming;

pub use codec::{encode_bitmap, write_bitmap, EncodeError, JpegQuality};
pub use naming::{output_path, resolution_suffix};
