//! Geometry types shared by the crop and scale operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for crop rectangles and target sizes that cannot be honoured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The crop rectangle has a zero width or height.
    #[error("Crop rectangle {rect} is empty")]
    EmptyCrop { rect: CropRect },

    /// The crop rectangle is not fully inside the source image.
    #[error("Crop rectangle {rect} is outside image bounds ({image_width}x{image_height})")]
    CropOutOfBounds {
        rect: CropRect,
        image_width: u32,
        image_height: u32,
    },

    /// The target size has a zero dimension.
    #[error("Invalid target size: width ({width}) and height ({height}) must be non-zero")]
    InvalidTargetSize { width: u32, height: u32 },

    /// The bitmap's pixel buffer does not match its dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// A width/height pair in pixels, e.g. a target wallpaper resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub(crate) fn validate(self) -> Result<Self, GeometryError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(GeometryError::InvalidTargetSize {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangle in source-image pixel coordinates.
///
/// The origin may be negative when a caller derived it from a view that was
/// panned past the image edge; such rectangles are rejected by the crop
/// operations, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole image of the given dimensions.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True if the rectangle lies entirely inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let right = self.x as i64 + self.width as i64;
        let bottom = self.y as i64 + self.height as i64;
        self.x >= 0 && self.y >= 0 && right <= width as i64 && bottom <= height as i64
    }

    /// Check the rectangle against an image of the given dimensions.
    pub fn validate_within(self, width: u32, height: u32) -> Result<Self, GeometryError> {
        if self.is_empty() {
            return Err(GeometryError::EmptyCrop { rect: self });
        }
        if !self.fits_within(width, height) {
            return Err(GeometryError::CropOutOfBounds {
                rect: self,
                image_width: width,
                image_height: height,
            });
        }
        Ok(self)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Error returned when parsing a [`Size`] or [`CropRect`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {input:?}: expected {expected}")]
pub struct ParseGeometryError {
    input: String,
    expected: &'static str,
}

impl FromStr for Size {
    type Err = ParseGeometryError;

    /// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseGeometryError {
            input: s.to_string(),
            expected: "WIDTHxHEIGHT",
        };
        let (w, h) = s.trim().split_once(['x', 'X', '×']).ok_or_else(err)?;
        let width = w.trim().parse().map_err(|_| err())?;
        let height = h.trim().parse().map_err(|_| err())?;
        Ok(Size::new(width, height))
    }
}

impl FromStr for CropRect {
    type Err = ParseGeometryError;

    /// Parses `X,Y,WIDTH,HEIGHT`, e.g. `200,100,3600,2025`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseGeometryError {
            input: s.to_string(),
            expected: "X,Y,WIDTH,HEIGHT",
        };
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [x, y, w, h] = parts.as_slice() else {
            return Err(err());
        };
        Ok(CropRect::new(
            x.parse().map_err(|_| err())?,
            y.parse().map_err(|_| err())?,
            w.parse().map_err(|_| err())?,
            h.parse().map_err(|_| err())?,
        ))
    }
}
