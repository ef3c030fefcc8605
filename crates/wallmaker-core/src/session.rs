//! Editing session for one source image.
//!
//! A [`Session`] owns the decoded original, the adjusted copy derived from it
//! and the export parameters. The adjusted copy is always recomputed from the
//! original, never from a previous adjusted result, so setting the same
//! value twice gives the same bitmap as setting it once.
//!
//! # Architecture
//!
//! Every operation is a blocking call on the caller's thread. Mutations take
//! `&mut self`, so there is at most one writer. The [`Catalog`] is shared
//! through an `Arc` and only read.
//!
//! Interested parties register a [`SessionListener`] and receive a
//! [`SessionEvent`] after each load, adjustment, export or failure. An
//! `mpsc::Sender<SessionEvent>` is a listener, so a UI thread can consume the
//! events from a channel.
//!
//! # Examples
//!
//! ```ignore
//! let mut session = Session::new(Arc::new(Catalog::new()));
//! session.load(Path::new("photo.jpg"))?;
//! session.set_brightness(20);
//! let target = Size::new(1920, 1080);
//! let crop = session.fit_crop_rect(target).unwrap();
//! let written = session.export_wallpaper(target, crop)?;
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::adjustments::apply_adjustments;
use crate::catalog::{Catalog, OutputFormat};
use crate::decode::{decode_file, Bitmap, DecodeError};
use crate::encode::{output_path, resolution_suffix, write_bitmap, EncodeError, JpegQuality};
use crate::settings::SessionDefaults;
use crate::transform::{crop_and_scale, fit_crop_rect, CropRect, GeometryError, Size};
use crate::{clamp_adjustment, AdjustmentParameters};

/// Errors reported by [`Session`] operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Export was requested before any image loaded successfully.
    #[error("No image loaded")]
    NoImageLoaded,
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Decode(_) => ErrorKind::Decode,
            SessionError::Geometry(_) => ErrorKind::Geometry,
            SessionError::Encode(_) => ErrorKind::Encode,
            SessionError::NoImageLoaded => ErrorKind::State,
        }
    }
}

/// Coarse category carried by [`SessionEvent::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Decode,
    Geometry,
    Encode,
    State,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Decode => "decode",
            ErrorKind::Geometry => "geometry",
            ErrorKind::Encode => "encode",
            ErrorKind::State => "state",
        };
        f.write_str(name)
    }
}

/// Notifications raised by a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new image was decoded and is now the original.
    Loaded { path: PathBuf },
    /// The adjusted bitmap was recomputed.
    Adjusted,
    /// An operation failed; the session kept its previous state.
    Error { message: String, kind: ErrorKind },
    /// A wallpaper file was written.
    Exported { path: PathBuf },
}

/// Receiver of [`SessionEvent`]s.
pub trait SessionListener {
    fn on_event(&mut self, event: &SessionEvent);
}

impl SessionListener for Sender<SessionEvent> {
    fn on_event(&mut self, event: &SessionEvent) {
        // A dropped receiver just stops listening
        let _ = self.send(event.clone());
    }
}

/// The decoded source together with its adjusted copy.
#[derive(Debug, Clone)]
struct LoadedImage {
    path: PathBuf,
    original: Bitmap,
    current: Bitmap,
}

/// State of one wallpaper being prepared.
pub struct Session {
    catalog: Arc<Catalog>,
    image: Option<LoadedImage>,
    adjustments: AdjustmentParameters,
    output_format: OutputFormat,
    jpeg_quality: JpegQuality,
    listeners: Vec<Box<dyn SessionListener>>,
}

impl Session {
    /// An empty session with zero adjustments, PNG output and quality 85.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            image: None,
            adjustments: AdjustmentParameters::default(),
            output_format: OutputFormat::default(),
            jpeg_quality: JpegQuality::default(),
            listeners: Vec::new(),
        }
    }

    /// An empty session seeded from persisted preferences.
    pub fn with_defaults(catalog: Arc<Catalog>, defaults: &SessionDefaults) -> Self {
        Self {
            adjustments: defaults.initial_adjustments(),
            output_format: defaults.default_export_format,
            jpeg_quality: defaults.jpeg_quality,
            ..Self::new(catalog)
        }
    }

    pub fn add_listener(&mut self, listener: impl SessionListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ===== Queries =====

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The adjusted bitmap, if an image is loaded.
    pub fn current_bitmap(&self) -> Option<&Bitmap> {
        self.image.as_ref().map(|i| &i.current)
    }

    /// The bitmap as decoded, if an image is loaded.
    pub fn original_bitmap(&self) -> Option<&Bitmap> {
        self.image.as_ref().map(|i| &i.original)
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.image.as_ref().map(|i| i.path.as_path())
    }

    pub fn adjustments(&self) -> AdjustmentParameters {
        self.adjustments
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn jpeg_quality(&self) -> JpegQuality {
        self.jpeg_quality
    }

    /// Largest crop matching the aspect ratio of `target`, centered in the
    /// loaded image.
    pub fn fit_crop_rect(&self, target: Size) -> Option<CropRect> {
        self.image
            .as_ref()
            .map(|i| fit_crop_rect(i.original.width, i.original.height, target))
    }

    // ===== Loading =====

    /// Decode `path` and make it the session's image.
    ///
    /// On success the output format switches to the catalog's default for
    /// the file extension, or stays as it was for an unknown extension. The
    /// current adjustments are applied to the new image right away.
    ///
    /// # Errors
    ///
    /// Returns the decoder's error. The previously loaded image, if any,
    /// stays in place.
    pub fn load(&mut self, path: &Path) -> Result<(), DecodeError> {
        let start = Instant::now();

        let original = match decode_file(path) {
            Ok(bitmap) => bitmap,
            Err(e) => {
                log::warn!("Failed to load {}: {}", path.display(), e);
                self.notify(SessionEvent::Error {
                    message: e.to_string(),
                    kind: ErrorKind::Decode,
                });
                return Err(e);
            }
        };

        let current = apply_adjustments(&original, &self.adjustments);

        if let Some(format) = self.catalog.default_format_for_path(path) {
            self.output_format = format;
        }

        log::debug!(
            "Loaded {} ({}x{}) in {:?}, output format {}",
            path.display(),
            original.width,
            original.height,
            start.elapsed(),
            self.output_format
        );

        self.image = Some(LoadedImage {
            path: path.to_path_buf(),
            original,
            current,
        });
        self.notify(SessionEvent::Loaded {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    // ===== Adjustments =====

    pub fn set_brightness(&mut self, value: i32) {
        self.adjustments.brightness = clamp_adjustment(value);
        self.recompute();
    }

    pub fn set_contrast(&mut self, value: i32) {
        self.adjustments.contrast = clamp_adjustment(value);
        self.recompute();
    }

    pub fn set_saturation(&mut self, value: i32) {
        self.adjustments.saturation = clamp_adjustment(value);
        self.recompute();
    }

    /// Replace all three values with a single recomputation.
    pub fn set_adjustments(&mut self, params: AdjustmentParameters) {
        self.adjustments = params.clamped();
        self.recompute();
    }

    pub fn reset_adjustments(&mut self) {
        self.set_adjustments(AdjustmentParameters::default());
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    /// Set the JPEG quality, clamped into 1..=100.
    pub fn set_jpeg_quality(&mut self, quality: i32) {
        self.jpeg_quality = JpegQuality::new(quality);
    }

    /// Rebuild the adjusted bitmap from the original.
    ///
    /// Without a loaded image only the parameters change and no event fires.
    fn recompute(&mut self) {
        let params = self.adjustments;
        let Some(image) = self.image.as_mut() else {
            return;
        };

        let start = Instant::now();
        image.current = apply_adjustments(&image.original, &params);
        log::debug!(
            "Adjusted {}x{} (b={}, c={}, s={}) in {:?}",
            image.original.width,
            image.original.height,
            params.brightness,
            params.contrast,
            params.saturation,
            start.elapsed()
        );

        self.notify(SessionEvent::Adjusted);
    }

    // ===== Export =====

    /// Crop and scale the adjusted bitmap without writing anything.
    pub fn render_wallpaper(&self, target: Size, crop: CropRect) -> Result<Bitmap, SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImageLoaded)?;
        Ok(crop_and_scale(&image.current, target, crop)?)
    }

    /// Write the wallpaper next to the source file.
    ///
    /// The file is named `<basename>_<W>x<H>.<ext>` after the source file and
    /// the target size, with the extension of the current output format.
    /// Geometry is checked before anything is written.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub fn export_wallpaper(&mut self, target: Size, crop: CropRect) -> Result<PathBuf, SessionError> {
        match self.write_wallpaper(target, crop) {
            Ok(path) => {
                self.notify(SessionEvent::Exported { path: path.clone() });
                Ok(path)
            }
            Err(e) => {
                log::warn!("Export failed: {}", e);
                self.notify(SessionEvent::Error {
                    message: e.to_string(),
                    kind: e.kind(),
                });
                Err(e)
            }
        }
    }

    fn write_wallpaper(&self, target: Size, crop: CropRect) -> Result<PathBuf, SessionError> {
        let start = Instant::now();
        let source = self.source_path().ok_or(SessionError::NoImageLoaded)?;
        let wallpaper = self.render_wallpaper(target, crop)?;

        let path = output_path(source, &resolution_suffix(target), self.output_format);
        write_bitmap(&wallpaper, &path, self.output_format, self.jpeg_quality)?;

        log::debug!(
            "Exported {} from crop {} in {:?}",
            path.display(),
            crop,
            start.elapsed()
        );
        Ok(path)
    }

    fn notify(&mut self, event: SessionEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("source_path", &self.source_path())
            .field("size", &self.current_bitmap().map(Bitmap::dimensions))
            .field("adjustments", &self.adjustments)
            .field("output_format", &self.output_format)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
