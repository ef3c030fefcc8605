//! Persisted preferences used as a session's initial values.
//!
//! The core never reads or writes settings files itself. Callers load TOML
//! from wherever they keep it, parse it with [`SessionDefaults::from_toml_str`]
//! and hand the result to [`Session::with_defaults`](crate::Session::with_defaults).
//! Missing keys take their defaults, so an empty document is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{OutputFormat, DEFAULT_RESOLUTION_INDEX};
use crate::encode::JpegQuality;
use crate::AdjustmentParameters;

/// Errors reading or rendering settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to render settings: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Initial values for a [`Session`](crate::Session) and its caller's UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    /// Directory the last image was opened from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_directory: Option<PathBuf>,
    /// Catalog index of the last chosen resolution.
    pub last_resolution_index: usize,
    pub default_export_format: OutputFormat,
    pub jpeg_quality: JpegQuality,
    /// Restore `adjustments` on startup when true.
    pub remember_adjustments: bool,
    pub adjustments: AdjustmentParameters,
    /// Propose a fitted crop as soon as an image loads.
    pub auto_fit_on_load: bool,
    pub show_crop_overlay: bool,
    pub vertical_orientation: bool,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            last_directory: None,
            last_resolution_index: DEFAULT_RESOLUTION_INDEX,
            default_export_format: OutputFormat::Png,
            jpeg_quality: JpegQuality::DEFAULT,
            remember_adjustments: true,
            adjustments: AdjustmentParameters::default(),
            auto_fit_on_load: true,
            show_crop_overlay: true,
            vertical_orientation: false,
        }
    }
}

impl SessionDefaults {
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let mut defaults: SessionDefaults = toml::from_str(text)?;
        defaults.adjustments = defaults.adjustments.clamped();
        Ok(defaults)
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Adjustments a new session should start with.
    pub fn initial_adjustments(&self) -> AdjustmentParameters {
        if self.remember_adjustments {
            self.adjustments.clamped()
        } else {
            AdjustmentParameters::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let d = SessionDefaults::default();
        assert_eq!(d.last_resolution_index, 2);
        assert_eq!(d.default_export_format, OutputFormat::Png);
        assert_eq!(d.jpeg_quality.get(), 85);
        assert!(d.remember_adjustments);
        assert!(d.auto_fit_on_load);
        assert!(!d.vertical_orientation);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(SessionDefaults::from_toml_str("").unwrap(), SessionDefaults::default());
    }

    #[test]
    fn test_parse_partial_document() {
        let text = r#"
            default_export_format = "jpg"
            jpeg_quality = 250
            last_directory = "/home/me/Pictures"

            [adjustments]
            brightness = 20
            saturation = -300
        "#;
        let d = SessionDefaults::from_toml_str(text).unwrap();
        assert_eq!(d.default_export_format, OutputFormat::Jpeg);
        assert_eq!(d.jpeg_quality.get(), 100);
        assert_eq!(d.last_directory, Some(PathBuf::from("/home/me/Pictures")));
        assert_eq!(d.adjustments, AdjustmentParameters::new(20, 0, -100));
        assert_eq!(d.last_resolution_index, 2);
    }

    #[test]
    fn test_out_of_range_quality_is_clamped() {
        let d = SessionDefaults::from_toml_str("jpeg_quality = 300").unwrap();
        assert_eq!(d.jpeg_quality.get(), 100);
        let d = SessionDefaults::from_toml_str("jpeg_quality = -7").unwrap();
        assert_eq!(d.jpeg_quality.get(), 1);
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        let result = SessionDefaults::from_toml_str("auto_fit_on_load = \"yes\"");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_render_then_parse() {
        let d = SessionDefaults {
            last_directory: Some(PathBuf::from("/tmp/wall")),
            default_export_format: OutputFormat::Tiff,
            adjustments: AdjustmentParameters::new(-5, 30, 10),
            show_crop_overlay: false,
            ..SessionDefaults::default()
        };
        let text = d.to_toml_string().unwrap();
        assert!(text.contains("default_export_format = \"tiff\""));
        assert_eq!(SessionDefaults::from_toml_str(&text).unwrap(), d);
    }

    #[test]
    fn test_initial_adjustments_respects_remember() {
        let mut d = SessionDefaults {
            adjustments: AdjustmentParameters::new(10, 20, 30),
            ..SessionDefaults::default()
        };
        assert_eq!(d.initial_adjustments(), AdjustmentParameters::new(10, 20, 30));

        d.remember_adjustments = false;
        assert!(d.initial_adjustments().is_default());
    }
}
