use std::path::PathBuf;

use thiserror::Error;
use wallmaker_core::{DecodeError, SessionError, SettingsError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Failed to load image: {0}")]
    Load(#[from] DecodeError),

    #[error("Export failed: {0}")]
    Export(#[from] SessionError),

    #[error("Unknown resolution preset {0:?} (run `wallmaker resolutions` for the list)")]
    UnknownPreset(String),

    #[error("Resolution index {0} is not in the catalog")]
    ResolutionIndex(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
