//! Loading session defaults from a `--config` file.

use std::path::Path;

use wallmaker_core::SessionDefaults;

use crate::CliError;

/// Read defaults from `path`, or use the built-in ones when no file is given.
pub fn load_defaults(path: Option<&Path>) -> Result<SessionDefaults, CliError> {
    let Some(path) = path else {
        return Ok(SessionDefaults::default());
    };

    let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let defaults = SessionDefaults::from_toml_str(&text)?;
    log::debug!("Loaded defaults from {}", path.display());
    Ok(defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallmaker_core::OutputFormat;

    #[test]
    fn test_no_config_uses_defaults() {
        assert_eq!(load_defaults(None).unwrap(), SessionDefaults::default());
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallmaker.toml");
        std::fs::write(&path, "default_export_format = \"bmp\"\nlast_resolution_index = 4\n").unwrap();

        let defaults = load_defaults(Some(&path)).unwrap();
        assert_eq!(defaults.default_export_format, OutputFormat::Bmp);
        assert_eq!(defaults.last_resolution_index, 4);
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_defaults(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(CliError::ReadConfig { .. })));
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "jpeg_quality = [1, 2]").unwrap();
        assert!(matches!(load_defaults(Some(&path)), Err(CliError::Settings(_))));
    }
}
