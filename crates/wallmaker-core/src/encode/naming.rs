//! Output file naming.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::catalog::OutputFormat;
use crate::transform::Size;

/// Suffix for a target size, e.g. `_1920x1080`.
pub fn resolution_suffix(size: Size) -> String {
    format!("_{}x{}", size.width, size.height)
}

/// Path of the exported wallpaper for a source file.
///
/// The result is `<dir of base>/<basename><suffix>.<ext>`, where the basename
/// is the source file name up to its first `.` and `ext` comes from `format`.
/// The source extension is never reused.
///
/// ```ignore
/// let out = output_path(Path::new("/x/photo.png"), "_1920x1080", OutputFormat::Jpeg);
/// assert_eq!(out, PathBuf::from("/x/photo_1920x1080.jpg"));
/// ```
pub fn output_path(base: &Path, suffix: &str, format: OutputFormat) -> PathBuf {
    let mut name = basename(base.file_name().unwrap_or_default());
    name.push(suffix);
    name.push(".");
    name.push(format.extension());

    let dir = match base.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    dir.join(name)
}

/// File name up to its first `.`, keeping non-UTF-8 bytes intact.
#[cfg(unix)]
fn basename(file_name: &OsStr) -> OsString {
    use std::os::unix::ffi::OsStrExt;

    let bytes = file_name.as_bytes();
    let end = bytes.iter().position(|&b| b == b'.').unwrap_or(bytes.len());
    OsStr::from_bytes(&bytes[..end]).to_os_string()
}

#[cfg(not(unix))]
fn basename(file_name: &OsStr) -> OsString {
    match file_name.to_str() {
        Some(name) => OsString::from(name.split('.').next().unwrap_or_default()),
        // Unpaired surrogates: strip extensions one at a time
        None => {
            let mut stem = file_name;
            while let Some(shorter) = Path::new(stem).file_stem().filter(|s| s.len() < stem.len()) {
                stem = shorter;
            }
            stem.to_os_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_replaces_extension() {
        let out = output_path(Path::new("/x/photo.png"), "_1920x1080", OutputFormat::Jpeg);
        assert_eq!(out, PathBuf::from("/x/photo_1920x1080.jpg"));
    }

    #[test]
    fn test_output_path_stops_at_first_dot() {
        let out = output_path(
            Path::new("/pics/holiday.2024.final.heic"),
            "_2560x1440",
            OutputFormat::Png,
        );
        assert_eq!(out, PathBuf::from("/pics/holiday_2560x1440.png"));
    }

    #[test]
    fn test_output_path_relative_file() {
        let out = output_path(Path::new("shot.tif"), "_1280x720", OutputFormat::Tiff);
        assert_eq!(out, PathBuf::from("./shot_1280x720.tiff"));
    }

    #[test]
    fn test_output_path_without_extension() {
        let out = output_path(Path::new("/a/b/raw"), "_5120x1440", OutputFormat::Bmp);
        assert_eq!(out, PathBuf::from("/a/b/raw_5120x1440.bmp"));
    }

    #[test]
    fn test_output_path_leading_dot() {
        let out = output_path(Path::new("/x/.hidden.png"), "_800x600", OutputFormat::Png);
        assert_eq!(out, PathBuf::from("/x/_800x600.png"));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_path_keeps_non_utf8_basename() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let base = Path::new("/pics").join(OsStr::from_bytes(b"caf\xe9.v2.png"));
        let out = output_path(&base, "_1920x1080", OutputFormat::Jpeg);
        assert_eq!(out.parent(), Some(Path::new("/pics")));
        assert_eq!(
            out.file_name().map(|n| n.to_os_string().into_vec()),
            Some(b"caf\xe9_1920x1080.jpg".to_vec())
        );
    }

    #[test]
    fn test_resolution_suffix() {
        assert_eq!(resolution_suffix(Size::new(1920, 1080)), "_1920x1080");
        assert_eq!(resolution_suffix(Size::new(7680, 4320)), "_7680x4320");
    }
}
