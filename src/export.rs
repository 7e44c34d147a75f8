//! PNG export of the composited image.

use crate::error::MoireError;
use image::{ImageFormat, RgbaImage};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Check that `path` can receive an export, and give it a `.png` extension.
///
/// Rejects directories and existing read-only files. A path that does not
/// exist yet is accepted.
pub fn validate_target(path: &Path) -> Result<PathBuf, MoireError> {
    let target = with_png_extension(path);
    if target.is_dir() {
        return Err(MoireError::Export(format!(
            "{} is a directory",
            target.display()
        )));
    }
    if let Ok(meta) = fs::metadata(&target) {
        if meta.permissions().readonly() {
            return Err(MoireError::Export(format!(
                "{} is not writable",
                target.display()
            )));
        }
    }
    Ok(target)
}

fn with_png_extension(path: &Path) -> PathBuf {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".png");
        PathBuf::from(name)
    }
}

/// Encode `image` as PNG at `path` (no validation).
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), MoireError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| MoireError::Export(format!("Failed to save PNG: {}", e)))?;
    info!(
        "exported {}x{} to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Saves images and remembers the directory of the last successful export.
#[derive(Debug, Default, Clone)]
pub struct Exporter {
    last_dir: Option<PathBuf>,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory to start the next file selection in.
    pub fn last_dir(&self) -> Option<&Path> {
        self.last_dir.as_deref()
    }

    /// Validate `path`, save, and return the path actually written.
    ///
    /// On failure nothing is remembered.
    pub fn export(&mut self, image: &RgbaImage, path: &Path) -> Result<PathBuf, MoireError> {
        let target = validate_target(path)?;
        save_png(image, &target)?;
        self.last_dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_appends_extension() {
        let dir = tempdir().unwrap();
        let target = validate_target(&dir.path().join("out")).unwrap();
        assert_eq!(target, dir.path().join("out.png"));

        let kept = validate_target(&dir.path().join("OUT.PNG")).unwrap();
        assert_eq!(kept, dir.path().join("OUT.PNG"));
    }

    #[test]
    fn test_rejects_directory() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("folder.png");
        fs::create_dir(&sub).unwrap();
        assert!(matches!(validate_target(&sub), Err(MoireError::Export(_))));
    }

    #[test]
    fn test_rejects_readonly_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locked.png");
        fs::write(&path, b"x").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&path, perms).unwrap();
        assert!(validate_target(&path).is_err());
    }

    #[test]
    fn test_export_remembers_directory() {
        let dir = tempdir().unwrap();
        let mut exporter = Exporter::new();
        assert!(exporter.last_dir().is_none());

        let image = RgbaImage::new(3, 2);
        let written = exporter.export(&image, &dir.path().join("moire")).unwrap();
        assert!(written.exists());
        assert_eq!(exporter.last_dir(), Some(dir.path()));

        let decoded = image::open(&written).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[test]
    fn test_failed_export_keeps_last_dir() {
        let dir = tempdir().unwrap();
        let mut exporter = Exporter::new();
        let image = RgbaImage::new(1, 1);
        exporter.export(&image, &dir.path().join("first.png")).unwrap();

        let missing = dir.path().join("no/such/dir/out.png");
        assert!(exporter.export(&image, &missing).is_err());
        assert_eq!(exporter.last_dir(), Some(dir.path()));
    }
}
