//! Asset Loading
//!
//! [`AssetLoader`] resolves asset paths relative to an explicit base
//! directory handed in at construction, so loaders can be tested in
//! isolation with injected paths. By convention shader binaries live at
//! `<base>/shaders/compiled/<name>.<ext>` and images at
//! `<base>/assets/<name>`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::error;

use crate::errors::{GlintError, Result};

/// Directory images are resolved under, relative to the base directory.
const IMAGE_DIR: &str = "assets";

/// Reads shader binaries and images from disk, relative to a base directory.
pub struct AssetLoader {
    base_dir: PathBuf,
}

impl AssetLoader {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Creates a loader rooted at the running executable's directory,
    /// the conventional location for installed builds.
    pub fn from_exe_dir() -> Result<Self> {
        let exe = std::env::current_exe()?;
        let base_dir = exe.parent().unwrap_or(Path::new(".")).to_path_buf();
        Ok(Self { base_dir })
    }

    #[inline]
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Reads a whole file relative to the base directory.
    ///
    /// Returns [`GlintError::AssetMissing`] when the file cannot be found
    /// and [`GlintError::IoError`] for any other read failure.
    pub fn load_binary(&self, rel_path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = self.base_dir.join(rel_path);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                error!("Failed to load asset from disk! path: {}", path.display());
                Err(GlintError::AssetMissing(path.display().to_string()))
            }
            Err(e) => {
                error!("Failed to read asset! path: {}    error: {e}", path.display());
                Err(e.into())
            }
        }
    }

    /// Loads `assets/<name>` and converts it to the canonical 4-channel
    /// RGBA layout.
    ///
    /// Only `desired_channels == 4` is supported; anything else fails with
    /// [`GlintError::UnsupportedFormat`] before any file is touched.
    pub fn load_image(&self, name: &str, desired_channels: u32) -> Result<image::RgbaImage> {
        if desired_channels != 4 {
            error!("Unexpected desired_channels: {desired_channels}");
            return Err(GlintError::UnsupportedFormat {
                requested: desired_channels,
            });
        }

        let path = self.base_dir.join(IMAGE_DIR).join(name);
        let img = image::open(&path).map_err(|e| {
            error!("Failed to load image! path: {}    error: {e}", path.display());
            GlintError::from(e)
        })?;

        Ok(img.into_rgba8())
    }
}
