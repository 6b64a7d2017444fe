//! Writing bitmaps and manifests to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::manifest::Manifest;

/// Persists rendered icons into one output directory.
///
/// Every write replaces whatever is already at the target path.
#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
}

impl Exporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Path a file named `filename` is written to.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.out_dir.join(filename)
    }

    /// Encodes `canvas` as PNG and writes it as `filename`.
    pub fn write_image(&self, filename: &str, canvas: &Canvas) -> Result<PathBuf> {
        let path = self.path_for(filename);
        let png = canvas.encode_png().map_err(|e| Error::write(&path, e))?;
        self.write_bytes(path, &png)
    }

    /// Writes the full manifest as `filename`.
    pub fn write_manifest(&self, filename: &str, manifest: &Manifest) -> Result<PathBuf> {
        let path = self.path_for(filename);
        let json = manifest.to_json_pretty().map_err(|e| Error::write(&path, e))?;
        self.write_bytes(path, json.as_bytes())
    }

    fn write_bytes(&self, path: PathBuf, bytes: &[u8]) -> Result<PathBuf> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
        }
        fs::write(&path, bytes).map_err(|e| Error::write(&path, e))?;
        log::debug!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}
