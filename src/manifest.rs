//! Xcode asset catalog manifest (`Contents.json`).
//!
//! The manifest is always derived from the files that were actually
//! written, so every referenced filename exists and every emitted bitmap
//! is referenced.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "images": [
//!     { "size": "20x20", "idiom": "iphone", "filename": "icon-40.png", "scale": "2x" }
//!   ],
//!   "info": { "version": 1, "author": "xcode" }
//! }
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::size_set::{Idiom, Scale, Slot};

/// One slot entry of the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestImage {
    /// Logical size, e.g. `"83.5x83.5"`.
    pub size: String,
    pub idiom: Idiom,
    pub filename: String,
    pub scale: Scale,
}

impl From<&Slot> for ManifestImage {
    fn from(slot: &Slot) -> Self {
        Self {
            size: slot.size_label(),
            idiom: slot.idiom,
            filename: slot.filename.clone(),
            scale: slot.scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestInfo {
    pub version: u32,
    pub author: String,
}

impl Default for ManifestInfo {
    fn default() -> Self {
        Self {
            version: 1,
            author: "xcode".to_string(),
        }
    }
}

/// The full manifest document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub images: Vec<ManifestImage>,
    #[serde(default)]
    pub info: ManifestInfo,
}

impl Manifest {
    /// Builds the manifest for `slots`, keeping only slots whose file is in
    /// `emitted`. Slot order is preserved.
    pub fn for_emitted<'a>(
        slots: impl IntoIterator<Item = &'a Slot>,
        emitted: &BTreeSet<String>,
    ) -> Self {
        Self {
            images: slots
                .into_iter()
                .filter(|slot| emitted.contains(&slot.filename))
                .map(ManifestImage::from)
                .collect(),
            info: ManifestInfo::default(),
        }
    }

    /// Distinct filenames referenced by the manifest.
    pub fn filenames(&self) -> BTreeSet<&str> {
        self.images.iter().map(|image| image.filename.as_str()).collect()
    }

    /// Serializes the manifest to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size_set::SizeSet;

    fn all_files(set: &SizeSet) -> BTreeSet<String> {
        set.slots.iter().map(|s| s.filename.clone()).collect()
    }

    #[test]
    fn full_emission_lists_every_slot() {
        let set = SizeSet::ios_app_icon();
        let emitted = all_files(&set);
        let manifest = Manifest::for_emitted(&set.slots, &emitted);
        assert_eq!(manifest.images.len(), 18);

        let referenced: BTreeSet<String> =
            manifest.filenames().into_iter().map(str::to_string).collect();
        assert_eq!(referenced, emitted);
    }

    #[test]
    fn missing_files_drop_their_slots() {
        let set = SizeSet::ios_app_icon();
        let mut emitted = all_files(&set);
        emitted.remove("icon-40.png");

        let manifest = Manifest::for_emitted(&set.slots, &emitted);
        // icon-40.png backs iPhone 20@2x, iPad 20@2x and iPad 40@1x.
        assert_eq!(manifest.images.len(), 15);
        assert!(!manifest.filenames().contains("icon-40.png"));
        assert_eq!(manifest.filenames().len(), 12);
    }

    #[test]
    fn json_matches_xcode_layout() {
        let set = SizeSet::ios_app_icon();
        let manifest = Manifest::for_emitted(&set.slots, &all_files(&set));
        let json = manifest.to_json_pretty().unwrap();
        assert!(json.contains("\"size\": \"83.5x83.5\""));
        assert!(json.contains("\"idiom\": \"ios-marketing\""));
        assert!(json.contains("\"scale\": \"2x\""));
        assert!(json.contains("\"author\": \"xcode\""));

        let restored = Manifest::from_json(&json).unwrap();
        assert_eq!(restored, manifest);
    }

    #[test]
    fn parses_manifest_without_info() {
        let manifest = Manifest::from_json(
            r#"{ "images": [{ "size": "20x20", "idiom": "ipad", "filename": "icon-20.png", "scale": "1x" }] }"#,
        )
        .unwrap();
        assert_eq!(manifest.info, ManifestInfo::default());
        assert_eq!(manifest.images[0].idiom, Idiom::Ipad);
    }
}
