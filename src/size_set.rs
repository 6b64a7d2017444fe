//! Platform icon slot tables.
//!
//! A [`SizeSet`] lists every slot a platform asks for: logical size, idiom,
//! scale and the filename the bitmap must be written under. Tables are
//! plain values; callers can use the built-in iOS ones or assemble their
//! own.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Idiom / Scale
// ============================================================================

/// Device family a slot serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Idiom {
    Iphone,
    Ipad,
    IosMarketing,
    Universal,
}

impl Idiom {
    /// Wire name used in asset catalog manifests.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Iphone => "iphone",
            Self::Ipad => "ipad",
            Self::IosMarketing => "ios-marketing",
            Self::Universal => "universal",
        }
    }
}

impl fmt::Display for Idiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel density multiplier of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scale {
    #[serde(rename = "1x")]
    X1,
    #[serde(rename = "2x")]
    X2,
    #[serde(rename = "3x")]
    X3,
}

impl Scale {
    pub fn factor(self) -> u32 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X3 => 3,
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

// ============================================================================
// Slot
// ============================================================================

/// One platform icon slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    /// Side length in points, e.g. `83.5` for the iPad Pro slot.
    pub logical_size: f32,
    pub idiom: Idiom,
    pub scale: Scale,
    pub filename: String,
}

impl Slot {
    pub fn new(logical_size: f32, idiom: Idiom, scale: Scale, filename: impl Into<String>) -> Self {
        Self {
            logical_size,
            idiom,
            scale,
            filename: filename.into(),
        }
    }

    /// Bitmap side length in pixels.
    pub fn pixel_size(&self) -> u32 {
        (self.logical_size * self.scale.factor() as f32).round() as u32
    }

    /// Logical size as written in manifests, e.g. `"20x20"` or `"83.5x83.5"`.
    pub fn size_label(&self) -> String {
        format!("{0}x{0}", self.logical_size)
    }
}

/// One bitmap to produce, derived from a [`Slot`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub pixel_size: u32,
    pub filename: String,
    pub idiom: Idiom,
    pub scale: Scale,
    pub logical_size: f32,
}

impl From<&Slot> for RenderRequest {
    fn from(slot: &Slot) -> Self {
        Self {
            pixel_size: slot.pixel_size(),
            filename: slot.filename.clone(),
            idiom: slot.idiom,
            scale: slot.scale,
            logical_size: slot.logical_size,
        }
    }
}

// ============================================================================
// SizeSet
// ============================================================================

/// File name of the Xcode asset catalog manifest.
pub const XCODE_MANIFEST: &str = "Contents.json";

/// Ordered slot table for one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSet {
    pub name: String,
    pub slots: Vec<Slot>,
    /// Manifest file to write next to the bitmaps, if the platform needs one.
    pub manifest: Option<String>,
}

impl SizeSet {
    /// Creates an empty table without a manifest.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
            manifest: None,
        }
    }

    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }

    pub fn with_manifest(mut self, filename: impl Into<String>) -> Self {
        self.manifest = Some(filename.into());
        self
    }

    /// Drops the manifest requirement.
    pub fn without_manifest(mut self) -> Self {
        self.manifest = None;
        self
    }

    /// The Xcode `AppIcon.appiconset` table: 18 slots over 13 files.
    pub fn ios_app_icon() -> Self {
        use Idiom::*;
        use Scale::*;

        let table: [(f32, Idiom, Scale, u32); 18] = [
            (20.0, Iphone, X2, 40),
            (20.0, Iphone, X3, 60),
            (29.0, Iphone, X2, 58),
            (29.0, Iphone, X3, 87),
            (40.0, Iphone, X2, 80),
            (40.0, Iphone, X3, 120),
            (60.0, Iphone, X2, 120),
            (60.0, Iphone, X3, 180),
            (20.0, Ipad, X1, 20),
            (20.0, Ipad, X2, 40),
            (29.0, Ipad, X1, 29),
            (29.0, Ipad, X2, 58),
            (40.0, Ipad, X1, 40),
            (40.0, Ipad, X2, 80),
            (76.0, Ipad, X1, 76),
            (76.0, Ipad, X2, 152),
            (83.5, Ipad, X2, 167),
            (1024.0, IosMarketing, X1, 1024),
        ];

        table
            .into_iter()
            .fold(Self::new("ios"), |set, (size, idiom, scale, px)| {
                set.with_slot(Slot::new(size, idiom, scale, format!("icon-{px}.png")))
            })
            .with_manifest(XCODE_MANIFEST)
    }

    /// The `Icon-20@2x.png` naming scheme, plus the universal
    /// `AppIcon-512@2x.png` slot Capacitor projects ship.
    pub fn ios_legacy() -> Self {
        use Idiom::*;
        use Scale::*;

        Self::new("ios-legacy")
            .with_slot(Slot::new(20.0, Iphone, X2, "Icon-20@2x.png"))
            .with_slot(Slot::new(20.0, Iphone, X3, "Icon-20@3x.png"))
            .with_slot(Slot::new(29.0, Iphone, X2, "Icon-29@2x.png"))
            .with_slot(Slot::new(29.0, Iphone, X3, "Icon-29@3x.png"))
            .with_slot(Slot::new(40.0, Iphone, X2, "Icon-40@2x.png"))
            .with_slot(Slot::new(40.0, Iphone, X3, "Icon-40@3x.png"))
            .with_slot(Slot::new(60.0, Iphone, X2, "Icon-60@2x.png"))
            .with_slot(Slot::new(60.0, Iphone, X3, "Icon-60@3x.png"))
            .with_slot(Slot::new(1024.0, IosMarketing, X1, "Icon-1024.png"))
            .with_slot(Slot::new(512.0, Universal, X2, "AppIcon-512@2x.png"))
            .with_manifest(XCODE_MANIFEST)
    }

    /// Looks up a built-in table by its command-line name.
    pub fn platform(name: &str) -> Option<Self> {
        match name {
            "ios" => Some(Self::ios_app_icon()),
            "ios-legacy" => Some(Self::ios_legacy()),
            _ => None,
        }
    }

    /// Names accepted by [`SizeSet::platform`].
    pub const PLATFORMS: [&'static str; 2] = ["ios", "ios-legacy"];

    /// Checks that every slot can be rendered and written.
    ///
    /// Slots may share a filename only if they agree on pixel size.
    pub fn validate(&self) -> Result<()> {
        if self.slots.is_empty() {
            return Err(Error::InvalidSizeSet(format!("{} has no slots", self.name)));
        }

        let mut seen: BTreeMap<&str, u32> = BTreeMap::new();
        for slot in &self.slots {
            let px = slot.pixel_size();
            if px == 0 {
                return Err(Error::InvalidSizeSet(format!(
                    "{} resolves to a 0px bitmap",
                    slot.filename
                )));
            }
            if slot.filename.is_empty() || slot.filename.contains(['/', '\\']) {
                return Err(Error::InvalidSizeSet(format!(
                    "{:?} is not a plain file name",
                    slot.filename
                )));
            }
            if let Some(previous) = seen.insert(&slot.filename, px) {
                if previous != px {
                    return Err(Error::InvalidSizeSet(format!(
                        "{} is used for both {previous}px and {px}px",
                        slot.filename
                    )));
                }
            }
        }
        Ok(())
    }

    /// One request per slot, in table order.
    pub fn requests(&self) -> Vec<RenderRequest> {
        self.slots.iter().map(RenderRequest::from).collect()
    }

    /// Distinct pixel sizes in ascending order.
    pub fn pixel_sizes(&self) -> Vec<u32> {
        let mut sizes: Vec<u32> = self.slots.iter().map(Slot::pixel_size).collect();
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}
