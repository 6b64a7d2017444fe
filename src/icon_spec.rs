//! Declarative brand description consumed by the layout engine.
//!
//! An [`IconSpec`] captures everything needed to draw an icon at any size:
//! the text lines of the wordmark, the compact monogram used at small
//! sizes, the background paint, and a stack of geometric motifs. It is
//! plain data and serializes to JSON so a brand can live in a config file.
//!
//! # Example
//!
//! ```
//! use appicon_renderer::{Color, IconSpec, Role, TextLine};
//!
//! let spec = IconSpec::new("SV", Color::rgb(30, 64, 175))
//!     .with_line(TextLine::new("Solar", Role::Primary, Color::BLACK))
//!     .with_threshold(58);
//!
//! let json = spec.to_json().unwrap();
//! let restored = IconSpec::from_json(&json).unwrap();
//! assert_eq!(restored, spec);
//! ```
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "lines": [{ "text": "Solar", "role": "primary", "color": "#111827" }],
//!   "background": { "kind": "solid", "color": "#ffffff" },
//!   "motifs": [{ "kind": "ring", "radius": 0.46, "width": 0.02, "color": "#fbbf24" }],
//!   "monogram": "SV",
//!   "monogramColor": "#1e40af",
//!   "monogramThreshold": 58
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Color;

// ============================================================================
// Text
// ============================================================================

/// Typographic role of a wordmark line. Drives its font size fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Role {
    Primary,
    Secondary,
    Caption,
}

/// One line of the stacked wordmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct TextLine {
    pub text: String,
    pub role: Role,
    pub color: Color,
}

impl TextLine {
    pub fn new(text: impl Into<String>, role: Role, color: Color) -> Self {
        Self {
            text: text.into(),
            role,
            color,
        }
    }
}

/// Font chain and size fractions used by the layout resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Typography {
    /// Preferred font families, tried in order before the built-in font.
    pub families: Vec<String>,
    /// Font size of primary lines as a fraction of the canvas.
    pub primary: f32,
    /// Font size of secondary lines as a fraction of the canvas.
    pub secondary: f32,
    /// Font size of caption lines as a fraction of the canvas.
    pub caption: f32,
    /// Font size of the monogram as a fraction of the canvas.
    pub monogram: f32,
    /// Gap between stacked lines as a fraction of the canvas.
    pub gap: f32,
    /// Absolute floor for every resolved font size.
    pub min_font_px: u32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            families: vec![
                "Helvetica".to_string(),
                "Arial".to_string(),
                "DejaVu Sans".to_string(),
            ],
            primary: 0.28,
            secondary: 0.28,
            caption: 0.12,
            monogram: 0.6,
            gap: 0.03,
            min_font_px: 8,
        }
    }
}

impl Typography {
    /// Returns the size fraction for a line role.
    pub fn fraction(&self, role: Role) -> f32 {
        match role {
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
            Role::Caption => self.caption,
        }
    }

    /// Resolves a fraction of `size` to whole pixels, floored at `min_font_px`.
    pub fn font_px(&self, fraction: f32, size: u32) -> u32 {
        ((fraction * size as f32) as u32).max(self.min_font_px)
    }
}

// ============================================================================
// Background
// ============================================================================

/// Paint used to fill the whole canvas before motifs and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Background {
    Solid { color: Color },
    /// Vertical gradient from `top` (first row) to `bottom` (last row).
    Gradient { top: Color, bottom: Color },
}

impl Default for Background {
    fn default() -> Self {
        Self::Solid {
            color: Color::WHITE,
        }
    }
}

// ============================================================================
// Motifs
// ============================================================================

/// A geometric brand mark. Every length is a fraction of the canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Motif {
    None,
    Ring(RingMotif),
    Disc(DiscMotif),
    Grid(GridMotif),
    Bolt(BoltMotif),
    Rays(RaysMotif),
    Dot(DotMotif),
}

/// Stroked circle centered on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RingMotif {
    pub radius: f32,
    pub width: f32,
    pub color: Color,
}

impl Default for RingMotif {
    fn default() -> Self {
        Self {
            radius: 0.46,
            width: 0.02,
            color: Color::rgb(251, 191, 36),
        }
    }
}

/// Filled circle centered on the canvas, optionally with a drop shadow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct DiscMotif {
    pub radius: f32,
    pub color: Color,
    pub shadow: Option<Shadow>,
}

impl Default for DiscMotif {
    fn default() -> Self {
        Self {
            radius: 0.42,
            color: Color::rgb(30, 64, 175),
            shadow: None,
        }
    }
}

/// Offset copy of a shape painted underneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Shadow {
    /// Down-right offset as a fraction of the canvas.
    pub offset: f32,
    pub color: Color,
    /// Opacity in 0.0-1.0.
    pub opacity: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            offset: 0.02,
            color: Color::BLACK,
            opacity: 0.2,
        }
    }
}

/// `cells x cells` panel centered on the canvas, brightest row on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct GridMotif {
    pub cells: u32,
    /// Side length of the whole grid.
    pub size: f32,
    /// Inset applied to every side of each cell.
    pub gap: f32,
    /// Color of the bottom row.
    pub color: Color,
    /// Extra brightness added per row above the bottom one.
    pub falloff: f32,
}

impl Default for GridMotif {
    fn default() -> Self {
        Self {
            cells: 4,
            size: 0.35,
            gap: 0.01,
            color: Color::rgb(59, 130, 246),
            falloff: 0.15,
        }
    }
}

/// Zig-zag lightning bolt centered on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct BoltMotif {
    /// Height of the bolt.
    pub size: f32,
    pub color: Color,
}

impl Default for BoltMotif {
    fn default() -> Self {
        Self {
            size: 0.18,
            color: Color::rgb(251, 191, 36),
        }
    }
}

/// Sun disc with `count` rays at even angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RaysMotif {
    pub count: u32,
    pub center_x: f32,
    pub center_y: f32,
    /// Radius of the central disc.
    pub radius: f32,
    /// Distance between the disc edge and the start of each ray.
    pub offset: f32,
    pub length: f32,
    pub width: f32,
    pub color: Color,
}

impl Default for RaysMotif {
    fn default() -> Self {
        Self {
            count: 8,
            center_x: 0.5,
            center_y: 0.25,
            radius: 0.08,
            offset: 0.02,
            length: 0.05,
            width: 0.015,
            color: Color::rgb(245, 158, 11),
        }
    }
}

/// Small accent circle below the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct DotMotif {
    pub radius: f32,
    /// Distance below the canvas center.
    pub offset: f32,
    pub color: Color,
}

impl Default for DotMotif {
    fn default() -> Self {
        Self {
            radius: 0.05,
            offset: 0.25,
            color: Color::rgb(251, 191, 36),
        }
    }
}

// ============================================================================
// IconSpec
// ============================================================================

fn default_threshold() -> u32 {
    58
}

/// Immutable brand description for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct IconSpec {
    /// Wordmark lines, top to bottom.
    #[serde(default)]
    pub lines: Vec<TextLine>,

    #[serde(default)]
    pub background: Background,

    /// Motifs painted in order, between the background and the text.
    #[serde(default)]
    pub motifs: Vec<Motif>,

    /// Compact mark used below the threshold. May be empty.
    #[serde(default)]
    pub monogram: String,

    pub monogram_color: Color,

    /// Canvas sizes strictly below this use the monogram variant.
    #[serde(default = "default_threshold")]
    pub monogram_threshold: u32,

    #[serde(default)]
    pub typography: Typography,
}

impl IconSpec {
    /// Creates a spec with a monogram, a white background and no lines.
    pub fn new(monogram: impl Into<String>, monogram_color: Color) -> Self {
        Self {
            lines: Vec::new(),
            background: Background::default(),
            motifs: Vec::new(),
            monogram: monogram.into(),
            monogram_color,
            monogram_threshold: default_threshold(),
            typography: Typography::default(),
        }
    }

    /// Appends a wordmark line.
    pub fn with_line(mut self, line: TextLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Sets the background paint.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Appends a motif to the stack.
    pub fn with_motif(mut self, motif: Motif) -> Self {
        self.motifs.push(motif);
        self
    }

    /// Sets the monogram threshold.
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.monogram_threshold = threshold;
        self
    }

    /// Sets the typography.
    pub fn with_typography(mut self, typography: Typography) -> Self {
        self.typography = typography;
        self
    }

    /// Serializes the spec to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the spec to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a spec from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the JSON schema of the spec format.
    #[cfg(feature = "jsonschema")]
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(IconSpec)
    }
}

// ============================================================================
// Presets
// ============================================================================

const BLUE_800: Color = Color::rgb(30, 64, 175);
const BLUE_600: Color = Color::rgb(37, 99, 235);
const BLUE_500: Color = Color::rgb(59, 130, 246);
const GRAY_900: Color = Color::rgb(17, 24, 39);
const GRAY_700: Color = Color::rgb(55, 65, 81);
const AMBER_400: Color = Color::rgb(251, 191, 36);
const AMBER_500: Color = Color::rgb(245, 158, 11);

impl IconSpec {
    /// Three-line "Solar / Veyo / Operasyon" wordmark with an "SV"
    /// monogram below 58px.
    pub fn brand_text() -> Self {
        Self::new("SV", BLUE_800)
            .with_line(TextLine::new("Solar", Role::Primary, GRAY_900))
            .with_line(TextLine::new("Veyo", Role::Primary, BLUE_800))
            .with_line(TextLine::new("Operasyon", Role::Caption, GRAY_700))
            .with_threshold(58)
    }

    /// Textless solar-panel badge: blue disc, 4x4 panel grid, lightning
    /// bolt and an amber outer ring.
    pub fn solar_epc() -> Self {
        Self::new("", BLUE_800)
            .with_threshold(0)
            .with_motif(Motif::Disc(DiscMotif::default()))
            .with_motif(Motif::Grid(GridMotif::default()))
            .with_motif(Motif::Bolt(BoltMotif::default()))
            .with_motif(Motif::Ring(RingMotif::default()))
    }

    /// Gradient background, white disc with a soft shadow, a single "S"
    /// and an amber accent dot. Always drawn as a monogram.
    pub fn pro_monogram() -> Self {
        Self::new("S", BLUE_800)
            .with_threshold(u32::MAX)
            .with_background(Background::Gradient {
                top: BLUE_800,
                bottom: BLUE_500,
            })
            .with_motif(Motif::Disc(DiscMotif {
                radius: 0.35,
                color: Color::WHITE,
                shadow: Some(Shadow::default()),
            }))
            .with_motif(Motif::Dot(DotMotif {
                radius: 0.05,
                offset: 0.25,
                color: AMBER_400,
            }))
            .with_typography(Typography {
                monogram: 0.5,
                ..Typography::default()
            })
    }

    /// Sun with rays above a white "SolarVeyo" wordmark on a blue gradient.
    pub fn sun_badge() -> Self {
        Self::new("S", Color::WHITE)
            .with_threshold(40)
            .with_background(Background::Gradient {
                top: BLUE_800,
                bottom: BLUE_600,
            })
            .with_motif(Motif::Rays(RaysMotif {
                color: AMBER_500,
                ..RaysMotif::default()
            }))
            .with_line(TextLine::new("SolarVeyo", Role::Primary, Color::WHITE))
            .with_line(TextLine::new("Operasyon", Role::Caption, Color::WHITE))
            .with_typography(Typography {
                primary: 0.14,
                caption: 0.08,
                ..Typography::default()
            })
    }

    /// Looks up a preset by its command-line name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "brand-text" => Some(Self::brand_text()),
            "solar-epc" => Some(Self::solar_epc()),
            "pro-monogram" => Some(Self::pro_monogram()),
            "sun-badge" => Some(Self::sun_badge()),
            _ => None,
        }
    }

    /// Names accepted by [`IconSpec::preset`].
    pub const PRESETS: [&'static str; 4] = ["brand-text", "solar-epc", "pro-monogram", "sun-badge"];
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_serialization_roundtrip() {
        let spec = IconSpec::solar_epc();
        let json = spec.to_json().unwrap();
        let restored = IconSpec::from_json(&json).unwrap();
        assert_eq!(restored, spec);
    }

    #[test]
    fn spec_json_format() {
        let json = IconSpec::brand_text().to_json_pretty().unwrap();
        assert!(json.contains("\"monogramThreshold\": 58"));
        assert!(json.contains("\"monogramColor\": \"#1e40af\""));
        assert!(json.contains("\"role\": \"caption\""));
        assert!(json.contains("\"minFontPx\": 8"));
    }

    #[test]
    fn minimal_spec_uses_defaults() {
        let spec = IconSpec::from_json(r##"{ "monogramColor": "#2563eb" }"##).unwrap();
        assert!(spec.lines.is_empty());
        assert!(spec.motifs.is_empty());
        assert_eq!(spec.monogram_threshold, 58);
        assert_eq!(spec.background, Background::Solid { color: Color::WHITE });
        assert_eq!(spec.typography, Typography::default());
    }

    #[test]
    fn motif_parameters_default_per_field() {
        let spec = IconSpec::from_json(
            r##"{
                "monogramColor": "#000000",
                "motifs": [
                    { "kind": "grid", "cells": 3 },
                    { "kind": "ring" },
                    { "kind": "none" }
                ]
            }"##,
        )
        .unwrap();

        let Motif::Grid(grid) = &spec.motifs[0] else {
            panic!("expected grid, got {:?}", spec.motifs[0]);
        };
        assert_eq!(grid.cells, 3);
        assert_eq!(grid.size, 0.35);
        assert_eq!(spec.motifs[1], Motif::Ring(RingMotif::default()));
        assert_eq!(spec.motifs[2], Motif::None);
    }

    #[test]
    fn gradient_background_json() {
        let spec = IconSpec::pro_monogram();
        let json = spec.to_json().unwrap();
        assert!(json.contains(r##""background":{"kind":"gradient","top":"#1e40af","bottom":"#3b82f6"}"##));
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = IconSpec::from_json(r##"{ "monogramColor": "blue" }"##).unwrap_err();
        assert!(err.to_string().contains("invalid color"));
    }

    #[test]
    fn font_px_floors_at_minimum() {
        let typography = Typography::default();
        assert_eq!(typography.font_px(0.28, 120), 33);
        assert_eq!(typography.font_px(0.12, 40), 8);
        assert_eq!(typography.font_px(typography.fraction(Role::Caption), 120), 14);
    }

    #[test]
    fn presets_resolve_by_name() {
        for name in IconSpec::PRESETS {
            assert!(IconSpec::preset(name).is_some(), "missing preset {name}");
        }
        assert!(IconSpec::preset("unknown").is_none());
    }
}
