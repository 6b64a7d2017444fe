//! RGB colors as they appear in icon specs.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

/// An opaque 8-bit sRGB color.
///
/// Serializes as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, palette::rgb::FromHexError> {
        let parsed = Srgb::<u8>::from_str(hex)?;
        Ok(Self::rgb(parsed.red, parsed.green, parsed.blue))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Interpolates from `from` to `to` at `num / den`, per channel.
    ///
    /// Integer division truncates toward `from`, so `num == 0` yields
    /// exactly `from` and `num == den` yields exactly `to`.
    pub fn lerp(from: Self, to: Self, num: u32, den: u32) -> Self {
        if den == 0 {
            return from;
        }
        let num = num.min(den) as i64;
        let den = den as i64;
        let channel = |a: u8, b: u8| -> u8 {
            let a = a as i64;
            let b = b as i64;
            (a + (b - a) * num / den) as u8
        };
        Self::rgb(
            channel(from.r, to.r),
            channel(from.g, to.g),
            channel(from.b, to.b),
        )
    }

    /// Multiplies every channel by `factor`, clamping at 255.
    pub fn scaled(self, factor: f32) -> Self {
        let channel = |c: u8| -> u8 { (c as f32 * factor).clamp(0.0, 255.0) as u8 };
        Self::rgb(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Sum of channels, used to compare brightness of tinted cells.
    pub fn luma_sum(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).map_err(|e| format!("invalid color {value:?}: {e}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parse_and_format() {
        let c = Color::from_hex("#1E40AF").unwrap();
        assert_eq!(c, Color::rgb(30, 64, 175));
        assert_eq!(c.to_hex(), "#1e40af");
        assert_eq!(Color::from_hex("fbbf24").unwrap(), Color::rgb(251, 191, 36));
        assert!(Color::from_hex("#12").is_err());
    }

    #[test]
    fn lerp_hits_both_endpoints() {
        let top = Color::rgb(30, 64, 175);
        let bottom = Color::rgb(59, 130, 246);
        assert_eq!(Color::lerp(top, bottom, 0, 99), top);
        assert_eq!(Color::lerp(top, bottom, 99, 99), bottom);
    }

    #[test]
    fn lerp_is_monotonic_for_falling_channels() {
        let from = Color::rgb(200, 10, 128);
        let to = Color::rgb(10, 200, 128);
        let mut previous = from;
        for step in 0..=37 {
            let c = Color::lerp(from, to, step, 37);
            assert!(c.r <= previous.r);
            assert!(c.g >= previous.g);
            assert_eq!(c.b, 128);
            previous = c;
        }
    }

    #[test]
    fn scaled_clamps() {
        let c = Color::rgb(59, 130, 246).scaled(1.45);
        assert_eq!(c, Color::rgb(85, 188, 255));
    }

    #[test]
    fn serde_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(255, 0, 16));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
