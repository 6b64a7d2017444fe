//! Font resolution and measured text.
//!
//! Layout asks a [`FontProvider`] for the preferred face. When that fails,
//! [`resolve_font`] falls back to the built-in block font instead of
//! erroring, and records why in [`ResolvedFont::Fallback`]. Both outcomes
//! measure and draw text the same way, so callers never special-case the
//! fallback.

mod builtin;

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use fontdue::{Font, FontSettings};
use resvg::tiny_skia::{ColorU8, Pixmap, PixmapPaint, Transform};
use resvg::usvg::fontdb;

use crate::color::Color;

// ============================================================================
// Errors
// ============================================================================

/// Why the preferred font could not be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FontError {
    #[error("none of the font families [{families}] is installed")]
    Unavailable { families: String },

    #[error("font data for {family} could not be read")]
    Unreadable { family: String },

    #[error("font {family} failed to parse: {message}")]
    Parse { family: String, message: String },

    #[error("font {family} has no glyph for {ch:?}")]
    MissingGlyph { family: String, ch: char },
}

// ============================================================================
// Requests and providers
// ============================================================================

/// Weight of a requested face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weight {
    Regular,
    Bold,
}

impl Weight {
    fn to_fontdb(self) -> fontdb::Weight {
        match self {
            Self::Regular => fontdb::Weight::NORMAL,
            Self::Bold => fontdb::Weight::BOLD,
        }
    }
}

/// A request for a face at a specific pixel size.
#[derive(Debug, Clone, Copy)]
pub struct FontRequest<'a> {
    /// Families in preference order.
    pub families: &'a [String],
    pub weight: Weight,
    /// The font size the face will be drawn at.
    pub px: u32,
    /// Side of the canvas the text is laid out on.
    pub canvas_px: u32,
}

/// A face loaded by a provider, with the family it was found under.
#[derive(Clone)]
pub struct LoadedFace {
    pub family: String,
    pub font: Arc<Font>,
}

/// Source of outline fonts.
pub trait FontProvider {
    /// Loads the best face matching `request`.
    fn load(&self, request: &FontRequest<'_>) -> Result<LoadedFace, FontError>;
}

/// A provider with nothing installed; every request uses the built-in font.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinOnly;

impl FontProvider for BuiltinOnly {
    fn load(&self, request: &FontRequest<'_>) -> Result<LoadedFace, FontError> {
        Err(FontError::Unavailable {
            families: request.families.join(", "),
        })
    }
}

/// Fonts discovered through a `fontdb` database.
///
/// Parsed faces are cached by database id, so repeated requests for the
/// same family and weight parse the font file once.
pub struct SystemFonts {
    db: fontdb::Database,
    parsed: Mutex<HashMap<fontdb::ID, Arc<Font>>>,
}

impl SystemFonts {
    /// Creates a provider over the fonts installed on this machine.
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("loaded {} system font faces", db.len());
        Self::from_database(db)
    }

    /// Creates a provider over an existing database.
    pub fn from_database(db: fontdb::Database) -> Self {
        Self {
            db,
            parsed: Mutex::new(HashMap::new()),
        }
    }

    /// Adds a font file (e.g. a bundled brand font) to the database.
    pub fn load_font_file(&mut self, path: &Path) -> std::io::Result<()> {
        self.db.load_font_file(path)
    }

    /// Number of faces known to the database.
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Returns true if no faces are known.
    pub fn is_empty(&self) -> bool {
        self.db.len() == 0
    }

    fn parse(&self, id: fontdb::ID, family: &str) -> Result<Arc<Font>, FontError> {
        if let Ok(cache) = self.parsed.lock() {
            if let Some(font) = cache.get(&id) {
                return Ok(Arc::clone(font));
            }
        }

        let parsed = self
            .db
            .with_face_data(id, |data, index| {
                Font::from_bytes(
                    data,
                    FontSettings {
                        collection_index: index,
                        ..FontSettings::default()
                    },
                )
            })
            .ok_or_else(|| FontError::Unreadable {
                family: family.to_string(),
            })?
            .map_err(|message| FontError::Parse {
                family: family.to_string(),
                message: message.to_string(),
            })?;

        let font = Arc::new(parsed);
        if let Ok(mut cache) = self.parsed.lock() {
            cache.insert(id, Arc::clone(&font));
        }
        Ok(font)
    }
}

impl Default for SystemFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl FontProvider for SystemFonts {
    fn load(&self, request: &FontRequest<'_>) -> Result<LoadedFace, FontError> {
        for family in request.families {
            let families = [fontdb::Family::Name(family)];
            let query = fontdb::Query {
                families: &families,
                weight: request.weight.to_fontdb(),
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            };
            if let Some(id) = self.db.query(&query) {
                let font = self.parse(id, family)?;
                return Ok(LoadedFace {
                    family: family.clone(),
                    font,
                });
            }
        }
        Err(FontError::Unavailable {
            families: request.families.join(", "),
        })
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// The face text is actually laid out with.
#[derive(Clone)]
pub enum ResolvedFont {
    /// A face from the preferred family chain.
    Preferred { family: String, font: Arc<Font> },
    /// The built-in block font, with the reason the preferred one failed.
    Fallback { cause: FontError },
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preferred { family, .. } => {
                f.debug_struct("Preferred").field("family", family).finish()
            }
            Self::Fallback { cause } => f.debug_struct("Fallback").field("cause", cause).finish(),
        }
    }
}

/// Resolves the face for `text`, falling back to the built-in font.
///
/// A preferred face that lacks a glyph for any visible character of `text`
/// also falls back.
pub fn resolve_font<P: FontProvider + ?Sized>(
    provider: &P,
    request: &FontRequest<'_>,
    text: &str,
) -> ResolvedFont {
    let resolved = provider.load(request).and_then(|face| {
        if let Some(ch) = text
            .chars()
            .find(|ch| !ch.is_whitespace() && face.font.lookup_glyph_index(*ch) == 0)
        {
            return Err(FontError::MissingGlyph {
                family: face.family,
                ch,
            });
        }
        Ok(face)
    });

    match resolved {
        Ok(face) => ResolvedFont::Preferred {
            family: face.family,
            font: face.font,
        },
        Err(cause) => {
            log::warn!("{cause}; using built-in font at {}px", request.px);
            ResolvedFont::Fallback { cause }
        }
    }
}

// ============================================================================
// Measured text
// ============================================================================

/// Measured ink box of a string, relative to its pen and baseline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Ink width in whole pixels.
    pub width: u32,
    /// Ink height in whole pixels.
    pub height: u32,
    /// Offset from the pen to the left edge of the ink.
    pub ink_left: f32,
    /// Offset from the baseline to the top of the ink (negative is up).
    pub ink_top: f32,
}

impl ResolvedFont {
    /// Returns true if this is the built-in fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Name of the resolved face.
    pub fn family(&self) -> &str {
        match self {
            Self::Preferred { family, .. } => family,
            Self::Fallback { .. } => "built-in",
        }
    }

    /// Measures the ink box of `text` at `px`.
    pub fn measure(&self, text: &str, px: u32) -> TextMetrics {
        match self {
            Self::Preferred { font, .. } => measure_outline(font, text, px),
            Self::Fallback { .. } => builtin::measure(text, px),
        }
    }

    /// Draws `text` so the top-left of its ink lands on `(x, y)`.
    pub fn draw(&self, pixmap: &mut Pixmap, text: &str, px: u32, x: u32, y: u32, color: Color) {
        match self {
            Self::Preferred { font, .. } => {
                let metrics = measure_outline(font, text, px);
                let pen_x = x as f32 - metrics.ink_left;
                let baseline = y as f32 - metrics.ink_top;
                draw_outline(pixmap, font, text, px, pen_x, baseline, color)
            }
            Self::Fallback { .. } => builtin::draw(pixmap, text, px, x as i32, y as i32, color),
        }
    }
}

fn measure_outline(font: &Font, text: &str, px: u32) -> TextMetrics {
    let px = px as f32;
    let mut pen = 0.0f32;
    let mut ink: Option<(f32, f32, f32, f32)> = None;

    for ch in text.chars() {
        let m = font.metrics(ch, px);
        if m.width > 0 && m.height > 0 {
            let left = pen + m.xmin as f32;
            let right = left + m.width as f32;
            let top = -(m.ymin as f32 + m.height as f32);
            let bottom = -(m.ymin as f32);
            ink = Some(match ink {
                None => (left, top, right, bottom),
                Some((l, t, r, b)) => (l.min(left), t.min(top), r.max(right), b.max(bottom)),
            });
        }
        pen += m.advance_width;
    }

    match ink {
        Some((left, top, right, bottom)) => TextMetrics {
            width: (right - left).ceil() as u32,
            height: (bottom - top).ceil() as u32,
            ink_left: left,
            ink_top: top,
        },
        None => TextMetrics::default(),
    }
}

fn draw_outline(
    pixmap: &mut Pixmap,
    font: &Font,
    text: &str,
    px: u32,
    pen_x: f32,
    baseline: f32,
    color: Color,
) {
    let px = px as f32;
    let mut pen = pen_x;

    for ch in text.chars() {
        let (m, coverage) = font.rasterize(ch, px);
        if m.width > 0 && m.height > 0 {
            if let Some(glyph) = coverage_pixmap(&coverage, m.width as u32, m.height as u32, color)
            {
                let gx = (pen + m.xmin as f32).round() as i32;
                let gy = (baseline - m.ymin as f32 - m.height as f32).round() as i32;
                pixmap.draw_pixmap(
                    gx,
                    gy,
                    glyph.as_ref(),
                    &PixmapPaint::default(),
                    Transform::identity(),
                    None,
                );
            }
        }
        pen += m.advance_width;
    }
}

/// Turns a fontdue coverage bitmap into a premultiplied glyph pixmap.
fn coverage_pixmap(coverage: &[u8], width: u32, height: u32, color: Color) -> Option<Pixmap> {
    let mut glyph = Pixmap::new(width, height)?;
    for (pixel, alpha) in glyph.pixels_mut().iter_mut().zip(coverage) {
        *pixel = ColorU8::from_rgba(color.r, color.g, color.b, *alpha).premultiply();
    }
    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn families() -> Vec<String> {
        vec!["Definitely Not A Font".to_string()]
    }

    #[test]
    fn builtin_only_always_falls_back() {
        let families = families();
        let request = FontRequest {
            families: &families,
            weight: Weight::Bold,
            px: 24,
            canvas_px: 40,
        };
        let resolved = resolve_font(&BuiltinOnly, &request, "SV");
        assert!(resolved.is_fallback());
        assert_eq!(resolved.family(), "built-in");
        let ResolvedFont::Fallback { cause } = resolved else {
            unreachable!();
        };
        assert_eq!(
            cause,
            FontError::Unavailable {
                families: "Definitely Not A Font".to_string()
            }
        );
    }

    #[test]
    fn unknown_family_falls_back_on_empty_database() {
        let fonts = SystemFonts::from_database(fontdb::Database::new());
        assert!(fonts.is_empty());
        let families = families();
        let request = FontRequest {
            families: &families,
            weight: Weight::Regular,
            px: 12,
            canvas_px: 100,
        };
        assert!(resolve_font(&fonts, &request, "Solar").is_fallback());
    }

    #[test]
    fn system_fonts_measure_either_way() {
        // Passes with or without fonts installed: whichever face resolves,
        // the measured box must be non-empty for visible text.
        let fonts = SystemFonts::new();
        let families = vec!["DejaVu Sans".to_string(), "Helvetica".to_string()];
        let request = FontRequest {
            families: &families,
            weight: Weight::Bold,
            px: 32,
            canvas_px: 120,
        };
        let resolved = resolve_font(&fonts, &request, "Solar");
        let metrics = resolved.measure("Solar", 32);
        assert!(metrics.width > 0);
        assert!(metrics.height > 0);
        assert!(metrics.height <= 64);
    }

    #[test]
    fn draw_places_ink_at_requested_corner() {
        let font = ResolvedFont::Fallback {
            cause: FontError::Unavailable {
                families: String::new(),
            },
        };
        let mut pixmap = Pixmap::new(40, 40).unwrap();
        font.draw(&mut pixmap, "L", 20, 5, 6, Color::BLACK);
        // "L" has ink in its top-left cell.
        assert_eq!(pixmap.pixel(5, 6).unwrap().alpha(), 255);
        assert_eq!(pixmap.pixel(4, 6).unwrap().alpha(), 0);
        assert_eq!(pixmap.pixel(5, 5).unwrap().alpha(), 0);
    }
}
