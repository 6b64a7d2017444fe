//! Size-dependent layout.
//!
//! [`LayoutResolver`] turns an [`IconSpec`] and a canvas size into a
//! [`LayoutPlan`]: which variant to draw, where each text run sits, what
//! the background is and which primitives the motifs expand to. A plan is
//! pure data; rendering it involves no further decisions.
//!
//! Below the icon's monogram threshold the compact monogram is drawn. At
//! or above it the wordmark lines are stacked and centered. If the stack
//! does not fit the canvas the resolver degrades to the monogram and
//! records a [`LayoutOverflow`] on the plan.

mod motif;

#[cfg(test)]
pub(crate) use motif::grid_row_color;

use std::fmt;

use crate::color::Color;
use crate::font::{FontProvider, FontRequest, ResolvedFont, TextMetrics, Weight, resolve_font};
use crate::geometry::{Point, RectPx, centered};
use crate::icon_spec::{Background, IconSpec, Role, TextLine};

// ============================================================================
// Plan
// ============================================================================

/// Which text treatment a plan draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// The compact monogram alone.
    Monogram,
    /// The stacked multi-line wordmark.
    Lockup,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Monogram => "monogram",
            Self::Lockup => "lockup",
        })
    }
}

/// Records that a lockup did not fit and the monogram was drawn instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOverflow {
    /// Canvas side length.
    pub size: u32,
    /// Extent the lockup needed along its tightest axis.
    pub required: u32,
}

/// Color plus coverage of a painted primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ink {
    pub color: Color,
    pub alpha: u8,
}

impl Ink {
    pub fn opaque(color: Color) -> Self {
        Self { color, alpha: 255 }
    }

    /// Creates ink with `opacity` in 0.0-1.0.
    pub fn new(color: Color, opacity: f32) -> Self {
        Self {
            color,
            alpha: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }
}

/// A resolved geometric shape in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Circle {
        center: Point,
        radius: f32,
        ink: Ink,
    },
    /// Stroked circle; `width` is centered on `radius`.
    Ring {
        center: Point,
        radius: f32,
        width: f32,
        ink: Ink,
    },
    Rect {
        rect: RectPx,
        ink: Ink,
    },
    /// Closed filled polygon.
    Polygon {
        points: Vec<Point>,
        ink: Ink,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        ink: Ink,
    },
}

/// A positioned piece of text.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub text: String,
    /// Role of the wordmark line, `None` for the monogram.
    pub role: Option<Role>,
    pub color: Color,
    pub font_px: u32,
    pub font: ResolvedFont,
    /// Ink box inside the canvas.
    pub bounds: RectPx,
    /// Baseline y in canvas pixels. The built-in font sits on it, so
    /// there it equals `bounds.bottom()`; outline descenders hang below.
    pub baseline: f32,
}

/// Everything needed to paint one icon size.
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    pub size: u32,
    pub variant: Variant,
    /// Text runs, top to bottom.
    pub runs: Vec<TextRun>,
    pub background: Background,
    /// Motif primitives in paint order.
    pub primitives: Vec<Primitive>,
    /// Set when a lockup was requested but did not fit.
    pub overflow: Option<LayoutOverflow>,
}

impl LayoutPlan {
    /// Vertical extent from the top of the first run to the bottom of the last.
    pub fn stack_height(&self) -> u32 {
        match (self.runs.first(), self.runs.last()) {
            (Some(first), Some(last)) => last.bounds.bottom() - first.bounds.y,
            _ => 0,
        }
    }

    /// Returns true if any run is drawn with the built-in font.
    pub fn uses_fallback_font(&self) -> bool {
        self.runs.iter().any(|run| run.font.is_fallback())
    }
}

// ============================================================================
// Resolver
// ============================================================================

fn weight_for(role: Role) -> Weight {
    match role {
        Role::Primary | Role::Secondary => Weight::Bold,
        Role::Caption => Weight::Regular,
    }
}

struct MeasuredLine<'s> {
    line: &'s TextLine,
    px: u32,
    font: ResolvedFont,
    metrics: TextMetrics,
}

/// Resolves layout plans against a font provider.
pub struct LayoutResolver<'f, P: ?Sized> {
    fonts: &'f P,
}

impl<'f, P: FontProvider + ?Sized> LayoutResolver<'f, P> {
    pub fn new(fonts: &'f P) -> Self {
        Self { fonts }
    }

    /// Resolves the plan for a `size x size` canvas. Never fails: font
    /// problems fall back to the built-in font and an oversized lockup
    /// degrades to the monogram.
    pub fn resolve(&self, spec: &IconSpec, size: u32) -> LayoutPlan {
        let primitives = spec
            .motifs
            .iter()
            .flat_map(|m| motif::resolve_motif(m, size))
            .collect();

        let (variant, runs, overflow) = if size < spec.monogram_threshold {
            (Variant::Monogram, self.monogram(spec, size), None)
        } else {
            match self.lockup(spec, size) {
                Ok(runs) => (Variant::Lockup, runs, None),
                Err(overflow) => {
                    log::debug!(
                        "lockup needs {}px on a {}px canvas; drawing monogram",
                        overflow.required,
                        size
                    );
                    (Variant::Monogram, self.monogram(spec, size), Some(overflow))
                }
            }
        };

        log::debug!("{size}px: {variant} with {} runs", runs.len());
        LayoutPlan {
            size,
            variant,
            runs,
            background: spec.background,
            primitives,
            overflow,
        }
    }

    fn lockup(&self, spec: &IconSpec, size: u32) -> Result<Vec<TextRun>, LayoutOverflow> {
        let typography = &spec.typography;
        let measured: Vec<MeasuredLine<'_>> = spec
            .lines
            .iter()
            .filter(|line| !line.text.is_empty())
            .map(|line| {
                let px = typography.font_px(typography.fraction(line.role), size);
                let request = FontRequest {
                    families: &typography.families,
                    weight: weight_for(line.role),
                    px,
                    canvas_px: size,
                };
                let font = resolve_font(self.fonts, &request, &line.text);
                let metrics = font.measure(&line.text, px);
                MeasuredLine {
                    line,
                    px,
                    font,
                    metrics,
                }
            })
            .collect();

        let gap = ((typography.gap * size as f32) as u32).max(2);
        let gaps = gap * measured.len().saturating_sub(1) as u32;
        let total = measured.iter().map(|m| m.metrics.height).sum::<u32>() + gaps;
        let widest = measured.iter().map(|m| m.metrics.width).max().unwrap_or(0);

        if total > size || widest > size {
            return Err(LayoutOverflow {
                size,
                required: total.max(widest),
            });
        }

        let mut y = centered(size, total);
        let mut runs = Vec::with_capacity(measured.len());
        for m in measured {
            let bounds = RectPx::new(
                centered(size, m.metrics.width),
                y,
                m.metrics.width,
                m.metrics.height,
            );
            runs.push(TextRun {
                text: m.line.text.clone(),
                role: Some(m.line.role),
                color: m.line.color,
                font_px: m.px,
                baseline: bounds.y as f32 - m.metrics.ink_top,
                font: m.font,
                bounds,
            });
            y += m.metrics.height + gap;
        }
        Ok(runs)
    }

    fn monogram(&self, spec: &IconSpec, size: u32) -> Vec<TextRun> {
        if spec.monogram.is_empty() {
            return Vec::new();
        }

        let typography = &spec.typography;
        let mut px = typography.font_px(typography.monogram, size);
        let request = FontRequest {
            families: &typography.families,
            weight: Weight::Bold,
            px,
            canvas_px: size,
        };
        let font = resolve_font(self.fonts, &request, &spec.monogram);
        let mut metrics = font.measure(&spec.monogram, px);
        while (metrics.width > size || metrics.height > size) && px > typography.min_font_px {
            px -= 1;
            metrics = font.measure(&spec.monogram, px);
        }

        let width = metrics.width.min(size);
        let height = metrics.height.min(size);
        let bounds = RectPx::new(centered(size, width), centered(size, height), width, height);
        vec![TextRun {
            text: spec.monogram.clone(),
            role: None,
            color: spec.monogram_color,
            font_px: px,
            baseline: bounds.y as f32 - metrics.ink_top,
            font,
            bounds,
        }]
    }
}
