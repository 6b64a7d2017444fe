//! Layer infrastructure for icon rendering.
//!
//! A [`LayoutPlan`] is painted as a stack of layers, bottom to top:
//!
//! ```text
//! ┌────────────┐
//! │ Background │ ◄── solid fill or per-scanline gradient
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │   Motifs   │ ◄── one layer per primitive, in motif order
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │    Text    │ ◄── one layer per run, top to bottom
//! └────────────┘
//! ```
//!
//! Each piece of the plan implements [`Layer`] and paints itself into the
//! shared [`RenderContext`]. No layer reads another's output, so the stack
//! order is the only coupling.

mod background;
mod motif;
mod text;

pub use background::gradient_row;

use std::iter;

use resvg::tiny_skia::Pixmap;

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::layout::LayoutPlan;

// ============================================================================
// Render Context
// ============================================================================

/// Surface shared by every layer of one render.
pub struct RenderContext {
    /// Premultiplied RGBA working surface.
    pub pixmap: Pixmap,
    /// Canvas side length.
    pub size: u32,
}

impl RenderContext {
    /// Allocates a transparent `size x size` surface.
    pub fn new(size: u32) -> Result<Self> {
        let pixmap = Pixmap::new(size, size).ok_or(Error::CanvasSize(size))?;
        Ok(Self { pixmap, size })
    }
}

// ============================================================================
// Layer Trait
// ============================================================================

/// Something that paints itself onto the canvas.
pub trait Layer {
    fn paint(&self, ctx: &mut RenderContext);
}

/// The layers of `plan` in paint order.
pub fn layers(plan: &LayoutPlan) -> impl Iterator<Item = &dyn Layer> {
    iter::once(&plan.background as &dyn Layer)
        .chain(plan.primitives.iter().map(|p| p as &dyn Layer))
        .chain(plan.runs.iter().map(|r| r as &dyn Layer))
}

// ============================================================================
// Renderer
// ============================================================================

/// Paints layout plans into canvases.
///
/// Output depends only on the plan: rendering the same plan twice yields
/// byte-identical canvases.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders `plan` onto a fresh `plan.size` canvas.
    pub fn render(&self, plan: &LayoutPlan) -> Result<Canvas> {
        let mut ctx = RenderContext::new(plan.size)?;
        for layer in layers(plan) {
            layer.paint(&mut ctx);
        }
        Ok(Canvas::from_pixmap(&ctx.pixmap))
    }
}
