//! Background layer.

use resvg::tiny_skia::ColorU8;

use super::{Layer, RenderContext};
use crate::color::Color;
use crate::icon_spec::Background;

/// Gradient color of row `y` on a `size`-row canvas.
///
/// Row 0 is exactly `top` and row `size - 1` is exactly `bottom`.
pub fn gradient_row(top: Color, bottom: Color, y: u32, size: u32) -> Color {
    Color::lerp(top, bottom, y, size.saturating_sub(1))
}

impl Layer for Background {
    fn paint(&self, ctx: &mut RenderContext) {
        let size = ctx.size;
        let width = size as usize;
        if width == 0 {
            return;
        }
        for (y, row) in ctx.pixmap.pixels_mut().chunks_mut(width).enumerate() {
            let color = match *self {
                Background::Solid { color } => color,
                Background::Gradient { top, bottom } => gradient_row(top, bottom, y as u32, size),
            };
            row.fill(ColorU8::from_rgba(color.r, color.g, color.b, 255).premultiply());
        }
    }
}
