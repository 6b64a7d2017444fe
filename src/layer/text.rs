//! Text layer.

use super::{Layer, RenderContext};
use crate::layout::TextRun;

impl Layer for TextRun {
    fn paint(&self, ctx: &mut RenderContext) {
        self.font.draw(
            &mut ctx.pixmap,
            &self.text,
            self.font_px,
            self.bounds.x,
            self.bounds.y,
            self.color,
        );
    }
}
