//! Motif layer: rasterizes resolved primitives with tiny-skia.

use resvg::tiny_skia::{FillRule, Paint, Path, PathBuilder, Rect, Stroke, Transform};

use super::{Layer, RenderContext};
use crate::geometry::Point;
use crate::layout::{Ink, Primitive};

fn paint_for(ink: Ink, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(ink.color.r, ink.color.g, ink.color.b, ink.alpha);
    paint.anti_alias = anti_alias;
    paint
}

fn polyline(points: &[Point], close: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

impl Layer for Primitive {
    fn paint(&self, ctx: &mut RenderContext) {
        let pixmap = &mut ctx.pixmap;
        let transform = Transform::identity();

        match self {
            Primitive::Circle { center, radius, ink } => {
                if let Some(path) = PathBuilder::from_circle(center.x, center.y, *radius) {
                    pixmap.fill_path(&path, &paint_for(*ink, true), FillRule::Winding, transform, None);
                }
            }
            Primitive::Ring {
                center,
                radius,
                width,
                ink,
            } => {
                if let Some(path) = PathBuilder::from_circle(center.x, center.y, *radius) {
                    let stroke = Stroke {
                        width: *width,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &paint_for(*ink, true), &stroke, transform, None);
                }
            }
            Primitive::Rect { rect, ink } => {
                if let Some(r) = Rect::from_xywh(
                    rect.x as f32,
                    rect.y as f32,
                    rect.width as f32,
                    rect.height as f32,
                ) {
                    pixmap.fill_rect(r, &paint_for(*ink, false), transform, None);
                }
            }
            Primitive::Polygon { points, ink } => {
                if let Some(path) = polyline(points, true) {
                    pixmap.fill_path(&path, &paint_for(*ink, true), FillRule::Winding, transform, None);
                }
            }
            Primitive::Line {
                from,
                to,
                width,
                ink,
            } => {
                if let Some(path) = polyline(&[*from, *to], false) {
                    let stroke = Stroke {
                        width: *width,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &paint_for(*ink, true), &stroke, transform, None);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::RectPx;

    fn alpha_at(ctx: &RenderContext, x: u32, y: u32) -> u8 {
        ctx.pixmap.pixel(x, y).unwrap().alpha()
    }

    #[test]
    fn ring_leaves_center_empty() {
        let mut ctx = RenderContext::new(100).unwrap();
        Primitive::Ring {
            center: Point::new(50.0, 50.0),
            radius: 46.0,
            width: 6.0,
            ink: Ink::opaque(Color::BLACK),
        }
        .paint(&mut ctx);
        assert_eq!(alpha_at(&ctx, 50, 50), 0);
        assert_eq!(alpha_at(&ctx, 50, 4), 255);
    }

    #[test]
    fn rect_fills_exact_pixels() {
        let mut ctx = RenderContext::new(10).unwrap();
        Primitive::Rect {
            rect: RectPx::new(2, 3, 4, 5),
            ink: Ink::opaque(Color::WHITE),
        }
        .paint(&mut ctx);
        assert_eq!(alpha_at(&ctx, 2, 3), 255);
        assert_eq!(alpha_at(&ctx, 5, 7), 255);
        assert_eq!(alpha_at(&ctx, 6, 7), 0);
        assert_eq!(alpha_at(&ctx, 5, 8), 0);
    }

    #[test]
    fn translucent_circle_blends() {
        let mut ctx = RenderContext::new(20).unwrap();
        Primitive::Circle {
            center: Point::new(10.0, 10.0),
            radius: 8.0,
            ink: Ink::new(Color::BLACK, 0.2),
        }
        .paint(&mut ctx);
        assert_eq!(alpha_at(&ctx, 10, 10), 51);
    }

    #[test]
    fn degenerate_polygon_is_skipped() {
        let mut ctx = RenderContext::new(10).unwrap();
        Primitive::Polygon {
            points: Vec::new(),
            ink: Ink::opaque(Color::BLACK),
        }
        .paint(&mut ctx);
        assert!(ctx.pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }
}
