//! Motif geometry.
//!
//! Turns the fractional motif parameters of an [`IconSpec`](crate::IconSpec)
//! into pixel-space [`Primitive`]s for one canvas size. Every point is
//! clamped into the canvas.

use std::f32::consts::TAU;

use super::{Ink, Primitive};
use crate::color::Color;
use crate::geometry::{Point, RectPx};
use crate::icon_spec::{BoltMotif, DiscMotif, DotMotif, GridMotif, Motif, RaysMotif, RingMotif};

/// Resolves one motif at `size`. `Motif::None` yields nothing.
pub(crate) fn resolve_motif(motif: &Motif, size: u32) -> Vec<Primitive> {
    match motif {
        Motif::None => Vec::new(),
        Motif::Ring(ring) => vec![ring_primitive(ring, size)],
        Motif::Disc(disc) => disc_primitives(disc, size),
        Motif::Grid(grid) => grid_primitives(grid, size),
        Motif::Bolt(bolt) => vec![bolt_primitive(bolt, size)],
        Motif::Rays(rays) => rays_primitives(rays, size),
        Motif::Dot(dot) => vec![dot_primitive(dot, size)],
    }
}

fn canvas_center(size: u32) -> Point {
    let c = (size / 2) as f32;
    Point::new(c, c)
}

fn frac(value: f32, size: u32) -> f32 {
    value * size as f32
}

fn ring_primitive(ring: &RingMotif, size: u32) -> Primitive {
    Primitive::Ring {
        center: canvas_center(size),
        radius: frac(ring.radius, size),
        width: frac(ring.width, size).max(1.0),
        ink: Ink::opaque(ring.color),
    }
}

fn disc_primitives(disc: &DiscMotif, size: u32) -> Vec<Primitive> {
    let center = canvas_center(size);
    let radius = frac(disc.radius, size);
    let mut out = Vec::with_capacity(2);

    if let Some(shadow) = &disc.shadow {
        let offset = frac(shadow.offset, size);
        out.push(Primitive::Circle {
            center: Point::new(center.x + offset, center.y + offset).clamped(size),
            radius,
            ink: Ink::new(shadow.color, shadow.opacity),
        });
    }
    out.push(Primitive::Circle {
        center,
        radius,
        ink: Ink::opaque(disc.color),
    });
    out
}

/// Cell color for `row`, counting from the top of a `cells`-row grid.
///
/// Rows never get darker going up; a negative falloff is treated as 0.
pub(crate) fn grid_row_color(grid: &GridMotif, row: u32) -> Color {
    let cells = grid.cells.max(1);
    let rows_above_bottom = cells.saturating_sub(1).saturating_sub(row);
    let falloff = grid.falloff.max(0.0);
    grid.color.scaled(1.0 + rows_above_bottom as f32 * falloff)
}

/// Cells per row that still get at least a 1px pitch, never more than
/// the canvas is wide.
fn grid_cells(grid: &GridMotif, side: u32, size: u32) -> u32 {
    grid.cells.clamp(1, side.min(size).max(1))
}

fn grid_primitives(grid: &GridMotif, size: u32) -> Vec<Primitive> {
    let side = frac(grid.size, size) as u32;
    let cells = grid_cells(grid, side, size);
    let cell = side / cells;
    if cell == 0 {
        return Vec::new();
    }
    let gap = frac(grid.gap, size) as u32;
    let inner = cell.saturating_sub(gap.saturating_mul(2)).max(1);
    let start = u64::from((size / 2).saturating_sub(side / 2));
    let offset = |index: u32| start + u64::from(index) * u64::from(cell) + u64::from(gap);

    let mut out = Vec::with_capacity(cells as usize * cells as usize);
    for row in 0..cells {
        let Some(y) = u32::try_from(offset(row)).ok().filter(|y| *y < size) else {
            break;
        };
        let color = grid_row_color(grid, row);
        for col in 0..cells {
            let Some(x) = u32::try_from(offset(col)).ok().filter(|x| *x < size) else {
                break;
            };
            out.push(Primitive::Rect {
                rect: RectPx::new(x, y, inner.min(size - x), inner.min(size - y)),
                ink: Ink::opaque(color),
            });
        }
    }
    out
}

/// Bolt outline on a unit-height box centered at the origin.
fn bolt_outline() -> [(f32, f32); 7] {
    let w = 2.0 / 9.0;
    [
        (0.0, -0.5),
        (w, -w),
        (0.0, w / 2.0),
        (w, 0.5),
        (-w / 4.0, w),
        (0.0, -w / 2.0),
        (-w, -0.5),
    ]
}

fn bolt_primitive(bolt: &BoltMotif, size: u32) -> Primitive {
    let center = canvas_center(size);
    let scale = frac(bolt.size, size);
    let points = bolt_outline()
        .iter()
        .map(|(x, y)| Point::new(center.x + x * scale, center.y + y * scale).clamped(size))
        .collect();
    Primitive::Polygon {
        points,
        ink: Ink::opaque(bolt.color),
    }
}

fn rays_primitives(rays: &RaysMotif, size: u32) -> Vec<Primitive> {
    let center = Point::new(frac(rays.center_x, size), frac(rays.center_y, size)).clamped(size);
    let radius = frac(rays.radius, size);
    let inner = radius + frac(rays.offset, size);
    let outer = inner + frac(rays.length, size);
    let width = frac(rays.width, size).max(1.0);
    let ink = Ink::opaque(rays.color);
    // One ray per pixel of the outer circle at most; past that they overlap.
    let count = rays
        .count
        .min((TAU * outer).max(1.0) as u32)
        .min(size.saturating_mul(4));

    let mut out = Vec::with_capacity(count as usize + 1);
    out.push(Primitive::Circle {
        center,
        radius,
        ink,
    });
    for i in 0..count {
        let angle = TAU * i as f32 / count as f32;
        let (sin, cos) = angle.sin_cos();
        out.push(Primitive::Line {
            from: Point::new(center.x + cos * inner, center.y + sin * inner).clamped(size),
            to: Point::new(center.x + cos * outer, center.y + sin * outer).clamped(size),
            width,
            ink,
        });
    }
    out
}

fn dot_primitive(dot: &DotMotif, size: u32) -> Primitive {
    let center = canvas_center(size);
    Primitive::Circle {
        center: Point::new(center.x, center.y + frac(dot.offset, size)).clamped(size),
        radius: frac(dot.radius, size),
        ink: Ink::opaque(dot.color),
    }
}
