//! Pixel-space geometry shared by layout and rendering.

/// A rectangle defined in pixel coordinates.
///
/// Used for measured text boxes and grid cells. The origin is the top-left
/// corner of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the canvas
    pub x: u32,
    /// Y offset from the top edge of the canvas
    pub y: u32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns the center point.
    pub fn center(&self) -> (u32, u32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Returns true if the rectangle lies inside a `size x size` canvas.
    pub fn fits_in(&self, size: u32) -> bool {
        self.right() <= size && self.bottom() <= size
    }
}

/// A point in canvas pixels.
///
/// Fractional so that rays and polygon vertices keep sub-pixel precision
/// for the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamps both coordinates into `[0, size)`.
    pub fn clamped(self, size: u32) -> Self {
        let max = size.saturating_sub(1) as f32;
        Self::new(self.x.clamp(0.0, max), self.y.clamp(0.0, max))
    }
}

/// Offset that centers `length` inside `span`, clamped at zero.
pub fn centered(span: u32, length: u32) -> u32 {
    span.saturating_sub(length) / 2
}
