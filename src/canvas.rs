//! Rendered icon bitmaps.
//!
//! A [`Canvas`] is the opaque RGB result of rendering one [`LayoutPlan`](crate::LayoutPlan).
//! It is converted out of tiny-skia's premultiplied RGBA pixmap once, after
//! every layer has been painted.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use resvg::tiny_skia::Pixmap;

use crate::color::Color;

/// A `size x size` RGB bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Converts a painted pixmap, compositing any remaining transparency
    /// over black.
    pub fn from_pixmap(pixmap: &Pixmap) -> Self {
        let mut image = RgbImage::new(pixmap.width(), pixmap.height());
        for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
            // Premultiplied channels are already the color composited over black.
            *dst = Rgb([src.red(), src.green(), src.blue()]);
        }
        Self { image }
    }

    /// Creates a canvas filled with one color.
    pub fn filled(size: u32, color: Color) -> Self {
        Self {
            image: RgbImage::from_pixel(size, size, Rgb([color.r, color.g, color.b])),
        }
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.image.width()
    }

    /// Returns the color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
        Some(Color::rgb(r, g, b))
    }

    /// Raw RGB samples, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Encodes the canvas as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes = Cursor::new(Vec::new());
        self.image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia::Color as SkiaColor;

    #[test]
    fn from_pixmap_keeps_opaque_colors() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        pixmap.fill(SkiaColor::from_rgba8(30, 64, 175, 255));
        let canvas = Canvas::from_pixmap(&pixmap);
        assert_eq!(canvas.size(), 4);
        assert_eq!(canvas.pixel(3, 3), Some(Color::rgb(30, 64, 175)));
        assert_eq!(canvas.pixel(4, 0), None);
        assert_eq!(canvas.as_raw().len(), 4 * 4 * 3);
    }

    #[test]
    fn png_roundtrip_is_lossless() {
        let canvas = Canvas::filled(8, Color::rgb(251, 191, 36));
        let png = canvas.encode_png().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.as_raw(), canvas.as_raw());
    }
}
