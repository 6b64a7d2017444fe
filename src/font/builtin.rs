//! Built-in 5x7 block font.
//!
//! Always available, so text layout never depends on what is installed.
//! Glyphs are uppercase only; lowercase letters draw as their capitals and
//! anything unknown draws as a hollow box.

use resvg::tiny_skia::{Paint, Pixmap, Rect, Transform};

use super::TextMetrics;
use crate::color::Color;

const GLYPH_COLUMNS: u32 = 5;
const GLYPH_ROWS: u32 = 7;
/// Columns of blank space between glyphs.
const TRACKING: u32 = 1;
/// Glyph cells per em; one cell is about `px / EM_UNITS` pixels.
const EM_UNITS: u32 = 10;

/// Rows top to bottom; bit 4 is the leftmost column.
type Glyph = [u8; GLYPH_ROWS as usize];

const TOFU: Glyph = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];
const SPACE: Glyph = [0; GLYPH_ROWS as usize];

fn glyph(ch: char) -> Glyph {
    let upper = ch.to_ascii_uppercase();
    match upper {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        ' ' => SPACE,
        _ => TOFU,
    }
}

/// Offset in pixels of the cell boundary `index` cells from the origin.
///
/// Boundaries are whole pixels and every cell is at least 1px wide, so
/// glyphs fill without anti-aliasing at any size.
fn edge(index: u32, px: u32) -> u32 {
    let px = px.max(EM_UNITS);
    (index * px).div_ceil(EM_UNITS)
}

/// Width of `text` in glyph units.
fn advance_units(text: &str) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        0
    } else {
        count * (GLYPH_COLUMNS + TRACKING) - TRACKING
    }
}

/// Measures `text` at `px`. The box starts at the pen and sits on the
/// baseline.
pub(crate) fn measure(text: &str, px: u32) -> TextMetrics {
    let units = advance_units(text);
    if units == 0 {
        return TextMetrics::default();
    }
    let height = edge(GLYPH_ROWS, px);
    TextMetrics {
        width: edge(units, px),
        height,
        ink_left: 0.0,
        ink_top: -(height as f32),
    }
}

/// Draws `text` with the top-left of its box at `(x, y)`.
pub(crate) fn draw(pixmap: &mut Pixmap, text: &str, px: u32, x: i32, y: i32, color: Color) {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = false;

    for (index, ch) in text.chars().enumerate() {
        let origin = index as u32 * (GLYPH_COLUMNS + TRACKING);
        for (row, bits) in (0u32..).zip(glyph(ch)) {
            let top = y + edge(row, px) as i32;
            let bottom = y + edge(row + 1, px) as i32;
            for col in 0..GLYPH_COLUMNS {
                if bits & (1 << (GLYPH_COLUMNS - 1 - col)) == 0 {
                    continue;
                }
                let left = x + edge(origin + col, px) as i32;
                let right = x + edge(origin + col + 1, px) as i32;
                if let Some(rect) =
                    Rect::from_ltrb(left as f32, top as f32, right as f32, bottom as f32)
                {
                    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_scales_with_px() {
        // "SV": 2 glyphs, 11 units wide, 7 units tall.
        let m = measure("SV", 100);
        assert_eq!(m.width, 110);
        assert_eq!(m.height, 70);
        assert_eq!(m.ink_top, -70.0);
    }

    #[test]
    fn empty_text_has_no_box() {
        assert_eq!(measure("", 40), TextMetrics::default());
    }

    #[test]
    fn lowercase_uses_capitals() {
        assert_eq!(glyph('v'), glyph('V'));
        assert_eq!(glyph('ş'), TOFU);
    }

    #[test]
    fn draw_fills_inside_measured_box() {
        let mut pixmap = Pixmap::new(64, 64).unwrap();
        draw(&mut pixmap, "H", 50, 10, 10, Color::BLACK);

        // Left stem of "H" at column 0, row 3 (the bar row).
        let inside = pixmap.pixel(12, 27).unwrap();
        assert_eq!(inside.alpha(), 255);

        // Above the glyph stays untouched.
        let outside = pixmap.pixel(12, 5).unwrap();
        assert_eq!(outside.alpha(), 0);
    }

    #[test]
    fn small_sizes_keep_every_cell() {
        // "I" is five columns wide; below 10px each column still gets a pixel.
        for px in 1..10 {
            let m = measure("I", px);
            assert_eq!(m.width, 5);
            assert_eq!(m.height, 7);
        }
        assert_eq!(measure("SV", 14).width, 16);
    }

    #[test]
    fn small_text_draws_solid_pixels() {
        for px in [3, 8, 11, 14, 17, 19] {
            let mut pixmap = Pixmap::new(120, 30).unwrap();
            draw(&mut pixmap, "SOLAR EPC", px, 1, 1, Color::WHITE);
            let m = measure("SOLAR EPC", px);
            let mut inked = 0;
            for (i, pixel) in pixmap.pixels().iter().enumerate() {
                let (x, y) = (i as u32 % 120, i as u32 / 120);
                match pixel.alpha() {
                    0 => {}
                    255 => {
                        inked += 1;
                        assert!(x >= 1 && x < 1 + m.width);
                        assert!(y >= 1 && y < 1 + m.height);
                    }
                    other => panic!("partial coverage {other} at {px}px"),
                }
            }
            assert!(inked > 0);
        }
    }
}
