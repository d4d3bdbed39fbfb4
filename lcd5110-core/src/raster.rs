//! Rasterization primitives
//!
//! Lines, rectangles, triangles and glyph blits on top of
//! [`Framebuffer::set_pixel`]. Everything clips silently against the panel
//! edges, so callers can compose shapes without bounds checks.

use core::mem::swap;

use crate::font::{self, CHAR_ADVANCE, GLYPH_WIDTH};
use crate::framebuffer::{Color, Framebuffer, HEIGHT, PAGES, WIDTH};

/// A pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

impl Point {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl From<(u8, u8)> for Point {
    fn from((x, y): (u8, u8)) -> Self {
        Self { x, y }
    }
}

impl Framebuffer {
    /// Blit one character with its top-left corner at `(x, y)`
    ///
    /// The five glyph columns replace the eight pixel rows under them and
    /// the column after the glyph is cleared as the inter-character gap.
    /// `Color::Off` draws the glyph inverted.
    ///
    /// Returns the x position of the next character. If the glyph would not
    /// fit (`y >= HEIGHT` or `x + 5 >= WIDTH`) nothing is drawn and `x` is
    /// returned unchanged. Codes without a glyph draw nothing but still
    /// advance.
    pub fn draw_char(&mut self, x: u8, y: u8, code: u8, color: Color) -> u8 {
        if y as usize >= HEIGHT || x as usize + GLYPH_WIDTH >= WIDTH {
            return x;
        }
        // x + 6 <= 84 here
        let next = x + CHAR_ADVANCE as u8;

        let Some(glyph) = font::glyph(code) else {
            return next;
        };

        let (x, y) = (x as usize, y as usize);
        for (i, &column) in glyph.iter().enumerate() {
            self.blit_column(x + i, y, column, color);
        }
        self.blit_column(x + GLYPH_WIDTH, y, 0x00, color);

        next
    }

    /// Replace the 8 rows starting at `y` in column `col` with `bits`
    fn blit_column(&mut self, col: usize, y: usize, bits: u8, color: Color) {
        let bits = if color.is_on() { bits } else { !bits };
        let page = y / 8;
        let shift = y % 8;

        if let Some(cell) = self.cell_mut(page, col) {
            let mask = 0xFFu8 << shift;
            *cell = (*cell & !mask) | (bits << shift);
        }

        // Unaligned glyphs spill into the next page
        if shift != 0 && page + 1 < PAGES {
            if let Some(cell) = self.cell_mut(page + 1, col) {
                let mask = 0xFFu8 >> (8 - shift);
                *cell = (*cell & !mask) | (bits >> (8 - shift));
            }
        }
    }

    /// Draw a line with Bresenham's algorithm
    ///
    /// The far endpoint along the major axis is not plotted: a line from
    /// `(0, 0)` to `(3, 0)` lights columns 0, 1 and 2.
    pub fn draw_line(&mut self, x0: u8, y0: u8, x1: u8, y1: u8, color: Color) {
        let (mut x0, mut y0, mut x1, mut y1) = (x0, y0, x1, y1);

        let steep = y1.abs_diff(y0) > x1.abs_diff(x0);
        if steep {
            swap(&mut x0, &mut y0);
            swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            swap(&mut x0, &mut x1);
            swap(&mut y0, &mut y1);
        }

        let dx = x1.abs_diff(x0) as i16;
        let dy = y1.abs_diff(y0) as i16;
        let ystep: i16 = if y0 < y1 { 1 } else { -1 };

        let mut err: i16 = 0;
        let mut y = y0 as i16;
        let on = color.is_on();

        for x in x0..x1 {
            // y never leaves the span between y0 and y1
            let minor = y as u8;
            if steep {
                self.set_pixel(minor, x, on);
            } else {
                self.set_pixel(x, minor, on);
            }

            err += dy;
            if err * 2 >= dx {
                y += ystep;
                err -= dx;
            }
        }
    }

    /// Horizontal line of width `w` starting at `(x, y)`
    ///
    /// Delegates to [`draw_line`](Self::draw_line), so the last pixel is
    /// not plotted. `w == 0` draws nothing.
    pub fn draw_hline(&mut self, x: u8, y: u8, w: u8, color: Color) {
        if w == 0 {
            return;
        }
        self.draw_line(x, y, x.saturating_add(w - 1), y, color);
    }

    /// Vertical line of height `h` starting at `(x, y)`
    ///
    /// Same endpoint rule as [`draw_hline`](Self::draw_hline).
    pub fn draw_vline(&mut self, x: u8, y: u8, h: u8, color: Color) {
        if h == 0 {
            return;
        }
        self.draw_line(x, y, x, y.saturating_add(h - 1), color);
    }

    /// Rectangle outline
    pub fn draw_rect(&mut self, x: u8, y: u8, w: u8, h: u8, color: Color) {
        if w == 0 || h == 0 {
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);

        self.draw_hline(x, y, w, color);
        self.draw_hline(x, bottom, w, color);
        self.draw_vline(x, y, h, color);
        self.draw_vline(right, y, h, color);
    }

    /// Solid rectangle, edges inclusive
    pub fn fill_rect(&mut self, x: u8, y: u8, w: u8, h: u8, color: Color) {
        let x_end = (x as usize + w as usize).min(WIDTH);
        let y_end = (y as usize + h as usize).min(HEIGHT);
        let on = color.is_on();

        for py in y as usize..y_end {
            for px in x as usize..x_end {
                self.set_pixel(px as u8, py as u8, on);
            }
        }
    }

    /// Closed triangle outline p1 -> p2 -> p3 -> p1
    pub fn draw_triangle(&mut self, p1: Point, p2: Point, p3: Point, color: Color) {
        self.draw_line(p1.x, p1.y, p2.x, p2.y, color);
        self.draw_line(p2.x, p2.y, p3.x, p3.y, color);
        self.draw_line(p3.x, p3.y, p1.x, p1.y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lit(fb: &Framebuffer) -> usize {
        fb.as_bytes().iter().map(|b| b.count_ones() as usize).sum()
    }

    #[test]
    fn test_draw_char_aligned() {
        let mut fb = Framebuffer::new();
        let next = fb.draw_char(0, 0, b'A', Color::On);

        assert_eq!(next, 6);
        assert_eq!(&fb.page(0)[..5], &[0x7e, 0x11, 0x11, 0x11, 0x7e]);
        assert_eq!(fb.page(0)[5], 0x00);
        assert!(fb.page(1).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_draw_char_replaces_cells() {
        let mut fb = Framebuffer::new();
        fb.fill_rect(0, 0, 10, 8, Color::On);
        fb.draw_char(0, 0, b'A', Color::On);

        // Column replace, not OR: background bits under the glyph are gone
        assert_eq!(&fb.page(0)[..5], &[0x7e, 0x11, 0x11, 0x11, 0x7e]);
        // Gap column cleared
        assert_eq!(fb.page(0)[5], 0x00);
        // Past the gap untouched
        assert_eq!(fb.page(0)[6], 0xFF);
    }

    #[test]
    fn test_draw_char_unaligned_spans_pages() {
        let mut fb = Framebuffer::new();
        fb.draw_char(0, 4, b'|', Color::On);

        // '|' is 0x7f in column 2, shifted down 4 rows
        assert_eq!(fb.page(0)[2], 0xF0);
        assert_eq!(fb.page(1)[2], 0x07);
        for row in 4..11 {
            assert!(fb.pixel(2, row));
        }
        assert!(!fb.pixel(2, 11));
    }

    #[test]
    fn test_draw_char_inverted() {
        let mut fb = Framebuffer::new();
        fb.draw_char(0, 8, b' ', Color::Off);
        assert!(fb.page(1)[..6].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_draw_char_out_of_bounds() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.draw_char(0, 48, b'A', Color::On), 0);
        assert_eq!(fb.draw_char(79, 0, b'A', Color::On), 79);
        assert_eq!(fb.draw_char(250, 0, b'A', Color::On), 250);
        assert_eq!(lit(&fb), 0);

        // Last column that still fits
        assert_eq!(fb.draw_char(78, 0, b'A', Color::On), 84);
        assert_eq!(fb.page(0)[78], 0x7e);
    }

    #[test]
    fn test_draw_char_bottom_page_clips() {
        let mut fb = Framebuffer::new();
        fb.draw_char(0, 44, b'|', Color::On);
        // Only rows 44..48 land on the panel
        assert_eq!(fb.page(5)[2], 0xF0);
    }

    #[test]
    fn test_draw_char_unknown_code_advances() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.draw_char(12, 0, 0x07, Color::On), 18);
        assert_eq!(fb.draw_char(12, 0, 0xFF, Color::On), 18);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn test_line_excludes_endpoint() {
        let mut fb = Framebuffer::new();
        fb.draw_line(0, 0, 3, 0, Color::On);

        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(1, 0));
        assert!(fb.pixel(2, 0));
        assert!(!fb.pixel(3, 0));
        assert_eq!(lit(&fb), 3);
    }

    #[test]
    fn test_line_reversed_endpoints() {
        let mut a = Framebuffer::new();
        a.draw_line(3, 0, 0, 0, Color::On);
        // Endpoints are swapped, so the same half-open path is drawn
        assert!(a.pixel(0, 0) && a.pixel(1, 0) && a.pixel(2, 0));
        assert!(!a.pixel(3, 0));
    }

    #[test]
    fn test_line_steep() {
        let mut fb = Framebuffer::new();
        fb.draw_line(5, 0, 5, 4, Color::On);
        for y in 0..4 {
            assert!(fb.pixel(5, y));
        }
        assert!(!fb.pixel(5, 4));
        assert_eq!(lit(&fb), 4);
    }

    #[test]
    fn test_line_diagonal_descending() {
        let mut fb = Framebuffer::new();
        fb.draw_line(0, 4, 4, 0, Color::On);
        assert!(fb.pixel(0, 4));
        assert!(fb.pixel(1, 3));
        assert!(fb.pixel(2, 2));
        assert!(fb.pixel(3, 1));
        assert!(!fb.pixel(4, 0));
    }

    #[test]
    fn test_line_shallow_slope() {
        let mut fb = Framebuffer::new();
        fb.draw_line(0, 0, 4, 2, Color::On);
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(1, 1));
        assert!(fb.pixel(2, 1));
        assert!(fb.pixel(3, 2));
        assert_eq!(lit(&fb), 4);
    }

    #[test]
    fn test_line_clips_off_panel() {
        let mut fb = Framebuffer::new();
        fb.draw_line(80, 0, 100, 0, Color::On);
        assert_eq!(lit(&fb), 4);
    }

    #[test]
    fn test_line_off_color_clears() {
        let mut fb = Framebuffer::new();
        fb.fill_rect(0, 0, 84, 8, Color::On);
        fb.draw_line(0, 3, 10, 3, Color::Off);
        assert!(!fb.pixel(0, 3));
        assert!(!fb.pixel(9, 3));
        assert!(fb.pixel(10, 3));
    }

    #[test]
    fn test_zero_length_lines_are_noops() {
        let mut fb = Framebuffer::new();
        fb.draw_hline(10, 10, 0, Color::On);
        fb.draw_vline(10, 10, 0, Color::On);
        fb.draw_rect(10, 10, 0, 5, Color::On);
        fb.draw_rect(10, 10, 5, 0, Color::On);
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn test_hline_and_vline() {
        let mut fb = Framebuffer::new();
        fb.draw_hline(10, 20, 5, Color::On);
        // w - 1 pixels: 10..=13
        assert_eq!(lit(&fb), 4);
        assert!(fb.pixel(13, 20));
        assert!(!fb.pixel(14, 20));

        fb.clear();
        fb.draw_vline(10, 20, 5, Color::On);
        assert_eq!(lit(&fb), 4);
        assert!(fb.pixel(10, 23));
        assert!(!fb.pixel(10, 24));
    }

    #[test]
    fn test_rect_outline() {
        let mut fb = Framebuffer::new();
        fb.draw_rect(2, 2, 6, 4, Color::On);
        assert!(fb.pixel(2, 2));
        assert!(fb.pixel(6, 2));
        assert!(fb.pixel(2, 4));
        assert!(fb.pixel(7, 2));
        assert!(fb.pixel(2, 5));
        // Interior stays empty
        assert!(!fb.pixel(4, 3));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::new();
        fb.fill_rect(80, 44, 10, 10, Color::On);
        assert_eq!(lit(&fb), 4 * 4);
    }

    #[test]
    fn test_triangle_closes() {
        let mut fb = Framebuffer::new();
        fb.draw_triangle(
            Point::new(0, 0),
            Point::new(10, 0),
            Point::from((0, 10)),
            Color::On,
        );
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(9, 0));
        assert!(fb.pixel(0, 9));
        // Each edge drops its far endpoint; (10, 0) ends both edges meeting there
        assert!(!fb.pixel(10, 0));
        assert!(fb.pixel(5, 5));
    }

    proptest! {
        #[test]
        fn prop_line_pixel_count(x0 in 0u8..84, y0 in 0u8..48, x1 in 0u8..84, y1 in 0u8..48) {
            let mut fb = Framebuffer::new();
            fb.draw_line(x0, y0, x1, y1, Color::On);
            let major = x0.abs_diff(x1).max(y0.abs_diff(y1)) as usize;
            prop_assert_eq!(lit(&fb), major);
        }

        #[test]
        fn prop_line_stays_in_bounding_box(x0 in 0u8..84, y0 in 0u8..48, x1 in 0u8..84, y1 in 0u8..48) {
            let mut fb = Framebuffer::new();
            fb.draw_line(x0, y0, x1, y1, Color::On);
            for y in 0..HEIGHT as u8 {
                for x in 0..WIDTH as u8 {
                    if fb.pixel(x, y) {
                        prop_assert!(x >= x0.min(x1) && x <= x0.max(x1));
                        prop_assert!(y >= y0.min(y1) && y <= y0.max(y1));
                    }
                }
            }
        }
    }
}
