//! Text canvas
//!
//! A [`Canvas`] is the drawing session: it owns the framebuffer and the
//! text cursor. Text wraps at the right edge and wraps back to the top
//! row after the last line; there is no scrolling.

use crate::font::{CHAR_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::framebuffer::{Color, Framebuffer, HEIGHT, WIDTH};

/// Text cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextCursor {
    /// Next character column (pixels)
    pub x: u8,
    /// Top row of the current line (pixels)
    pub y: u8,
    /// Integer text scale
    pub size: u8,
    /// Foreground polarity
    pub color: Color,
}

impl Default for TextCursor {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            size: 1,
            color: Color::On,
        }
    }
}

impl TextCursor {
    /// Move to `(x, y)` keeping size and color
    pub fn move_to(&mut self, x: u8, y: u8) {
        self.x = x;
        self.y = y;
    }

    fn newline(&mut self) {
        self.y = self
            .y
            .saturating_add(self.size.saturating_mul(GLYPH_HEIGHT as u8));
        self.x = 0;
    }

    fn advance(&mut self) {
        self.x = self
            .x
            .saturating_add(self.size.saturating_mul(CHAR_ADVANCE as u8));
        if self.x as usize >= WIDTH - GLYPH_WIDTH {
            self.x = 0;
            self.y = self.y.saturating_add(GLYPH_HEIGHT as u8);
        }
        if self.y as usize >= HEIGHT {
            self.y = 0;
        }
    }
}

/// Drawing session: framebuffer plus text cursor
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    framebuffer: Framebuffer,
    cursor: TextCursor,
}

impl Canvas {
    /// Create a blank canvas with the cursor at the origin
    pub const fn new() -> Self {
        Self {
            framebuffer: Framebuffer::new(),
            cursor: TextCursor {
                x: 0,
                y: 0,
                size: 1,
                color: Color::On,
            },
        }
    }

    /// Clear the framebuffer and home the cursor
    pub fn clear(&mut self) {
        self.framebuffer.clear();
        self.cursor.move_to(0, 0);
    }

    /// Write a byte string starting at `(x, y)`
    pub fn write_string(&mut self, x: u8, y: u8, bytes: &[u8]) {
        self.cursor.move_to(x, y);
        for &b in bytes {
            self.write_byte(b);
        }
    }

    /// Write one byte at the cursor and advance it
    ///
    /// `\n` starts a new line, `\r` is ignored.
    pub fn write_byte(&mut self, c: u8) {
        match c {
            b'\n' => self.cursor.newline(),
            b'\r' => {}
            _ => {
                let TextCursor { x, y, color, .. } = self.cursor;
                self.framebuffer.draw_char(x, y, c, color);
                self.cursor.advance();
            }
        }
    }

    /// Set the text foreground polarity
    pub fn set_text_color(&mut self, color: Color) {
        self.cursor.color = color;
    }

    /// Set the text scale (advance and line height multiply by it)
    pub fn set_text_size(&mut self, size: u8) {
        self.cursor.size = size.max(1);
    }

    /// Current cursor
    pub fn cursor(&self) -> TextCursor {
        self.cursor
    }

    /// Move the cursor without drawing
    pub fn set_cursor(&mut self, x: u8, y: u8) {
        self.cursor.move_to(x, y);
    }

    /// The framebuffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Mutable framebuffer, for shape drawing
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }
}

/// Text goes out one character cell per `char`
///
/// Latin-1 characters map to their own code, so `'°'` draws the degree
/// sign. Anything beyond U+00FF draws `'?'`.
impl core::fmt::Write for Canvas {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            self.write_byte(u8::try_from(c).unwrap_or(b'?'));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{glyph, DEGREE_SIGN};
    use core::fmt::Write;

    const A: [u8; 5] = [0x7e, 0x11, 0x11, 0x11, 0x7e];
    const B: [u8; 5] = [0x7f, 0x49, 0x49, 0x49, 0x36];

    #[test]
    fn test_write_string_newline() {
        let mut canvas = Canvas::new();
        canvas.write_string(0, 0, b"A\nB");

        let fb = canvas.framebuffer();
        assert_eq!(&fb.page(0)[..5], &A);
        assert_eq!(&fb.page(1)[..5], &B);
        assert_eq!(canvas.cursor().x, 6);
        assert_eq!(canvas.cursor().y, 8);
    }

    #[test]
    fn test_carriage_return_ignored() {
        let mut canvas = Canvas::new();
        canvas.write_string(0, 0, b"A\r");
        assert_eq!(canvas.cursor().x, 6);
        assert_eq!(canvas.cursor().y, 0);
    }

    #[test]
    fn test_advance_and_wrap() {
        let mut canvas = Canvas::new();
        // 13 characters leave the cursor at x = 78, still short of the wrap column
        canvas.write_string(0, 0, b"0123456789012");
        assert_eq!(canvas.cursor().x, 78);
        assert_eq!(canvas.cursor().y, 0);

        // Next advance reaches 84 >= 79 and wraps
        canvas.write_byte(b'3');
        assert_eq!(canvas.cursor().x, 0);
        assert_eq!(canvas.cursor().y, 8);
        assert_eq!(&canvas.framebuffer().page(0)[78..83], glyph(b'3').unwrap());
    }

    #[test]
    fn test_vertical_wrap_overwrites_top() {
        let mut canvas = Canvas::new();
        canvas.set_cursor(78, 40);
        canvas.write_byte(b'A');
        assert_eq!(canvas.cursor().x, 0);
        assert_eq!(canvas.cursor().y, 0);

        canvas.write_byte(b'B');
        assert_eq!(&canvas.framebuffer().page(0)[..5], &B);
    }

    #[test]
    fn test_unknown_code_still_advances() {
        let mut canvas = Canvas::new();
        canvas.write_string(0, 0, &[0x01, b'A']);
        assert_eq!(canvas.framebuffer().page(0)[0], 0);
        assert_eq!(&canvas.framebuffer().page(0)[6..11], &A);
    }

    #[test]
    fn test_clear_homes_cursor() {
        let mut canvas = Canvas::new();
        canvas.write_string(12, 16, b"Hi");
        canvas.clear();
        assert_eq!(canvas.cursor().x, 0);
        assert_eq!(canvas.cursor().y, 0);
        assert!(canvas.framebuffer().as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_text_color_off() {
        let mut canvas = Canvas::new();
        canvas.framebuffer_mut().fill_rect(0, 0, 84, 8, Color::On);
        canvas.set_text_color(Color::Off);
        canvas.write_string(0, 0, b"A");
        assert_eq!(canvas.framebuffer().page(0)[0], !A[0]);
        assert_eq!(canvas.framebuffer().page(0)[5], 0xFF);
    }

    #[test]
    fn test_fmt_write() {
        let mut canvas = Canvas::new();
        canvas.set_cursor(0, 8);
        write!(canvas, "{}", 7).unwrap();
        assert_eq!(&canvas.framebuffer().page(1)[..5], glyph(b'7').unwrap());
        assert_eq!(canvas.cursor().x, 6);
    }

    #[test]
    fn test_fmt_write_degree_sign_single_cell() {
        let mut canvas = Canvas::new();
        write!(canvas, "20°C").unwrap();

        let page = canvas.framebuffer().page(0);
        assert_eq!(&page[12..17], glyph(DEGREE_SIGN).unwrap());
        assert_eq!(&page[18..23], glyph(b'C').unwrap());
        assert_eq!(canvas.cursor().x, 24);
    }

    #[test]
    fn test_fmt_write_outside_latin1() {
        let mut canvas = Canvas::new();
        write!(canvas, "→").unwrap();
        assert_eq!(&canvas.framebuffer().page(0)[..5], glyph(b'?').unwrap());
        assert_eq!(canvas.cursor().x, 6);
    }

    #[test]
    fn test_text_size_scales_advance() {
        let mut canvas = Canvas::new();
        canvas.set_text_size(2);
        canvas.write_string(0, 0, b"A\n");
        assert_eq!(canvas.cursor().y, 16);

        canvas.write_string(0, 0, b"A");
        assert_eq!(canvas.cursor().x, 12);
    }
}
