//! Page-organized 1bpp framebuffer
//!
//! The PCD8544 RAM is 6 banks ("pages") of 84 bytes. Each byte is a
//! vertical run of 8 pixels, LSB at the top. The framebuffer mirrors that
//! layout exactly so a flush is a straight page-by-page copy.

/// Display width in pixels
pub const WIDTH: usize = 84;

/// Display height in pixels
pub const HEIGHT: usize = 48;

/// Number of 8-row pages
pub const PAGES: usize = HEIGHT.div_ceil(8);

/// Total buffer size in bytes
pub const BUFFER_SIZE: usize = PAGES * WIDTH;

/// Pixel polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Bit set (dark pixel)
    #[default]
    On,
    /// Bit cleared
    Off,
}

impl Color {
    /// Whether this color sets the bit
    pub const fn is_on(self) -> bool {
        matches!(self, Color::On)
    }

    /// The opposite polarity
    pub const fn inverse(self) -> Self {
        match self {
            Color::On => Color::Off,
            Color::Off => Color::On,
        }
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::On
        } else {
            Color::Off
        }
    }
}

/// In-memory copy of the display RAM
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    /// Cells indexed `[page][column]`
    buffer: [[u8; WIDTH]; PAGES],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a blank framebuffer
    pub const fn new() -> Self {
        Self {
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Clear every pixel
    pub fn clear(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    /// Set or clear a single pixel
    ///
    /// Coordinates outside the panel are ignored so callers never have to
    /// pre-clip.
    pub fn set_pixel(&mut self, x: u8, y: u8, on: bool) {
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let mask = 1u8 << (y % 8);
        let cell = &mut self.buffer[y / 8][x];
        if on {
            *cell |= mask;
        } else {
            *cell &= !mask;
        }
    }

    /// Read a single pixel (off when out of range)
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Replace the whole buffer from a flat, page-major image
    pub fn load_bitmap(&mut self, bitmap: &[u8; BUFFER_SIZE]) {
        self.buffer.as_flattened_mut().copy_from_slice(bitmap);
    }

    /// Flip every pixel
    pub fn invert(&mut self) {
        for cell in self.buffer.as_flattened_mut() {
            *cell = !*cell;
        }
    }

    /// One page (8 pixel rows) of column bytes
    ///
    /// # Panics
    /// Panics if `page >= PAGES`.
    pub fn page(&self, page: usize) -> &[u8; WIDTH] {
        &self.buffer[page]
    }

    /// Iterate over all pages in transfer order
    pub fn pages(&self) -> impl Iterator<Item = &[u8; WIDTH]> {
        self.buffer.iter()
    }

    /// The whole buffer as a flat page-major byte slice
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_flattened()
    }

    /// Mutable access to a single cell, or `None` when out of range
    pub(crate) fn cell_mut(&mut self, page: usize, col: usize) -> Option<&mut u8> {
        self.buffer.get_mut(page)?.get_mut(col)
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lit = self.as_bytes().iter().map(|b| b.count_ones()).sum::<u32>();
        f.debug_struct("Framebuffer")
            .field("lit_pixels", &lit)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Framebuffer {
    fn format(&self, f: defmt::Formatter) {
        let lit = self.as_bytes().iter().map(|b| b.count_ones()).sum::<u32>();
        defmt::write!(f, "Framebuffer[{}x{}, {} lit]", WIDTH, HEIGHT, lit);
    }
}
