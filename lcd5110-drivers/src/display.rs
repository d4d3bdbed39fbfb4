//! Display session
//!
//! Pairs a [`Pcd8544`] with the [`Canvas`] it shows. Drawing only touches
//! the canvas; nothing reaches the panel until [`Display::flush`].

use lcd5110_core::canvas::Canvas;
use lcd5110_core::config::DisplayConfig;
use lcd5110_core::splash::SPLASH;
use lcd5110_core::traits::SerialLink;

#[cfg(feature = "defmt")]
use defmt::debug;

use crate::pcd8544::Pcd8544;

/// Driver plus canvas
pub struct Display<L> {
    driver: Pcd8544<L>,
    canvas: Canvas,
}

impl<L: SerialLink> Display<L> {
    /// Wrap a link with a blank canvas
    pub fn new(link: L) -> Self {
        Self {
            driver: Pcd8544::new(link),
            canvas: Canvas::new(),
        }
    }

    /// Reset and configure the panel
    pub fn init(&mut self, config: &DisplayConfig) -> Result<(), L::Error> {
        self.driver.init(config)
    }

    /// Send the canvas to the panel
    pub fn flush(&mut self) -> Result<(), L::Error> {
        self.driver.flush(self.canvas.framebuffer())
    }

    /// Load the splash image and show it
    pub fn show_splash(&mut self) -> Result<(), L::Error> {
        #[cfg(feature = "defmt")]
        debug!("Showing splash");

        self.canvas.framebuffer_mut().load_bitmap(&SPLASH);
        self.flush()
    }

    /// Clear the canvas and home the cursor (does not flush)
    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    /// Write text into the canvas at `(x, y)` (does not flush)
    pub fn write_string(&mut self, x: u8, y: u8, bytes: &[u8]) {
        self.canvas.write_string(x, y, bytes);
    }

    /// Set the panel contrast
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), L::Error> {
        self.driver.set_contrast(contrast)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Direct access to the controller for the less common commands
    pub fn driver_mut(&mut self) -> &mut Pcd8544<L> {
        &mut self.driver
    }

    /// Tear down the session and return the link
    pub fn release(self) -> L {
        self.driver.release()
    }
}
