//! PCD8544 LCD controller driver
//!
//! Driver for 84x48 PCD8544-based panels (Nokia 5110/3310) over a
//! bit-banged, write-only serial bus. Every byte is framed by its own
//! chip-select pulse and sent MSB first.

use lcd5110_core::config::{
    Bias, DisplayConfig, DisplayMode, TemperatureCoefficient, MAX_CONTRAST,
};
use lcd5110_core::framebuffer::{Framebuffer, PAGES, WIDTH};
use lcd5110_core::traits::{Line, SerialLink};

#[cfg(feature = "defmt")]
use defmt::{debug, trace};

/// PCD8544 commands
pub mod cmd {
    // Basic instruction set (H = 0)
    pub const FUNCTION_SET: u8 = 0x20;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const SET_Y_ADDR: u8 = 0x40;
    pub const SET_X_ADDR: u8 = 0x80;

    // Extended instruction set (H = 1)
    pub const SET_TEMP: u8 = 0x04;
    pub const SET_BIAS: u8 = 0x10;
    pub const SET_VOP: u8 = 0x80;

    // Function set flags
    pub const POWER_DOWN: u8 = 0x04;
    pub const VERTICAL_ADDRESSING: u8 = 0x02;
    pub const EXTENDED_INSTRUCTION: u8 = 0x01;
}

/// Number of byte transfers in one full flush
pub const FLUSH_TRANSFERS: usize = PAGES * (2 + WIDTH) + 1;

/// Level of the mode line during a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferMode {
    Command,
    Data,
}

/// PCD8544 driver
pub struct Pcd8544<L> {
    link: L,
    /// Tracks the PD flag so function-set commands keep it
    powered_down: bool,
}

impl<L: SerialLink> Pcd8544<L> {
    /// Create a new driver; nothing is sent until [`Self::init`]
    pub fn new(link: L) -> Self {
        Self {
            link,
            powered_down: false,
        }
    }

    /// Run the reset sequence and program the controller
    pub fn init(&mut self, config: &DisplayConfig) -> Result<(), L::Error> {
        #[cfg(feature = "defmt")]
        debug!(
            "PCD8544 reset: contrast={} bias={} mode={}",
            config.contrast, config.bias, config.mode
        );

        self.link.set_line(Line::Backlight, config.backlight)?;
        self.link.set_line(Line::ChipSelect, true)?;

        self.link.set_line(Line::Reset, false)?;
        self.link.delay_ms(config.reset_hold_ms);
        self.link.set_line(Line::Reset, true)?;
        self.powered_down = false;

        self.command(cmd::FUNCTION_SET | cmd::EXTENDED_INSTRUCTION)?;
        self.command(cmd::SET_BIAS | config.bias.bits())?;
        if let Some(tc) = config.temperature_coefficient {
            self.command(cmd::SET_TEMP | tc.bits())?;
        }
        self.command(cmd::SET_VOP | config.vop())?;
        self.command(cmd::FUNCTION_SET)?;
        self.command(cmd::DISPLAY_CONTROL | config.mode.bits())
    }

    /// Send a command byte
    pub fn command(&mut self, byte: u8) -> Result<(), L::Error> {
        self.write_byte(byte, TransferMode::Command)
    }

    /// Send a data byte to display RAM at the current address
    pub fn data(&mut self, byte: u8) -> Result<(), L::Error> {
        self.write_byte(byte, TransferMode::Data)
    }

    /// Send a run of data bytes
    pub fn write_data(&mut self, bytes: &[u8]) -> Result<(), L::Error> {
        for &b in bytes {
            self.data(b)?;
        }
        Ok(())
    }

    /// Shift one byte out, MSB first, inside its own chip-select frame
    pub fn write_byte(&mut self, byte: u8, mode: TransferMode) -> Result<(), L::Error> {
        self.link.set_line(Line::Mode, mode == TransferMode::Data)?;
        self.link.set_line(Line::ChipSelect, false)?;
        for bit in (0..8).rev() {
            self.link.set_line(Line::Data, byte & (1 << bit) != 0)?;
            self.link.pulse_clock()?;
        }
        self.link.set_line(Line::ChipSelect, true)
    }

    /// Copy the whole framebuffer to display RAM
    pub fn flush(&mut self, framebuffer: &Framebuffer) -> Result<(), L::Error> {
        #[cfg(feature = "defmt")]
        trace!("PCD8544 flush: {}", framebuffer);

        for (page, cells) in framebuffer.pages().enumerate() {
            self.command(cmd::SET_Y_ADDR | page as u8)?;
            self.command(cmd::SET_X_ADDR)?;
            self.write_data(cells)?;
        }

        // The controller needs the Y address reset after a full frame
        self.command(cmd::SET_Y_ADDR)
    }

    /// Set the operating voltage, clamped to 0x7F
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), L::Error> {
        let vop = contrast.min(MAX_CONTRAST);
        #[cfg(feature = "defmt")]
        debug!("PCD8544 contrast {}", vop);

        self.extended(|d| d.command(cmd::SET_VOP | vop))
    }

    /// Select blank, normal, all-on or inverted output
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), L::Error> {
        self.command(cmd::DISPLAY_CONTROL | mode.bits())
    }

    /// Change the bias system
    pub fn set_bias(&mut self, bias: Bias) -> Result<(), L::Error> {
        self.extended(|d| d.command(cmd::SET_BIAS | bias.bits()))
    }

    /// Change the VLCD temperature coefficient
    pub fn set_temperature_coefficient(
        &mut self,
        tc: TemperatureCoefficient,
    ) -> Result<(), L::Error> {
        self.extended(|d| d.command(cmd::SET_TEMP | tc.bits()))
    }

    /// Enter or leave power-down; display RAM is retained
    pub fn set_power_down(&mut self, power_down: bool) -> Result<(), L::Error> {
        #[cfg(feature = "defmt")]
        debug!("PCD8544 power down: {}", power_down);

        self.powered_down = power_down;
        self.command(self.function_set())
    }

    /// Switch the backlight line
    pub fn set_backlight(&mut self, on: bool) -> Result<(), L::Error> {
        self.link.set_line(Line::Backlight, on)
    }

    /// Whether the last function set entered power-down
    pub fn is_powered_down(&self) -> bool {
        self.powered_down
    }

    /// Give the link back
    pub fn release(self) -> L {
        self.link
    }

    fn function_set(&self) -> u8 {
        if self.powered_down {
            cmd::FUNCTION_SET | cmd::POWER_DOWN
        } else {
            cmd::FUNCTION_SET
        }
    }

    /// Run `f` inside the extended instruction set, then switch back
    fn extended(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<(), L::Error>,
    ) -> Result<(), L::Error> {
        self.command(self.function_set() | cmd::EXTENDED_INSTRUCTION)?;
        f(self)?;
        self.command(self.function_set())
    }
}
