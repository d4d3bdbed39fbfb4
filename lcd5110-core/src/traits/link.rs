//! Bit-serial signaling link
//!
//! The PCD8544 is write-only: a data line, a clock line, a command/data
//! mode line and an active-low chip-select, plus reset and backlight lines
//! touched only during bring-up.

/// Output lines driven by the protocol, other than the serial clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Serial data in (DIN)
    Data,
    /// Command/data select (D/C): low = command, high = data
    Mode,
    /// Chip enable (SCE), active low
    ChipSelect,
    /// Reset (RST), active low
    Reset,
    /// Backlight (LED)
    Backlight,
}

/// Trait for the physical signaling layer
///
/// Implementations own the pins and the timing. The protocol never reads
/// anything back, so errors are only whatever the pin driver reports.
pub trait SerialLink {
    /// Error type for line operations
    type Error;

    /// Drive a line to a logic level
    fn set_line(&mut self, line: Line, high: bool) -> Result<(), Self::Error>;

    /// One full clock pulse; the device samples the data line on the
    /// rising edge
    fn pulse_clock(&mut self) -> Result<(), Self::Error>;

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<T: SerialLink + ?Sized> SerialLink for &mut T {
    type Error = T::Error;

    fn set_line(&mut self, line: Line, high: bool) -> Result<(), Self::Error> {
        T::set_line(self, line, high)
    }

    fn pulse_clock(&mut self) -> Result<(), Self::Error> {
        T::pulse_clock(self)
    }

    fn delay_ms(&mut self, ms: u32) {
        T::delay_ms(self, ms)
    }
}
