//! Bit-banged GPIO link
//!
//! Drives the PCD8544 serial bus with six plain output pins and a blocking
//! delay. All pins share one type, which is what HALs with a type-erased
//! output (e.g. `embassy_rp::gpio::Output`) hand out.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use lcd5110_core::traits::{Line, SerialLink};

/// The six panel pins
pub struct Pins<P> {
    /// Serial clock (SCLK)
    pub sclk: P,
    /// Serial data (DIN)
    pub din: P,
    /// Data/command select (D/C)
    pub dc: P,
    /// Chip enable (SCE)
    pub cs: P,
    /// Reset (RST)
    pub rst: P,
    /// Backlight (LED)
    pub bl: P,
}

/// [`SerialLink`] over GPIO output pins
pub struct GpioLink<P, D> {
    pins: Pins<P>,
    delay: D,
    /// Clock high time in nanoseconds
    clock_hold_ns: u32,
}

impl<P: OutputPin, D: DelayNs> GpioLink<P, D> {
    /// Create a new link
    ///
    /// `clock_hold_ns` is how long SCLK stays high per bit; the controller
    /// needs at least 100 ns at 3.3 V, and 0 skips the delay entirely.
    pub fn new(pins: Pins<P>, delay: D, clock_hold_ns: u32) -> Self {
        Self {
            pins,
            delay,
            clock_hold_ns,
        }
    }

    /// Give the pins and delay back
    pub fn release(self) -> (Pins<P>, D) {
        (self.pins, self.delay)
    }

    fn pin(&mut self, line: Line) -> &mut P {
        match line {
            Line::Data => &mut self.pins.din,
            Line::Mode => &mut self.pins.dc,
            Line::ChipSelect => &mut self.pins.cs,
            Line::Reset => &mut self.pins.rst,
            Line::Backlight => &mut self.pins.bl,
        }
    }
}

impl<P: OutputPin, D: DelayNs> SerialLink for GpioLink<P, D> {
    type Error = P::Error;

    fn set_line(&mut self, line: Line, high: bool) -> Result<(), Self::Error> {
        self.pin(line).set_state(PinState::from(high))
    }

    fn pulse_clock(&mut self) -> Result<(), Self::Error> {
        self.pins.sclk.set_high()?;
        if self.clock_hold_ns > 0 {
            self.delay.delay_ns(self.clock_hold_ns);
        }
        self.pins.sclk.set_low()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
