//! Recording link for protocol tests
//!
//! Decodes the bit stream back into framed bytes so tests can assert on
//! the command sequence instead of individual pin toggles.

use std::vec::Vec;

use lcd5110_core::traits::{Line, SerialLink};

/// One decoded transfer or bring-up action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Byte framed by chip-select with the mode line low
    Command(u8),
    /// Byte framed by chip-select with the mode line high
    Data(u8),
    /// Chip-select released after this many bits instead of 8
    Framing(u8),
    Reset(bool),
    Backlight(bool),
    Delay(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

#[derive(Debug, Default)]
pub struct RecordingLink {
    pub events: Vec<Event>,
    /// Data line level at every clock pulse
    pub bits: Vec<bool>,
    /// Clock pulses seen while chip-select was high
    pub stray_clocks: usize,
    /// Fail the clock pulse with this index
    pub fail_at_pulse: Option<usize>,
    data: bool,
    mode: bool,
    selected: bool,
    shift: u8,
    count: u8,
    pulses: usize,
}

impl RecordingLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(pulse: usize) -> Self {
        Self {
            fail_at_pulse: Some(pulse),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Command(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn data(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Data(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    /// Only the framed bytes, commands and data interleaved
    pub fn transfers(&self) -> Vec<Event> {
        self.events
            .iter()
            .copied()
            .filter(|e| matches!(e, Event::Command(_) | Event::Data(_)))
            .collect()
    }
}

impl SerialLink for RecordingLink {
    type Error = MockError;

    fn set_line(&mut self, line: Line, high: bool) -> Result<(), MockError> {
        match line {
            Line::Data => self.data = high,
            Line::Mode => self.mode = high,
            Line::ChipSelect => {
                if !high {
                    self.selected = true;
                    self.shift = 0;
                    self.count = 0;
                } else if self.selected {
                    self.selected = false;
                    let event = match (self.count, self.mode) {
                        (8, false) => Event::Command(self.shift),
                        (8, true) => Event::Data(self.shift),
                        (n, _) => Event::Framing(n),
                    };
                    self.events.push(event);
                }
            }
            Line::Reset => self.events.push(Event::Reset(high)),
            Line::Backlight => self.events.push(Event::Backlight(high)),
        }
        Ok(())
    }

    fn pulse_clock(&mut self) -> Result<(), MockError> {
        let index = self.pulses;
        self.pulses += 1;
        if self.fail_at_pulse == Some(index) {
            return Err(MockError);
        }

        self.bits.push(self.data);
        if self.selected {
            self.shift = (self.shift << 1) | u8::from(self.data);
            self.count = self.count.saturating_add(1);
        } else {
            self.stray_clocks += 1;
        }
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.push(Event::Delay(ms));
    }
}
