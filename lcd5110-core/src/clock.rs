//! Clock face formatting
//!
//! Text helpers for the periodic clock screen. Formatting lives here rather
//! than in the canvas so the canvas only ever sees pre-formatted bytes.

use core::fmt::Write;

use heapless::String;

/// Longest formatted time: three `u8` fields, "255:255:255"
pub const TIME_TEXT_LEN: usize = 11;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Wall-clock time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockTime {
    /// Build a time, or `None` if any field is out of range
    pub fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    /// Time of day for a running seconds counter (wraps every 24 h)
    pub fn from_seconds(total: u64) -> Self {
        let s = total % SECONDS_PER_DAY;
        Self {
            hour: (s / 3600) as u8,
            minute: (s / 60 % 60) as u8,
            second: (s % 60) as u8,
        }
    }

    /// Unpadded `H:M:S`, e.g. `9:5:30`
    pub fn format(&self) -> String<TIME_TEXT_LEN> {
        let mut text = String::new();
        // Capacity covers three full u8 fields
        let _ = write!(text, "{}:{}:{}", self.hour, self.minute, self.second);
        text
    }
}

/// Calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Month {
    Jan = 1,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Month from its 1-based number
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    /// Three-letter abbreviation
    pub const fn abbrev(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

/// Abbreviation for a 1-based month number, `"Non"` when out of range
pub fn month_abbrev(n: u8) -> &'static str {
    Month::from_number(n).map_or("Non", Month::abbrev)
}
