//! Display configuration types
//!
//! Everything the reset sequence needs to bring the panel up. The values
//! are raw controller settings; range limits are enforced when the
//! commands are built, not here.

/// Largest value the VOP register accepts
pub const MAX_CONTRAST: u8 = 0x7F;

/// LCD bias system (BS2..BS0)
///
/// The controller datasheet lists the multiplex rate each setting suits;
/// 84x48 panels normally want 1:40 or 1:48.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Bias {
    /// 1:100
    Bs0 = 0,
    /// 1:80
    Bs1 = 1,
    /// 1:65
    Bs2 = 2,
    /// 1:48
    Bs3 = 3,
    /// 1:40 / 1:34
    #[default]
    Bs4 = 4,
    /// 1:24
    Bs5 = 5,
    /// 1:18 / 1:16
    Bs6 = 6,
    /// 1:10 / 1:9 / 1:8
    Bs7 = 7,
}

impl Bias {
    /// Bias from its register value
    pub const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => Bias::Bs0,
            1 => Bias::Bs1,
            2 => Bias::Bs2,
            3 => Bias::Bs3,
            4 => Bias::Bs4,
            5 => Bias::Bs5,
            6 => Bias::Bs6,
            7 => Bias::Bs7,
            _ => return None,
        })
    }

    /// Register value
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Temperature coefficient of VLCD (TC1..TC0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TemperatureCoefficient {
    Tc0 = 0,
    Tc1 = 1,
    Tc2 = 2,
    Tc3 = 3,
}

impl TemperatureCoefficient {
    /// Coefficient from its register value
    pub const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0 => TemperatureCoefficient::Tc0,
            1 => TemperatureCoefficient::Tc1,
            2 => TemperatureCoefficient::Tc2,
            3 => TemperatureCoefficient::Tc3,
            _ => return None,
        })
    }

    /// Register value
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Display control mode (D and E bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DisplayMode {
    /// All segments off
    Blank = 0x0,
    /// RAM contents shown as-is
    #[default]
    Normal = 0x4,
    /// All segments on
    AllOn = 0x1,
    /// RAM contents inverted
    Inverted = 0x5,
}

impl DisplayMode {
    /// Register value
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Display bring-up and runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Operating voltage (VOP), clamped to [`MAX_CONTRAST`] when sent
    pub contrast: u8,
    /// Bias system
    pub bias: Bias,
    /// Temperature coefficient, left at the controller default when `None`
    pub temperature_coefficient: Option<TemperatureCoefficient>,
    /// Mode selected at the end of the reset sequence
    pub mode: DisplayMode,
    /// Backlight level during and after reset
    pub backlight: bool,
    /// How long reset is held low (ms)
    pub reset_hold_ms: u32,
    /// Serial clock high time (ns)
    pub clock_hold_ns: u32,
    /// Firmware redraw period (ms)
    pub refresh_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            contrast: 45,
            bias: Bias::Bs4,
            temperature_coefficient: None,
            mode: DisplayMode::Normal,
            backlight: true,
            reset_hold_ms: 500,
            clock_hold_ns: 1000,
            refresh_ms: 1000,
        }
    }
}

impl DisplayConfig {
    /// Contrast as it goes on the wire
    pub const fn vop(&self) -> u8 {
        if self.contrast > MAX_CONTRAST {
            MAX_CONTRAST
        } else {
            self.contrast
        }
    }
}
