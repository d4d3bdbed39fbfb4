//! lcd5110 - PCD8544 clock display firmware
//!
//! Brings up a Nokia 5110 panel on an RP2040, shows the splash image and
//! then redraws an uptime clock once per refresh period.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Delay, Duration, Instant, Ticker};
use {defmt_rtt as _, panic_probe as _};

use lcd5110_core::clock::ClockTime;
use lcd5110_core::config::{parse_config, DisplayConfig};
use lcd5110_drivers::{Display, GpioLink, Pins};

/// Embedded panel configuration (compiled into firmware)
/// Edit display.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../display.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("lcd5110 firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Chip-select and reset idle high; the reset sequence pulls reset low
    let pins = Pins {
        sclk: Output::new(p.PIN_18, Level::Low),
        din: Output::new(p.PIN_19, Level::Low),
        dc: Output::new(p.PIN_20, Level::Low),
        cs: Output::new(p.PIN_17, Level::High),
        rst: Output::new(p.PIN_21, Level::High),
        bl: Output::new(p.PIN_16, Level::Low),
    };
    let link = GpioLink::new(pins, Delay, config.clock_hold_ns);
    let mut display = Display::new(link);

    if display.init(&config).is_err() {
        error!("Display init failed, halting");
        return;
    }
    info!(
        "Display initialized: contrast={} bias={} mode={}",
        config.vop(),
        config.bias,
        config.mode
    );

    if display.show_splash().is_err() {
        warn!("Failed to show splash image");
    }

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(config.refresh_ms)));
    // Leave the splash up for one period
    ticker.next().await;

    loop {
        let now = ClockTime::from_seconds(Instant::now().as_secs());
        let text = now.format();

        display.clear();
        display.write_string(0, 0, text.as_bytes());
        if display.flush().is_err() {
            warn!("Display flush failed");
        } else {
            trace!("Drew {}", text.as_str());
        }

        ticker.next().await;
    }
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> DisplayConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded");
            config
        }
        Err(e) => {
            warn!("Invalid display.toml ({}), using defaults", e);
            DisplayConfig::default()
        }
    }
}
