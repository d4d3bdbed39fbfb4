//! PCD8544 drivers
//!
//! Concrete implementations on top of the traits in `lcd5110-core`:
//!
//! - PCD8544 command/data protocol and full-frame flush
//! - GPIO bit-bang link over `embedded-hal` output pins
//! - `Display` session tying a driver to its canvas

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod gpio;
pub mod pcd8544;

#[cfg(test)]
mod mock;

pub use display::Display;
pub use gpio::{GpioLink, Pins};
pub use pcd8544::Pcd8544;
