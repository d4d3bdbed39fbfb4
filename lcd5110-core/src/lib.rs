//! Board-agnostic core of the PCD8544 display stack
//!
//! This crate contains everything that does not touch a pin:
//!
//! - Page-organized framebuffer and pixel access
//! - Line, rectangle and glyph rasterization
//! - Text canvas with cursor, wrapping and scaling
//! - The 5x8 font and the splash bitmap
//! - Clock-face text helpers
//! - Display configuration and its text parser
//! - The serial signaling trait drivers are written against

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod canvas;
pub mod clock;
pub mod config;
pub mod font;
pub mod framebuffer;
pub mod raster;
pub mod splash;
pub mod traits;

pub use canvas::{Canvas, TextCursor};
pub use framebuffer::{Color, Framebuffer, BUFFER_SIZE, HEIGHT, PAGES, WIDTH};
pub use raster::Point;
