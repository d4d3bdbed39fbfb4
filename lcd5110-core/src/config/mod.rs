//! Display configuration
//!
//! Typed settings plus a small text parser for the `[display]` table.

pub mod toml;
pub mod types;

pub use toml::{parse_config, ConfigError};
pub use types::*;
