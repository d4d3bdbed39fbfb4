//! Minimal TOML reader for display configuration
//!
//! Handles only the subset a `display.toml` needs. It does NOT support the
//! full TOML grammar and never allocates.
//!
//! Supported features:
//! - A single `[display]` table
//! - Key = value pairs (string, integer, boolean)
//! - Comments (# ...), including trailing comments
//!
//! Keys before the first table header are ignored.

use super::types::{Bias, DisplayConfig, DisplayMode, TemperatureCoefficient};

/// Configuration parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Malformed or unsupported table header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Key not recognized inside `[display]`
    UnknownKey,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
}

/// Parse TOML text into a [`DisplayConfig`]
///
/// Keys that are absent keep their [`Default`] value.
pub fn parse_config(input: &str) -> Result<DisplayConfig, ConfigError> {
    let mut config = DisplayConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let Some((key, value)) = parse_key_value(line) else {
            return Err(ConfigError::InvalidValue);
        };

        if section == Section::Display {
            apply_value(&mut config, key, value)?;
        }
    }

    Ok(config)
}

/// Parse a header line like `[display]` (trailing comment allowed)
fn parse_section_header(line: &str) -> Result<Section, ConfigError> {
    let line = strip_comment(line);
    let name = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ConfigError::InvalidSection)?;

    match name.trim() {
        "display" => Ok(Section::Display),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn apply_value(config: &mut DisplayConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "contrast" => config.contrast = parse_int(value)?,
        "bias" => {
            config.bias = Bias::from_bits(parse_int(value)?).ok_or(ConfigError::InvalidValue)?
        }
        "temperature_coefficient" | "tc" => {
            config.temperature_coefficient = Some(
                TemperatureCoefficient::from_bits(parse_int(value)?)
                    .ok_or(ConfigError::InvalidValue)?,
            )
        }
        "mode" => config.mode = parse_mode(value)?,
        "backlight" => config.backlight = parse_bool(value)?,
        "reset_hold_ms" => config.reset_hold_ms = parse_int(value)?,
        "clock_hold_ns" => config.clock_hold_ns = parse_int(value)?,
        "refresh_ms" => config.refresh_ms = parse_int(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

/// Drop a trailing `# comment` unless the `#` sits inside a string
fn strip_comment(value: &str) -> &str {
    match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

/// Parse a display mode name like "normal" or "inverted"
fn parse_mode(value: &str) -> Result<DisplayMode, ConfigError> {
    match parse_string(value) {
        "blank" => Ok(DisplayMode::Blank),
        "normal" => Ok(DisplayMode::Normal),
        "all_on" => Ok(DisplayMode::AllOn),
        "inverted" => Ok(DisplayMode::Inverted),
        _ => Err(ConfigError::InvalidValue),
    }
}
