//! Build script for lcd5110-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const KNOWN_KEYS: &[&str] = &[
    "contrast",
    "bias",
    "temperature_coefficient",
    "tc",
    "mode",
    "backlight",
    "reset_hold_ms",
    "clock_hold_ns",
    "refresh_ms",
];

const MODES: &[&str] = &["blank", "normal", "all_on", "inverted"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml configuration at compile time
fn validate_config() {
    // Re-run if display.toml changes
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds display.toml for its panel settings.        ║\n\
            ║  Please create one in the lcd5110-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in display.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_display(&config);

    println!("cargo:warning=display.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate the [display] table
fn validate_display(config: &toml::Value) {
    let mut errors = Vec::new();

    if let Some(table) = config.as_table() {
        for (name, value) in table {
            if name != "display" && value.is_table() {
                errors.push(format!("Unsupported section [{}]", name));
            }
        }
    }

    let display = match config.get("display") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("display must be a table".to_string());
            report("Invalid display configuration", &errors)
        }
        None => {
            errors.push("Missing [display] section".to_string());
            report("Missing required sections in display.toml", &errors)
        }
    };

    for key in display.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            errors.push(format!("[display] unknown key '{}'", key));
        }
    }

    check_int(display, "contrast", 0, 255, &mut errors);
    check_int(display, "bias", 0, 7, &mut errors);
    check_int(display, "temperature_coefficient", 0, 3, &mut errors);
    check_int(display, "tc", 0, 3, &mut errors);
    check_int(display, "reset_hold_ms", 0, u32::MAX as i64, &mut errors);
    check_int(display, "clock_hold_ns", 0, u32::MAX as i64, &mut errors);
    check_int(display, "refresh_ms", 1, u32::MAX as i64, &mut errors);

    if let Some(toml::Value::Integer(contrast)) = display.get("contrast") {
        if *contrast > 0x7F {
            println!(
                "cargo:warning=display.toml: contrast {} will be clamped to 127",
                contrast
            );
        }
    }

    match display.get("mode") {
        None => {}
        Some(toml::Value::String(mode)) if MODES.contains(&mode.as_str()) => {}
        Some(_) => errors.push(format!("[display] mode must be one of {}", MODES.join(", "))),
    }

    match display.get("backlight") {
        None | Some(toml::Value::Boolean(_)) => {}
        Some(_) => errors.push("[display] backlight must be true or false".to_string()),
    }

    if !errors.is_empty() {
        report("Invalid display configuration", &errors);
    }
}

/// Require an optional integer key to lie in `min..=max`
fn check_int(
    table: &toml::map::Map<String, toml::Value>,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(_) => errors.push(format!("[display] {} must be {}-{}", key, min, max)),
    }
}

fn report(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
