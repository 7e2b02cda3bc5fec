//! Build script for fastio-firmware
//!
//! - Validates board.toml at compile time
//! - Generates `board_config.rs` with the board type and pin constants,
//!   so pin identities stay compile-time values in the firmware

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use fastio_core::config::{ButtonConfig, PulseConfig};
use fastio_hal_atmega328p::uno::{parse_pin_name, PINS};

/// Board variants and the type implementing each
const VARIANTS: &[(&str, &str)] = &[
    ("uno", "Uno"),
    ("duemilanove", "Duemilanove"),
    ("nano", "Nano"),
    ("mini", "Mini"),
    ("ethernet", "Ethernet"),
    ("bt", "Bt"),
    ("uno_wifi_dev_ed", "UnoWifiDevEd"),
    ("pro", "Pro"),
    ("pro_8mhz", "Pro8MHz"),
    ("fio", "Fio"),
    ("lilypad", "LilyPad"),
];

/// Validated board configuration
struct BoardConfig {
    variant: &'static str,
    board_type: &'static str,
    led: u16,
    button: u16,
    button_config: ButtonConfig,
    trigger: u16,
    pulse_config: PulseConfig,
}

fn main() {
    // Re-run if board.toml changes
    println!("cargo:rerun-if-changed=board.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let config = load_config(Path::new("board.toml"));
    let board = validate_config(&config);

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out_dir.join("board_config.rs"), generate(&board))
        .expect("failed to write board_config.rs");

    println!(
        "cargo:warning=board.toml validated successfully ({})",
        board.variant
    );
}

/// Read and parse board.toml
fn load_config(path: &Path) -> toml::Value {
    if !path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a board.toml configuration file.          ║\n\
            ║  Please create one in the fastio-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = match line.char_indices().nth(64) {
                Some(_) => {
                    let cut = line.char_indices().nth(61).map_or(line.len(), |(i, _)| i);
                    format!("{}...", &line[..cut])
                }
                None => line.to_string(),
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate all sections, collecting every error before failing
fn validate_config(config: &toml::Value) -> BoardConfig {
    let mut errors = Vec::new();

    let variant = config
        .get("board")
        .and_then(|b| b.get("variant"))
        .and_then(|v| v.as_str());
    let (variant, board_type) = match variant {
        Some(name) => match VARIANTS.iter().find(|(v, _)| *v == name) {
            Some(&(v, t)) => (v, t),
            None => {
                errors.push(format!("[board] unknown variant '{}'", name));
                VARIANTS[0]
            }
        },
        None => {
            errors.push("[board] missing 'variant'".to_string());
            VARIANTS[0]
        }
    };

    let led = pin_field(config, "led", &mut errors);
    let button = pin_field(config, "button", &mut errors);
    let trigger = pin_field(config, "trigger", &mut errors);
    let button_config = config
        .get("button")
        .cloned()
        .map(|section| section.try_into::<ButtonConfig>())
        .transpose()
        .unwrap_or_else(|e| {
            errors.push(format!("[button] {}", e.message()));
            None
        });
    let pulse_config = config
        .get("trigger")
        .cloned()
        .map(|section| section.try_into::<PulseConfig>())
        .transpose()
        .unwrap_or_else(|e| {
            errors.push(format!("[trigger] {}", e.message()));
            None
        });

    // Two handles on one pin would drive the same register bits
    let assigned = [("led", led), ("button", button), ("trigger", trigger)];
    for (i, (a_name, a)) in assigned.iter().enumerate() {
        for (b_name, b) in assigned.iter().skip(i + 1) {
            if a.is_some() && a == b {
                errors.push(format!("[{}] and [{}] use the same pin", a_name, b_name));
            }
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    let button_config = button_config.unwrap_or_default();
    if button_config.debounce_ms == 0 {
        println!("cargo:warning=[button] debounce_ms = 0 disables debouncing");
    }

    BoardConfig {
        variant,
        board_type,
        led: led.unwrap_or_default(),
        button: button.unwrap_or_default(),
        button_config,
        trigger: trigger.unwrap_or_default(),
        pulse_config: pulse_config.unwrap_or_default(),
    }
}

/// Resolve `[section] pin = "..."` against the pin table
fn pin_field(config: &toml::Value, section: &str, errors: &mut Vec<String>) -> Option<u16> {
    match config.get(section).and_then(|s| s.get("pin")) {
        Some(toml::Value::String(name)) => {
            let pin = parse_pin_name(name);
            if pin.is_none() {
                errors.push(format!("[{}] unknown pin '{}'", section, name));
            }
            pin
        }
        Some(_) => {
            errors.push(format!("[{}] pin must be a string", section));
            None
        }
        None => {
            errors.push(format!("[{}] missing 'pin'", section));
            None
        }
    }
}

/// Name of a pin value for comments in generated code
fn pin_name(pin: u16) -> &'static str {
    PINS.iter()
        .find(|&&(_, p)| p == pin)
        .map(|&(name, _)| name)
        .unwrap_or("?")
}

/// Render board_config.rs
fn generate(board: &BoardConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// Generated by build.rs from board.toml. Do not edit.");
    let _ = writeln!(out);
    let _ = writeln!(out, "/// Board variant `{}`", board.variant);
    let _ = writeln!(
        out,
        "pub type Board = fastio_hal_atmega328p::{};",
        board.board_type
    );
    for (name, pin) in [
        ("LED_PIN", board.led),
        ("BUTTON_PIN", board.button),
        ("TRIGGER_PIN", board.trigger),
    ] {
        let _ = writeln!(out, "/// {}", pin_name(pin));
        let _ = writeln!(out, "pub const {}: u16 = {:#x};", name, pin);
    }
    let _ = writeln!(
        out,
        "pub const BUTTON: fastio_core::config::ButtonConfig = fastio_core::config::ButtonConfig::new({});",
        board.button_config.debounce_ms
    );
    let _ = writeln!(
        out,
        "pub const PULSE: fastio_core::config::PulseConfig = fastio_core::config::PulseConfig::new({});",
        board.pulse_config.width_us
    );
    out
}
