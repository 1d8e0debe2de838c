//! Build script for tripwire-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates firmware.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Watchdog periods the prescaler supports
const WATCHDOG_PERIODS_MS: [i64; 10] = [16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192];

/// Size of the emulated EEPROM
const EEPROM_SIZE: i64 = 1024;

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

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate firmware.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=firmware.toml");

    let config_path = Path::new("firmware.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read firmware.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in firmware.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_timer(&config, "debounce", &mut errors);
    validate_timer(&config, "heartbeat", &mut errors);
    validate_watchdog(&config, &mut errors);
    validate_pwm(&config, &mut errors);
    validate_console(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in firmware.toml", &errors);
    }

    println!("cargo:warning=firmware.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => {
            errors.push(format!("Missing [{}] section", name));
            None
        }
    }
}

/// Check an optional integer field against an inclusive range
fn check_int(
    table: &toml::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if *v < min || *v > max => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

fn validate_timer(config: &toml::Value, name: &str, errors: &mut Vec<String>) {
    let Some(table) = section(config, name, errors) else {
        return;
    };
    check_int(table, name, "duration_ms", 1, u32::MAX as i64, errors);
    check_int(table, name, "tick_us", 1, u32::MAX as i64, errors);
}

fn validate_watchdog(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = section(config, "watchdog", errors) else {
        return;
    };

    match table.get("timeout_ms") {
        Some(toml::Value::Integer(ms)) if !WATCHDOG_PERIODS_MS.contains(ms) => {
            errors.push(
                "[watchdog] timeout_ms must be a power of two from 16 to 8192".to_string(),
            );
        }
        Some(toml::Value::Integer(_)) | None => {}
        Some(_) => errors.push("[watchdog] timeout_ms must be an integer".to_string()),
    }

    check_int(table, "watchdog", "max_timeouts", 1, 255, errors);
    check_int(table, "watchdog", "counter_address", 0, EEPROM_SIZE - 1, errors);

    if let Some(v) = table.get("reset_count_on_boot") {
        if !v.is_bool() {
            errors.push("[watchdog] reset_count_on_boot must be true or false".to_string());
        }
    }
}

fn validate_pwm(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = section(config, "pwm", errors) else {
        return;
    };
    check_int(table, "pwm", "period_us", 1, 1_000_000, errors);
}

fn validate_console(config: &toml::Value, errors: &mut Vec<String>) {
    // Optional: defaults to 9600 baud
    if let Some(toml::Value::Table(table)) = config.get("console") {
        check_int(table, "console", "baudrate", 300, 921_600, errors);
    }
}
