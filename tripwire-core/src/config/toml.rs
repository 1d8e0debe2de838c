//! Minimal TOML parser for the configuration file
//!
//! Handles only the subset the configuration file uses, not all of TOML.
//!
//! Supported features:
//! - [section] headers
//! - key = value pairs (integer, boolean)
//! - Comments (# ...), including trailing ones
//!
//! Keys missing from the file keep their default values.

use super::types::ConfigFile;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value of the wrong type or out of range for its field
    InvalidValue,
    /// Line is neither a header nor a key = value pair
    InvalidLine,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Debounce,
    Heartbeat,
    Watchdog,
    Pwm,
    Console,
}

/// Parse the configuration text
pub fn parse_config(input: &str) -> Result<ConfigFile, ParseError> {
    let mut config = ConfigFile::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "debounce" => Ok(Section::Debounce),
        "heartbeat" => Ok(Section::Heartbeat),
        "watchdog" => Ok(Section::Watchdog),
        "pwm" => Ok(Section::Pwm),
        "console" => Ok(Section::Console),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ConfigFile,
) -> Result<(), ParseError> {
    let sup = &mut config.supervisor;

    match (section, key) {
        (Section::Debounce, "duration_ms") => sup.debounce.duration_ms = parse_int(value)?,
        (Section::Debounce, "tick_us") => sup.debounce.tick_us = parse_int(value)?,

        (Section::Heartbeat, "duration_ms") => sup.heartbeat.duration_ms = parse_int(value)?,
        (Section::Heartbeat, "tick_us") => sup.heartbeat.tick_us = parse_int(value)?,

        (Section::Watchdog, "timeout_ms") => sup.fault.timeout_ms = parse_int(value)?,
        (Section::Watchdog, "max_timeouts") => sup.fault.max_timeouts = parse_int(value)?,
        (Section::Watchdog, "counter_address") => sup.fault.counter_address = parse_int(value)?,
        (Section::Watchdog, "reset_count_on_boot") => {
            sup.fault.reset_count_on_boot = parse_bool(value)?
        }

        (Section::Pwm, "period_us") => sup.pwm.period_us = parse_int(value)?,

        (Section::Console, "baudrate") => config.console.baudrate = parse_int(value)?,

        _ => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let shipped = include_str!("../../../tripwire-firmware/firmware.toml");
        let config = parse_config(shipped).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_overrides() {
        let input = "
            [watchdog]
            timeout_ms = 1024   # shorter for bench tests
            max_timeouts = 3
            reset_count_on_boot = true

            [pwm]
            period_us = 2000
        ";
        let config = parse_config(input).unwrap();
        assert_eq!(config.supervisor.fault.timeout_ms, 1024);
        assert_eq!(config.supervisor.fault.max_timeouts, 3);
        assert!(config.supervisor.fault.reset_count_on_boot);
        assert_eq!(config.supervisor.pwm.period_us, 2000);
        assert_eq!(config.supervisor.debounce.duration_ms, 300);
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(parse_config("[stepper]"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[pwm"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_key_outside_section() {
        assert_eq!(parse_config("period_us = 10"), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_bad_values() {
        assert_eq!(
            parse_config("[watchdog]\nmax_timeouts = 300"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[watchdog]\nreset_count_on_boot = yes"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_config("[pwm]\nperiod_us"), Err(ParseError::InvalidLine));
    }

    #[test]
    fn test_console_speed() {
        let config = parse_config("[console]\nbaudrate = 115200").unwrap();
        assert_eq!(config.console.baudrate, 115_200);
        assert_eq!(config.supervisor, crate::config::SupervisorConfig::default());
    }
}
