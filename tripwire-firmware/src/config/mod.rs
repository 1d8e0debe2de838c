//! Configuration loading
//!
//! The TOML file is compiled into the firmware; a parse or validation
//! failure falls back to the built-in defaults.

use defmt::*;
use tripwire_core::config::{parse_config, ConfigError, ConfigFile};
use tripwire_drivers::EEPROM_SIZE;

/// Validate against the core rules and this board's EEPROM size
pub fn validate(config: &ConfigFile) -> Result<(), ConfigError> {
    config.validate()?;
    if config.supervisor.fault.counter_address as usize >= EEPROM_SIZE {
        return Err(ConfigError::CounterAddressOutOfRange);
    }
    Ok(())
}

/// Parse and validate `source`, falling back to defaults
pub fn load(source: &str) -> ConfigFile {
    let config = match parse_config(source) {
        Ok(config) => config,
        Err(e) => {
            error!("Config parse error: {}, using defaults", e);
            return ConfigFile::default();
        }
    };

    match validate(&config) {
        Ok(()) => {
            info!("Configuration loaded");
            config
        }
        Err(e) => {
            error!("Config invalid: {}, using defaults", e);
            ConfigFile::default()
        }
    }
}
