//! Device drivers
//!
//! Concrete devices built on the traits in tripwire-hal:
//!
//! - LEDs and LED groups (the PWM-driven output device)
//! - TMP36 analog temperature sensor
//! - EEPROM emulation on NOR flash

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom;
pub mod led;
pub mod sensor;

pub use eeprom::{EepromImage, EepromStore, FlashEeprom, EEPROM_SIZE};
pub use led::{Led, LedGroup};
pub use sensor::Tmp36;
