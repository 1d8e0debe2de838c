//! Flash partition backing the emulated EEPROM
//!
//! The last 16 KiB of flash are left out of the program region in
//! `memory.x` and handed to the EEPROM emulation in tripwire-drivers,
//! which keeps its image there as a wear-levelled sequential-storage map.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;

/// Flash size on the Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Erase pages given to the EEPROM partition
pub const EEPROM_PAGES: usize = 4;

/// Size of the EEPROM partition
pub const EEPROM_PARTITION_SIZE: usize = EEPROM_PAGES * ERASE_SIZE;

/// Offset of the EEPROM partition
pub const EEPROM_PARTITION_START: usize = FLASH_SIZE - EEPROM_PARTITION_SIZE;

/// Flash range of the EEPROM partition
pub const EEPROM_RANGE: core::ops::Range<u32> =
    (EEPROM_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// On-board flash in async mode
pub type PicoFlash<'d> = Flash<'d, FLASH, Async, FLASH_SIZE>;

/// Take the flash for the EEPROM partition
pub fn eeprom_flash<'d>(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> PicoFlash<'d> {
    Flash::new(flash, dma)
}
