//! RP2040 implementations of the Tripwire HAL traits
//!
//! The RP2040 has no pin-change mask register, no overflow-driven tick
//! timers, no watchdog interrupt and no EEPROM, so several peripherals are
//! emulated on top of embassy:
//!
//! - GPIO outputs (direct)
//! - Blocking ADC channels (direct)
//! - Blocking UART console (direct)
//! - Edge lines: mask bit in an atomic, edges awaited by a task
//! - Tick lines: running flag in an atomic, ticks produced by a `Ticker`
//! - Fault timer: software countdown with interrupt-and-reset semantics,
//!   falling back to the hardware watchdog for the reset
//! - Flash: the partition behind the EEPROM emulation in tripwire-drivers
//!
//! Each emulated peripheral is a `static` channel; the handle implementing
//! the HAL trait is handed to the core, and an async driver loop runs in a
//! firmware task.

#![no_std]

pub mod adc;
pub mod eeprom;
pub mod gpio;
pub mod irq;
pub mod tick;
pub mod uart;
pub mod watchdog;

pub use adc::AdcInput;
pub use eeprom::{eeprom_flash, PicoFlash, EEPROM_RANGE};
pub use gpio::PinOutput;
pub use irq::{ButtonLevel, EdgeChannel, EdgeLine, EdgeWait};
pub use tick::{TickChannel, TickLine};
pub use uart::UartConsole;
pub use watchdog::{Expiry, SoftWatchdog, WatchdogChannel};
