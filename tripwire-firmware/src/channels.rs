//! Statics shared between the main loop and the vector tasks
//!
//! The supervisor lives in a critical-section cell. The EEPROM image and
//! the emulated peripheral channels connect the handles it owns to the
//! tasks that drive them.

use tripwire_core::{Shared, Supervisor};
use tripwire_drivers::EepromImage;
use tripwire_hal_rp2040::{EdgeChannel, TickChannel, WatchdogChannel};

use crate::board::PicoBoard;

/// Coordination state, initialised once at boot
pub static SUPERVISOR: Shared<Supervisor<PicoBoard>> = Shared::new();

/// RAM image of the emulated EEPROM, committed to flash by its own task
pub static EEPROM: EepromImage = EepromImage::new();

/// Button pin-change line
pub static BUTTON_EDGE: EdgeChannel = EdgeChannel::new();

/// Debounce timer ticks
pub static DEBOUNCE_TICK: TickChannel = TickChannel::new();

/// Heartbeat timer ticks
pub static HEARTBEAT_TICK: TickChannel = TickChannel::new();

/// Fault timer countdown
pub static WATCHDOG: WatchdogChannel = WatchdogChannel::new();
