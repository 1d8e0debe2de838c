//! Watchdog fault handling
//!
//! Counts unacknowledged watchdog periods in non-volatile storage and
//! locks the system down once the count reaches its limit.

pub mod controller;
pub mod state;

pub use controller::{TimeoutOutcome, WatchdogFaultController};
pub use state::{FaultEvent, FaultState};
