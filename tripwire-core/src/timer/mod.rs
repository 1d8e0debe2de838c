//! Software timers driven by hardware tick interrupts
//!
//! A [`TimerState`] counts tick interrupts toward a fixed target. The
//! debounce timer latches once its window has elapsed; the heartbeat timer
//! re-triggers every period like a timer in CTC mode.

pub mod debounce;
pub mod heartbeat;
pub mod state;

pub use debounce::DebounceTimer;
pub use heartbeat::HeartbeatTimer;
pub use state::{ticks_for, TimerState};
