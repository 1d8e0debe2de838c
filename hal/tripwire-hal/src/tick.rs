//! Periodic timer interrupt source
//!
//! The hardware half of a software timer: a counter that raises an
//! interrupt every fixed tick period (overflow or compare match) once
//! started. Counting those interrupts is the core's job.

/// Timer interrupt source with a fixed tick period
pub trait TickSource {
    /// Tick period in microseconds, fixed by the prescaler/compare setup
    fn tick_us(&self) -> u32;

    /// Enable the timer interrupt
    fn start(&mut self);

    /// Disable the timer interrupt
    fn stop(&mut self);

    /// Check if the timer interrupt is enabled
    fn is_running(&self) -> bool;
}
