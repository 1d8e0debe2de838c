//! Tick counter shared by all software timers

/// Number of ticks of `tick_us` needed to cover `duration_ms`
///
/// Rounds up so the window is never shorter than requested, and never
/// returns less than one tick. A zero tick period yields the one-tick
/// minimum; configuration validation rejects it before it gets here.
pub fn ticks_for(duration_ms: u32, tick_us: u32) -> u32 {
    if tick_us == 0 {
        return 1;
    }
    let duration_us = duration_ms as u64 * 1000;
    let ticks = duration_us.div_ceil(tick_us as u64);
    ticks.clamp(1, u32::MAX as u64) as u32
}

/// Counter state of one software timer
///
/// `counter` only advances while `running`; `target` is fixed at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerState {
    counter: u32,
    target: u32,
    running: bool,
}

impl TimerState {
    /// Create a stopped timer that elapses after `target` ticks
    pub const fn new(target: u32) -> Self {
        Self {
            counter: 0,
            target: if target == 0 { 1 } else { target },
            running: false,
        }
    }

    /// Start counting from zero
    pub fn arm(&mut self) {
        self.counter = 0;
        self.running = true;
    }

    /// Record one tick
    pub fn count(&mut self) {
        if self.running {
            self.counter = self.counter.saturating_add(1);
        }
    }

    /// Check whether the target has been reached
    ///
    /// Stays true until [`clear`](Self::clear) or [`arm`](Self::arm).
    pub fn elapsed(&self) -> bool {
        self.running && self.counter >= self.target
    }

    /// Restart the count without stopping
    pub fn restart(&mut self) {
        self.counter = 0;
    }

    /// Stop counting and zero the counter
    pub fn clear(&mut self) {
        self.counter = 0;
        self.running = false;
    }

    /// Check if the timer is counting
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks counted since arming
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Ticks needed to elapse
    pub fn target(&self) -> u32 {
        self.target
    }
}
