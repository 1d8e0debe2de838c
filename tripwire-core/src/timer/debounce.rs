//! Debounce timer
//!
//! One-shot window armed by the edge handler. Only the tick handler counts
//! it; the edge handler only arms it while the input is masked, so the two
//! never race on the counter.

use tripwire_hal::TickSource;

use super::state::{ticks_for, TimerState};

/// One-shot suppression window over a hardware tick source
pub struct DebounceTimer<T> {
    source: T,
    state: TimerState,
    /// Set by `shutdown`, blocks re-arming
    retired: bool,
}

impl<T: TickSource> DebounceTimer<T> {
    /// Create a stopped timer covering `window_ms` of the source's ticks
    pub fn new(source: T, window_ms: u32) -> Self {
        let target = ticks_for(window_ms, source.tick_us());
        Self {
            source,
            state: TimerState::new(target),
            retired: false,
        }
    }

    /// Start the window from zero and enable the tick interrupt
    pub fn arm(&mut self) {
        if self.retired {
            return;
        }
        self.state.arm();
        self.source.start();
    }

    /// Record one tick interrupt
    pub fn count(&mut self) {
        self.state.count();
    }

    /// Check whether the window has passed
    pub fn elapsed(&self) -> bool {
        self.state.elapsed()
    }

    /// Stop the window and disable the tick interrupt
    pub fn clear(&mut self) {
        self.state.clear();
        self.source.stop();
    }

    /// Clear and refuse any later `arm`
    pub fn shutdown(&mut self) {
        self.clear();
        self.retired = true;
    }

    /// Check if a window is running
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Counter state
    pub fn state(&self) -> &TimerState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTick;

    #[test]
    fn test_target_from_tick_period() {
        let timer = DebounceTimer::new(MockTick::new(128), 300);
        assert_eq!(timer.state().target(), 2344);
    }

    #[test]
    fn test_arm_starts_source() {
        let tick = MockTick::new(1000);
        let mut timer = DebounceTimer::new(tick.clone(), 3);
        assert!(!tick.running());

        timer.arm();
        assert!(tick.running());
        assert!(timer.is_running());

        timer.count();
        timer.count();
        assert!(!timer.elapsed());
        timer.count();
        assert!(timer.elapsed());

        timer.clear();
        assert!(!tick.running());
        assert!(!timer.elapsed());
    }

    #[test]
    fn test_shutdown_blocks_rearm() {
        let tick = MockTick::new(1000);
        let mut timer = DebounceTimer::new(tick.clone(), 3);
        timer.arm();
        timer.shutdown();
        timer.arm();
        assert!(!timer.is_running());
        assert!(!tick.running());
    }
}
