//! Heartbeat timer
//!
//! Periodic timer behaving like a compare-match (CTC) counter: it fires
//! once per period and immediately starts the next one.

use tripwire_hal::TickSource;

use super::state::{ticks_for, TimerState};

/// Periodic timer over a hardware tick source
pub struct HeartbeatTimer<T> {
    source: T,
    state: TimerState,
}

impl<T: TickSource> HeartbeatTimer<T> {
    /// Create a stopped timer firing every `period_ms`
    pub fn new(source: T, period_ms: u32) -> Self {
        let target = ticks_for(period_ms, source.tick_us());
        Self {
            source,
            state: TimerState::new(target),
        }
    }

    /// Start the timer unless it is already running
    pub fn start(&mut self) {
        if self.state.is_running() {
            return;
        }
        self.state.arm();
        self.source.start();
    }

    /// Stop the timer
    pub fn stop(&mut self) {
        self.state.clear();
        self.source.stop();
    }

    /// Record one tick interrupt
    ///
    /// Returns true when a period completed; the next period starts at once.
    pub fn count(&mut self) -> bool {
        self.state.count();
        if self.state.elapsed() {
            self.state.restart();
            true
        } else {
            false
        }
    }

    /// Check if the timer is running
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
    fn test_fires_every_period() {
        let mut timer = HeartbeatTimer::new(MockTick::new(10_000), 50);
        assert_eq!(timer.state().target(), 5);
        timer.start();

        let fired: usize = (0..20).filter(|_| timer.count()).count();
        assert_eq!(fired, 4);
    }

    #[test]
    fn test_stopped_never_fires() {
        let mut timer = HeartbeatTimer::new(MockTick::new(10_000), 50);
        for _ in 0..20 {
            assert!(!timer.count());
        }
    }

    #[test]
    fn test_start_when_running_keeps_phase() {
        let tick = MockTick::new(10_000);
        let mut timer = HeartbeatTimer::new(tick.clone(), 50);
        timer.start();
        timer.count();
        timer.count();
        timer.start();
        assert_eq!(timer.state().counter(), 2);
        assert!(tick.running());
    }

    #[test]
    fn test_stop_disables_source() {
        let tick = MockTick::new(10_000);
        let mut timer = HeartbeatTimer::new(tick.clone(), 50);
        timer.start();
        timer.stop();
        assert!(!tick.running());
        assert!(!timer.is_running());
    }
}
