//! Watchdog fault controller
//!
//! Owns the fault timer, the byte store holding the timeout counter, and
//! the lockdown state. The counter is only read and written from the
//! timeout handler and at boot, so no other context races it.

use tripwire_hal::{ByteStore, FaultTimer, NvmError, TextSink, WatchdogTimeout};

use super::state::{FaultEvent, FaultState};
use crate::config::{ConfigError, FaultConfig};

/// What a timeout did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeoutOutcome {
    /// Counted and persisted, still below the limit
    Counted(u8),
    /// This timeout reached the limit
    Lockdown(u8),
    /// Already locked down, nothing counted
    Ignored,
}

/// Persisted timeout counter with a one-way lockdown
pub struct WatchdogFaultController<W, S> {
    timer: W,
    store: S,
    config: FaultConfig,
    timeout: WatchdogTimeout,
    /// Last count loaded or computed
    count: u8,
    state: FaultState,
}

impl<W: FaultTimer, S: ByteStore> WatchdogFaultController<W, S> {
    /// Create a controller; the timer is left untouched until `boot`
    pub fn new(timer: W, store: S, config: FaultConfig) -> Result<Self, ConfigError> {
        let timeout = config
            .timeout()
            .ok_or(ConfigError::UnsupportedWatchdogTimeout)?;
        if config.max_timeouts == 0 {
            return Err(ConfigError::ZeroMaxTimeouts);
        }
        if !store.contains(config.counter_address) {
            return Err(ConfigError::CounterAddressOutOfRange);
        }

        Ok(Self {
            timer,
            store,
            config,
            timeout,
            count: 0,
            state: FaultState::Normal,
        })
    }

    /// Load the persisted counter and start the fault timer in interrupt mode
    ///
    /// A stored count already at the limit locks down immediately. Storage
    /// errors are returned after the timer has been started.
    pub fn boot(&mut self) -> Result<FaultState, NvmError> {
        let loaded = self.load();

        self.timer.init(self.timeout);
        self.timer.enable_interrupt();

        self.count = loaded?;
        self.state = self.state.transition(FaultEvent::Loaded {
            count: self.count,
            max: self.config.max_timeouts,
        });
        Ok(self.state)
    }

    fn load(&mut self) -> Result<u8, NvmError> {
        if self.config.reset_count_on_boot {
            self.store.write_byte(self.config.counter_address, 0)?;
        }
        self.store.read_byte(self.config.counter_address)
    }

    /// Acknowledge the watchdog for this period
    ///
    /// Feeds the timer only; the persisted count is left alone.
    pub fn reset(&mut self) {
        self.timer.feed();
        self.state = self.state.transition(FaultEvent::Acknowledged);
    }

    /// Handle a fault timer expiry
    ///
    /// Reports the new count on `console`. When the count reaches the limit
    /// the controller locks down, reports it, and calls `on_lockdown`; the
    /// final count is not persisted. The timer interrupt is re-enabled in
    /// every case, including storage failure.
    pub fn on_timeout<C, F>(
        &mut self,
        console: &mut C,
        on_lockdown: F,
    ) -> Result<TimeoutOutcome, NvmError>
    where
        C: TextSink,
        F: FnOnce(),
    {
        let outcome = self.count_timeout(console, on_lockdown);
        self.timer.enable_interrupt();
        outcome
    }

    fn count_timeout<C, F>(
        &mut self,
        console: &mut C,
        on_lockdown: F,
    ) -> Result<TimeoutOutcome, NvmError>
    where
        C: TextSink,
        F: FnOnce(),
    {
        if self.state.is_lockdown() {
            return Ok(TimeoutOutcome::Ignored);
        }

        let stored = self.store.read_byte(self.config.counter_address)?;
        let count = stored.saturating_add(1);
        self.count = count;

        console.emit("Number of timeouts: ");
        console.emit_unsigned(count as u32);
        console.new_line();

        self.state = self.state.transition(FaultEvent::Timeout {
            count,
            max: self.config.max_timeouts,
        });

        if self.state.is_lockdown() {
            console.emit_line("Maximum number of timeouts has elapsed!");
            console.emit_line("System lockdown!");
            on_lockdown();
            return Ok(TimeoutOutcome::Lockdown(count));
        }

        self.store.write_byte(self.config.counter_address, count)?;
        Ok(TimeoutOutcome::Counted(count))
    }

    /// Zero the persisted counter
    ///
    /// Takes effect at the next boot; a lockdown in progress is kept.
    pub fn clear_record(&mut self) -> Result<(), NvmError> {
        self.store.write_byte(self.config.counter_address, 0)?;
        if !self.state.is_lockdown() {
            self.count = 0;
        }
        Ok(())
    }

    /// Last count loaded or computed
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Check if the system is locked down
    pub fn is_lockdown(&self) -> bool {
        self.state.is_lockdown()
    }

    /// Current state
    pub fn state(&self) -> FaultState {
        self.state
    }

    /// Configured watchdog period
    pub fn timeout(&self) -> WatchdogTimeout {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SupervisorConfig;
    use crate::mock::{MockConsole, MockFaultTimer, MockStore, WdtOp};

    fn config() -> FaultConfig {
        SupervisorConfig::default().fault
    }

    fn controller(
        stored: u8,
    ) -> (
        WatchdogFaultController<MockFaultTimer, MockStore>,
        MockFaultTimer,
        MockStore,
    ) {
        let timer = MockFaultTimer::new();
        let store = MockStore::new();
        store.poke(100, stored);
        let ctrl =
            WatchdogFaultController::new(timer.clone(), store.clone(), config()).unwrap();
        (ctrl, timer, store)
    }

    #[test]
    fn test_rejects_address_outside_store() {
        let mut cfg = config();
        cfg.counter_address = 1024;
        let result = WatchdogFaultController::new(MockFaultTimer::new(), MockStore::new(), cfg);
        assert!(matches!(result, Err(ConfigError::CounterAddressOutOfRange)));
    }

    #[test]
    fn test_boot_starts_timer_in_interrupt_mode() {
        let (mut ctrl, timer, _) = controller(0);
        assert_eq!(ctrl.boot(), Ok(FaultState::Normal));
        assert_eq!(
            timer.ops(),
            [WdtOp::Init(WatchdogTimeout::Ms8192), WdtOp::EnableInterrupt]
        );
        assert!(timer.interrupt_enabled());
    }

    #[test]
    fn test_boot_loads_stored_count() {
        let (mut ctrl, _, _) = controller(3);
        ctrl.boot().unwrap();
        assert_eq!(ctrl.count(), 3);
        assert!(!ctrl.is_lockdown());
    }

    #[test]
    fn test_boot_at_limit_locks_down() {
        let (mut ctrl, _, _) = controller(5);
        assert_eq!(ctrl.boot(), Ok(FaultState::Lockdown));
    }

    #[test]
    fn test_boot_can_zero_counter() {
        let mut cfg = config();
        cfg.reset_count_on_boot = true;
        let store = MockStore::new();
        store.poke(100, 4);
        let mut ctrl =
            WatchdogFaultController::new(MockFaultTimer::new(), store.clone(), cfg).unwrap();
        ctrl.boot().unwrap();
        assert_eq!(ctrl.count(), 0);
        assert_eq!(store.peek(100), 0);
    }

    #[test]
    fn test_timeout_counts_and_persists() {
        let (mut ctrl, timer, store) = controller(0);
        ctrl.boot().unwrap();
        let mut console = MockConsole::new();

        let outcome = ctrl.on_timeout(&mut console, || panic!("no lockdown"));
        assert_eq!(outcome, Ok(TimeoutOutcome::Counted(1)));
        assert_eq!(store.peek(100), 1);
        assert_eq!(console.text(), "Number of timeouts: 1\n");
        assert_eq!(timer.ops().last(), Some(&WdtOp::EnableInterrupt));
    }

    #[test]
    fn test_lockdown_from_four() {
        let (mut ctrl, timer, store) = controller(4);
        ctrl.boot().unwrap();
        let mut console = MockConsole::new();
        let mut locked = 0;

        let outcome = ctrl.on_timeout(&mut console, || locked += 1);
        assert_eq!(outcome, Ok(TimeoutOutcome::Lockdown(5)));
        assert_eq!(locked, 1);
        assert!(ctrl.is_lockdown());
        assert_eq!(
            console.text(),
            "Number of timeouts: 5\nMaximum number of timeouts has elapsed!\nSystem lockdown!\n"
        );
        // Final count is not persisted
        assert_eq!(store.peek(100), 4);

        let writes = store.write_count();
        for _ in 0..3 {
            let outcome = ctrl.on_timeout(&mut console, || locked += 1);
            assert_eq!(outcome, Ok(TimeoutOutcome::Ignored));
        }
        assert_eq!(locked, 1);
        assert_eq!(store.write_count(), writes);
        assert_eq!(store.peek(100), 4);
        assert_eq!(ctrl.count(), 5);
        assert!(timer.interrupt_enabled());
    }

    #[test]
    fn test_acknowledge_feeds_without_clearing() {
        let (mut ctrl, timer, store) = controller(2);
        ctrl.boot().unwrap();
        ctrl.reset();
        assert_eq!(timer.ops().last(), Some(&WdtOp::Feed));
        assert_eq!(store.peek(100), 2);
        assert_eq!(ctrl.count(), 2);
    }

    #[test]
    fn test_lockdown_on_nth_missed_period() {
        let (mut ctrl, _, _) = controller(0);
        ctrl.boot().unwrap();
        let mut console = MockConsole::new();
        let max = config().max_timeouts;

        assert_eq!(
            ctrl.on_timeout(&mut console, || {}),
            Ok(TimeoutOutcome::Counted(1))
        );
        for _ in 1..max {
            ctrl.reset();
        }
        assert!(!ctrl.is_lockdown());

        for missed in 2..max {
            assert_eq!(
                ctrl.on_timeout(&mut console, || {}),
                Ok(TimeoutOutcome::Counted(missed))
            );
            assert!(!ctrl.is_lockdown());
        }
        assert_eq!(
            ctrl.on_timeout(&mut console, || {}),
            Ok(TimeoutOutcome::Lockdown(max))
        );
    }

    #[test]
    fn test_store_failure_still_rearms() {
        let (mut ctrl, timer, store) = controller(0);
        ctrl.boot().unwrap();
        store.fail_writes(true);
        let mut console = MockConsole::new();

        let outcome = ctrl.on_timeout(&mut console, || {});
        assert_eq!(outcome, Err(NvmError::WriteFailed));
        assert_eq!(timer.ops().last(), Some(&WdtOp::EnableInterrupt));
    }

    #[test]
    fn test_clear_record() {
        let (mut ctrl, _, store) = controller(3);
        ctrl.boot().unwrap();
        ctrl.clear_record().unwrap();
        assert_eq!(store.peek(100), 0);
        assert_eq!(ctrl.count(), 0);
    }
}
