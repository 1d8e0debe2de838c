//! Watchdog fault timer abstraction
//!
//! The fault timer runs in "interrupt and reset" mode: on expiry it first
//! raises an interrupt and clears its own interrupt-enable bit; a second
//! expiry without re-enabling the interrupt resets the system.

/// Watchdog timeout periods supported by the prescaler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogTimeout {
    Ms16,
    Ms32,
    Ms64,
    Ms128,
    Ms256,
    Ms512,
    Ms1024,
    Ms2048,
    Ms4096,
    Ms8192,
}

impl WatchdogTimeout {
    /// All supported periods, shortest first
    pub const ALL: [WatchdogTimeout; 10] = [
        WatchdogTimeout::Ms16,
        WatchdogTimeout::Ms32,
        WatchdogTimeout::Ms64,
        WatchdogTimeout::Ms128,
        WatchdogTimeout::Ms256,
        WatchdogTimeout::Ms512,
        WatchdogTimeout::Ms1024,
        WatchdogTimeout::Ms2048,
        WatchdogTimeout::Ms4096,
        WatchdogTimeout::Ms8192,
    ];

    /// Period in milliseconds
    pub fn as_millis(self) -> u32 {
        16 << (self as u32)
    }

    /// Look up a period by its exact millisecond value
    pub fn from_millis(ms: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_millis() == ms)
    }
}

/// Hardware fault timer
///
/// Every operation except `feed` feeds the timer first, so reconfiguring
/// it never races an expiry.
pub trait FaultTimer {
    /// Feed the timer and start it with `timeout` in system-reset mode
    fn init(&mut self, timeout: WatchdogTimeout);

    /// Restart the countdown ("no fault this period")
    fn feed(&mut self);

    /// Enable the timeout interrupt
    fn enable_interrupt(&mut self);

    /// Disable the timeout interrupt
    fn disable_interrupt(&mut self);

    /// Enable reset on expiry
    fn enable_system_reset(&mut self);

    /// Disable reset on expiry
    fn disable_system_reset(&mut self);

    /// Stop the timer entirely
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_values() {
        assert_eq!(WatchdogTimeout::Ms16.as_millis(), 16);
        assert_eq!(WatchdogTimeout::Ms1024.as_millis(), 1024);
        assert_eq!(WatchdogTimeout::Ms8192.as_millis(), 8192);
    }

    #[test]
    fn test_from_millis() {
        assert_eq!(WatchdogTimeout::from_millis(8192), Some(WatchdogTimeout::Ms8192));
        assert_eq!(WatchdogTimeout::from_millis(128), Some(WatchdogTimeout::Ms128));
        assert_eq!(WatchdogTimeout::from_millis(100), None);
    }
}
