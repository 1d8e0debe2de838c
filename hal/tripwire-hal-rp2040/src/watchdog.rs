//! Emulated interrupt-and-reset watchdog
//!
//! The RP2040 watchdog can only reset the chip. The countdown here runs in
//! software: on expiry with the interrupt enabled it clears the enable bit
//! and calls the timeout handler, like a watchdog interrupt; on expiry with
//! only the reset enabled it resets the chip through the hardware watchdog.

use embassy_rp::watchdog::Watchdog;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Duration};
use portable_atomic::{AtomicBool, AtomicU32, Ordering};
use tripwire_hal::{FaultTimer, WatchdogTimeout};

/// What the countdown did when it ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Expiry {
    /// Timeout handler called
    Interrupt,
    /// Chip reset requested
    Reset,
    /// Neither enabled; countdown restarted
    Ignored,
}

/// Shared state of the emulated watchdog
pub struct WatchdogChannel {
    enabled: AtomicBool,
    interrupt: AtomicBool,
    reset: AtomicBool,
    timeout_ms: AtomicU32,
    feed: Signal<CriticalSectionRawMutex, ()>,
}

impl WatchdogChannel {
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            interrupt: AtomicBool::new(false),
            reset: AtomicBool::new(false),
            timeout_ms: AtomicU32::new(0),
            feed: Signal::new(),
        }
    }

    /// Handle implementing [`FaultTimer`]
    pub fn timer(&'static self) -> SoftWatchdog {
        SoftWatchdog { channel: self }
    }

    fn feed(&self) {
        self.feed.signal(());
    }

    /// Driver loop
    ///
    /// `on_expiry` sees every expiry after the action was taken; the
    /// timeout handler runs inside `on_timeout`.
    pub async fn run(
        &self,
        mut hardware: Watchdog,
        mut on_timeout: impl FnMut(),
        mut on_expiry: impl FnMut(Expiry),
    ) -> ! {
        loop {
            if !self.enabled.load(Ordering::Acquire) {
                self.feed.wait().await;
                continue;
            }

            let period = Duration::from_millis(self.timeout_ms.load(Ordering::Acquire) as u64);
            if with_timeout(period, self.feed.wait()).await.is_ok() {
                continue;
            }
            if !self.enabled.load(Ordering::Acquire) {
                continue;
            }

            let expiry = if self.interrupt.swap(false, Ordering::AcqRel) {
                on_timeout();
                Expiry::Interrupt
            } else if self.reset.load(Ordering::Acquire) {
                Expiry::Reset
            } else {
                Expiry::Ignored
            };

            on_expiry(expiry);
            if expiry == Expiry::Reset {
                hardware.trigger_reset();
            }
        }
    }
}

impl Default for WatchdogChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Fault timer handle for a [`WatchdogChannel`]
///
/// Every operation feeds the countdown first.
pub struct SoftWatchdog {
    channel: &'static WatchdogChannel,
}

impl FaultTimer for SoftWatchdog {
    fn init(&mut self, timeout: WatchdogTimeout) {
        let ch = self.channel;
        ch.timeout_ms.store(timeout.as_millis(), Ordering::Release);
        ch.interrupt.store(false, Ordering::Release);
        ch.reset.store(true, Ordering::Release);
        ch.enabled.store(true, Ordering::Release);
        ch.feed();
    }

    fn feed(&mut self) {
        self.channel.feed();
    }

    fn enable_interrupt(&mut self) {
        self.channel.feed();
        self.channel.interrupt.store(true, Ordering::Release);
    }

    fn disable_interrupt(&mut self) {
        self.channel.feed();
        self.channel.interrupt.store(false, Ordering::Release);
    }

    fn enable_system_reset(&mut self) {
        self.channel.feed();
        self.channel.reset.store(true, Ordering::Release);
    }

    fn disable_system_reset(&mut self) {
        self.channel.feed();
        self.channel.reset.store(false, Ordering::Release);
    }

    fn clear(&mut self) {
        let ch = self.channel;
        ch.feed();
        ch.enabled.store(false, Ordering::Release);
        ch.interrupt.store(false, Ordering::Release);
        ch.reset.store(false, Ordering::Release);
    }
}
