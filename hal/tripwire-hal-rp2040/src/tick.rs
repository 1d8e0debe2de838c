//! Emulated periodic timer interrupts
//!
//! Starting a [`TickLine`] sets the running flag and wakes the driver loop
//! in [`TickChannel::run`], which calls its handler once per tick period
//! until the line is stopped.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use portable_atomic::{AtomicBool, Ordering};
use tripwire_hal::TickSource;

/// Shared state of one emulated tick interrupt
pub struct TickChannel {
    running: AtomicBool,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl TickChannel {
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            wake: Signal::new(),
        }
    }

    /// Handle with a fixed tick period
    pub fn line(&'static self, tick_us: u32) -> TickLine {
        TickLine {
            channel: self,
            tick_us: tick_us.max(1),
        }
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Driver loop: call `on_tick` every `tick_us` while running
    ///
    /// The tick phase restarts at every start, like a timer whose counter
    /// is cleared when its interrupt is enabled.
    pub async fn run(&self, tick_us: u32, mut on_tick: impl FnMut()) -> ! {
        let period = Duration::from_micros(tick_us.max(1) as u64);

        loop {
            while !self.is_running() {
                self.wake.wait().await;
            }

            let mut ticker = Ticker::every(period);
            while self.is_running() {
                ticker.next().await;
                if self.is_running() {
                    on_tick();
                }
            }
        }
    }
}

impl Default for TickChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Start/stop control for a [`TickChannel`]
pub struct TickLine {
    channel: &'static TickChannel,
    tick_us: u32,
}

impl TickSource for TickLine {
    fn tick_us(&self) -> u32 {
        self.tick_us
    }

    fn start(&mut self) {
        self.channel.running.store(true, Ordering::Release);
        self.channel.wake.signal(());
    }

    fn stop(&mut self) {
        self.channel.running.store(false, Ordering::Release);
    }

    fn is_running(&self) -> bool {
        self.channel.is_running()
    }
}
