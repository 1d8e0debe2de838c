//! Emulated pin-change interrupt lines
//!
//! The mask bit and the vector enable live in atomics. A firmware task owns
//! the pin and awaits edges through [`EdgeChannel::next_edge`], which only
//! reports edges that arrive while both switches are on. The level read at
//! each edge is kept for [`ButtonLevel`].

use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, Ordering};
use tripwire_hal::{EdgeInterrupt, InputPin};

/// Result of waiting on an edge line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeWait {
    /// An unmasked edge arrived
    Edge,
    /// The pull-up was released; the pin should be dropped
    Released,
}

/// Shared state of one emulated edge interrupt
pub struct EdgeChannel {
    vector: AtomicBool,
    mask: AtomicBool,
    released: AtomicBool,
    level: AtomicBool,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl EdgeChannel {
    pub const fn new() -> Self {
        Self {
            vector: AtomicBool::new(false),
            mask: AtomicBool::new(false),
            released: AtomicBool::new(false),
            level: AtomicBool::new(false),
            wake: Signal::new(),
        }
    }

    /// Handle controlling the mask bit
    pub fn line(&'static self) -> EdgeLine {
        EdgeLine { channel: self }
    }

    /// Handle reading the last sampled level
    pub fn level(&'static self) -> ButtonLevel {
        ButtonLevel { channel: self }
    }

    fn armed(&self) -> bool {
        self.vector.load(Ordering::Acquire) && self.mask.load(Ordering::Acquire)
    }

    fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }

    /// Wait for the next edge seen while the line is unmasked
    pub async fn next_edge(&self, input: &mut Input<'_>) -> EdgeWait {
        self.level.store(input.is_high(), Ordering::Release);

        loop {
            if self.is_released() {
                return EdgeWait::Released;
            }
            if !self.armed() {
                self.wake.wait().await;
                continue;
            }

            input.wait_for_any_edge().await;
            self.level.store(input.is_high(), Ordering::Release);

            if self.armed() {
                return EdgeWait::Edge;
            }
        }
    }
}

impl Default for EdgeChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Mask control for an [`EdgeChannel`]
pub struct EdgeLine {
    channel: &'static EdgeChannel,
}

impl EdgeInterrupt for EdgeLine {
    fn enable_vector(&mut self) {
        self.channel.vector.store(true, Ordering::Release);
        self.channel.wake.signal(());
    }

    fn set_mask(&mut self) {
        self.channel.mask.store(true, Ordering::Release);
        self.channel.wake.signal(());
    }

    fn clear_mask(&mut self) {
        self.channel.mask.store(false, Ordering::Release);
    }

    fn is_masked_in(&self) -> bool {
        self.channel.mask.load(Ordering::Acquire)
    }

    fn release_pull_up(&mut self) {
        self.channel.released.store(true, Ordering::Release);
        self.channel.wake.signal(());
    }
}

/// Level of the pin behind an [`EdgeChannel`], as sampled at the last edge
pub struct ButtonLevel {
    channel: &'static EdgeChannel,
}

impl InputPin for ButtonLevel {
    fn is_high(&self) -> bool {
        self.channel.level.load(Ordering::Acquire)
    }
}
