//! Edge-detect input controller

use tripwire_hal::{EdgeInterrupt, InputPin};

/// Debounce state of an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputState {
    /// Constructed, interrupt not yet enabled
    Idle,
    /// Interrupt enabled, waiting for an edge
    Armed,
    /// Interrupt masked while a debounce window runs
    Suppressed,
    /// Permanently cleared; only re-initialisation brings it back
    Disabled,
}

/// Edge-triggered digital input
///
/// Owns the input pin and its mask bit. `Armed → Suppressed` on an edge,
/// `Suppressed → Armed` when the debounce window elapses. `clear()` moves
/// to `Disabled` from any state.
pub struct EdgeInput<P, L> {
    pin: P,
    line: L,
    /// Board pin number, `None` once cleared
    id: Option<u8>,
    /// Pressed reads low (button to ground with pull-up)
    active_low: bool,
    state: InputState,
}

impl<P: InputPin, L: EdgeInterrupt> EdgeInput<P, L> {
    /// Create an input with its interrupt disabled
    pub fn new(pin: P, line: L, id: u8, active_low: bool) -> Self {
        Self {
            pin,
            line,
            id: Some(id),
            active_low,
            state: InputState::Idle,
        }
    }

    /// Board pin number, `None` after [`clear`](Self::clear)
    pub fn id(&self) -> Option<u8> {
        self.id
    }

    /// Current debounce state
    pub fn state(&self) -> InputState {
        self.state
    }

    /// Check whether the mask bit is set
    pub fn interrupt_enabled(&self) -> bool {
        self.state != InputState::Disabled && self.line.is_masked_in()
    }

    /// Enable interrupts globally and set this pin's mask bit
    ///
    /// No effect once cleared, nor during a suppression window: only
    /// [`release`](Self::release) ends the window.
    pub fn enable_interrupt(&mut self) {
        if matches!(self.state, InputState::Disabled | InputState::Suppressed) {
            return;
        }
        self.arm();
    }

    fn arm(&mut self) {
        self.line.enable_vector();
        self.line.set_mask();
        self.state = InputState::Armed;
    }

    /// Clear this pin's mask bit, leaving the shared vector enabled
    pub fn disable_interrupt(&mut self) {
        self.line.clear_mask();
    }

    /// Flip the mask bit based on its current value
    ///
    /// Stays masked while suppressed.
    pub fn toggle_interrupt(&mut self) {
        if self.interrupt_enabled() {
            self.disable_interrupt();
        } else {
            self.enable_interrupt();
        }
    }

    /// Raw level read, no filtering
    pub fn is_pressed(&self) -> bool {
        if self.state == InputState::Disabled {
            return false;
        }
        self.pin.is_high() != self.active_low
    }

    /// Enter the suppression window after an edge
    ///
    /// Returns false, doing nothing, unless the input was armed.
    pub fn suppress(&mut self) -> bool {
        if self.state != InputState::Armed {
            return false;
        }
        self.disable_interrupt();
        self.state = InputState::Suppressed;
        true
    }

    /// Leave the suppression window
    ///
    /// Returns false, doing nothing, unless the input was suppressed.
    pub fn release(&mut self) -> bool {
        if self.state != InputState::Suppressed {
            return false;
        }
        self.arm();
        true
    }

    /// Disable the interrupt, release the pull-up and forget the pin
    ///
    /// Irreversible. Calling it again is a no-op.
    pub fn clear(&mut self) {
        if self.state == InputState::Disabled {
            return;
        }
        self.disable_interrupt();
        self.line.release_pull_up();
        self.id = None;
        self.state = InputState::Disabled;
    }
}
