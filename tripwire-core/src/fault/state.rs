//! Fault state machine
//!
//! `Normal` until the timeout count reaches the limit, then `Lockdown` for
//! the rest of the run. Nothing leaves `Lockdown`.

/// Operating mode of the fault subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultState {
    /// Timeouts are counted and persisted
    Normal,
    /// Limit reached; counting and persisting have stopped
    Lockdown,
}

/// Inputs to the fault state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultEvent {
    /// Persisted count loaded at boot
    Loaded { count: u8, max: u8 },
    /// Watchdog expired; `count` includes this timeout
    Timeout { count: u8, max: u8 },
    /// Watchdog fed in time
    Acknowledged,
}

impl FaultState {
    /// Check if the system is locked down
    pub fn is_lockdown(&self) -> bool {
        matches!(self, FaultState::Lockdown)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: FaultEvent) -> Self {
        use FaultEvent::*;
        use FaultState::*;

        match (self, event) {
            (Normal, Loaded { count, max }) if count >= max => Lockdown,
            (Normal, Timeout { count, max }) if count >= max => Lockdown,

            // Terminal
            (Lockdown, _) => Lockdown,

            // Default: stay in current state
            _ => self,
        }
    }
}
