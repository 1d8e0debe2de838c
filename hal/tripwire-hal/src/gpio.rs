//! Digital pin abstractions
//!
//! Output devices (LEDs, LED groups) and input buttons are driven through
//! these traits. Implementations own the port registers.

/// Logic level of a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl Level {
    /// The opposite level
    pub fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Digital output device
///
/// `set_high` activates the device, `set_low` deactivates it.
pub trait OutputPin {
    /// Drive the output to its active level
    fn set_high(&mut self);

    /// Drive the output to its inactive level
    fn set_low(&mut self);

    /// Read back the level currently driven
    fn is_set_high(&self) -> bool;

    /// Invert the driven level
    ///
    /// Implemented through the output latch: read back, then write the
    /// opposite level.
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Drive a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Level currently driven
    fn level(&self) -> Level {
        Level::from(self.is_set_high())
    }
}

/// Digital input
///
/// Reads are raw: no filtering is applied at this layer.
pub trait InputPin {
    /// Check if the pin reads high
    fn is_high(&self) -> bool;

    /// Check if the pin reads low
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
