//! Configuration type definitions

use tripwire_hal::WatchdogTimeout;

use crate::timer::ticks_for;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest PWM period accepted (1 s)
pub const MAX_PWM_PERIOD_US: u32 = 1_000_000;

/// Default console speed
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// Console speeds accepted
pub const BAUDRATE_RANGE: core::ops::RangeInclusive<u32> = 300..=921_600;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A timer has a zero tick period
    ZeroTickPeriod,
    /// A timer has a zero duration
    ZeroDuration,
    /// Maximum timeout count is zero
    ZeroMaxTimeouts,
    /// Watchdog period is not one the prescaler supports
    UnsupportedWatchdogTimeout,
    /// Counter address lies outside the byte store
    CounterAddressOutOfRange,
    /// PWM period is zero or longer than [`MAX_PWM_PERIOD_US`]
    InvalidPwmPeriod,
    /// Console speed outside [`BAUDRATE_RANGE`]
    InvalidBaudrate,
}

/// Software timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimerConfig {
    /// Desired real-world duration (ms)
    pub duration_ms: u32,
    /// Hardware interrupt period (µs)
    pub tick_us: u32,
}

impl TimerConfig {
    /// Number of ticks covering `duration_ms`
    pub fn target_ticks(&self) -> u32 {
        ticks_for(self.duration_ms, self.tick_us)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_us == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}

/// Watchdog fault controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaultConfig {
    /// Byte address of the persisted timeout counter
    pub counter_address: u16,
    /// Timeout count at which the system locks down
    pub max_timeouts: u8,
    /// Watchdog period (ms), one of the [`WatchdogTimeout`] values
    pub timeout_ms: u32,
    /// Zero the persisted counter at every boot
    pub reset_count_on_boot: bool,
}

impl FaultConfig {
    /// Watchdog period as a prescaler setting
    pub fn timeout(&self) -> Option<WatchdogTimeout> {
        WatchdogTimeout::from_millis(self.timeout_ms)
    }
}

/// Software PWM configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PwmConfig {
    /// Period (µs)
    pub period_us: u32,
}

/// Complete supervisor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SupervisorConfig {
    /// Debounce suppression window
    pub debounce: TimerConfig,
    /// Heartbeat indicator period
    pub heartbeat: TimerConfig,
    /// Fault counting and lockdown
    pub fault: FaultConfig,
    /// Software PWM output
    pub pwm: PwmConfig,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            debounce: TimerConfig {
                duration_ms: 300,
                tick_us: 128,
            },
            heartbeat: TimerConfig {
                duration_ms: 50,
                tick_us: 128,
            },
            fault: FaultConfig {
                counter_address: 100,
                max_timeouts: 5,
                timeout_ms: 8192,
                reset_count_on_boot: false,
            },
            pwm: PwmConfig { period_us: 10_000 },
        }
    }
}

impl SupervisorConfig {
    /// Check every field, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.debounce.validate()?;
        self.heartbeat.validate()?;

        if self.fault.max_timeouts == 0 {
            return Err(ConfigError::ZeroMaxTimeouts);
        }
        if self.fault.timeout().is_none() {
            return Err(ConfigError::UnsupportedWatchdogTimeout);
        }

        if self.pwm.period_us == 0 || self.pwm.period_us > MAX_PWM_PERIOD_US {
            return Err(ConfigError::InvalidPwmPeriod);
        }

        Ok(())
    }
}

/// Text console configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsoleConfig {
    /// Line speed (baud)
    pub baudrate: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

/// Everything a configuration file sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigFile {
    pub supervisor: SupervisorConfig,
    pub console: ConsoleConfig,
}

impl ConfigFile {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.supervisor.validate()?;
        if !BAUDRATE_RANGE.contains(&self.console.baudrate) {
            return Err(ConfigError::InvalidBaudrate);
        }
        Ok(())
    }
}
