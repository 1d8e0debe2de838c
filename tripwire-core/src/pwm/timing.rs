//! On/off split of one PWM period

/// High and low phase durations of one period (µs)
///
/// `on_us + off_us` always equals the period it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    pub on_us: u32,
    pub off_us: u32,
}

impl PwmTiming {
    /// Split `period_us` by an explicit duty fraction
    ///
    /// Returns `None` for fractions outside `[0, 1]` (including NaN).
    pub fn from_duty(duty: f32, period_us: u32) -> Option<Self> {
        if !(0.0..=1.0).contains(&duty) {
            return None;
        }
        // Round half up
        let on_us = ((period_us as f64) * (duty as f64) + 0.5) as u32;
        Some(Self::split(on_us, period_us))
    }

    /// Split `period_us` by an analog reading out of `max`
    ///
    /// Integer arithmetic, round half up. Readings above `max` count as
    /// full scale; a zero `max` gives a zero duty.
    pub fn from_reading(reading: u16, max: u16, period_us: u32) -> Self {
        if max == 0 {
            return Self::split(0, period_us);
        }
        let reading = reading.min(max) as u64;
        let max = max as u64;
        let on_us = (reading * period_us as u64 * 2 + max) / (2 * max);
        Self::split(on_us as u32, period_us)
    }

    fn split(on_us: u32, period_us: u32) -> Self {
        let on_us = on_us.min(period_us);
        Self {
            on_us,
            off_us: period_us - on_us,
        }
    }

    /// Full period length (µs)
    pub fn period_us(&self) -> u32 {
        self.on_us + self.off_us
    }
}
