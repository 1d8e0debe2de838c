//! Blocking software PWM generator

use embedded_hal::delay::DelayNs;
use tripwire_hal::{AnalogInput, OutputPin};

use super::timing::PwmTiming;

/// Software PWM channel bound to an output device and an analog input
///
/// A cycle can run in one call ([`run`](Self::run)) or in two phases
/// ([`begin_pulse`](Self::begin_pulse) / [`end_pulse`](Self::end_pulse))
/// when the caller has to wait between them without holding a lock.
pub struct SoftPwm<O, A> {
    /// `None` after teardown
    output: Option<O>,
    input: A,
    period_us: u32,
    enabled: bool,
}

impl<O: OutputPin, A: AnalogInput> SoftPwm<O, A> {
    /// Create an enabled channel
    pub fn new(output: O, input: A, period_us: u32) -> Self {
        Self {
            output: Some(output),
            input,
            period_us,
            enabled: true,
        }
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disable and force the output low immediately
    pub fn disable(&mut self) {
        self.enabled = false;
        if let Some(output) = self.output.as_mut() {
            output.set_low();
        }
    }

    pub fn toggle(&mut self) {
        if self.enabled {
            self.disable();
        } else {
            self.enable();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled && self.output.is_some()
    }

    pub fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Change the period; zero is ignored
    pub fn set_period(&mut self, period_us: u32) {
        if period_us > 0 {
            self.period_us = period_us;
        }
    }

    /// Timing for the current analog reading
    pub fn timing(&mut self) -> PwmTiming {
        let max = self.input.max_value();
        let reading = self.input.read();
        PwmTiming::from_reading(reading, max, self.period_us)
    }

    /// Sample the input and drive the output high
    ///
    /// Returns the timing to wait out, or `None` when disabled.
    pub fn begin_pulse(&mut self) -> Option<PwmTiming> {
        if !self.is_enabled() {
            return None;
        }
        let timing = self.timing();
        self.drive_high();
        Some(timing)
    }

    /// Drive the output high for an explicit duty fraction
    ///
    /// Returns `None`, leaving the output untouched, when disabled or when
    /// `duty` lies outside `[0, 1]`.
    pub fn begin_pulse_with_duty(&mut self, duty: f32) -> Option<PwmTiming> {
        if !self.is_enabled() {
            return None;
        }
        let timing = PwmTiming::from_duty(duty, self.period_us)?;
        self.drive_high();
        Some(timing)
    }

    /// Drive the output low, ending the high phase
    pub fn end_pulse(&mut self) {
        if let Some(output) = self.output.as_mut() {
            output.set_low();
        }
    }

    fn drive_high(&mut self) {
        if let Some(output) = self.output.as_mut() {
            output.set_high();
        }
    }

    /// One full cycle from the analog input, blocking for a whole period
    ///
    /// Returns false without waiting when disabled.
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> bool {
        match self.begin_pulse() {
            Some(timing) => {
                self.finish(timing, delay);
                true
            }
            None => false,
        }
    }

    /// One full cycle at an explicit duty fraction
    ///
    /// Returns false without waiting when disabled or when `duty` lies
    /// outside `[0, 1]`.
    pub fn run_with_duty_cycle<D: DelayNs>(&mut self, duty: f32, delay: &mut D) -> bool {
        match self.begin_pulse_with_duty(duty) {
            Some(timing) => {
                self.finish(timing, delay);
                true
            }
            None => false,
        }
    }

    fn finish<D: DelayNs>(&mut self, timing: PwmTiming, delay: &mut D) {
        delay.delay_us(timing.on_us);
        self.end_pulse();
        delay.delay_us(timing.off_us);
    }

    /// Force the output low and unbind it
    pub fn teardown(&mut self) -> Option<O> {
        let mut output = self.output.take()?;
        output.set_low();
        self.enabled = false;
        Some(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockAnalog, MockDelay, MockOutput};
    use proptest::prelude::*;

    fn pwm(reading: u16) -> (SoftPwm<MockOutput, MockAnalog>, MockOutput, MockAnalog) {
        let output = MockOutput::new();
        let analog = MockAnalog::new(reading, 1023);
        let pwm = SoftPwm::new(output.clone(), analog.clone(), 10_000);
        (pwm, output, analog)
    }

    #[test]
    fn test_run_follows_reading() {
        let (mut pwm, output, _) = pwm(512);
        let mut delay = MockDelay::new();

        assert!(pwm.run(&mut delay));
        assert_eq!(delay.waits_us(), [5005, 4995]);
        assert_eq!(output.history(), [true, false]);
    }

    #[test]
    fn test_run_resamples_each_cycle() {
        let (mut pwm, _, analog) = pwm(0);
        let mut delay = MockDelay::new();
        pwm.run(&mut delay);
        analog.set(1023);
        pwm.run(&mut delay);
        assert_eq!(delay.waits_us(), [0, 10_000, 10_000, 0]);
    }

    #[test]
    fn test_explicit_duty() {
        let (mut pwm, _, _) = pwm(0);
        let mut delay = MockDelay::new();
        assert!(pwm.run_with_duty_cycle(0.25, &mut delay));
        assert_eq!(delay.waits_us(), [2500, 7500]);
    }

    #[test]
    fn test_invalid_duty_is_noop() {
        let (mut pwm, output, _) = pwm(0);
        let mut delay = MockDelay::new();
        assert!(!pwm.run_with_duty_cycle(1.5, &mut delay));
        assert!(!pwm.run_with_duty_cycle(-0.1, &mut delay));
        assert!(delay.waits_us().is_empty());
        assert!(output.history().is_empty());
        assert!(pwm.is_enabled());
    }

    #[test]
    fn test_disabled_is_noop() {
        let (mut pwm, output, _) = pwm(512);
        let mut delay = MockDelay::new();
        pwm.disable();
        assert!(!output.is_high());
        assert!(!pwm.run(&mut delay));
        assert!(!pwm.run_with_duty_cycle(0.5, &mut delay));
        assert!(delay.waits_us().is_empty());
    }

    #[test]
    fn test_disable_forces_low_mid_pulse() {
        let (mut pwm, output, _) = pwm(512);
        assert!(pwm.begin_pulse().is_some());
        assert!(output.is_high());
        pwm.disable();
        assert!(!output.is_high());
        pwm.end_pulse();
        assert!(!output.is_high());
    }

    #[test]
    fn test_toggle() {
        let (mut pwm, _, _) = pwm(0);
        pwm.toggle();
        assert!(!pwm.is_enabled());
        pwm.toggle();
        assert!(pwm.is_enabled());
    }

    #[test]
    fn test_set_period() {
        let (mut pwm, _, _) = pwm(1023);
        pwm.set_period(2000);
        pwm.set_period(0);
        assert_eq!(pwm.period_us(), 2000);
        assert_eq!(pwm.timing(), PwmTiming { on_us: 2000, off_us: 0 });
    }

    #[test]
    fn test_teardown_unbinds() {
        let (mut pwm, output, _) = pwm(512);
        pwm.begin_pulse();
        assert!(pwm.teardown().is_some());
        assert!(!output.is_high());
        assert!(!pwm.is_enabled());
        assert!(pwm.teardown().is_none());

        pwm.enable();
        let mut delay = MockDelay::new();
        assert!(!pwm.run(&mut delay));
    }

    proptest! {
        #[test]
        fn prop_out_of_range_duty_is_noop(
            duty in prop_oneof![-1.0e6f32..-1.0e-6, 1.000_001f32..1.0e6],
            period in 1u32..1_000_000,
        ) {
            let output = MockOutput::new();
            let mut pwm = SoftPwm::new(output.clone(), MockAnalog::new(512, 1023), period);
            let mut delay = MockDelay::new();

            prop_assert!(!pwm.run_with_duty_cycle(duty, &mut delay));
            prop_assert!(delay.waits_us().is_empty());
            prop_assert!(output.history().is_empty());
            prop_assert!(pwm.is_enabled());
            prop_assert_eq!(pwm.period_us(), period);
        }

        #[test]
        fn prop_valid_duty_conserves_period(duty in 0.0f32..=1.0, period in 1u32..1_000_000) {
            let (mut pwm, output, _) = pwm(0);
            pwm.set_period(period);
            let mut delay = MockDelay::new();

            prop_assert!(pwm.run_with_duty_cycle(duty, &mut delay));
            let waits = delay.waits_us();
            prop_assert_eq!(waits.len(), 2);
            prop_assert_eq!(waits[0] + waits[1], period);
            prop_assert_eq!(output.history(), [true, false]);
        }
    }
}
