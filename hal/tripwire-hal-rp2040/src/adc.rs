//! Blocking ADC channel

use embassy_rp::adc::{Adc, Blocking, Channel};
use tripwire_hal::AnalogInput;

/// Full scale of the 12-bit converter
pub const ADC_MAX: u16 = 4095;

/// One ADC channel with its own converter handle
///
/// A failed conversion reads as 0.
pub struct AdcInput<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> AdcInput<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for AdcInput<'_> {
    fn read(&mut self) -> u16 {
        self.adc
            .blocking_read(&mut self.channel)
            .map(|value| value.min(ADC_MAX))
            .unwrap_or(0)
    }

    fn max_value(&self) -> u16 {
        ADC_MAX
    }
}
