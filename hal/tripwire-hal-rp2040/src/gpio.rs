//! GPIO outputs

use embassy_rp::gpio::Output;
use tripwire_hal::OutputPin;

/// Push-pull output pin
pub struct PinOutput<'d> {
    pin: Output<'d>,
}

impl<'d> PinOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for PinOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }
}
