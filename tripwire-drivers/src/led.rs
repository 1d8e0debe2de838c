//! LED outputs
//!
//! A single LED over an output pin, and a fixed-capacity group of LEDs that
//! behaves as one output device.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use tripwire_hal::OutputPin;

/// LED on a GPIO pin
///
/// The pin can be wired active-high (default) or active-low.
pub struct Led<P> {
    pin: P,
    /// If true, LED on = pin low
    inverted: bool,
    on: bool,
}

impl<P: OutputPin> Led<P> {
    /// Create an LED, switched off
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            on: false,
        };
        led.set(false);
        led
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    fn set(&mut self, on: bool) {
        self.on = on;
        if on != self.inverted {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    pub fn on(&mut self) {
        self.set(true);
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Toggle, then hold for `ms`
    ///
    /// Called repeatedly this blinks with a half-period of `ms`.
    pub fn blink<D: DelayNs>(&mut self, delay: &mut D, ms: u32) {
        OutputPin::toggle(self);
        delay.delay_ms(ms);
    }

    /// Give back the pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> OutputPin for Led<P> {
    fn set_high(&mut self) {
        self.on();
    }

    fn set_low(&mut self) {
        self.off();
    }

    fn is_set_high(&self) -> bool {
        self.on
    }
}

/// Group of up to `N` LEDs acting as one output device
///
/// On the output trait: high switches every LED on, low switches every LED
/// off, and it reads high while any LED is lit.
pub struct LedGroup<P, const N: usize> {
    leds: Vec<Led<P>, N>,
}

impl<P: OutputPin, const N: usize> LedGroup<P, N> {
    pub fn new() -> Self {
        Self { leds: Vec::new() }
    }

    /// Add an LED, handing it back when the group is full
    pub fn push(&mut self, led: Led<P>) -> Result<(), Led<P>> {
        self.leds.push(led)
    }

    pub fn len(&self) -> usize {
        self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    pub fn on(&mut self) {
        self.leds.iter_mut().for_each(Led::on);
    }

    pub fn off(&mut self) {
        self.leds.iter_mut().for_each(Led::off);
    }

    /// Toggle each LED individually
    pub fn toggle_each(&mut self) {
        for led in self.leds.iter_mut() {
            OutputPin::toggle(led);
        }
    }

    /// All on for `ms`, then all off for `ms`
    pub fn blink_collectively<D: DelayNs>(&mut self, delay: &mut D, ms: u32) {
        self.on();
        delay.delay_ms(ms);
        self.off();
        delay.delay_ms(ms);
    }

    /// Light each LED alone for `ms`, in order
    pub fn blink_sequentially<D: DelayNs>(&mut self, delay: &mut D, ms: u32) {
        self.off();
        for led in self.leds.iter_mut() {
            led.on();
            delay.delay_ms(ms);
            led.off();
        }
    }
}

impl<P: OutputPin, const N: usize> Default for LedGroup<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin, const N: usize> OutputPin for LedGroup<P, N> {
    fn set_high(&mut self) {
        self.on();
    }

    fn set_low(&mut self) {
        self.off();
    }

    fn is_set_high(&self) -> bool {
        self.leds.iter().any(Led::is_on)
    }

    fn toggle(&mut self) {
        self.toggle_each();
    }
}
