//! TMP36 temperature sensor
//!
//! Linear analog sensor: 10 mV per °C with a 500 mV offset, so the output
//! voltage in millivolts minus 500 is the temperature in tenths of a degree.

use tripwire_hal::{AnalogInput, TextSink};

/// Sensor output at 0 °C (mV)
const OFFSET_MV: i32 = 500;

/// TMP36 on an analog input
pub struct Tmp36<A> {
    adc: A,
    /// Converter reference voltage in mV
    vref_mv: u32,
}

impl<A: AnalogInput> Tmp36<A> {
    /// Create a sensor
    ///
    /// # Arguments
    /// - `adc`: Analog channel wired to the sensor output
    /// - `vref_mv`: Converter reference voltage (5000 on a 5 V AVR, 3300 on RP2040)
    pub fn new(adc: A, vref_mv: u32) -> Self {
        Self { adc, vref_mv }
    }

    /// Sensor output voltage in millivolts, rounded to nearest
    pub fn input_millivolts(&mut self) -> u32 {
        let max = self.adc.max_value() as u32;
        if max == 0 {
            return 0;
        }
        let reading = (self.adc.read() as u32).min(max);
        (reading * self.vref_mv * 2 + max) / (2 * max)
    }

    /// Temperature in 0.1 °C units (e.g. 250 = 25.0 °C)
    pub fn temperature_x10(&mut self) -> i32 {
        self.input_millivolts() as i32 - OFFSET_MV
    }

    /// Sensor output voltage in volts
    pub fn input_voltage(&mut self) -> f32 {
        self.adc.ratio() * self.vref_mv as f32 / 1000.0
    }

    /// Temperature in °C
    pub fn temperature(&mut self) -> f32 {
        100.0 * self.input_voltage() - 50.0
    }

    /// Print the temperature as `Temperature: 23.45 degrees Celsius.`
    pub fn report_temperature<C: TextSink>(&mut self, console: &mut C) {
        let temperature = self.temperature();
        console.emit("Temperature: ");
        console.emit_float(temperature);
        console.emit_line(" degrees Celsius.");
    }

    /// Print the input voltage as `Voltage: 0.75 V.`
    pub fn report_voltage<C: TextSink>(&mut self, console: &mut C) {
        let voltage = self.input_voltage();
        console.emit("Voltage: ");
        console.emit_float(voltage);
        console.emit_line(" V.");
    }
}
