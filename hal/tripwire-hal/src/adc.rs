//! Analog input abstraction

/// Analog input channel
///
/// Readings lie in `0..=max_value()`. Takes `&mut self` because a
/// conversion typically reconfigures the converter's multiplexer.
pub trait AnalogInput {
    /// Perform one blocking conversion
    fn read(&mut self) -> u16;

    /// Highest value a conversion can return (1023 for a 10-bit converter)
    fn max_value(&self) -> u16;

    /// Convert one sample to a fraction of full scale in `[0, 1]`
    fn ratio(&mut self) -> f32 {
        let max = self.max_value();
        if max == 0 {
            return 0.0;
        }
        let reading = self.read().min(max);
        reading as f32 / max as f32
    }
}
