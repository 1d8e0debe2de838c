//! Software PWM
//!
//! A blocking on/off cycle over an output device, with the duty taken from
//! an analog reading or given explicitly.

pub mod generator;
pub mod timing;

pub use generator::SoftPwm;
pub use timing::PwmTiming;
