//! Analog sensors

pub mod tmp36;

pub use tmp36::Tmp36;
