//! Edge-detect inputs
//!
//! Debouncing is structural: the input's edge interrupt is masked for the
//! length of a debounce window instead of filtering the level it reads.

pub mod edge;

pub use edge::{EdgeInput, InputState};
