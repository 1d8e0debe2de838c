//! Board-agnostic coordination core for the Tripwire firmware
//!
//! This crate contains everything that runs in interrupt context or shares
//! state with it, independent of the chip:
//!
//! - Software timers counting hardware ticks (debounce, heartbeat)
//! - Edge-detect input controller with structural debouncing
//! - Watchdog fault controller with persisted counter and lockdown
//! - Software PWM generator
//! - Critical-section cell for handler-shared state
//! - Supervisor wiring one handler per interrupt vector
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod fault;
pub mod input;
pub mod pwm;
pub mod shared;
pub mod supervisor;
pub mod timer;

#[cfg(test)]
mod mock;

pub use shared::Shared;
pub use supervisor::{Board, EdgeOutcome, Peripherals, Supervisor, SupervisorStatus};
