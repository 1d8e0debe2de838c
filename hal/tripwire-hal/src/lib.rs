//! Tripwire Hardware Abstraction Layer
//!
//! This crate defines the narrow, typed peripheral interfaces the
//! coordination core consumes. Chip-specific crates implement them; the
//! core never touches a raw register.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tripwire-firmware (vectors, main loop) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tripwire-core / tripwire-drivers       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tripwire-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ tripwire-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`adc::AnalogInput`] - Analog sampling
//! - [`nvm::ByteStore`] - Byte-addressed persistent storage
//! - [`serial::TextSink`] - Character output stream
//! - [`irq::EdgeInterrupt`] - Pin-change interrupt masking
//! - [`tick::TickSource`] - Periodic timer interrupt source
//! - [`watchdog::FaultTimer`] - Watchdog fault timer

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod irq;
pub mod nvm;
pub mod serial;
pub mod tick;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use gpio::{InputPin, Level, OutputPin};
pub use irq::EdgeInterrupt;
pub use nvm::{ByteStore, NvmError};
pub use serial::TextSink;
pub use tick::TickSource;
pub use watchdog::{FaultTimer, WatchdogTimeout};
