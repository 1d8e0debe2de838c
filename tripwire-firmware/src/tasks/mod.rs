//! Interrupt vector tasks
//!
//! Each vector task stands in for one interrupt vector. They all run on the
//! high-priority interrupt executor, so they preempt the PWM main loop but
//! never each other. The EEPROM task commits the fault counter to flash
//! outside the supervisor's critical sections.

pub mod debounce;
pub mod edge;
pub mod eeprom;
pub mod heartbeat;
pub mod watchdog;

pub use debounce::debounce_task;
pub use edge::edge_task;
pub use eeprom::eeprom_task;
pub use heartbeat::heartbeat_task;
pub use watchdog::watchdog_task;
