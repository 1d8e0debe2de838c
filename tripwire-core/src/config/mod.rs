//! Configuration types
//!
//! Board-agnostic configuration for the supervisor, plus the parser for the
//! TOML file the firmware embeds. Everything here is plain data plus
//! validation.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
