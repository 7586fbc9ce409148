//! Configuration types
//!
//! Matrix geometry and startup settings, plus a small text parser.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
