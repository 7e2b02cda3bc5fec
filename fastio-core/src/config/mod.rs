//! Configuration types
//!
//! Board-agnostic settings for pins and buttons. The firmware fills these in
//! at build time from its board configuration file.

pub mod types;

pub use types::*;
