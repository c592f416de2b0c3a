//! Rig-RS library
//!
//! Command definitions and output helpers behind the `rig-rs` binary.

pub mod cli;
pub mod commands;
pub mod utils;
