//! Hosts for the Hanoi motion engine: configuration loading and the
//! headless driver loop shared by the `hanoi` commands.

pub mod config;
pub mod host;
