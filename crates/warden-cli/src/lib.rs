//! # warden-cli — Command Implementations
//!
//! Library half of the `warden` binary. Subcommand logic lives here so
//! it can be tested without spawning a process.

pub mod check;
