//! typegrab-cli library
//!
//! Exposes argument parsing and the command implementations so they can be
//! tested without spawning the binary.

pub mod cli;
pub mod commands;
pub mod sinks;

pub use cli::{Cli, Commands, CopyArgs, FilesArgs, ServeArgs, SessionArgs, TargetArgs};
