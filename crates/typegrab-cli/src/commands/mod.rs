//! CLI commands

pub mod copy;
pub mod files;
pub mod serve;

#[cfg(test)]
mod tests;
