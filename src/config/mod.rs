//! Configuration management for the topic watcher.
//!
//! Provides hierarchical configuration loading with priority:
//! 1. Default values (hardcoded)
//! 2. Optional TOML config file
//! 3. Environment variables (highest priority, `TOPIC_GATE_` prefix)

mod watch;
pub use watch::*;

#[cfg(test)]
mod watch_test;
