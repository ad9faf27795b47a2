//! The wait/timeout/cancellation coordination core:
//! - [`WatchState`] - run-owned counter and single-resolution terminal gate
//! - [`Watcher`] - races message consumption against the run deadline and
//!   guarantees the consumer is torn down exactly once on every exit path

mod state;
mod watcher;

pub use state::*;
pub use watcher::*;
