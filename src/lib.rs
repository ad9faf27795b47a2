//! # topic-gate
//!
//! A bounded "wait-for-N-messages" watcher for a Kafka topic, intended as
//! a gating step in automated pipelines: block until downstream has
//! produced at least N events, or fail once a wall-clock deadline expires.
//!
//! ## Architecture
//! ```text
//!  WatchConfig ──► Watcher::run(shutdown)
//!
//!  ┌────────────────────────────────────────────────────────┐
//!  │  Watcher (one run, one owned WatchState)               │
//!  │                                                        │
//!  │   deadline timer ──┐                                   │
//!  │   subscribe retry ─┼──► WatchState::transition         │
//!  │   message counter ─┤    (guarded check-and-set:        │
//!  │   shutdown token ──┘     first terminal outcome wins)  │
//!  │                                                        │
//!  │   then: teardown, exactly once, bounded by a ceiling   │
//!  └────────────────────────────────────────────────────────┘
//!                         │
//!                         ▼
//!        Ok(WatchReport) / Err(WaitTimeout | Subscribe | Broker)
//! ```
//!
//! The subscription retry loop handles the one recoverable broker error
//! (topic not found yet) with a fixed 5 s pause and no attempt cap; the
//! deadline is the only bound on total wait. Any other broker error is
//! fatal and surfaces immediately.
//!
//! ## Example
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//! use topic_gate::{KafkaConsumer, WatchConfig, Watcher};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WatchConfig::load(None)?;
//!     let consumer = KafkaConsumer::new(&config);
//!     let report = Watcher::new(config, consumer)
//!         .run(CancellationToken::new())
//!         .await?;
//!     println!("saw {} messages", report.messages_seen);
//!     Ok(())
//! }
//! ```

mod broker;
mod config;
mod constants;
mod errors;
mod watch;

pub use broker::*;
pub use config::*;
pub use errors::*;
pub use watch::*;
