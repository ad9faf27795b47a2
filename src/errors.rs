//! Topic Watch Error Hierarchy
//!
//! Defines the error types of the watcher, categorized by operational
//! concern: configuration, subscription, broker transport, and the
//! deadline itself.

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration source failures (file parsing, env deserialization)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration validation failures
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Subscription failures, recoverable or not
    #[error(transparent)]
    Subscribe(#[from] SubscribeError),

    /// Connect/receive failures from the broker transport
    #[error("Broker error: {0}")]
    Broker(String),

    /// The deadline elapsed before the target count was reached
    #[error(
        "Timed out waiting for {target} messages on topic {topic} after {timeout_ms}ms. \
         Found {seen} messages."
    )]
    WaitTimeout {
        target: u64,
        topic: String,
        timeout_ms: u64,
        seen: u64,
    },

    /// The run was cancelled from outside (e.g. ctrl-c)
    #[error("Interrupted while waiting for {target} messages on topic {topic}. Found {seen} messages.")]
    Interrupted { target: u64, topic: String, seen: u64 },

    /// Unrecoverable failures requiring process termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

/// Outcome of a single subscription attempt.
///
/// The watcher retries [`SubscribeError::UnknownTopic`] indefinitely at a
/// fixed interval, bounded only by the run deadline. Any other failure is
/// fatal and surfaces immediately.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubscribeError {
    /// The topic does not exist yet; topic creation is eventually
    /// consistent in many broker deployments
    #[error("Topic not found")]
    UnknownTopic,

    /// Any other subscription failure
    #[error("Subscription failed: {0}")]
    Broker(String),
}
