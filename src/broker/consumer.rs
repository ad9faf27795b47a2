use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::Result;
use crate::SubscribeError;

/// Position of a delivered message, reported for progress logging only;
/// payloads are never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

/// Contract between the watcher core and the broker client.
///
/// Deliveries are handed over one at a time; `recv` pends indefinitely
/// until the next message arrives or the transport fails. The handle is
/// exclusively owned by one run, hence `&mut self` throughout.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BrokerConsumer: Send {
    /// Establish the consumer connection.
    async fn connect(&mut self) -> Result<()>;

    /// Attempt to subscribe to `topic`.
    ///
    /// A missing topic must surface as [`SubscribeError::UnknownTopic`],
    /// distinguishable from other failures, so the caller can retry it.
    async fn subscribe(&mut self, topic: &str) -> std::result::Result<(), SubscribeError>;

    /// Wait for the next delivered message.
    async fn recv(&mut self) -> Result<Delivery>;

    /// Halt message delivery.
    async fn stop(&mut self) -> Result<()>;

    /// Release the connection.
    async fn disconnect(&mut self) -> Result<()>;
}
