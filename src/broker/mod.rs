//! Broker collaborator boundary.
//!
//! The watcher core never talks to Kafka directly; it drives a
//! [`BrokerConsumer`], which keeps the coordination logic testable
//! against mocks:
//! - [`BrokerConsumer`] - connect/subscribe/receive/teardown contract
//! - [`KafkaConsumer`] - production implementation over `rdkafka`

mod consumer;
mod kafka;

pub use consumer::*;
pub use kafka::*;
