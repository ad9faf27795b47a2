use std::sync::Arc;

use async_trait::async_trait;
use rdkafka::consumer::Consumer;
use rdkafka::consumer::StreamConsumer;
use rdkafka::error::KafkaError;
use rdkafka::message::Message;
use rdkafka::types::RDKafkaErrorCode;
use rdkafka::ClientConfig;
use tracing::debug;

use crate::constants::CLIENT_ID;
use crate::constants::METADATA_TIMEOUT;
use crate::BrokerConsumer;
use crate::Delivery;
use crate::Error;
use crate::Result;
use crate::SubscribeError;
use crate::WatchConfig;

/// Production consumer backed by `rdkafka`'s [`StreamConsumer`].
///
/// Offsets are committed by librdkafka's default auto-commit; the watcher
/// makes no commit decisions of its own.
pub struct KafkaConsumer {
    brokers: String,
    group_id: String,
    from_beginning: bool,
    inner: Option<Arc<StreamConsumer>>,
}

impl KafkaConsumer {
    pub fn new(config: &WatchConfig) -> Self {
        Self {
            brokers: config.brokers().join(","),
            group_id: config.group_id.clone(),
            from_beginning: config.from_beginning,
            inner: None,
        }
    }

    fn consumer(&self) -> Result<&Arc<StreamConsumer>> {
        self.inner
            .as_ref()
            .ok_or_else(|| Error::Broker("consumer is not connected".to_string()))
    }
}

#[async_trait]
impl BrokerConsumer for KafkaConsumer {
    async fn connect(&mut self) -> Result<()> {
        let offset_reset = if self.from_beginning { "earliest" } else { "latest" };
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &self.brokers)
            .set("group.id", &self.group_id)
            .set("client.id", CLIENT_ID)
            .set("enable.partition.eof", "false")
            .set("auto.offset.reset", offset_reset)
            .create()
            .map_err(|e| Error::Broker(e.to_string()))?;

        debug!("consumer created for brokers {} (group {})", self.brokers, self.group_id);
        self.inner = Some(Arc::new(consumer));
        Ok(())
    }

    async fn subscribe(&mut self, topic: &str) -> std::result::Result<(), SubscribeError> {
        let consumer = Arc::clone(
            self.consumer()
                .map_err(|e| SubscribeError::Broker(e.to_string()))?,
        );

        // Never name the topic in the metadata request; a named request can
        // auto-create the topic with broker-default partitioning.
        let metadata = {
            let consumer = Arc::clone(&consumer);
            tokio::task::spawn_blocking(move || consumer.fetch_metadata(None, METADATA_TIMEOUT))
                .await
                .map_err(|e| SubscribeError::Broker(e.to_string()))?
                .map_err(classify_kafka_error)?
        };

        if !metadata.topics().iter().any(|t| t.name() == topic) {
            return Err(SubscribeError::UnknownTopic);
        }

        consumer.subscribe(&[topic]).map_err(classify_kafka_error)
    }

    async fn recv(&mut self) -> Result<Delivery> {
        let message = self
            .consumer()?
            .recv()
            .await
            .map_err(|e| Error::Broker(e.to_string()))?;
        Ok(Delivery {
            partition: message.partition(),
            offset: message.offset(),
        })
    }

    async fn stop(&mut self) -> Result<()> {
        if let Ok(consumer) = self.consumer() {
            consumer.unsubscribe();
        }
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        // Dropping the handle closes the connection.
        self.inner.take();
        Ok(())
    }
}

/// Maps librdkafka's "unknown topic or partition" code onto the recoverable
/// variant wherever it surfaces; everything else is fatal.
fn classify_kafka_error(e: KafkaError) -> SubscribeError {
    match e.rdkafka_error_code() {
        Some(RDKafkaErrorCode::UnknownTopicOrPartition) => SubscribeError::UnknownTopic,
        _ => SubscribeError::Broker(e.to_string()),
    }
}
