use tokio::time::sleep;
use tokio::time::sleep_until;
use tokio::time::timeout;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing::warn;

use crate::constants::SUBSCRIBE_RETRY_INTERVAL;
use crate::constants::TEARDOWN_CEILING;
use crate::BrokerConsumer;
use crate::Error;
use crate::Outcome;
use crate::Result;
use crate::SubscribeError;
use crate::WatchConfig;
use crate::WatchState;

/// Final report of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchReport {
    pub messages_seen: u64,
}

/// Drives one bounded wait for messages on a topic.
///
/// The run races three independent completion sources against each other:
/// the deadline timer, the subscribe/consume pipeline, and an external
/// shutdown token. The first terminal transition committed into
/// [`WatchState`] wins; afterwards the consumer is torn down exactly once,
/// bounded by a fixed teardown ceiling.
pub struct Watcher<C: BrokerConsumer> {
    config: WatchConfig,
    consumer: C,
    state: WatchState,
}

impl<C: BrokerConsumer> Watcher<C> {
    pub fn new(config: WatchConfig, consumer: C) -> Self {
        Self {
            config,
            consumer,
            state: WatchState::new(),
        }
    }

    /// Run until the first of {count reached, deadline elapsed, hard
    /// failure, shutdown} and resolve exactly once.
    pub async fn run(mut self, shutdown: CancellationToken) -> Result<WatchReport> {
        let deadline = Instant::now() + self.config.timeout();
        self.watch(deadline, &shutdown).await;
        self.teardown().await;

        let state = std::mem::take(&mut self.state);
        let (outcome, seen) = state.into_outcome();
        match outcome {
            Outcome::Success => {
                info!("Successfully received {} messages.", seen);
                Ok(WatchReport { messages_seen: seen })
            }
            Outcome::Timeout => Err(Error::WaitTimeout {
                target: self.config.message_count,
                topic: self.config.topic.clone(),
                timeout_ms: self.config.timeout_ms,
                seen,
            }),
            Outcome::Failure(e) => Err(e),
            Outcome::Pending => Err(Error::Fatal(
                "run finished without a terminal outcome".to_string(),
            )),
        }
    }

    /// Connect, subscribe (with retry) and count deliveries until a
    /// terminal transition commits. Every exit path of this function has
    /// committed exactly one outcome into the state.
    async fn watch(&mut self, deadline: Instant, shutdown: &CancellationToken) {
        let timer = sleep_until(deadline);
        tokio::pin!(timer);

        let connected = tokio::select! {
            res = self.consumer.connect() => res,
            _ = &mut timer => {
                self.state.transition(Outcome::Timeout);
                return;
            }
            _ = shutdown.cancelled() => {
                let outcome = interrupted(&self.config, &self.state);
                self.state.transition(outcome);
                return;
            }
        };
        if let Err(e) = connected {
            self.state.transition(Outcome::Failure(e));
            return;
        }

        // Subscription retry loop: no retry cap, the deadline is the only
        // bound on total wait. Topic creation is eventually consistent in
        // many broker deployments.
        loop {
            let attempt = tokio::select! {
                res = self.consumer.subscribe(&self.config.topic) => res,
                _ = &mut timer => {
                    self.state.transition(Outcome::Timeout);
                    return;
                }
                _ = shutdown.cancelled() => {
                    let outcome = interrupted(&self.config, &self.state);
                    self.state.transition(outcome);
                    return;
                }
            };
            match attempt {
                Ok(()) => {
                    self.state.mark_subscribed();
                    info!("Successfully subscribed to topic: {}", self.config.topic);
                    break;
                }
                Err(SubscribeError::UnknownTopic) => {
                    info!(
                        "Topic {} not found, retrying in {:?}...",
                        self.config.topic, SUBSCRIBE_RETRY_INTERVAL
                    );
                    tokio::select! {
                        _ = sleep(SUBSCRIBE_RETRY_INTERVAL) => {}
                        _ = &mut timer => {
                            self.state.transition(Outcome::Timeout);
                            return;
                        }
                        _ = shutdown.cancelled() => {
                            let outcome = interrupted(&self.config, &self.state);
                            self.state.transition(outcome);
                            return;
                        }
                    }
                }
                Err(e) => {
                    self.state.transition(Outcome::Failure(e.into()));
                    return;
                }
            }
        }

        info!(
            "Listening for {} messages on topic: {}",
            self.config.message_count, self.config.topic
        );

        loop {
            let delivery = tokio::select! {
                res = self.consumer.recv() => res,
                _ = &mut timer => {
                    self.state.transition(Outcome::Timeout);
                    return;
                }
                _ = shutdown.cancelled() => {
                    let outcome = interrupted(&self.config, &self.state);
                    self.state.transition(outcome);
                    return;
                }
            };
            match delivery {
                Ok(delivery) => {
                    let seen = self.state.record_message();
                    info!(
                        "Received message {}/{} (partition {}, offset {})",
                        seen, self.config.message_count, delivery.partition, delivery.offset
                    );
                    if seen >= self.config.message_count {
                        self.state.transition(Outcome::Success);
                        return;
                    }
                }
                Err(e) => {
                    self.state.transition(Outcome::Failure(e));
                    return;
                }
            }
        }
    }

    /// Best-effort teardown, raced against the fixed ceiling. Teardown
    /// failure never overrides the already-committed outcome.
    async fn teardown(&mut self) {
        let consumer = &mut self.consumer;
        let release = async {
            if let Err(e) = consumer.stop().await {
                warn!("Failed to stop message delivery: {}", e);
            }
            if let Err(e) = consumer.disconnect().await {
                warn!("Failed to disconnect consumer: {}", e);
            }
        };
        if timeout(TEARDOWN_CEILING, release).await.is_err() {
            warn!(
                "Consumer teardown exceeded {:?}; abandoning the connection",
                TEARDOWN_CEILING
            );
        }
    }
}

fn interrupted(config: &WatchConfig, state: &WatchState) -> Outcome {
    Outcome::Failure(Error::Interrupted {
        target: config.message_count,
        topic: config.topic.clone(),
        seen: state.messages_seen(),
    })
}
