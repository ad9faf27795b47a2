use std::time::Duration;

// -
// Broker client identity

/// Client id reported to the broker for every connection
pub(crate) const CLIENT_ID: &str = "topic-gate";

// -
// Coordination intervals

/// Pause between subscription attempts while the topic does not exist yet
pub(crate) const SUBSCRIBE_RETRY_INTERVAL: Duration = Duration::from_millis(5000);

/// Upper bound on consumer teardown; the run resolves even if the broker
/// never acknowledges the disconnect
pub(crate) const TEARDOWN_CEILING: Duration = Duration::from_millis(2000);

/// Timeout for a single cluster metadata fetch during topic discovery
pub(crate) const METADATA_TIMEOUT: Duration = Duration::from_secs(10);
