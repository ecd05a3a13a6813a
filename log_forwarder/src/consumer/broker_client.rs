use crate::consumer::RawRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

/// A `(topic, partition)` pair identifying one partition of the broker log.
pub type TopicPartition = (String, i32);

/// Next-to-commit offsets keyed by partition.
pub type CommitMarks = HashMap<TopicPartition, i64>;

/// The seam between the consumer and the concrete broker connection.
///
/// `poll` serves the batch model and `recv` the streaming model; a process
/// only ever drives one of the two against a given client.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Pulls a bounded batch. Blocks until records arrive or the timeout
    /// elapses; an empty batch is a normal outcome, not an error.
    async fn poll(&self, timeout: Duration) -> Result<Vec<RawRecord>, anyhow::Error>;

    /// Waits for the next single record.
    async fn recv(&self) -> Result<RawRecord, anyhow::Error>;

    /// Commits the given next-to-consume offsets against the broker.
    async fn commit(&self, marks: &CommitMarks) -> Result<(), anyhow::Error>;

    /// Releases the broker connection.
    fn close(&mut self) -> Result<(), anyhow::Error>;
}

/// Best-effort close. A failure to release the connection is logged and
/// swallowed here so shutdown and error-unwinding paths can rely on close
/// never failing.
pub fn close_quietly<C: BrokerClient + ?Sized>(client: &mut C) {
    if let Err(error) = client.close() {
        warn!("Error while closing broker connection: {error:?}");
    }
}
