use crate::config::ForwarderConfig;
use crate::consumer::{close_quietly, BrokerClient, OffsetTracker};
use crate::filter::Filter;
use crate::instrumentation::Instrumentation;
use crate::pipeline::process_records;
use crate::sink::Sink;
use anyhow::Context;
use std::sync::Arc;
use tokio::select;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Push-model counterpart of the poll loop: the broker client drives
/// delivery record by record through the same normalize/filter/instrument
/// pipeline, and an offset is only committed once the record's sink hand-off
/// has been acknowledged.
///
/// The tracker sits behind a lock because the client may drive callbacks for
/// different partitions concurrently; commit updates are serialized through
/// it.
pub struct StreamingClient<C: BrokerClient, S: Sink> {
    client: C,
    config: ForwarderConfig,
    filter: Option<Box<dyn Filter>>,
    instrumentation: Arc<dyn Instrumentation>,
    sink: S,
    offsets: Mutex<OffsetTracker>,
}

impl<C: BrokerClient, S: Sink> StreamingClient<C, S> {
    pub fn new(
        client: C,
        config: ForwarderConfig,
        filter: Option<Box<dyn Filter>>,
        instrumentation: Arc<dyn Instrumentation>,
        sink: S,
    ) -> Self {
        Self {
            client,
            config,
            filter,
            instrumentation,
            sink,
            offsets: Mutex::new(OffsetTracker::new()),
        }
    }

    /// Runs the subscription until cancellation or a fatal error. An
    /// in-flight record drains before the loop exits; the connection is
    /// released on the way out via the suppressing close.
    pub async fn start(mut self, cancellation_token: CancellationToken) -> Result<(), anyhow::Error> {
        let result = self.consume(&cancellation_token).await;
        close_quietly(&mut self.client);
        result
    }

    async fn consume(&self, cancellation_token: &CancellationToken) -> Result<(), anyhow::Error> {
        loop {
            let record = select! {
                record = self.client.recv() => {
                    record.context("While receiving record from broker")?
                }
                _ = cancellation_token.cancelled() => {
                    info!("Streaming consumption was cancelled");
                    return Ok(());
                }
            };

            let accepted = {
                let mut offsets = self.offsets.lock().await;
                process_records(
                    vec![record],
                    &mut offsets,
                    self.filter.as_deref(),
                    self.config.filter_expression.as_deref(),
                    self.instrumentation.as_ref(),
                )?
            };

            if !accepted.is_empty() {
                self.sink
                    .deliver(&accepted)
                    .await
                    .context("While delivering record to sink")?;
            }

            let mut offsets = self.offsets.lock().await;
            offsets.commit(&self.client).await?;
        }
    }
}
