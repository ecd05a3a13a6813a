use crate::config::ForwarderConfig;
use crate::consumer::{BrokerClient, GenericConsumer};
use crate::filter::Filter;
use crate::instrumentation::Instrumentation;
use crate::sink::Sink;
use crate::streaming::StreamingClient;
use anyhow::Context;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// The consumption model a process runs. Chosen once at startup from
/// configuration; there is no runtime switch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConsumptionMode {
    Poll,
    Streaming,
}

impl ConsumptionMode {
    pub fn from_config(config: &ForwarderConfig) -> Self {
        if config.streaming_enabled {
            ConsumptionMode::Streaming
        } else {
            ConsumptionMode::Poll
        }
    }
}

/// Entry point driving exactly one consumption model for the process
/// lifetime. Failures anywhere in a cycle propagate out unmodified;
/// supervision and restarts live above this layer.
pub async fn run_until_stopped<C: BrokerClient, S: Sink>(
    config: ForwarderConfig,
    client: C,
    filter: Option<Box<dyn Filter>>,
    instrumentation: Arc<dyn Instrumentation>,
    sink: S,
    cancellation_token: CancellationToken,
) -> Result<(), anyhow::Error> {
    match ConsumptionMode::from_config(&config) {
        ConsumptionMode::Poll => {
            info!("Starting poll consumption");
            let consumer = GenericConsumer::new(client, config, filter, instrumentation);
            run_poll_loop(consumer, sink, cancellation_token).await
        }
        ConsumptionMode::Streaming => {
            info!("Starting streaming consumption");
            let streaming = StreamingClient::new(client, config, filter, instrumentation, sink);
            streaming.start(cancellation_token).await
        }
    }
}

/// read -> hand off -> commit, forever. A sink failure leaves the batch
/// uncommitted so it is redelivered after restart.
async fn run_poll_loop<C: BrokerClient, S: Sink>(
    mut consumer: GenericConsumer<C>,
    sink: S,
    cancellation_token: CancellationToken,
) -> Result<(), anyhow::Error> {
    let result = poll_cycles(&mut consumer, &sink, &cancellation_token).await;
    consumer.close();
    result
}

async fn poll_cycles<C: BrokerClient, S: Sink>(
    consumer: &mut GenericConsumer<C>,
    sink: &S,
    cancellation_token: &CancellationToken,
) -> Result<(), anyhow::Error> {
    while !cancellation_token.is_cancelled() {
        let messages = consumer.read_messages().await?;

        if !messages.is_empty() {
            sink.deliver(&messages)
                .await
                .context("While delivering batch to sink")?;
        }

        consumer.commit().await?;
    }

    info!("Poll consumption was cancelled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::RawRecord;
    use crate::test_support::{CollectingSink, FailingSink, FakeBrokerClient, RecordingInstrumentation};
    use std::time::Duration;

    fn record(topic: &str, offset: i64) -> RawRecord {
        RawRecord {
            key: None,
            value: Some(b"payload".to_vec()),
            topic: topic.to_owned(),
            partition: 0,
            offset,
            headers: None,
            timestamp: None,
        }
    }

    fn instrumentation() -> Arc<dyn Instrumentation> {
        Arc::new(RecordingInstrumentation::default())
    }

    #[test]
    fn mode_selection_follows_the_streaming_flag() {
        let mut config = ForwarderConfig::default();
        assert_eq!(ConsumptionMode::from_config(&config), ConsumptionMode::Poll);

        config.streaming_enabled = true;
        assert_eq!(
            ConsumptionMode::from_config(&config),
            ConsumptionMode::Streaming
        );
    }

    #[tokio::test]
    async fn poll_loop_forwards_batches_and_commits() {
        let client = FakeBrokerClient::default();
        client.push_batch(vec![record("topic1", 0), record("topic1", 1)]);
        let sink = Arc::new(CollectingSink::default());
        let token = CancellationToken::new();

        let handle = tokio::spawn(run_until_stopped(
            ForwarderConfig::default(),
            client.clone(),
            None,
            instrumentation(),
            sink.clone(),
            token.clone(),
        ));

        tokio::time::timeout(Duration::from_secs(5), async {
            while client.commits().is_empty() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("No commit happened in time");

        token.cancel();
        handle.await.unwrap().unwrap();

        assert_eq!(sink.delivered().len(), 2);
        assert_eq!(client.commits()[0][&("topic1".to_owned(), 0)], 2);
        assert_eq!(client.close_calls(), 1);
    }

    #[tokio::test]
    async fn poll_loop_does_not_commit_after_sink_failure() {
        let client = FakeBrokerClient::default();
        client.push_batch(vec![record("topic1", 0)]);
        let token = CancellationToken::new();

        let result = run_until_stopped(
            ForwarderConfig::default(),
            client.clone(),
            None,
            instrumentation(),
            FailingSink,
            token,
        )
        .await;

        result.unwrap_err();
        assert!(client.commits().is_empty());
        assert_eq!(client.close_calls(), 1);
    }

    #[tokio::test]
    async fn cancelled_token_stops_the_poll_loop() {
        let client = FakeBrokerClient::default();
        let token = CancellationToken::new();
        token.cancel();

        run_until_stopped(
            ForwarderConfig::default(),
            client.clone(),
            None,
            instrumentation(),
            Arc::new(CollectingSink::default()),
            token,
        )
        .await
        .unwrap();

        assert_eq!(client.close_calls(), 1);
    }
}
