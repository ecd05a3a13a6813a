use crate::connection_settings::ConnectionSettings;
use crate::consumer::{AutoOffsetReset, BrokerClient, CommitMarks, RawRecord};
use anyhow::Context;
use async_trait::async_trait;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Headers};
use rdkafka::{ClientConfig, Message, Offset, TopicPartitionList};
use std::time::Duration;
use tokio::time::timeout_at;
use tracing::{debug, trace};
use uuid::Uuid;

/// [`BrokerClient`] backed by an rdkafka `StreamConsumer`.
///
/// Auto-commit is disabled; committed positions are owned entirely by the
/// offset tracker.
pub struct KafkaClient {
    consumer: StreamConsumer,
    max_poll_records: usize,
}

impl KafkaClient {
    pub fn create_for_consuming(
        settings: &ConnectionSettings,
        group: Option<&str>,
        auto_offset_reset: AutoOffsetReset,
        max_poll_records: usize,
    ) -> Result<Self, anyhow::Error> {
        let group = group
            .map(str::to_owned)
            .unwrap_or_else(|| format!("log-forwarder-{}", Uuid::now_v7()));

        // https://raw.githubusercontent.com/confluentinc/librdkafka/master/CONFIGURATION.md
        let consumer: StreamConsumer = ClientConfig::try_from(settings)?
            .set("group.id", group)
            .set("auto.offset.reset", auto_offset_reset.to_string())
            .set("enable.partition.eof", "false")
            .set("session.timeout.ms", "10000")
            .set("enable.auto.commit", "false")
            .set("heartbeat.interval.ms", "1000")
            .create()
            .context("While creating a kafka StreamConsumer")?;

        Ok(Self {
            consumer,
            max_poll_records,
        })
    }

    pub fn subscribe(&self, topic: &str) -> Result<(), anyhow::Error> {
        self.consumer
            .subscribe(&[topic])
            .context("While subscribing to topic")
    }

    fn convert_message(message: &BorrowedMessage<'_>) -> Result<RawRecord, anyhow::Error> {
        let key = match message.key_view::<[u8]>() {
            None => None,
            Some(Ok(bytes)) => Some(bytes.to_vec()),
            Some(Err(e)) => anyhow::bail!("Error while viewing key bytes: {e:?}"),
        };

        let value = match message.payload_view::<[u8]>() {
            None => None,
            Some(Ok(bytes)) => Some(bytes.to_vec()),
            Some(Err(e)) => anyhow::bail!("Error while viewing payload bytes: {e:?}"),
        };

        let headers = message.headers().map(|headers| {
            headers
                .iter()
                .map(|header| (header.key.to_owned(), header.value.map(<[u8]>::to_vec)))
                .collect()
        });

        trace!(
            "New record. Topic: '{}', partition: {}, offset: {}",
            message.topic(),
            message.partition(),
            message.offset(),
        );

        Ok(RawRecord {
            key,
            value,
            topic: message.topic().to_owned(),
            partition: message.partition(),
            offset: message.offset(),
            headers,
            timestamp: message.timestamp().to_millis(),
        })
    }
}

#[async_trait]
impl BrokerClient for KafkaClient {
    async fn poll(&self, timeout: Duration) -> Result<Vec<RawRecord>, anyhow::Error> {
        let deadline = tokio::time::Instant::now() + timeout;
        let mut records = Vec::new();

        while records.len() < self.max_poll_records {
            match timeout_at(deadline, self.consumer.recv()).await {
                Ok(message_result) => {
                    let message =
                        message_result.context("While receiving message from broker")?;
                    records.push(Self::convert_message(&message)?);
                }
                Err(_) => break,
            }
        }

        if !records.is_empty() {
            debug!("Polled batch of {} record(s)", records.len());
        }

        Ok(records)
    }

    async fn recv(&self) -> Result<RawRecord, anyhow::Error> {
        let message = self
            .consumer
            .recv()
            .await
            .context("While receiving message from broker")?;

        Self::convert_message(&message)
    }

    async fn commit(&self, marks: &CommitMarks) -> Result<(), anyhow::Error> {
        let mut target = TopicPartitionList::new();
        for ((topic, partition), next_offset) in marks {
            target
                .add_partition_offset(topic, *partition, Offset::Offset(*next_offset))
                .context("While building commit target")?;
        }

        self.consumer
            .commit(&target, CommitMode::Sync)
            .context("While committing offsets")
    }

    fn close(&mut self) -> Result<(), anyhow::Error> {
        self.consumer.unsubscribe();
        Ok(())
    }
}
