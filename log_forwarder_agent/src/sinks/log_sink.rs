use async_trait::async_trait;
use log_forwarder::message::Message;
use log_forwarder::sink::Sink;
use tracing::info;

/// Writes every accepted message to the log. Useful as a smoke-test sink
/// and as the default when no downstream is configured.
pub struct LogSink;

#[async_trait]
impl Sink for LogSink {
    async fn deliver(&self, batch: &[Message]) -> Result<(), anyhow::Error> {
        for message in batch {
            info!(
                "Forwarded message. Topic: '{}', metadata: {:?}, value: {}",
                message.topic,
                message.partition_offset(),
                String::from_utf8_lossy(&message.value),
            );
        }

        Ok(())
    }
}
