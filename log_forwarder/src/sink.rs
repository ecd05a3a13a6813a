use crate::message::Message;
use async_trait::async_trait;

/// Downstream hand-off for accepted messages. A successful `deliver` is what
/// makes the subsequent offset commit safe; implementations must tolerate
/// redelivery of a batch whose commit never happened.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn deliver(&self, batch: &[Message]) -> Result<(), anyhow::Error>;
}

#[async_trait]
impl<S: Sink + ?Sized> Sink for std::sync::Arc<S> {
    async fn deliver(&self, batch: &[Message]) -> Result<(), anyhow::Error> {
        (**self).deliver(batch).await
    }
}
