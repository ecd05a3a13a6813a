use crate::config::ForwarderConfig;
use crate::consumer::{close_quietly, BrokerClient, OffsetTracker};
use crate::filter::Filter;
use crate::instrumentation::Instrumentation;
use crate::message::Message;
use crate::pipeline::process_records;
use anyhow::Context;
use std::sync::Arc;

/// Turns one broker poll into a vetted, instrumented batch of messages and
/// manages the commit/close lifecycle around it.
pub struct GenericConsumer<C: BrokerClient> {
    client: C,
    config: ForwarderConfig,
    filter: Option<Box<dyn Filter>>,
    instrumentation: Arc<dyn Instrumentation>,
    offsets: OffsetTracker,
    closed: bool,
}

impl<C: BrokerClient> GenericConsumer<C> {
    pub fn new(
        client: C,
        config: ForwarderConfig,
        filter: Option<Box<dyn Filter>>,
        instrumentation: Arc<dyn Instrumentation>,
    ) -> Self {
        Self {
            client,
            config,
            filter,
            instrumentation,
            offsets: OffsetTracker::new(),
            closed: false,
        }
    }

    /// Polls the broker and returns the accepted messages. Offset marks
    /// advance from the full polled batch before filtering, and filter
    /// errors propagate to the caller untouched.
    pub async fn read_messages(&mut self) -> Result<Vec<Message>, anyhow::Error> {
        let records = self
            .client
            .poll(self.config.poll_timeout)
            .await
            .context("While polling broker")?;

        process_records(
            records,
            &mut self.offsets,
            self.filter.as_deref(),
            self.config.filter_expression.as_deref(),
            self.instrumentation.as_ref(),
        )
    }

    /// Commits the tracked marks. Safe to call with nothing pending; a
    /// broker failure surfaces to the caller and the marks stay pending.
    pub async fn commit(&mut self) -> Result<(), anyhow::Error> {
        self.offsets.commit(&self.client).await
    }

    /// Releases the broker connection. Never fails and never panics: a close
    /// error is logged and suppressed, and repeated calls are no-ops.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        close_quietly(&mut self.client);
    }
}
