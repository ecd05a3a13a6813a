use crate::consumer::{BrokerClient, CommitMarks};
use anyhow::Context;
use tracing::debug;

/// Per-partition record of what has been consumed but not yet committed.
///
/// Marks hold the next-to-commit offset (highest seen + 1) and only ever
/// advance. The pending flag is cleared on a fully successful commit; a
/// failed commit keeps every mark pending so the next call retries all of
/// them.
#[derive(Debug, Default)]
pub struct OffsetTracker {
    marks: CommitMarks,
    pending: bool,
}

impl OffsetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the mark for the record's partition. Lower offsets for an
    /// already-tracked partition are ignored.
    pub fn record(&mut self, topic: &str, partition: i32, offset: i64) {
        let next = offset + 1;
        let mark = self
            .marks
            .entry((topic.to_owned(), partition))
            .or_insert(next);
        if *mark < next {
            *mark = next;
        }
        self.pending = true;
    }

    pub fn pending(&self) -> Option<&CommitMarks> {
        self.pending.then_some(&self.marks)
    }

    /// Commits the tracked marks through the given client. No-op when
    /// nothing is pending.
    pub async fn commit<C: BrokerClient + ?Sized>(
        &mut self,
        client: &C,
    ) -> Result<(), anyhow::Error> {
        if !self.pending {
            return Ok(());
        }

        client
            .commit(&self.marks)
            .await
            .context("While committing offsets to broker")?;

        debug!("Committed marks for {} partition(s)", self.marks.len());
        self.pending = false;

        Ok(())
    }
}
