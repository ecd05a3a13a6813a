use crate::consumer::{BrokerClient, CommitMarks, RawRecord};
use crate::filter::Filter;
use crate::instrumentation::Instrumentation;
use crate::message::Message;
use crate::sink::Sink;
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct FakeBrokerState {
    batches: Mutex<VecDeque<Vec<RawRecord>>>,
    commits: Mutex<Vec<CommitMarks>>,
    fail_next_commit: AtomicBool,
    fail_close: AtomicBool,
    close_calls: AtomicUsize,
}

/// In-memory broker. `poll` drains one pushed batch per call; `recv` drains
/// single records and then blocks forever, so cancellation paths can be
/// exercised deterministically. Clones share state, letting a test keep a
/// handle to a client it has moved into a consumer.
#[derive(Default, Clone)]
pub(crate) struct FakeBrokerClient {
    state: Arc<FakeBrokerState>,
}

impl FakeBrokerClient {
    pub fn push_batch(&self, batch: Vec<RawRecord>) {
        self.state.batches.lock().unwrap().push_back(batch);
    }

    pub fn commits(&self) -> Vec<CommitMarks> {
        self.state.commits.lock().unwrap().clone()
    }

    pub fn fail_next_commit(&self) {
        self.state.fail_next_commit.store(true, Ordering::SeqCst);
    }

    pub fn fail_close(&self) {
        self.state.fail_close.store(true, Ordering::SeqCst);
    }

    pub fn close_calls(&self) -> usize {
        self.state.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrokerClient for FakeBrokerClient {
    async fn poll(&self, timeout: Duration) -> Result<Vec<RawRecord>, anyhow::Error> {
        let batch = self.state.batches.lock().unwrap().pop_front();
        match batch {
            Some(batch) => Ok(batch),
            None => {
                // Block for the timeout like a real broker poll would, so
                // hot loops over an empty fake still yield to the runtime.
                tokio::time::sleep(timeout).await;
                Ok(Vec::new())
            }
        }
    }

    async fn recv(&self) -> Result<RawRecord, anyhow::Error> {
        {
            let mut batches = self.state.batches.lock().unwrap();
            while let Some(batch) = batches.front_mut() {
                if batch.is_empty() {
                    batches.pop_front();
                    continue;
                }
                return Ok(batch.remove(0));
            }
        }
        std::future::pending().await
    }

    async fn commit(&self, marks: &CommitMarks) -> Result<(), anyhow::Error> {
        if self.state.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(anyhow!("Broker unreachable"));
        }
        self.state.commits.lock().unwrap().push(marks.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<(), anyhow::Error> {
        self.state.close_calls.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_close.load(Ordering::SeqCst) {
            return Err(anyhow!("Close failed"));
        }
        Ok(())
    }
}

/// Accepts the first `n` messages of every batch, or everything.
pub(crate) struct FakeFilter {
    accept: Option<usize>,
}

impl FakeFilter {
    pub fn accept_first(n: usize) -> Self {
        Self { accept: Some(n) }
    }

    pub fn accept_all() -> Self {
        Self { accept: None }
    }
}

impl Filter for FakeFilter {
    fn filter(&self, mut batch: Vec<Message>) -> Result<Vec<Message>, anyhow::Error> {
        if let Some(n) = self.accept {
            batch.truncate(n);
        }
        Ok(batch)
    }
}

pub(crate) struct FailingFilter;

impl Filter for FailingFilter {
    fn filter(&self, _batch: Vec<Message>) -> Result<Vec<Message>, anyhow::Error> {
        Err(anyhow!("Filter engine failure"))
    }
}

#[derive(Default)]
pub(crate) struct RecordingInstrumentation {
    reports: Mutex<Vec<(usize, String)>>,
}

impl RecordingInstrumentation {
    pub fn reports(&self) -> Vec<(usize, String)> {
        self.reports.lock().unwrap().clone()
    }
}

impl Instrumentation for RecordingInstrumentation {
    fn capture_filtered_message_count(&self, count: usize, filter_expression: &str) {
        self.reports
            .lock()
            .unwrap()
            .push((count, filter_expression.to_owned()));
    }
}

#[derive(Default)]
pub(crate) struct CollectingSink {
    delivered: Mutex<Vec<Message>>,
    deliveries: AtomicUsize,
}

impl CollectingSink {
    pub fn delivered(&self) -> Vec<Message> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn deliveries(&self) -> usize {
        self.deliveries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Sink for CollectingSink {
    async fn deliver(&self, batch: &[Message]) -> Result<(), anyhow::Error> {
        self.delivered.lock().unwrap().extend_from_slice(batch);
        self.deliveries.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub(crate) struct FailingSink;

#[async_trait]
impl Sink for FailingSink {
    async fn deliver(&self, _batch: &[Message]) -> Result<(), anyhow::Error> {
        Err(anyhow!("Sink unavailable"))
    }
}
