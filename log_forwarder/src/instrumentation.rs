use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Operational counters the consumer reports into.
pub trait Instrumentation: Send + Sync {
    fn capture_filtered_message_count(&self, count: usize, filter_expression: &str);
}

/// Writes each report through tracing.
#[derive(Debug, Default)]
pub struct LogInstrumentation;

impl Instrumentation for LogInstrumentation {
    fn capture_filtered_message_count(&self, count: usize, filter_expression: &str) {
        info!("Filtered out {count} message(s) by filter '{filter_expression}'");
    }
}

/// Accumulates totals in atomics for callers that scrape counts.
#[derive(Debug, Default)]
pub struct CountingInstrumentation {
    filtered_messages_counter: AtomicU64,
    filter_reports_counter: AtomicU64,
}

impl CountingInstrumentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filtered_messages(&self) -> u64 {
        self.filtered_messages_counter.load(Ordering::Relaxed)
    }

    pub fn filter_reports(&self) -> u64 {
        self.filter_reports_counter.load(Ordering::Relaxed)
    }
}

impl Instrumentation for CountingInstrumentation {
    fn capture_filtered_message_count(&self, count: usize, _filter_expression: &str) {
        self.filtered_messages_counter
            .fetch_add(count as u64, Ordering::Relaxed);
        self.filter_reports_counter.fetch_add(1, Ordering::Relaxed);
    }
}
