use std::time::Duration;

/// Settings the consumer core reads. Loading and validation happen in the
/// process crate; the core only ever sees this resolved form, passed in
/// explicitly.
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    pub poll_timeout: Duration,
    pub max_poll_records: usize,
    /// `None` means pass-through: no filtering and no filter reports.
    pub filter_expression: Option<String>,
    /// Selects the streaming model instead of the poll loop. Resolved once
    /// at startup; there is no runtime mode switch.
    pub streaming_enabled: bool,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(500),
            max_poll_records: 100,
            filter_expression: None,
            streaming_enabled: false,
        }
    }
}
