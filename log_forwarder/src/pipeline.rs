use crate::consumer::{OffsetTracker, RawRecord};
use crate::filter::Filter;
use crate::instrumentation::Instrumentation;
use crate::message::Message;
use chrono::Utc;
use tracing::debug;

/// The one record pipeline both consumption models run: normalize every
/// record, advance the tracker from the full batch, then filter and report.
///
/// Marks advance for filtered-out records too, so dropping a record can
/// never cause its redelivery.
pub(crate) fn process_records(
    records: Vec<RawRecord>,
    offsets: &mut OffsetTracker,
    filter: Option<&dyn Filter>,
    filter_expression: Option<&str>,
    instrumentation: &dyn Instrumentation,
) -> Result<Vec<Message>, anyhow::Error> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let consumed_at = Utc::now().timestamp_millis();

    let mut messages = Vec::with_capacity(records.len());
    for record in records {
        offsets.record(&record.topic, record.partition, record.offset);
        messages.push(Message::from_record(record, consumed_at));
    }

    let total = messages.len();
    let accepted = match filter {
        Some(filter) => filter.filter(messages)?,
        None => messages,
    };

    let dropped = total - accepted.len();
    if dropped > 0 {
        if let Some(expression) = filter_expression {
            instrumentation.capture_filtered_message_count(dropped, expression);
        }
    }

    debug!("Processed {total} record(s), accepted {}", accepted.len());

    Ok(accepted)
}
