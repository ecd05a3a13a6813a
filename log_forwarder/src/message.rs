use crate::consumer::{PartitionOffset, RawRecord};

/// One key/value pair attached to a broker record. Header order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub key: String,
    pub value: Vec<u8>,
}

impl MessageHeader {
    pub fn new(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A normalized broker record. Absent key/value are empty byte sequences,
/// absent headers are an empty list, absent timestamps are zero.
///
/// Equality is structural over every field, so messages built from the
/// minimal record shape and from the extended one compare equal when their
/// fields match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub headers: Vec<MessageHeader>,
    pub timestamp: i64,
    pub consumed_at: i64,
}

impl Message {
    pub fn new(
        key: Vec<u8>,
        value: Vec<u8>,
        topic: impl Into<String>,
        partition: i32,
        offset: i64,
    ) -> Self {
        Self {
            key,
            value,
            topic: topic.into(),
            partition,
            offset,
            headers: Vec::new(),
            timestamp: 0,
            consumed_at: 0,
        }
    }

    pub fn with_metadata(
        key: Vec<u8>,
        value: Vec<u8>,
        topic: impl Into<String>,
        partition: i32,
        offset: i64,
        headers: Vec<MessageHeader>,
        timestamp: i64,
        consumed_at: i64,
    ) -> Self {
        Self {
            key,
            value,
            topic: topic.into(),
            partition,
            offset,
            headers,
            timestamp,
            consumed_at,
        }
    }

    /// Normalizes a raw broker record. Header values that the broker reports
    /// as absent become empty byte sequences, matching the key/value rule.
    pub fn from_record(record: RawRecord, consumed_at: i64) -> Self {
        let headers = record
            .headers
            .map(|headers| {
                headers
                    .into_iter()
                    .map(|(key, value)| MessageHeader::new(key, value.unwrap_or_default()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            key: record.key.unwrap_or_default(),
            value: record.value.unwrap_or_default(),
            topic: record.topic,
            partition: record.partition,
            offset: record.offset,
            headers,
            timestamp: record.timestamp.unwrap_or(0),
            consumed_at: if record.timestamp.is_some() {
                consumed_at
            } else {
                0
            },
        }
    }

    pub fn partition_offset(&self) -> PartitionOffset {
        PartitionOffset::new(self.partition, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(topic: &str) -> RawRecord {
        RawRecord {
            key: Some(b"key".to_vec()),
            value: Some(b"value".to_vec()),
            topic: topic.to_owned(),
            partition: 1,
            offset: 0,
            headers: None,
            timestamp: None,
        }
    }

    #[test]
    fn normalizes_minimal_record_shape() {
        let message = Message::from_record(record("topic1"), 200);

        assert_eq!(
            message,
            Message::new(b"key".to_vec(), b"value".to_vec(), "topic1", 1, 0)
        );
        assert!(message.headers.is_empty());
        assert_eq!(message.timestamp, 0);
        assert_eq!(message.consumed_at, 0);
    }

    #[test]
    fn normalizes_extended_record_shape() {
        let mut raw = record("topic1");
        raw.headers = Some(vec![
            ("first".to_owned(), Some(b"1".to_vec())),
            ("second".to_owned(), None),
        ]);
        raw.timestamp = Some(100);

        let message = Message::from_record(raw, 200);

        assert_eq!(
            message,
            Message::with_metadata(
                b"key".to_vec(),
                b"value".to_vec(),
                "topic1",
                1,
                0,
                vec![
                    MessageHeader::new("first", b"1".to_vec()),
                    MessageHeader::new("second", Vec::new()),
                ],
                100,
                200,
            )
        );
    }

    #[test]
    fn absent_key_and_value_become_empty_bytes() {
        let mut raw = record("topic1");
        raw.key = None;
        raw.value = None;

        let message = Message::from_record(raw, 200);

        assert_eq!(message.key, Vec::<u8>::new());
        assert_eq!(message.value, Vec::<u8>::new());
    }

    #[test]
    fn equality_is_structural_across_construction_paths() {
        let from_record = Message::from_record(record("topic1"), 200);
        let direct = Message::new(b"key".to_vec(), b"value".to_vec(), "topic1", 1, 0);

        assert_eq!(from_record, direct);

        let other_offset = Message::new(b"key".to_vec(), b"value".to_vec(), "topic1", 1, 1);
        assert_ne!(direct, other_offset);
    }
}
