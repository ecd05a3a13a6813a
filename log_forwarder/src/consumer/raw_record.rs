/// A broker record as handed over by a [`BrokerClient`], before
/// normalization. Brokers and record versions differ in what they carry, so
/// everything beyond the source coordinates is optional here; the variance is
/// absorbed by [`Message::from_record`].
///
/// [`BrokerClient`]: crate::consumer::BrokerClient
/// [`Message::from_record`]: crate::message::Message::from_record
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub key: Option<Vec<u8>>,
    pub value: Option<Vec<u8>>,
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub headers: Option<Vec<(String, Option<Vec<u8>>)>>,
    pub timestamp: Option<i64>,
}
