mod auto_offset_reset;
mod broker_client;
mod generic_consumer;
mod kafka_client;
mod offset_tracker;
mod partition_offset;
mod raw_record;
mod security_protocol;

pub use auto_offset_reset::*;
pub use broker_client::*;
pub use generic_consumer::*;
pub use kafka_client::*;
pub use offset_tracker::*;
pub use partition_offset::*;
pub use raw_record::*;
pub use security_protocol::*;
