mod filter_condition;
mod filter_kind;
mod value_filter;

pub use filter_condition::*;
pub use filter_kind::*;
pub use value_filter::*;

use crate::message::Message;

/// A batch predicate. Implementations return the accepted subset in input
/// order; an error signals a misconfigured or malfunctioning filter and is
/// propagated to the caller unchanged.
pub trait Filter: Send + Sync {
    fn filter(&self, batch: Vec<Message>) -> Result<Vec<Message>, anyhow::Error>;
}
