mod http_sink;
mod log_sink;

pub use http_sink::*;
pub use log_sink::*;
