#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod connection_settings;
pub mod consumer;
pub mod dispatch;
pub mod filter;
pub mod instrumentation;
pub mod message;
mod pipeline;
pub mod sink;
pub mod streaming;

#[cfg(test)]
mod test_support;
