use anyhow::Context;
use async_trait::async_trait;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use log_forwarder::message::Message;
use log_forwarder::sink::Sink;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Forwards each batch as one JSON POST. Key, value, and header bytes are
/// base64-encoded since they are not guaranteed to be valid UTF-8.
pub struct HttpSink {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize, Debug)]
struct HttpMessage {
    topic: String,
    partition: i32,
    offset: i64,
    key: String,
    value: String,
    headers: Vec<HttpHeader>,
    timestamp: i64,
    consumed_at: i64,
}

#[derive(Serialize, Debug)]
struct HttpHeader {
    key: String,
    value: String,
}

impl HttpSink {
    pub fn new(url: String) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("While building http client")?;

        Ok(Self { client, url })
    }

    fn render(message: &Message) -> HttpMessage {
        HttpMessage {
            topic: message.topic.clone(),
            partition: message.partition,
            offset: message.offset,
            key: BASE64_STANDARD.encode(&message.key),
            value: BASE64_STANDARD.encode(&message.value),
            headers: message
                .headers
                .iter()
                .map(|header| HttpHeader {
                    key: header.key.clone(),
                    value: BASE64_STANDARD.encode(&header.value),
                })
                .collect(),
            timestamp: message.timestamp,
            consumed_at: message.consumed_at,
        }
    }
}

#[async_trait]
impl Sink for HttpSink {
    async fn deliver(&self, batch: &[Message]) -> Result<(), anyhow::Error> {
        let payload: Vec<HttpMessage> = batch.iter().map(Self::render).collect();

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .context("While sending batch to http endpoint")?;

        response
            .error_for_status()
            .context("While checking http sink response status")?;

        debug!("Delivered batch of {} message(s)", batch.len());

        Ok(())
    }
}
