use anyhow::Context;
use config::Config;
use log_forwarder::config::ForwarderConfig;
use log_forwarder::connection_settings::ConnectionSettings;
use log_forwarder::consumer::{AutoOffsetReset, SecurityProtocol};
use serde::Deserialize;
use std::time::Duration;
use tracing::info;

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    pub brokers: Vec<String>,
    pub topic: String,
    #[serde(default)]
    pub consumer_group: Option<String>,
    #[serde(default)]
    pub security_protocol: Option<String>,
    #[serde(default)]
    pub auto_offset_reset: Option<String>,
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
    #[serde(default = "default_max_poll_records")]
    pub max_poll_records: usize,
    #[serde(default)]
    pub filter_expression: Option<String>,
    #[serde(default)]
    pub streaming: bool,
    #[serde(default)]
    pub sink: SinkSettings,
}

#[derive(Deserialize, Debug, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkSettings {
    #[default]
    Log,
    Http {
        url: String,
    },
}

fn default_poll_timeout_ms() -> u64 {
    500
}

fn default_max_poll_records() -> usize {
    100
}

impl AppConfig {
    pub fn build() -> Result<Self, anyhow::Error> {
        let config = Config::builder()
            .add_source(config::File::with_name("appsettings"))
            .add_source(config::Environment::with_prefix("App").separator("__"))
            .build()
            .context("While building app config")?;

        let deserialized_config: AppConfig = config
            .try_deserialize()
            .context("While deserializing config")?;

        info!("App config: {deserialized_config:?}");

        Ok(deserialized_config)
    }

    pub fn connection_settings(&self) -> Result<ConnectionSettings, anyhow::Error> {
        let security_protocol = match self.security_protocol.as_deref() {
            Some(value) => value.parse().context("While parsing security protocol")?,
            None => SecurityProtocol::default(),
        };

        Ok(ConnectionSettings {
            brokers: self.brokers.clone(),
            security_protocol,
        })
    }

    pub fn auto_offset_reset(&self) -> Result<AutoOffsetReset, anyhow::Error> {
        match self.auto_offset_reset.as_deref() {
            Some(value) => value.parse().context("While parsing auto offset reset"),
            None => Ok(AutoOffsetReset::default()),
        }
    }

    pub fn forwarder_config(&self) -> ForwarderConfig {
        ForwarderConfig {
            poll_timeout: Duration::from_millis(self.poll_timeout_ms),
            max_poll_records: self.max_poll_records,
            filter_expression: self.filter_expression.clone(),
            streaming_enabled: self.streaming,
        }
    }
}
