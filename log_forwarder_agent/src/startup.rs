use crate::app_config::{AppConfig, SinkSettings};
use crate::sinks::{HttpSink, LogSink};
use anyhow::Context;
use log_forwarder::consumer::KafkaClient;
use log_forwarder::dispatch;
use log_forwarder::filter::{Filter, ValueFilter};
use log_forwarder::instrumentation::{Instrumentation, LogInstrumentation};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn run_until_stopped(config: AppConfig) -> Result<(), anyhow::Error> {
    let forwarder_config = config.forwarder_config();
    let connection_settings = config.connection_settings()?;

    let client = KafkaClient::create_for_consuming(
        &connection_settings,
        config.consumer_group.as_deref(),
        config.auto_offset_reset()?,
        forwarder_config.max_poll_records,
    )
    .context("While creating consumer")?;
    client.subscribe(&config.topic)?;
    info!("Subscribed to topic {}", config.topic);

    let filter: Option<Box<dyn Filter>> = match forwarder_config.filter_expression.as_deref() {
        Some(expression) => {
            let value_filter =
                ValueFilter::parse(expression).context("While parsing filter expression")?;
            Some(Box::new(value_filter))
        }
        None => None,
    };

    let instrumentation: Arc<dyn Instrumentation> = Arc::new(LogInstrumentation);

    let cancellation_token = CancellationToken::new();
    let signal_token = cancellation_token.clone();
    tokio::task::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            signal_token.cancel();
        }
    });

    match &config.sink {
        SinkSettings::Log => {
            dispatch::run_until_stopped(
                forwarder_config,
                client,
                filter,
                instrumentation,
                LogSink,
                cancellation_token,
            )
            .await
        }
        SinkSettings::Http { url } => {
            let sink = HttpSink::new(url.clone()).context("While creating http sink")?;
            dispatch::run_until_stopped(
                forwarder_config,
                client,
                filter,
                instrumentation,
                sink,
                cancellation_token,
            )
            .await
        }
    }
}
