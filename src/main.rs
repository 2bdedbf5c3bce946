mod config;
mod error;
mod homework;
mod platform;
mod poller;
mod practicum;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Credentials, LoggingConfig, Settings};
use crate::platform::telegram::TelegramNotifier;
use crate::poller::Poller;
use crate::practicum::PracticumClient;

fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_layer = match &config.file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::discover(settings_path.as_deref()).context("Failed to load settings")?;

    init_logging(&settings.logging)?;

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("Cannot start: {}", e);
            return Err(e.into());
        }
    };

    info!("Configuration loaded successfully");
    info!("  Endpoint: {}", settings.practicum.endpoint);
    info!("  Retry period: {}s", settings.poller.retry_period_secs);

    let api = PracticumClient::new(&settings.practicum, credentials.practicum_token.as_str())
        .context("Failed to build Practicum HTTP client")?;
    let notifier =
        TelegramNotifier::new(&credentials.telegram_token, &credentials.telegram_chat_id);

    let cursor = settings
        .poller
        .initial_from_date
        .unwrap_or_else(|| Utc::now().timestamp());

    let mut poller = Poller::new(api, notifier, settings.poller.retry_period(), cursor);
    poller.run().await;

    Ok(())
}
