mod cli;

use crate::cli::CLI;
use anyhow::Context;
use burrow_core::{CaptchaVerifier, NoCaptcha};
use burrow_gateway::{App, AppState, HCaptchaVerifier};
use burrow_generator::RandomGenerator;
use burrow_shortener::ShortenerService;
use burrow_storage::PostgresLinkStore;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = CLI::parse();
    burrow_telemetry::init(config.log_format.into())?;

    info!(
        listen_addr = %config.listen_addr,
        log_format = %config.log_format,
        captcha = config.captcha_secret_key.is_some(),
        "starting burrow gateway"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await
        .context("failed to connect to the database")?;

    let store = PostgresLinkStore::new(pool);
    store
        .bootstrap_schema()
        .await
        .context("failed to bootstrap the link schema")?;

    let captcha_enabled = config.captcha_secret_key.is_some();
    let captcha: Arc<dyn CaptchaVerifier> = match config.captcha_secret_key {
        Some(secret_key) => Arc::new(HCaptchaVerifier::new(secret_key)?),
        None => {
            if config.captcha_site_key.is_some() {
                warn!("captcha site key set without a secret key, captcha is disabled");
            }
            Arc::new(NoCaptcha)
        }
    };
    let site_key = config.captcha_site_key.filter(|_| captcha_enabled);

    let shortener = ShortenerService::new(store, RandomGenerator::new());
    let state = AppState::new(Arc::new(shortener), captcha)
        .with_public_base_url(config.public_base_url)
        .with_captcha_site_key(site_key);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("burrow gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
