pub mod config;
pub mod db;
pub mod error;
pub mod materials;
pub mod notifier;
pub mod submission;
pub mod tracking;
pub mod web;

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

use config::Config;
use db::Database;
use notifier::{DisabledNotifier, Notifier, SmtpNotifier};
use tracking::SystemClock;
use web::AppState;

pub fn run() -> Result<()> {
    let config = Config::parse();

    // RUST_LOG overrides the default level
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Material intake starting up...");

    let database = Database::new(config.database.clone())?;
    let notifier = build_notifier(&config)?;

    let state = AppState {
        db: database,
        clock: Arc::new(SystemClock),
        notifier,
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(serve(config.listen, state))
}

fn build_notifier(config: &Config) -> Result<Arc<dyn Notifier>> {
    match config.mail() {
        Some(settings) => {
            let notifier = SmtpNotifier::new(&settings).context("invalid mail settings")?;
            info!(
                "Submission emails go to {} via {}:{}",
                settings.to, settings.host, settings.port
            );
            Ok(Arc::new(notifier))
        }
        None => {
            warn!(
                "SMTP username, password or recipient not configured; submission emails are disabled"
            );
            Ok(Arc::new(DisabledNotifier))
        }
    }
}

pub async fn serve(listen: SocketAddr, state: AppState) -> Result<()> {
    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to bind {listen}"))?;
    info!("Material intake listening on http://{listen}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Material intake stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
