mod config;
mod export;
mod models;
mod writer;
mod zabbix;

use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use zabbix::ZabbixClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment comes from .env; a missing file means nothing to run with.
    dotenvy::dotenv().context("failed to load .env file")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zabbix_export=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::load();
    tracing::info!("Starting Zabbix export");
    tracing::info!("Server: {}", cfg.server_url);
    tracing::info!("Export dir: {}", cfg.export_dir.display());

    let client = ZabbixClient::new(&cfg.server_url, Duration::from_secs(cfg.timeout_secs))
        .context("failed to build HTTP client")?;

    let token = client
        .login(&cfg.username, &cfg.password)
        .await
        .context("authentication failed")?;
    tracing::info!("Authenticated as {}", cfg.username);

    let report = export::run(&client, &token, &cfg).await?;

    tracing::info!(
        "Export finished: {}/{} hosts exported, {} metric files, {} trigger files",
        report.hosts_exported,
        report.hosts_total,
        report.metrics_files,
        report.triggers_files
    );
    if !report.errors.is_empty() {
        tracing::warn!("{} problems recorded during export:", report.errors.len());
        for line in &report.errors {
            tracing::warn!("  {}", line);
        }
    }

    Ok(())
}
