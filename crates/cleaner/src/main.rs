mod config;
mod signal;

use cleaner_reaper::{Cleaner, DnsResolver};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let cleaner_config = config::load_config().await?;
    let reaper_config = config::create_reaper_config(&cleaner_config);

    let client = Arc::new(config::create_azure_client(&cleaner_config.azure)?);
    let resolver = Arc::new(DnsResolver::new(
        reaper_config.resolver_addr,
        reaper_config.resolver_attempts,
    ));

    if reaper_config.dry_run {
        tracing::warn!("Dry run enabled, nothing will be deleted");
    }

    let cleaner = Cleaner::new(client, resolver, reaper_config);

    match cleaner_config.interval_secs {
        Some(secs) => {
            tokio::select! {
                _ = run_periodically(&cleaner, Duration::from_secs(secs)) => {}
                _ = signal::shutdown_signal() => {
                    tracing::info!("Cleanup loop stopped");
                }
            }
        }
        None => {
            tokio::select! {
                result = cleaner.run() => {
                    if let Err(e) = result {
                        tracing::error!("Cleanup pass did not complete: {}", e);
                        return Err(e.into());
                    }
                }
                _ = signal::shutdown_signal() => {
                    anyhow::bail!("cleanup pass cancelled before completion");
                }
            }
        }
    }

    tracing::info!("CI cleaner shutdown complete");

    Ok(())
}

async fn run_periodically(cleaner: &Cleaner, period: Duration) {
    tracing::info!("Running cleanup every {}s", period.as_secs());

    let mut interval = tokio::time::interval(period);

    loop {
        interval.tick().await;

        match cleaner.run().await {
            Ok(report) => {
                tracing::info!("Cleanup pass complete: {:?}", report);
            }
            Err(e) => {
                tracing::error!("Cleanup pass did not complete, retrying next interval: {}", e);
            }
        }
    }
}
