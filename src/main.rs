//! plex-poster-upgrader: find Plex posters below a minimum resolution and
//! swap each for the first allowed alternate that is large enough.
//!
//! The run lists the configured library sections, probes every title's
//! selected poster, walks the remaining candidates in server order, then
//! writes the replacement back and forces a metadata refresh.

#![warn(clippy::all)]

mod cli;
mod config;
mod plex;
mod poster;
mod types;

#[cfg(test)]
pub(crate) mod testing;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use plex::PlexClient;
use poster::{ImageFetcher, PosterConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_filter())),
        )
        .init();

    let config = config::Config::from_cli(cli)?;
    tracing::debug!(?config, "Loaded configuration");
    tracing::info!(
        server = %config.base_url,
        providers = %config.providers,
        min_width = config.thresholds.min_width,
        min_height = config.thresholds.min_height,
        "Starting plex-poster-upgrader"
    );
    if config.dry_run {
        tracing::info!("[DRY RUN] No posters will be changed");
    }

    let token = match config.token.clone() {
        Some(token) => token,
        None => tokio::task::block_in_place(|| rpassword::prompt_password("Plex Token: "))?,
    };
    if token.trim().is_empty() {
        anyhow::bail!("A Plex token is required (--token or PLEX_TOKEN)");
    }

    let server = PlexClient::new(&config.base_url, token.trim(), config.timeout)?;
    plex::library::connect(&server).await?;

    let items = plex::library::collect_titles(
        &server,
        &config.sections,
        config.title_filter.as_deref(),
        config.max,
    )
    .await?;
    if items.is_empty() {
        tracing::warn!("No titles to inspect");
        return Ok(());
    }

    // Artwork at its origin is fetched without the Plex token
    let origin_client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()?;
    let fetcher = ImageFetcher::new(&server, &origin_client);

    let poster_config = PosterConfig {
        providers: config.providers.clone(),
        thresholds: config.thresholds,
        dry_run: config.dry_run,
        failure_policy: config.failure_policy,
        no_progress_bar: config.no_progress_bar,
    };
    let report = poster::upgrade_posters(&server, &fetcher, &items, &poster_config).await?;

    tracing::info!(
        inspected = report.inspected,
        flagged = report.flagged,
        resolved = report.resolved,
        updated = report.updated,
        refreshed = report.refreshed,
        "Done"
    );

    if !report.failures.is_empty() {
        for failure in &report.failures {
            tracing::error!(
                title = %failure.title,
                key = %failure.item_key,
                "{}",
                failure.error
            );
        }
        anyhow::bail!("{} poster operations failed", report.failures.len());
    }

    Ok(())
}
