//! Periodic refresh of per-brand station counts from the station feed.
//!
//! Every cycle fetches the full station list, tallies stations per brand
//! from each station's `Filter` bitmask, and overwrites `brands.station_count`
//! in one serializable transaction. A failed cycle is logged and the next
//! one runs on schedule; there is no retry in between.

use std::time::Duration;

use brandpanel_core::stations::BrandBitMap;
use brandpanel_db::models::brand::StationCountUpdate;
use brandpanel_db::repositories::BrandRepo;
use brandpanel_db::DbPool;
use brandpanel_stations::{StationFeedClient, StationFeedError};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::config::StationFeedConfig;

/// Errors from a single refresh cycle.
#[derive(Debug, thiserror::Error)]
pub enum StationCountError {
    #[error("Station feed unavailable: {0}")]
    Feed(#[from] StationFeedError),

    #[error("Failed to store station counts: {0}")]
    Database(#[from] sqlx::Error),
}

/// Run the station-count loop until `cancel` is triggered.
///
/// The first cycle runs immediately. Returns at once when no feed URL is
/// configured. Cycles never overlap: a slow cycle delays the next tick.
pub async fn run(pool: DbPool, config: StationFeedConfig, cancel: CancellationToken) {
    let Some(feed_url) = config.feed_url.clone() else {
        tracing::info!("STATION_FEED_URL not set, station count poller disabled");
        return;
    };

    let client = match StationFeedClient::new(feed_url, Duration::from_secs(config.timeout_secs)) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build station feed client, poller disabled");
            return;
        }
    };

    tracing::info!(
        feed_url = client.feed_url(),
        interval_secs = config.poll_interval_secs,
        brands = ?config.brand_bits.brand_slugs(),
        "Station count poller started"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Station count poller stopping");
                break;
            }
            _ = interval.tick() => {
                match refresh_station_counts(&pool, &client, &config.brand_bits).await {
                    Ok(update) => {
                        tracing::info!(updated = ?update.updated, "Station counts refreshed");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Station count refresh failed");
                    }
                }
            }
        }
    }
}

/// Run one fetch, tally and overwrite cycle.
///
/// Mapped brands with no matching row are logged as warnings and reported
/// in [`StationCountUpdate::missing`]; the remaining brands are still updated.
pub async fn refresh_station_counts(
    pool: &DbPool,
    client: &StationFeedClient,
    brand_bits: &BrandBitMap,
) -> Result<StationCountUpdate, StationCountError> {
    let stations = client.fetch_stations().await?;
    let counts = brand_bits.tally(stations.iter().map(|s| s.filter));
    tracing::debug!(stations = stations.len(), counts = ?counts, "Tallied station feed");

    let update = BrandRepo::overwrite_station_counts(pool, &counts).await?;
    for slug in &update.missing {
        tracing::warn!(brand_slug = %slug, "No brand row for mapped station brand");
    }
    Ok(update)
}
