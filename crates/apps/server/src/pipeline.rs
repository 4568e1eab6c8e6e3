//! Ingest pipeline: FIRMS fires, then weather and risk per fire location.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::IngestError;
use crate::firms;
use crate::risk;
use crate::store::FireStore;
use crate::weather;

#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub firms_url: String,
    /// Upper bound on per-run weather lookups; FIRMS can return thousands of
    /// detections on a bad day.
    pub weather_location_cap: usize,
    /// Spacing between Open-Meteo calls.
    pub weather_spacing: Duration,
}

#[derive(Debug, Default)]
pub struct IngestReport {
    pub fires_fetched: usize,
    pub fires_new: usize,
    pub locations: usize,
    pub weather_rows: usize,
    pub risk_rows: usize,
}

pub async fn run_ingest(
    client: &reqwest::Client,
    store: &Arc<FireStore>,
    config: &IngestConfig,
) -> Result<IngestReport, IngestError> {
    let mut report = IngestReport::default();

    info!(url = %config.firms_url, "fetching FIRMS detections");
    let fires = firms::fetch_country_fires(client, &config.firms_url).await?;
    report.fires_fetched = fires.len();
    if fires.is_empty() {
        warn!("no fire data retrieved, stopping ingest");
        return Ok(report);
    }

    // First occurrence wins so locations keep detection order.
    let mut seen = HashSet::new();
    let mut locations = Vec::new();
    for fire in &fires {
        if seen.insert((fire.latitude.to_bits(), fire.longitude.to_bits())) {
            locations.push((fire.latitude, fire.longitude));
        }
    }
    locations.truncate(config.weather_location_cap);
    report.locations = locations.len();

    report.fires_new = store.upsert_fires(fires).await?;

    let mut weather_rows = Vec::new();
    let mut risk_rows = Vec::new();
    for (i, &(lat, lon)) in locations.iter().enumerate() {
        info!(n = i + 1, total = locations.len(), lat, lon, "fetching weather");
        match weather::fetch_forecast(client, lat, lon).await {
            Ok(response) => {
                let samples = weather::flatten_hourly(response, lat, lon);
                risk_rows.extend(samples.iter().map(risk::assess));
                weather_rows.extend(samples);
            }
            Err(err) => warn!(lat, lon, %err, "weather fetch failed, skipping location"),
        }
        tokio::time::sleep(config.weather_spacing).await;
    }

    report.weather_rows = store.append_weather(weather_rows).await?;
    report.risk_rows = store.append_risk(risk_rows).await?;

    info!(
        fires = report.fires_fetched,
        new = report.fires_new,
        locations = report.locations,
        weather = report.weather_rows,
        risk = report.risk_rows,
        "ingest run complete"
    );
    Ok(report)
}
