use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod clock;
mod error;
mod firms;
mod pipeline;
mod risk;
mod store;
mod weather;

use pipeline::IngestConfig;
use store::FireStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FireStore>,
    pub http: reqwest::Client,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr: SocketAddr = env::var("WILDFIRE_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()
        .expect("invalid WILDFIRE_ADDR");
    let data_root = env::var("WILDFIRE_DATA_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"));
    let static_dir = env::var("WILDFIRE_STATIC_DIR")
        .unwrap_or_else(|_| "crates/apps/viewer_web/static".to_string());

    if let Err(err) = tokio::fs::create_dir_all(&data_root).await {
        error!(%err, root = %data_root.display(), "failed to create data root");
        return;
    }

    let state = AppState {
        store: Arc::new(FireStore::open(&data_root)),
        http: reqwest::Client::new(),
    };

    match env::var("FIRMS_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            let config = ingest_config_from_env(&key);
            let interval_hours = env_var_u64("INGEST_INTERVAL_HOURS", 4);
            tokio::spawn(ingest_loop(state.clone(), config, interval_hours));
        }
        _ => warn!("FIRMS_API_KEY not set, serving stored data only"),
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/active_fires", get(api::active_fires))
        .route("/api/fire_risk", get(api::fire_risk))
        .route("/api/weather/:lat/:lon", get(api::weather_for_location))
        .route("/api/risk-summary", get(api::risk_summary))
        .fallback_service(ServeDir::new(&static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind server address");
    info!(%addr, "wildfire server listening");
    axum::serve(listener, app).await.expect("server run");
}

fn ingest_config_from_env(api_key: &str) -> IngestConfig {
    let base = env::var("FIRMS_BASE_URL").unwrap_or_else(|_| firms::FIRMS_BASE_URL.to_string());
    let source = env::var("FIRMS_SOURCE").unwrap_or_else(|_| "MODIS_NRT".to_string());
    let country = env::var("FIRMS_COUNTRY").unwrap_or_else(|_| "USA".to_string());
    let day_range = env_var_u64("FIRMS_DAY_RANGE", 1) as u32;

    IngestConfig {
        firms_url: firms::country_csv_url(&base, api_key, &source, &country, day_range),
        weather_location_cap: env_var_u64("WEATHER_LOCATION_CAP", 50) as usize,
        weather_spacing: Duration::from_millis(100),
    }
}

async fn ingest_loop(state: AppState, config: IngestConfig, interval_hours: u64) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_hours * 3_600));
    loop {
        ticker.tick().await;
        match pipeline::run_ingest(&state.http, &state.store, &config).await {
            Ok(report) => info!(new_fires = report.fires_new, "scheduled ingest finished"),
            Err(err) => error!(%err, "scheduled ingest failed"),
        }
    }
}

fn env_var_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
