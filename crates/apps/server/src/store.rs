//! JSON-file-backed storage for fires, weather samples and risk records.
//!
//! One file per table under the data root, written atomically (temp file +
//! rename) behind an async mutex. A missing file reads as an empty table.

use std::collections::HashSet;
use std::hash::Hash;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use firedata::{Confidence, DayNight, FireRecord};

#[derive(Debug)]
pub enum StoreError {
    Io(String),
    Corrupt(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "store i/o error: {msg}"),
            StoreError::Corrupt(msg) => write!(f, "store file corrupt: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// One fire detection as ingested from FIRMS, carrying the full column set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub brightness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<f64>,
    pub acq_date: String,
    pub acq_time: String,
    pub satellite: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bright_t31: Option<f64>,
    pub frp: f64,
    pub daynight: DayNight,
}

impl StoredFire {
    /// Projection served by `/api/active_fires`.
    pub fn to_record(&self) -> FireRecord {
        FireRecord {
            latitude: self.latitude,
            longitude: self.longitude,
            brightness: self.brightness,
            confidence: self.confidence.clone(),
            acq_date: self.acq_date.clone(),
            acq_time: self.acq_time.clone(),
            satellite: self.satellite.clone(),
            daynight: self.daynight,
            frp: self.frp,
        }
    }

    fn dedup_key(&self) -> (u64, u64, String, String, String) {
        (
            self.latitude.to_bits(),
            self.longitude.to_bits(),
            self.acq_date.clone(),
            self.acq_time.clone(),
            self.satellite.clone(),
        )
    }
}

/// One hourly weather row for a fire location. Meteo-derived fields are
/// optional because the upstream reports gaps as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSample {
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub soil_temperature: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub precipitation: Option<f64>,
    /// ISO-8601 to the minute, UTC.
    pub weather_datetime: String,
}

impl WeatherSample {
    fn dedup_key(&self) -> (u64, u64, String) {
        (
            self.latitude.to_bits(),
            self.longitude.to_bits(),
            self.weather_datetime.clone(),
        )
    }
}

/// Fire-risk assessment derived from one weather sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub risk_level: u8,
    pub risk_score: f64,
    pub temperature_factor: f64,
    pub humidity_factor: f64,
    pub wind_factor: f64,
    pub soil_factor: f64,
    pub calculation_date: String,
}

impl RiskRecord {
    fn dedup_key(&self) -> (u64, u64, String) {
        (
            self.latitude.to_bits(),
            self.longitude.to_bits(),
            self.calculation_date.clone(),
        )
    }
}

/// Per-level row of `/api/risk-summary`.
#[derive(Debug, Clone, Serialize)]
pub struct RiskBucket {
    pub risk_level: u8,
    pub risk_label: &'static str,
    pub count: usize,
    pub avg_score: f64,
}

struct JsonTable<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _rows: PhantomData<T>,
}

impl<T> JsonTable<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _rows: PhantomData,
        }
    }

    async fn load_unlocked(&self) -> Result<Vec<T>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => serde_json::from_str(&text).map_err(|e| StoreError::Corrupt(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    async fn save_unlocked(&self, rows: &[T]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let text = serde_json::to_string(rows).map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::write(&tmp, text)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let _g = self.lock.lock().await;
        self.load_unlocked().await
    }

    /// Append rows whose key is not already present. Returns how many were
    /// actually added.
    async fn append_dedup<K, F>(&self, new_rows: Vec<T>, key: F) -> Result<usize, StoreError>
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        let _g = self.lock.lock().await;
        let mut rows = self.load_unlocked().await?;
        let mut seen: HashSet<K> = rows.iter().map(&key).collect();

        let before = rows.len();
        for row in new_rows {
            if seen.insert(key(&row)) {
                rows.push(row);
            }
        }
        let added = rows.len() - before;
        if added > 0 {
            self.save_unlocked(&rows).await?;
        }
        Ok(added)
    }
}

pub struct FireStore {
    fires: JsonTable<StoredFire>,
    weather: JsonTable<WeatherSample>,
    risk: JsonTable<RiskRecord>,
}

impl FireStore {
    pub fn open(root: &Path) -> Self {
        FireStore {
            fires: JsonTable::new(root.join("fires.json")),
            weather: JsonTable::new(root.join("weather.json")),
            risk: JsonTable::new(root.join("risk.json")),
        }
    }

    /// Insert fires, skipping rows already present under the
    /// (latitude, longitude, acq_date, acq_time, satellite) key.
    pub async fn upsert_fires(&self, rows: Vec<StoredFire>) -> Result<usize, StoreError> {
        self.fires.append_dedup(rows, StoredFire::dedup_key).await
    }

    pub async fn append_weather(&self, rows: Vec<WeatherSample>) -> Result<usize, StoreError> {
        self.weather
            .append_dedup(rows, WeatherSample::dedup_key)
            .await
    }

    pub async fn append_risk(&self, rows: Vec<RiskRecord>) -> Result<usize, StoreError> {
        self.risk.append_dedup(rows, RiskRecord::dedup_key).await
    }

    /// Fires with `acq_date >= since`, newest acquisition first.
    pub async fn active_fires_since(&self, since: &str) -> Result<Vec<StoredFire>, StoreError> {
        let mut rows: Vec<StoredFire> = self
            .fires
            .list()
            .await?
            .into_iter()
            .filter(|f| f.acq_date.as_str() >= since)
            .collect();
        rows.sort_by(|a, b| {
            (b.acq_date.as_str(), b.acq_time.as_str()).cmp(&(a.acq_date.as_str(), a.acq_time.as_str()))
        });
        Ok(rows)
    }

    /// Risk records with `calculation_date >= cutoff`, newest first.
    pub async fn risk_since(&self, cutoff: &str) -> Result<Vec<RiskRecord>, StoreError> {
        let mut rows: Vec<RiskRecord> = self
            .risk
            .list()
            .await?
            .into_iter()
            .filter(|r| r.calculation_date.as_str() >= cutoff)
            .collect();
        rows.sort_by(|a, b| b.calculation_date.cmp(&a.calculation_date));
        Ok(rows)
    }

    /// Weather within ±0.1 degrees of the coordinate and newer than the
    /// cutoff, newest first, capped at 24 rows.
    pub async fn weather_near(
        &self,
        lat: f64,
        lon: f64,
        cutoff: &str,
    ) -> Result<Vec<WeatherSample>, StoreError> {
        let mut rows: Vec<WeatherSample> = self
            .weather
            .list()
            .await?
            .into_iter()
            .filter(|w| {
                (w.latitude - lat).abs() <= 0.1
                    && (w.longitude - lon).abs() <= 0.1
                    && w.weather_datetime.as_str() >= cutoff
            })
            .collect();
        rows.sort_by(|a, b| b.weather_datetime.cmp(&a.weather_datetime));
        rows.truncate(24);
        Ok(rows)
    }

    /// Count and mean score per risk level, ascending by level.
    pub async fn risk_summary(&self, cutoff: &str) -> Result<Vec<RiskBucket>, StoreError> {
        let rows = self.risk_since(cutoff).await?;

        let mut buckets = Vec::new();
        for level in 1..=5u8 {
            let scores: Vec<f64> = rows
                .iter()
                .filter(|r| r.risk_level == level)
                .map(|r| r.risk_score)
                .collect();
            if scores.is_empty() {
                continue;
            }
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            buckets.push(RiskBucket {
                risk_level: level,
                risk_label: crate::risk::risk_label(level),
                count: scores.len(),
                avg_score: (mean * 1_000.0).round() / 1_000.0,
            });
        }
        Ok(buckets)
    }
}
