//! Open-Meteo forecast fetch and flattening.

use serde::Deserialize;

use crate::error::IngestError;
use crate::store::WeatherSample;

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

const HOURLY_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,\
wind_direction_10m,soil_temperature_0cm,soil_moisture_0_to_1cm,precipitation";

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub hourly: Option<Hourly>,
}

/// Parallel hourly arrays; the upstream reports missing values as null.
#[derive(Debug, Default, Deserialize)]
pub struct Hourly {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_direction_10m: Vec<Option<f64>>,
    #[serde(default)]
    pub soil_temperature_0cm: Vec<Option<f64>>,
    #[serde(default)]
    pub soil_moisture_0_to_1cm: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
}

pub async fn fetch_forecast(
    client: &reqwest::Client,
    lat: f64,
    lon: f64,
) -> Result<ForecastResponse, IngestError> {
    let response = client
        .get(OPEN_METEO_URL)
        .query(&[
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("hourly", HOURLY_FIELDS.to_string()),
            ("forecast_days", "3".to_string()),
            ("past_days", "1".to_string()),
            ("timezone", "UTC".to_string()),
        ])
        .send()
        .await?
        .error_for_status()?;
    Ok(response.json().await?)
}

/// One sample per timestamp, all hourly arrays zipped by index.
pub fn flatten_hourly(response: ForecastResponse, lat: f64, lon: f64) -> Vec<WeatherSample> {
    let Some(hourly) = response.hourly else {
        return Vec::new();
    };

    let at = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

    hourly
        .time
        .iter()
        .enumerate()
        .map(|(i, timestamp)| WeatherSample {
            latitude: lat,
            longitude: lon,
            temperature: at(&hourly.temperature_2m, i),
            humidity: at(&hourly.relative_humidity_2m, i),
            wind_speed: at(&hourly.wind_speed_10m, i),
            wind_direction: at(&hourly.wind_direction_10m, i),
            soil_temperature: at(&hourly.soil_temperature_0cm, i),
            soil_moisture: at(&hourly.soil_moisture_0_to_1cm, i),
            precipitation: at(&hourly.precipitation, i),
            weather_datetime: timestamp.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ForecastResponse, flatten_hourly};

    #[test]
    fn flattens_every_timestamp() {
        let body = r#"{"hourly":{
            "time":["2024-01-01T00:00","2024-01-01T01:00"],
            "temperature_2m":[12.0,null],
            "relative_humidity_2m":[55.0,60.0],
            "wind_speed_10m":[10.0,12.0],
            "wind_direction_10m":[180.0,190.0],
            "soil_temperature_0cm":[8.0,7.5],
            "soil_moisture_0_to_1cm":[0.32,0.31],
            "precipitation":[0.0,0.2]}}"#;
        let response: ForecastResponse = serde_json::from_str(body).unwrap();
        let samples = flatten_hourly(response, 34.1, -118.3);

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].weather_datetime, "2024-01-01T00:00");
        assert_eq!(samples[0].temperature, Some(12.0));
        assert_eq!(samples[1].temperature, None);
        assert_eq!(samples[1].precipitation, Some(0.2));
        assert_eq!(samples[1].latitude, 34.1);
    }

    #[test]
    fn missing_hourly_block_yields_no_samples() {
        let response: ForecastResponse = serde_json::from_str("{}").unwrap();
        assert!(flatten_hourly(response, 0.0, 0.0).is_empty());
    }

    #[test]
    fn short_arrays_read_as_gaps() {
        let body = r#"{"hourly":{"time":["2024-01-01T00:00","2024-01-01T01:00"],
            "temperature_2m":[12.0]}}"#;
        let response: ForecastResponse = serde_json::from_str(body).unwrap();
        let samples = flatten_hourly(response, 0.0, 0.0);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].temperature, None);
        assert_eq!(samples[0].humidity, None);
    }
}
