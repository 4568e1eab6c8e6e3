//! Fire-risk scoring from weather conditions.
//!
//! Each factor is a 0-1 scale; the weighted sum maps to five risk levels.
//! Missing weather values fall back to the no-risk end of each scale.

use crate::store::{RiskRecord, WeatherSample};

pub fn risk_label(level: u8) -> &'static str {
    match level {
        1 => "Low",
        2 => "Moderate",
        3 => "High",
        4 => "Very High",
        5 => "Extreme",
        _ => "Unknown",
    }
}

pub fn assess(sample: &WeatherSample) -> RiskRecord {
    let temperature = sample.temperature.unwrap_or(0.0);
    let humidity = sample.humidity.unwrap_or(100.0);
    let wind_speed = sample.wind_speed.unwrap_or(0.0);
    let soil_moisture = sample.soil_moisture.unwrap_or(1.0);
    let precipitation = sample.precipitation.unwrap_or(0.0);

    // Risk rises above 10 C, saturating at 40 C.
    let temperature_factor = ((temperature - 10.0) / 30.0).clamp(0.0, 1.0);
    // Dry air burns.
    let humidity_factor = ((100.0 - humidity) / 100.0).max(0.0);
    // Saturates at 50 km/h.
    let wind_factor = (wind_speed / 50.0).min(1.0);
    // Dry soil below 0.5 m3/m3 volumetric content.
    let soil_factor = ((0.5 - soil_moisture) / 0.5).max(0.0);
    // Recent rain suppresses; 10 mm zeroes the term.
    let precipitation_factor = (1.0 - precipitation / 10.0).max(0.0);

    let risk_score = temperature_factor * 0.25
        + humidity_factor * 0.3
        + wind_factor * 0.2
        + soil_factor * 0.15
        + precipitation_factor * 0.1;

    let risk_level = if risk_score < 0.2 {
        1
    } else if risk_score < 0.4 {
        2
    } else if risk_score < 0.6 {
        3
    } else if risk_score < 0.8 {
        4
    } else {
        5
    };

    RiskRecord {
        latitude: sample.latitude,
        longitude: sample.longitude,
        risk_level,
        risk_score,
        temperature_factor,
        humidity_factor,
        wind_factor,
        soil_factor,
        calculation_date: sample.weather_datetime.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{assess, risk_label};
    use crate::store::WeatherSample;

    fn sample(
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
        soil_moisture: f64,
        precipitation: f64,
    ) -> WeatherSample {
        WeatherSample {
            latitude: 34.1,
            longitude: -118.3,
            temperature: Some(temperature),
            humidity: Some(humidity),
            wind_speed: Some(wind_speed),
            wind_direction: Some(270.0),
            soil_temperature: Some(temperature),
            soil_moisture: Some(soil_moisture),
            precipitation: Some(precipitation),
            weather_datetime: "2024-01-01T12:00".to_string(),
        }
    }

    #[test]
    fn hot_dry_windy_conditions_are_extreme() {
        let record = assess(&sample(40.0, 10.0, 50.0, 0.0, 0.0));
        assert_eq!(record.risk_level, 5);
        assert!((record.risk_score - 0.97).abs() < 1e-9);
        assert_eq!(record.temperature_factor, 1.0);
        assert_eq!(record.wind_factor, 1.0);
    }

    #[test]
    fn cool_wet_conditions_are_low() {
        let record = assess(&sample(5.0, 95.0, 5.0, 0.6, 20.0));
        assert_eq!(record.risk_level, 1);
        assert!(record.risk_score < 0.2);
        assert_eq!(record.soil_factor, 0.0);
    }

    #[test]
    fn missing_values_fall_back_to_no_risk_defaults() {
        let mut s = sample(0.0, 0.0, 0.0, 0.0, 0.0);
        s.temperature = None;
        s.humidity = None;
        s.wind_speed = None;
        s.soil_moisture = None;
        s.precipitation = None;
        let record = assess(&s);
        // only the dry-spell term remains
        assert!((record.risk_score - 0.1).abs() < 1e-9);
        assert_eq!(record.risk_level, 1);
    }

    #[test]
    fn carries_location_and_timestamp() {
        let record = assess(&sample(20.0, 50.0, 10.0, 0.3, 0.0));
        assert_eq!(record.latitude, 34.1);
        assert_eq!(record.calculation_date, "2024-01-01T12:00");
    }

    #[test]
    fn labels_cover_all_levels() {
        assert_eq!(risk_label(1), "Low");
        assert_eq!(risk_label(3), "High");
        assert_eq!(risk_label(5), "Extreme");
        assert_eq!(risk_label(9), "Unknown");
    }
}
