use geoprim::LatLng;
use serde::{Deserialize, Serialize};

/// One active-fire detection.
///
/// Immutable once received; a record has no identity beyond its position in
/// the response sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub brightness: f64,
    pub confidence: Confidence,
    pub acq_date: String,
    pub acq_time: String,
    pub satellite: String,
    pub daynight: DayNight,
    /// Fire radiative power, MW.
    pub frp: f64,
}

/// Detection confidence. MODIS reports a 0-100 number, VIIRS reports a
/// low/nominal/high label; the API passes through whichever the source used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    Numeric(f64),
    Label(String),
}

impl Confidence {
    /// Parse a raw CSV cell: numeric if it reads as a number, else a label.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) => Confidence::Numeric(v),
            Err(_) => Confidence::Label(raw.trim().to_string()),
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::Numeric(v) => write!(f, "{v}"),
            Confidence::Label(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayNight {
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "N")]
    Night,
}

impl DayNight {
    /// Single-letter code used by the FIRMS CSV and the JSON wire form.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "D" => Some(DayNight::Day),
            "N" => Some(DayNight::Night),
            _ => None,
        }
    }
}

impl std::fmt::Display for DayNight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayNight::Day => write!(f, "Day"),
            DayNight::Night => write!(f, "Night"),
        }
    }
}

impl FireRecord {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Popup body for a rendered marker. Every field appears verbatim; the
    /// popup is the only place a record is shown to the user.
    pub fn popup_html(&self) -> String {
        format!(
            "<b>Active Fire</b><br>\
             Latitude: {}<br>\
             Longitude: {}<br>\
             Brightness: {}<br>\
             Confidence: {}<br>\
             Date: {}<br>\
             Time: {}<br>\
             Satellite: {}<br>\
             Day/Night: {}<br>\
             FRP: {} MW",
            self.latitude,
            self.longitude,
            self.brightness,
            self.confidence,
            self.acq_date,
            self.acq_time,
            self.satellite,
            self.daynight,
            self.frp,
        )
    }
}
