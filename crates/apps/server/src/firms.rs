//! NASA FIRMS country CSV ingestion.
//!
//! The country endpoint returns one header row followed by one detection per
//! line. Columns are matched by header name, so ordering changes upstream do
//! not break parsing; malformed rows are skipped with a warning rather than
//! failing the whole run.

use std::collections::HashMap;

use tracing::warn;

use crate::error::IngestError;
use crate::store::StoredFire;
use firedata::{Confidence, DayNight};

pub const FIRMS_BASE_URL: &str = "https://firms.modaps.eosdis.nasa.gov";

/// `{base}/api/country/csv/{key}/{source}/{country}/{days}`
pub fn country_csv_url(base: &str, key: &str, source: &str, country: &str, days: u32) -> String {
    format!("{base}/api/country/csv/{key}/{source}/{country}/{days}")
}

pub async fn fetch_country_fires(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<StoredFire>, IngestError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let text = response.text().await?;
    parse_country_csv(&text)
}

struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn from_header(header: &str) -> Self {
        let index = header
            .split(',')
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        Columns { index }
    }

    fn get<'a>(&self, cells: &'a [&'a str], name: &str) -> Option<&'a str> {
        self.index.get(name).and_then(|&i| cells.get(i)).copied()
    }

    fn require(&self, name: &str) -> Result<(), IngestError> {
        if self.index.contains_key(name) {
            Ok(())
        } else {
            Err(IngestError::Csv(format!("missing column {name}")))
        }
    }
}

pub fn parse_country_csv(text: &str) -> Result<Vec<StoredFire>, IngestError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| IngestError::Csv("empty response".to_string()))?;
    let columns = Columns::from_header(header);
    for name in [
        "latitude",
        "longitude",
        "brightness",
        "acq_date",
        "acq_time",
        "satellite",
        "confidence",
        "frp",
        "daynight",
    ] {
        columns.require(name)?;
    }

    let mut fires = Vec::new();
    let mut skipped = 0usize;
    for line in lines {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        match parse_row(&columns, &cells) {
            Some(fire) => fires.push(fire),
            None => {
                skipped += 1;
                warn!(row = line, "skipping malformed FIRMS row");
            }
        }
    }
    if skipped > 0 {
        warn!(skipped, kept = fires.len(), "FIRMS rows dropped during parse");
    }
    Ok(fires)
}

fn parse_row(columns: &Columns, cells: &[&str]) -> Option<StoredFire> {
    let number = |name: &str| columns.get(cells, name)?.parse::<f64>().ok();
    let opt_number = |name: &str| columns.get(cells, name).and_then(|v| v.parse::<f64>().ok());
    let string = |name: &str| Some(columns.get(cells, name)?.to_string());
    let opt_string = |name: &str| {
        columns
            .get(cells, name)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    Some(StoredFire {
        country_id: opt_string("country_id"),
        latitude: number("latitude")?,
        longitude: number("longitude")?,
        brightness: number("brightness")?,
        scan: opt_number("scan"),
        track: opt_number("track"),
        acq_date: string("acq_date")?,
        acq_time: string("acq_time")?,
        satellite: string("satellite")?,
        instrument: opt_string("instrument"),
        confidence: Confidence::parse(columns.get(cells, "confidence")?),
        version: opt_string("version"),
        bright_t31: opt_number("bright_t31"),
        frp: number("frp")?,
        daynight: DayNight::from_code(columns.get(cells, "daynight")?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::{country_csv_url, parse_country_csv};
    use firedata::Confidence;

    const CSV: &str = "\
country_id,latitude,longitude,brightness,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_t31,frp,daynight
USA,34.1,-118.3,310.0,1.1,1.0,2024-01-01,1200,Terra,MODIS,85,6.1NRT,290.4,12.5,D
USA,45.5,-122.7,301.2,1.4,1.2,2024-01-01,1310,Aqua,MODIS,low,6.1NRT,288.0,7.0,N
";

    #[test]
    fn parses_rows_by_header_name() {
        let fires = parse_country_csv(CSV).unwrap();
        assert_eq!(fires.len(), 2);
        assert_eq!(fires[0].latitude, 34.1);
        assert_eq!(fires[0].confidence, Confidence::Numeric(85.0));
        assert_eq!(fires[1].confidence, Confidence::Label("low".to_string()));
        assert_eq!(fires[1].satellite, "Aqua");
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = "\
frp,daynight,satellite,acq_time,acq_date,confidence,brightness,longitude,latitude
12.5,D,Terra,1200,2024-01-01,85,310.0,-118.3,34.1
";
        let fires = parse_country_csv(csv).unwrap();
        assert_eq!(fires.len(), 1);
        assert_eq!(fires[0].frp, 12.5);
        assert!(fires[0].country_id.is_none());
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let csv = format!("{CSV}USA,not-a-number,-1.0,300,,,2024-01-01,1200,Terra,,80,,,1.0,D\n");
        let fires = parse_country_csv(&csv).unwrap();
        assert_eq!(fires.len(), 2);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "latitude,longitude\n1.0,2.0\n";
        assert!(parse_country_csv(csv).is_err());
    }

    #[test]
    fn url_shape_matches_the_country_api() {
        let url = country_csv_url("https://example.org", "KEY", "MODIS_NRT", "USA", 1);
        assert_eq!(url, "https://example.org/api/country/csv/KEY/MODIS_NRT/USA/1");
    }
}
