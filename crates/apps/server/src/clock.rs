//! UTC civil-date helpers.
//!
//! The API filters by date and ISO-8601 minute strings compared
//! lexicographically, so all we need from the calendar is day arithmetic.

use std::time::{SystemTime, UNIX_EPOCH};

const SECS_PER_DAY: i64 = 86_400;

fn unix_seconds_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(_) => 0,
    }
}

/// Civil date for a count of days since 1970-01-01.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = if month <= 2 { year + 1 } else { year };
    (year, month, day)
}

fn format_date(days: i64) -> String {
    let (y, m, d) = civil_from_days(days);
    format!("{y:04}-{m:02}-{d:02}")
}

/// "YYYY-MM-DD" for UTC now minus `days_back` whole days.
pub fn date_days_ago(days_back: i64) -> String {
    let days = unix_seconds_now().div_euclid(SECS_PER_DAY) - days_back;
    format_date(days)
}

/// "YYYY-MM-DDTHH:MM" for UTC now minus `hours_back` hours. Matches the
/// minute resolution of Open-Meteo timestamps.
pub fn datetime_hours_ago(hours_back: i64) -> String {
    let secs = unix_seconds_now() - hours_back * 3_600;
    let days = secs.div_euclid(SECS_PER_DAY);
    let rem = secs.rem_euclid(SECS_PER_DAY);
    format!("{}T{:02}:{:02}", format_date(days), rem / 3_600, rem % 3_600 / 60)
}

#[cfg(test)]
mod tests {
    use super::{civil_from_days, format_date};

    #[test]
    fn epoch_is_1970_01_01() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn leap_day_2024() {
        // 2024-02-29 is 19_782 days after the epoch.
        assert_eq!(format_date(19_782), "2024-02-29");
        assert_eq!(format_date(19_783), "2024-03-01");
    }

    #[test]
    fn pre_epoch_dates_work() {
        assert_eq!(civil_from_days(-1), (1969, 12, 31));
    }

    #[test]
    fn iso_strings_order_lexicographically() {
        assert!(format_date(19_783) > format_date(19_782));
        assert!("2024-03-01T00:10".to_string() > "2024-03-01T00:09".to_string());
    }
}
