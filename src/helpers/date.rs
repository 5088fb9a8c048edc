//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format date in full format (like "January 15, 2024")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Format date for cards (like "Jan 5, 2024")
pub fn short_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%b %-d, %Y").to_string()
}

/// Format a date as `YYYY-MM-DD`
pub fn ymd<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%d").to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_full_date() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(full_date(&date), "January 5, 2024");
    }

    #[test]
    fn test_short_date() {
        let date = Utc.with_ymd_and_hms(2024, 11, 28, 0, 0, 0).unwrap();
        assert_eq!(short_date(&date), "Nov 28, 2024");
    }

    #[test]
    fn test_ymd() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(ymd(&date), "2024-01-05");
    }

    #[test]
    fn test_date_xml() {
        let offset = FixedOffset::east_opt(-5 * 3600).unwrap();
        let date = offset.with_ymd_and_hms(2025, 3, 4, 10, 30, 0).unwrap();
        assert_eq!(date_xml(&date), "2025-03-04T10:30:00-05:00");
    }
}
