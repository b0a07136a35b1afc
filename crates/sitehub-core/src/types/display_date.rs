//! Human-readable date rendering shared by account listings and the dashboard.

use chrono::{DateTime, NaiveDate, Utc};

/// Format used for dates shown in the admin UI, e.g. `Mar 07, 2025`.
pub const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y";

/// Render a timestamp as a display date.
pub fn format_display_date(at: &DateTime<Utc>) -> String {
    at.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Render a calendar date as a display date.
pub fn format_display_day(day: &NaiveDate) -> String {
    day.format(DISPLAY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_zero_padded_day() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 14, 0, 0).unwrap();
        assert_eq!(format_display_date(&at), "Mar 07, 2025");
    }

    #[test]
    fn test_calendar_day() {
        let day = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(format_display_day(&day), "Dec 25, 2024");
    }
}
