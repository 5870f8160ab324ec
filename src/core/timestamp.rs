//! Timestamp formatting for rendered records
//!
//! Records carry local time with millisecond precision, e.g.
//! `2025-01-08 10:30:45.123`.

use chrono::{DateTime, Local};

/// strftime pattern for record timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Format a local timestamp as `YYYY-MM-DD HH:MM:SS.mmm`
#[must_use]
pub fn format_local(datetime: &DateTime<Local>) -> String {
    datetime.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_millisecond_precision() {
        let datetime = Local
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .unwrap()
            + chrono::Duration::milliseconds(7);
        assert_eq!(format_local(&datetime), "2025-01-08 10:30:45.007");
    }

    #[test]
    fn test_shape() {
        let formatted = format_local(&Local::now());
        assert_eq!(formatted.len(), "YYYY-MM-DD HH:MM:SS.mmm".len());
        assert_eq!(&formatted[10..11], " ");
        assert_eq!(&formatted[19..20], ".");
    }
}
