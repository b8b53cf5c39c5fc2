//! Query value rendering shared by the resource accessors.

use chrono::{DateTime, SecondsFormat, Utc};

/// Largest page size the API accepts for list endpoints.
pub const MAX_PAGE_SIZE: u32 = 10;

/// Cap a requested page size at [`MAX_PAGE_SIZE`]. Larger values are not an
/// error, the API just never returns more than ten items.
pub fn clamp_page_size(size: u32) -> u32 {
    size.min(MAX_PAGE_SIZE)
}

/// Render a timestamp the way the `since` query parameter expects it:
/// RFC3339 with nanosecond precision, `Z` for UTC.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn clamp_page_size_caps_at_ten() {
        assert_eq!(clamp_page_size(2), 2);
        assert_eq!(clamp_page_size(10), 10);
        assert_eq!(clamp_page_size(11), 10);
        assert_eq!(clamp_page_size(u32::MAX), 10);
    }

    #[test]
    fn format_timestamp_uses_nanosecond_precision() {
        let ts = Utc
            .with_ymd_and_hms(2024, 8, 21, 12, 31, 56)
            .single()
            .expect("valid timestamp");
        assert_eq!(format_timestamp(ts), "2024-08-21T12:31:56.000000000Z");
    }

    #[test]
    fn format_timestamp_keeps_subsecond_digits() {
        let ts = DateTime::parse_from_rfc3339("2024-08-21T12:31:56.123456789+02:00")
            .expect("parse")
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(ts), "2024-08-21T10:31:56.123456789Z");
    }
}
