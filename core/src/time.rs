//! Time related utils.

use chrono::Utc;

use crate::{Error, Result};

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Compact ISO 8601 layout used by SDK-style date headers: "20210301T034714Z".
///
/// Second precision, no fractional seconds, no separators.
const SDK_DATE_LAYOUT: &str = "%Y%m%dT%H%M%SZ";

/// Get the current UTC time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format a time into the SDK date layout: "20210301T034714Z".
pub fn format_sdk_date(t: DateTime) -> String {
    t.format(SDK_DATE_LAYOUT).to_string()
}

/// Parse a string in the SDK date layout into a [`DateTime`].
pub fn parse_sdk_date(s: &str) -> Result<DateTime> {
    let t = chrono::NaiveDateTime::parse_from_str(s, SDK_DATE_LAYOUT)
        .map_err(|e| Error::unexpected(format!("invalid sdk date {s}")).with_source(e))?;
    Ok(t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sdk_date() {
        let t = parse_sdk_date("20210301T034714Z").unwrap();
        assert_eq!(format_sdk_date(t), "20210301T034714Z");
    }

    #[test]
    fn test_parse_sdk_date_rejects_separators() {
        assert!(parse_sdk_date("2021-03-01T03:47:14Z").is_err());
    }
}
