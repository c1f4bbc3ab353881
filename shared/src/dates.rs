//! Date formatting for record tables
//!
//! Both formatters are total: anything that cannot be shown as a calendar date
//! collapses to [`UNSET_LABEL`].

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Label shown for missing or sentinel dates.
pub const UNSET_LABEL: &str = "Не указано";

/// 2000-01-01T00:00:00Z. The backend stores "no date" as epoch zero or close to it.
pub const EPOCH_FLOOR_SECS: i64 = 946_684_800;

const DISPLAY_FORMAT: &str = "%d.%m.%Y, %H:%M";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// A date column as it arrives on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Number(i64),
    Text(String),
}

impl From<&str> for DateValue {
    fn from(s: &str) -> Self {
        DateValue::Text(s.to_string())
    }
}

impl From<i64> for DateValue {
    fn from(n: i64) -> Self {
        DateValue::Number(n)
    }
}

enum Parsed {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl Parsed {
    fn local_naive<Tz>(&self, tz: &Tz) -> NaiveDateTime
    where
        Tz: TimeZone,
    {
        match self {
            Parsed::Zoned(dt) => dt.with_timezone(tz).naive_local(),
            Parsed::Naive(naive) => *naive,
        }
    }
}

fn parse_text(text: &str) -> Option<Parsed> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(Parsed::Zoned(dt));
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(Parsed::Zoned(dt));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Parsed::Naive(naive));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(Parsed::Naive)
}

fn from_utc(dt: DateTime<Utc>) -> Parsed {
    Parsed::Zoned(dt.fixed_offset())
}

fn render<Tz>(parsed: &Parsed, tz: &Tz) -> String
where
    Tz: TimeZone,
{
    parsed.local_naive(tz).format(DISPLAY_FORMAT).to_string()
}

/// Format any date-like value for display in `tz`.
///
/// Text is parsed as RFC 3339 or one of the SQL datetime shapes; a bare
/// number is taken as epoch milliseconds. Zero counts as unset.
pub fn format_date_in<Tz>(value: Option<&DateValue>, tz: &Tz) -> String
where
    Tz: TimeZone,
{
    let parsed = match value {
        Some(DateValue::Text(text)) => parse_text(text),
        Some(DateValue::Number(0)) => None,
        Some(DateValue::Number(ms)) => Utc.timestamp_millis_opt(*ms).single().map(from_utc),
        None => None,
    };
    parsed
        .map(|p| render(&p, tz))
        .unwrap_or_else(|| UNSET_LABEL.to_string())
}

/// Format a date from columns that use epoch seconds and sentinel values.
///
/// Numbers and all-digit strings are epoch seconds; anything before
/// [`EPOCH_FLOOR_SECS`] or any calendar year before 2000 is treated as unset.
pub fn format_date_legacy_in<Tz>(value: Option<&DateValue>, tz: &Tz) -> String
where
    Tz: TimeZone,
{
    let epoch_secs = match value {
        None => return UNSET_LABEL.to_string(),
        Some(DateValue::Number(secs)) => Some(Some(*secs)),
        Some(DateValue::Text(text)) => {
            let text = text.trim();
            if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
                // Digit strings too long for i64 are not dates.
                Some(text.parse::<i64>().ok())
            } else {
                None
            }
        }
    };

    let parsed = match epoch_secs {
        Some(Some(secs)) if secs >= EPOCH_FLOOR_SECS => {
            Utc.timestamp_opt(secs, 0).single().map(from_utc)
        }
        Some(_) => None,
        None => match value {
            Some(DateValue::Text(text)) => parse_text(text),
            _ => None,
        },
    };

    match parsed {
        Some(p) => {
            let local = p.local_naive(tz);
            if local.year() < 2000 {
                UNSET_LABEL.to_string()
            } else {
                render(&p, tz)
            }
        }
        None => UNSET_LABEL.to_string(),
    }
}

/// [`format_date_in`] in the viewer's local time zone.
pub fn format_date(value: Option<&DateValue>) -> String {
    format_date_in(value, &Local)
}

/// [`format_date_legacy_in`] in the viewer's local time zone.
pub fn format_date_legacy(value: Option<&DateValue>) -> String {
    format_date_legacy_in(value, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn std_utc(v: impl Into<DateValue>) -> String {
        format_date_in(Some(&v.into()), &Utc)
    }

    fn legacy_utc(v: impl Into<DateValue>) -> String {
        format_date_legacy_in(Some(&v.into()), &Utc)
    }

    #[test]
    fn standard_formats_sql_datetime() {
        assert_eq!(std_utc("2024-03-05 07:09:00"), "05.03.2024, 07:09");
        assert_eq!(std_utc("2024-03-05T23:59:59"), "05.03.2024, 23:59");
        assert_eq!(std_utc("2024-03-05"), "05.03.2024, 00:00");
    }

    #[test]
    fn standard_converts_zoned_values() {
        assert_eq!(std_utc("2024-03-05T10:00:00+03:00"), "05.03.2024, 07:00");
        let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
        assert_eq!(
            format_date_in(Some(&"2024-03-05T10:00:00Z".into()), &moscow),
            "05.03.2024, 13:00"
        );
    }

    #[test]
    fn standard_unset_for_missing_or_invalid() {
        assert_eq!(format_date_in(None, &Utc), UNSET_LABEL);
        assert_eq!(std_utc(""), UNSET_LABEL);
        assert_eq!(std_utc("   "), UNSET_LABEL);
        assert_eq!(std_utc("not a date"), UNSET_LABEL);
        assert_eq!(std_utc("0000-00-00 00:00:00"), UNSET_LABEL);
        assert_eq!(std_utc("2024-02-30 10:00:00"), UNSET_LABEL);
        assert_eq!(std_utc("1700000000"), UNSET_LABEL);
    }

    #[test]
    fn standard_numbers_are_milliseconds() {
        assert_eq!(std_utc(946_684_800_000), "01.01.2000, 00:00");
    }

    #[test]
    fn standard_zero_is_unset() {
        assert_eq!(std_utc(0i64), UNSET_LABEL);
        assert_eq!(format_date_in(Some(&DateValue::Number(0)), &Utc), UNSET_LABEL);
    }

    #[test]
    fn legacy_epoch_floor() {
        assert_eq!(legacy_utc("0"), UNSET_LABEL);
        assert_eq!(legacy_utc("946684799"), UNSET_LABEL);
        assert_eq!(legacy_utc(946_684_799), UNSET_LABEL);
        assert_eq!(legacy_utc("946684800"), "01.01.2000, 00:00");
        assert_eq!(legacy_utc(1_700_000_000), "14.11.2023, 22:13");
    }

    #[test]
    fn legacy_rejects_pre_2000_calendar_dates() {
        assert_eq!(legacy_utc("1999-12-31 23:59:00"), UNSET_LABEL);
        assert_eq!(legacy_utc("1970-01-01T00:00:00Z"), UNSET_LABEL);
        assert_eq!(legacy_utc("2000-01-01 00:00:00"), "01.01.2000, 00:00");
    }

    #[test]
    fn legacy_unset_for_garbage() {
        assert_eq!(format_date_legacy_in(None, &Utc), UNSET_LABEL);
        assert_eq!(legacy_utc(""), UNSET_LABEL);
        assert_eq!(legacy_utc("-5"), UNSET_LABEL);
        assert_eq!(legacy_utc("99999999999999999999999"), UNSET_LABEL);
        assert_eq!(legacy_utc("yesterday"), UNSET_LABEL);
    }
}
