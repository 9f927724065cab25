use chrono::{DateTime, Local, Utc};

use crate::record::Record;
use crate::settings::DisplayTimeZone;
use crate::types::DateField;

use super::PLACEHOLDER;

/// FILETIME ticks between 1601-01-01 and 1970-01-01.
pub const EPOCH_DIFFERENCE: u128 = 116_444_736_000_000_000;
/// FILETIME ticks are 100 ns.
pub const TICKS_PER_MILLISECOND: u128 = 10_000;
/// Largest millisecond offset accepted for conversion (2^53 - 1).
pub const MAX_SAFE_MILLISECONDS: u128 = 9_007_199_254_740_991;

const DATE_FORMAT: &str = "%Y/%m/%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Display parts of a timestamp column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDate {
    pub date: String,
    pub time: String,
    /// `"date time"`, used as a tooltip.
    pub title: String,
}

impl FormattedDate {
    fn absent() -> Self {
        Self {
            date: PLACEHOLDER.to_string(),
            time: String::new(),
            title: String::new(),
        }
    }
}

/// Converts FILETIME ticks to a UTC instant.
///
/// Ticks at or before the Unix epoch, offsets beyond 2^53 - 1 ms, and
/// instants chrono cannot represent all yield `None`.
pub fn filetime_to_datetime(ticks: Option<u128>) -> Option<DateTime<Utc>> {
    let ticks = ticks?;
    if ticks <= EPOCH_DIFFERENCE {
        return None;
    }
    let millis = (ticks - EPOCH_DIFFERENCE) / TICKS_PER_MILLISECOND;
    if millis > MAX_SAFE_MILLISECONDS {
        return None;
    }
    DateTime::from_timestamp_millis(i64::try_from(millis).ok()?)
}

/// Formats one timestamp column of a record in the given zone.
pub fn format_date(record: &Record, field: DateField, zone: DisplayTimeZone) -> FormattedDate {
    let ticks = match field {
        DateField::Modified => record.modified(),
        DateField::Created => record.created(),
    };
    let Some(instant) = filetime_to_datetime(ticks) else {
        return FormattedDate::absent();
    };

    let (date, time) = match zone {
        DisplayTimeZone::Utc => render(&instant),
        DisplayTimeZone::Local => render(&instant.with_timezone(&Local)),
    };
    let title = format!("{date} {time}");
    FormattedDate { date, time, title }
}

fn render<Tz>(instant: &DateTime<Tz>) -> (String, String)
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    (
        instant.format(DATE_FORMAT).to_string(),
        instant.format(TIME_FORMAT).to_string(),
    )
}
