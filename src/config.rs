use chrono::{DateTime, FixedOffset, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::range::MonthRollback;
use crate::{CalendarError, DEFAULT_MONTHS_BACK};

/// Calendar settings. Every field has a default, so partial documents
/// (a JSON request body, a TOML table) deserialize cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarOptions {
    /// Lookback window in calendar months
    pub months_back:        i32,
    /// Weekday that opens each column
    pub first_day_of_week:  Weekday,
    /// How the start date is derived when the end day doesn't exist in the start month
    pub month_rollback:     MonthRollback,
    /// Offset of the timezone "today" is taken in
    pub utc_offset_seconds: i32,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            months_back:        DEFAULT_MONTHS_BACK,
            first_day_of_week:  Weekday::Sun,
            month_rollback:     MonthRollback::Clamp,
            utc_offset_seconds: 0,
        }
    }
}

impl CalendarOptions {
    /// Current date in the configured offset
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidUtcOffset` if the offset is a day or more.
    pub fn today(&self) -> Result<NaiveDate, CalendarError> {
        today_at_offset(self.utc_offset_seconds)
    }
}

/// Current calendar date in a fixed UTC offset.
///
/// # Errors
/// Returns `CalendarError::InvalidUtcOffset` if `|utc_offset_seconds|` is a day or more.
pub fn today_at_offset(utc_offset_seconds: i32) -> Result<NaiveDate, CalendarError> {
    date_at_offset(Utc::now(), utc_offset_seconds)
}

/// Calendar date of `instant` in a fixed UTC offset.
///
/// # Errors
/// Returns `CalendarError::InvalidUtcOffset` if `|utc_offset_seconds|` is a day or more.
pub fn date_at_offset(instant: DateTime<Utc>, utc_offset_seconds: i32) -> Result<NaiveDate, CalendarError> {
    let offset =
        FixedOffset::east_opt(utc_offset_seconds).ok_or(CalendarError::InvalidUtcOffset(utc_offset_seconds))?;
    Ok(instant.with_timezone(&offset).date_naive())
}
