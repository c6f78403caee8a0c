use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{ISO_DATE_FORMAT, RANGE_SEPARATOR, prelude::*};

/// How subtracting months treats a day that doesn't exist in the target month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthRollback {
    /// Clamp to the last day of the target month (2024-03-31 - 1 month = 2024-02-29)
    #[default]
    Clamp,
    /// Carry the surplus days into the following month, the way a browser's
    /// `Date.setMonth` does (2023-03-31 - 1 month = 2023-03-03)
    Overflow,
}

/// An inclusive range of calendar days.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct CalendarRange {
    start: NaiveDate,
    end:   NaiveDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Lookback window is negative.
    #[error("Invalid lookback: {0} months (must not be negative)")]
    NegativeLookback(i32),

    /// Shifting the end date leaves the representable calendar.
    #[error("Lookback of {months} months from {end} is outside the supported calendar")]
    OutOfBounds { end: NaiveDate, months: u32 },

    /// Date component could not be parsed.
    #[error("Invalid date {input:?}: {reason}")]
    InvalidDate { input: String, reason: String },

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

/// Parses a strict `yyyy-mm-dd` date.
///
/// Only the canonical spelling is accepted: no padding, sign or short fields,
/// so a key matches exactly one day and every day has exactly one key.
///
/// # Errors
/// Returns `RangeError::InvalidDate` if `input` isn't a valid ISO calendar date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, RangeError> {
    let invalid = |reason: String| RangeError::InvalidDate {
        input: input.to_owned(),
        reason,
    };

    let date = NaiveDate::parse_from_str(input, ISO_DATE_FORMAT).map_err(|e| invalid(e.to_string()))?;
    if date.format(ISO_DATE_FORMAT).to_string() != input {
        return Err(invalid("not in canonical yyyy-mm-dd form".to_owned()));
    }
    Ok(date)
}

/// Shifts `end` back by `months` calendar months.
///
/// # Errors
/// Returns `RangeError::OutOfBounds` if the result can't be represented.
pub fn months_before(end: NaiveDate, months: u32, rollback: MonthRollback) -> Result<NaiveDate, RangeError> {
    let out_of_bounds = || RangeError::OutOfBounds { end, months };

    match rollback {
        MonthRollback::Clamp => end.checked_sub_months(Months::new(months)).ok_or_else(out_of_bounds),
        MonthRollback::Overflow => {
            // Day one exists in every month, so only the surplus needs carrying.
            let first_of_month = end.with_day(1).ok_or_else(out_of_bounds)?;
            first_of_month
                .checked_sub_months(Months::new(months))
                .and_then(|target| target.checked_add_days(Days::new(u64::from(end.day0()))))
                .ok_or_else(out_of_bounds)
        },
    }
}

impl CalendarRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range ending at `end` and starting `months_back` calendar months earlier.
    ///
    /// # Errors
    /// Returns `RangeError::NegativeLookback` if `months_back` < 0, or
    /// `RangeError::OutOfBounds` if the start date can't be represented.
    pub fn looking_back(end: NaiveDate, months_back: i32, rollback: MonthRollback) -> Result<Self, RangeError> {
        let months = u32::try_from(months_back).map_err(|_| RangeError::NegativeLookback(months_back))?;
        let start = months_before(end, months, rollback)?;
        Self::new(start, end)
    }

    /// Returns the first day of the range
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the range
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    /// Number of days in the range, both ends included
    pub fn day_count(&self) -> usize {
        // start <= end, so the difference is never negative
        usize::try_from((self.end - self.start).num_days()).map_or(0, |days| days + 1)
    }

    /// Every day of the range in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl FromStr for CalendarRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = parse_iso_date(start_str)?;
                let end = parse_iso_date(end_str)?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for CalendarRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_new_range_cases() {
        struct TestCase {
            start:          NaiveDate,
            end:            NaiveDate,
            should_succeed: bool,
            description:    &'static str,
        }

        let cases = [
            TestCase {
                start:          date(2023, 12, 15),
                end:            date(2024, 1, 15),
                should_succeed: true,
                description:    "valid range (start < end)",
            },
            TestCase {
                start:          date(2024, 1, 15),
                end:            date(2023, 12, 15),
                should_succeed: false,
                description:    "invalid range (start > end)",
            },
            TestCase {
                start:          date(2024, 1, 15),
                end:            date(2024, 1, 15),
                should_succeed: true,
                description:    "single day (start == end)",
            },
        ];

        for case in &cases {
            let range = CalendarRange::new(case.start, case.end);

            if case.should_succeed {
                assert!(range.is_ok(), "Expected success for: {}", case.description);
            } else {
                assert!(range.is_err(), "Expected failure for: {}", case.description);
            }
        }
    }

    #[test]
    fn test_looking_back_one_month() {
        let range = CalendarRange::looking_back(date(2024, 1, 15), 1, MonthRollback::Clamp)
            .expect("failed to construct one-month range");

        assert_eq!(range.dates(), (date(2023, 12, 15), date(2024, 1, 15)));
        assert_eq!(range.day_count(), 32);
    }

    #[test]
    fn test_looking_back_zero_months_is_single_day() {
        let range = CalendarRange::looking_back(date(2024, 1, 15), 0, MonthRollback::Clamp)
            .expect("failed to construct zero-month range");

        assert_eq!(range.start(), range.end());
        assert_eq!(range.day_count(), 1);
        assert_eq!(range.days().count(), 1);
    }

    #[test]
    fn test_looking_back_negative_fails_fast() {
        let result = CalendarRange::looking_back(date(2024, 1, 15), -1, MonthRollback::Clamp);
        assert_eq!(result, Err(RangeError::NegativeLookback(-1)));
    }

    #[test]
    fn test_looking_back_out_of_bounds() {
        let result = CalendarRange::looking_back(NaiveDate::MIN, 1, MonthRollback::Clamp);
        assert!(matches!(result, Err(RangeError::OutOfBounds { months: 1, .. })));

        let result = CalendarRange::looking_back(NaiveDate::MIN, 1, MonthRollback::Overflow);
        assert!(matches!(result, Err(RangeError::OutOfBounds { months: 1, .. })));
    }

    #[test]
    fn test_month_rollback_cases() {
        struct TestCase {
            end:         NaiveDate,
            months:      u32,
            rollback:    MonthRollback,
            expected:    NaiveDate,
            description: &'static str,
        }

        let cases = [
            TestCase {
                end:         date(2024, 3, 31),
                months:      1,
                rollback:    MonthRollback::Clamp,
                expected:    date(2024, 2, 29),
                description: "clamp to leap February",
            },
            TestCase {
                end:         date(2023, 3, 31),
                months:      1,
                rollback:    MonthRollback::Clamp,
                expected:    date(2023, 2, 28),
                description: "clamp to common February",
            },
            TestCase {
                end:         date(2023, 3, 31),
                months:      1,
                rollback:    MonthRollback::Overflow,
                expected:    date(2023, 3, 3),
                description: "overflow past common February",
            },
            TestCase {
                end:         date(2024, 3, 31),
                months:      1,
                rollback:    MonthRollback::Overflow,
                expected:    date(2024, 3, 2),
                description: "overflow past leap February",
            },
            TestCase {
                end:         date(2024, 1, 15),
                months:      12,
                rollback:    MonthRollback::Overflow,
                expected:    date(2023, 1, 15),
                description: "day exists in target month",
            },
            TestCase {
                end:         date(2024, 2, 29),
                months:      12,
                rollback:    MonthRollback::Clamp,
                expected:    date(2023, 2, 28),
                description: "leap day one year back, clamped",
            },
            TestCase {
                end:         date(2024, 2, 29),
                months:      12,
                rollback:    MonthRollback::Overflow,
                expected:    date(2023, 3, 1),
                description: "leap day one year back, overflowed",
            },
        ];

        for case in &cases {
            let start = months_before(case.end, case.months, case.rollback)
                .unwrap_or_else(|e| panic!("{}: {e}", case.description));
            assert_eq!(start, case.expected, "{}", case.description);
        }
    }

    #[test]
    fn test_days_are_contiguous() {
        let range = CalendarRange::new(date(2024, 2, 27), date(2024, 3, 2))
            .expect("failed to construct range for iteration test");
        let days: Vec<NaiveDate> = range.days().collect();

        assert_eq!(
            days,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1),
                date(2024, 3, 2),
            ]
        );
        assert_eq!(days.len(), range.day_count());
    }

    #[test]
    fn test_contains() {
        let range = CalendarRange::new(date(2023, 12, 15), date(2024, 1, 15))
            .expect("failed to construct range for contains test");

        assert!(range.contains(date(2023, 12, 15)));
        assert!(range.contains(date(2024, 1, 15)));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(!range.contains(date(2023, 12, 14)));
        assert!(!range.contains(date(2024, 1, 16)));
    }

    #[test]
    fn test_display() {
        let range = CalendarRange::new(date(2023, 12, 15), date(2024, 1, 15))
            .expect("failed to construct range for display test");

        assert_eq!(range.to_string(), "2023-12-15/2024-01-15");
    }

    #[test]
    fn test_from_str() {
        let range = "2023-12-15/2024-01-15"
            .parse::<CalendarRange>()
            .expect("failed to parse range");
        assert_eq!(range.start(), date(2023, 12, 15));
        assert_eq!(range.end(), date(2024, 1, 15));
    }

    #[test]
    fn test_from_str_invalid_order() {
        let result = "2024-01-15/2023-12-15".parse::<CalendarRange>();
        assert!(matches!(result, Err(RangeError::InvalidRange { .. })));
    }

    #[test]
    fn test_from_str_invalid_date() {
        let result = "2024-02-30/2024-03-01".parse::<CalendarRange>();
        assert!(matches!(result, Err(RangeError::InvalidDate { .. })));
    }

    #[test]
    fn test_parse_iso_date_requires_canonical_form() {
        assert_eq!(parse_iso_date("2024-01-05"), Ok(date(2024, 1, 5)));

        for input in ["2024-1-5", "2024-01-5", "2024-1-05", "+2024-01-05", " 2024-01-05 ", "2024-01-05\n"] {
            assert!(
                matches!(parse_iso_date(input), Err(RangeError::InvalidDate { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_too_many_range_separators() {
        let result = "2024-01-01/2024-01-02/2024-01-03".parse::<CalendarRange>();
        let err = result.expect_err("expected error for too many range separators");
        assert!(err.to_string().contains("Too many '/' separators"));
        assert!(err.to_string().contains("expected 1, found 2"));
    }

    #[test]
    fn test_no_range_separator() {
        let result = "2024-01-01".parse::<CalendarRange>();
        let err = result.expect_err("expected error for missing range separator");
        assert!(err.to_string().contains("No range separator found"));
    }

    #[test]
    fn test_serde_string_format() {
        let range = CalendarRange::new(date(2023, 12, 15), date(2024, 1, 15))
            .expect("failed to construct range for serde string test");

        let json = serde_json::to_string(&range).expect("failed to serialize range to JSON");
        assert_eq!(json, r#""2023-12-15/2024-01-15""#);

        let parsed: CalendarRange = serde_json::from_str(&json).expect("failed to deserialize range from JSON");
        assert_eq!(range, parsed);
    }

    #[test]
    fn test_month_rollback_serde() {
        let rollback: MonthRollback = serde_json::from_str(r#""overflow""#).expect("failed to parse rollback");
        assert_eq!(rollback, MonthRollback::Overflow);
        assert_eq!(MonthRollback::default(), MonthRollback::Clamp);
    }
}
