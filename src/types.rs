use crate::consts::{
    DAYS_PER_WEEK, LEVEL_TITLES, MAX_LEVEL, MONTH_ABBREVIATIONS, MONTH_NAMES, WEEKDAY_NAMES,
};
use crate::level::level_of;
use crate::prelude::*;
use crate::range::CalendarRange;
use crate::CalendarError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A contribution level guaranteed to be in the range `0..=MAX_LEVEL` (0..=4)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Into, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Level of a day without contributions
    pub const NONE: Self = Self(0);
    /// Highest level
    pub const MAX: Self = Self(MAX_LEVEL);

    /// Creates a new Level, validating that it's <= `MAX_LEVEL`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidLevel` if the value is > `MAX_LEVEL`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        if value > MAX_LEVEL {
            return Err(CalendarError::InvalidLevel(value));
        }
        Ok(Self(value))
    }

    /// Index into the legend. Callers guarantee `index <= MAX_LEVEL`.
    pub(crate) const fn from_legend_index(index: usize) -> Self {
        debug_assert!(index <= MAX_LEVEL as usize);
        Self(index as u8)
    }

    /// Returns the level value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Legend title describing the count bucket of this level
    pub const fn title(self) -> &'static str {
        LEVEL_TITLES[self.0 as usize]
    }
}

impl TryFrom<u8> for Level {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Weekday index counted from Sunday (0) to Saturday (6)
#[inline]
pub fn weekday_index(weekday: Weekday) -> u8 {
    // num_days_from_sunday is always < 7
    weekday.num_days_from_sunday() as u8
}

/// Converts a Sunday-based index (0..=6) back into a `Weekday`
///
/// # Errors
/// Returns `CalendarError::InvalidWeekday` if the index is > 6.
pub fn weekday_from_index(index: u8) -> Result<Weekday, CalendarError> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(CalendarError::InvalidWeekday(index)),
    }
}

/// One day of the calendar with its derived intensity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DayCell {
    date:    NaiveDate,
    weekday: u8,
    count:   u32,
    level:   Level,
}

impl DayCell {
    /// Creates a cell for `date`, deriving weekday and level
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date,
            weekday: weekday_index(date.weekday()),
            count,
            level: level_of(count),
        }
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Weekday index, 0 is Sunday
    pub const fn weekday(&self) -> u8 {
        self.weekday
    }

    pub const fn count(&self) -> u32 {
        self.count
    }

    pub const fn level(&self) -> Level {
        self.level
    }

    /// Zero-based month of the cell's date
    pub fn month0(&self) -> u8 {
        // month0 is always < 12
        self.date.month0() as u8
    }

    pub const fn weekday_name(&self) -> &'static str {
        WEEKDAY_NAMES[self.weekday as usize]
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month0() as usize]
    }
}

/// Consecutive days of one week, ascending. Holds between 1 and 7 cells.
#[derive(Debug, Clone, PartialEq, Eq, Deref, Serialize)]
#[serde(transparent)]
pub struct WeekColumn(Vec<DayCell>);

impl WeekColumn {
    pub(crate) fn starting_with(cell: DayCell) -> Self {
        let mut days = Vec::with_capacity(DAYS_PER_WEEK);
        days.push(cell);
        Self(days)
    }

    pub(crate) fn push(&mut self, cell: DayCell) {
        debug_assert!(self.0.len() < DAYS_PER_WEEK);
        self.0.push(cell);
    }

    /// Whether the column opens with `first_day`, i.e. it begins a full week
    pub fn begins_week(&self, first_day: Weekday) -> bool {
        self.0
            .first()
            .is_some_and(|cell| cell.weekday == weekday_index(first_day))
    }
}

/// Week columns covering every day of a range exactly once, in date order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    range:             CalendarRange,
    first_day_of_week: Weekday,
    columns:           Vec<WeekColumn>,
}

impl CalendarGrid {
    pub(crate) const fn new(
        range: CalendarRange,
        first_day_of_week: Weekday,
        columns: Vec<WeekColumn>,
    ) -> Self {
        Self {
            range,
            first_day_of_week,
            columns,
        }
    }

    pub const fn range(&self) -> CalendarRange {
        self.range
    }

    pub const fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    pub fn columns(&self) -> &[WeekColumn] {
        &self.columns
    }

    /// Row a weekday index is drawn in, 0 being `first_day_of_week`
    pub fn row_of(&self, weekday: u8) -> usize {
        let first = usize::from(weekday_index(self.first_day_of_week));
        (usize::from(weekday) + DAYS_PER_WEEK - first) % DAYS_PER_WEEK
    }

    /// All cells in date order
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.columns.iter().flat_map(|column| column.iter())
    }

    pub fn day_count(&self) -> usize {
        self.columns.iter().map(|column| column.len()).sum()
    }

    pub fn total_contributions(&self) -> u64 {
        self.cells().map(|cell| u64::from(cell.count)).sum()
    }

    /// Mean count per day over the whole grid
    #[allow(clippy::cast_precision_loss)]
    pub fn average_count(&self) -> f32 {
        match self.day_count() {
            0 => 0.0,
            days => self.total_contributions() as f32 / days as f32,
        }
    }

    /// Looks up the cell for `date`, if the grid covers it
    pub fn find(&self, date: NaiveDate) -> Option<&DayCell> {
        if !self.range.contains(date) {
            return None;
        }
        self.cells().find(|cell| cell.date == date)
    }
}

/// A month name anchored above a week column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MonthLabel {
    month:  u8,
    column: usize,
}

impl MonthLabel {
    pub(crate) const fn new(month: u8, column: usize) -> Self {
        debug_assert!(month < 12);
        Self { month, column }
    }

    /// Zero-based month
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Index of the week column the label sits above
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Abbreviated month name
    pub const fn name(&self) -> &'static str {
        MONTH_ABBREVIATIONS[self.month as usize]
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
