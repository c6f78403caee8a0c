use chrono::{NaiveDate, Weekday};
use serde::Serialize;

use crate::activity::ContributionActivity;
use crate::config::CalendarOptions;
use crate::layout::{WeekdayTitle, build_grid, build_grid_with, month_labels, weekday_titles};
use crate::tooltip::format_tooltip;
use crate::types::{CalendarGrid, DayCell, MonthLabel};
use crate::CalendarError;

/// A laid out calendar: the grid and the month labels above it.
///
/// Built once from a snapshot of activity and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calendar {
    grid:         CalendarGrid,
    month_labels: Vec<MonthLabel>,
}

impl Calendar {
    /// Lays out `months_back` months of `activity` ending at `end`.
    ///
    /// # Errors
    /// Returns `CalendarError::Range` if `months_back` is negative or the
    /// start date can't be represented.
    pub fn build(
        end: NaiveDate,
        months_back: i32,
        first_day: Weekday,
        activity: &ContributionActivity,
    ) -> Result<Self, CalendarError> {
        build_grid(end, months_back, first_day, activity).map(Self::from_grid)
    }

    /// Lays out `activity` ending at `end` using the lookback, first weekday
    /// and rollback rule from `options`.
    ///
    /// # Errors
    /// Returns `CalendarError::Range` if the lookback is negative or the
    /// start date can't be represented.
    pub fn from_options(
        options: &CalendarOptions,
        end: NaiveDate,
        activity: &ContributionActivity,
    ) -> Result<Self, CalendarError> {
        build_grid_with(
            end,
            options.months_back,
            options.first_day_of_week,
            options.month_rollback,
            activity,
        )
        .map(Self::from_grid)
    }

    /// Lays out `activity` ending today in the offset from `options`.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidUtcOffset` for an out of range offset,
    /// otherwise the same errors as [`Calendar::from_options`].
    pub fn ending_today(options: &CalendarOptions, activity: &ContributionActivity) -> Result<Self, CalendarError> {
        Self::from_options(options, options.today()?, activity)
    }

    pub fn from_grid(grid: CalendarGrid) -> Self {
        let month_labels = month_labels(&grid);
        Self { grid, month_labels }
    }

    pub const fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub fn month_labels(&self) -> &[MonthLabel] {
        &self.month_labels
    }

    pub fn weekday_titles(&self) -> Vec<WeekdayTitle> {
        weekday_titles(&self.grid)
    }

    /// Hover text for `date`, if the calendar covers it
    pub fn tooltip(&self, date: NaiveDate) -> Option<String> {
        self.grid.find(date).map(format_tooltip)
    }

    /// Calls `draw` with `(row, column, cell)` for every day, column by column.
    pub fn for_each_cell(&self, mut draw: impl FnMut(usize, usize, &DayCell)) {
        for (column, week) in self.grid.columns().iter().enumerate() {
            for cell in week.iter() {
                draw(self.grid.row_of(cell.weekday()), column, cell);
            }
        }
    }
}
