//! Calendar layout: week columns, month labels and weekday row titles.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::activity::ContributionActivity;
use crate::consts::DAYS_PER_WEEK;
use crate::range::{CalendarRange, MonthRollback};
use crate::types::{CalendarGrid, DayCell, MonthLabel, WeekColumn, weekday_index};
use crate::CalendarError;

/// Builds the week columns for the `months_back` months ending at `end`.
///
/// A column opens on every `first_day` and on the very first date, so the
/// first and last columns may hold fewer than seven days. Days missing from
/// `activity` count as zero. Month subtraction clamps to the end of shorter
/// months; see [`build_grid_with`] for the overflowing variant.
///
/// # Errors
/// Returns `CalendarError::Range` if `months_back` is negative or the start
/// date falls outside the supported calendar.
pub fn build_grid(
    end: NaiveDate,
    months_back: i32,
    first_day: Weekday,
    activity: &ContributionActivity,
) -> Result<CalendarGrid, CalendarError> {
    build_grid_with(end, months_back, first_day, MonthRollback::Clamp, activity)
}

/// [`build_grid`] with an explicit month rollback rule.
///
/// # Errors
/// Returns `CalendarError::Range` if `months_back` is negative or the start
/// date falls outside the supported calendar.
pub fn build_grid_with(
    end: NaiveDate,
    months_back: i32,
    first_day: Weekday,
    rollback: MonthRollback,
    activity: &ContributionActivity,
) -> Result<CalendarGrid, CalendarError> {
    let range = CalendarRange::looking_back(end, months_back, rollback)?;
    Ok(build_grid_for_range(range, first_day, activity))
}

/// Lays out an already validated range.
pub fn build_grid_for_range(range: CalendarRange, first_day: Weekday, activity: &ContributionActivity) -> CalendarGrid {
    let mut columns: Vec<WeekColumn> = Vec::with_capacity(range.day_count() / DAYS_PER_WEEK + 2);

    for date in range.days() {
        let cell = DayCell::new(date, activity.count_on(date));
        match columns.last_mut() {
            Some(column) if date.weekday() != first_day => column.push(cell),
            _ => columns.push(WeekColumn::starting_with(cell)),
        }
    }

    debug!(%range, ?first_day, columns = columns.len(), "built calendar grid");
    CalendarGrid::new(range, first_day, columns)
}

/// Derives the month labels shown above the grid, left to right.
///
/// Only columns that begin a full week are candidates. The first candidate
/// always gets a label; a later one gets a label only when its month differs
/// from the previous label's month and it isn't in the column directly to the
/// right of it. The adjacency check keeps two labels from overlapping, at the
/// cost of dropping a month whose first full week sits right next to the
/// previous label, so labels don't mark every month boundary exactly.
pub fn month_labels(grid: &CalendarGrid) -> Vec<MonthLabel> {
    let first_day = grid.first_day_of_week();
    let mut labels: Vec<MonthLabel> = Vec::new();

    for (index, column) in grid.columns().iter().enumerate() {
        if !column.begins_week(first_day) {
            continue;
        }
        let Some(first) = column.first() else {
            continue;
        };

        let month = first.month0();
        let emit = labels
            .last()
            .is_none_or(|previous| month != previous.month() && index != previous.column() + 1);

        if emit {
            labels.push(MonthLabel::new(month, index));
        }
    }

    debug!(labels = labels.len(), "derived month labels");
    labels
}

/// Abbreviated weekday name drawn at the left of a grid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayTitle {
    pub text: &'static str,
    pub row:  usize,
}

/// Row titles: Monday, Wednesday and Friday always, plus the weekend day
/// closing or opening the week when weeks start on Monday or Saturday.
pub fn weekday_titles(grid: &CalendarGrid) -> Vec<WeekdayTitle> {
    let title = |text, weekday| WeekdayTitle {
        text,
        row: grid.row_of(weekday_index(weekday)),
    };

    let mut titles = vec![title("M", Weekday::Mon), title("W", Weekday::Wed), title("F", Weekday::Fri)];
    match grid.first_day_of_week() {
        Weekday::Mon => titles.push(title("S", Weekday::Sun)),
        Weekday::Sat => titles.push(title("S", Weekday::Sat)),
        _ => {},
    }
    titles
}
