//! Contribution calendar layout.
//!
//! Turns a sparse `date -> count` map into week columns of day cells, each
//! with an intensity level, plus the month labels drawn above them. Drawing
//! is left to a [`CalendarSurface`]; SVG and plain-text surfaces are included.

mod activity;
mod calendar;
mod config;
mod consts;
mod layout;
mod level;
mod prelude;
mod range;
mod selection;
mod tooltip;
mod types;

pub mod render;

#[cfg(test)]
mod test_utils;

pub use activity::ContributionActivity;
pub use calendar::Calendar;
pub use config::{CalendarOptions, date_at_offset, today_at_offset};
pub use consts::*;
pub use layout::{WeekdayTitle, build_grid, build_grid_for_range, build_grid_with, month_labels, weekday_titles};
pub use level::{CONTRIBUTION_LEGEND, LegendEntry, level_of};
pub use range::{CalendarRange, MonthRollback, RangeError, months_before, parse_iso_date};
pub use render::CalendarSurface;
pub use render::colour::{ColourError, ColourStrategy, Rgba};
pub use render::svg::{SvgRenderer, SvgRendererBuilder};
pub use render::text::TextRenderer;
pub use selection::{Selection, SelectionChange};
pub use tooltip::{contribution_text, format_tooltip};
pub use types::{CalendarGrid, DayCell, Level, MonthLabel, WeekColumn, weekday_from_index, weekday_index};

/// Errors raised while validating calendar input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Date range could not be built or parsed.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Colour or colour strategy could not be parsed.
    #[error(transparent)]
    Colour(#[from] ColourError),

    #[error("Invalid weekday index: {0} (must be 0-6)")]
    InvalidWeekday(u8),

    #[error("Invalid level: {0} (must be 0-{max})", max = MAX_LEVEL)]
    InvalidLevel(u8),

    #[error("Invalid UTC offset: {0} seconds")]
    InvalidUtcOffset(i32),
}
