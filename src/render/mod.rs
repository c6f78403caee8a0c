//! Drawing backends.
//!
//! Layout is computed once by [`Calendar`]; a backend only implements
//! [`CalendarSurface`] and gets told where each cell and label goes.

pub mod colour;
pub mod svg;
pub mod text;

use tracing::trace;

use crate::calendar::Calendar;
use crate::layout::WeekdayTitle;
use crate::types::{DayCell, MonthLabel};

/// Something a calendar can be drawn onto.
pub trait CalendarSurface {
    /// Draws `cell` at `row` (0 is the first day of the week) of week `column`
    fn draw_cell(&mut self, row: usize, column: usize, cell: &DayCell);

    fn draw_month_label(&mut self, _label: &MonthLabel) {}

    fn draw_weekday_title(&mut self, _title: &WeekdayTitle) {}
}

impl Calendar {
    /// Draws cells column by column, then month labels, then weekday titles.
    pub fn paint<S: CalendarSurface + ?Sized>(&self, surface: &mut S) {
        self.for_each_cell(|row, column, cell| surface.draw_cell(row, column, cell));
        for label in self.month_labels() {
            surface.draw_month_label(label);
        }
        for title in &self.weekday_titles() {
            surface.draw_weekday_title(title);
        }
        trace!(
            columns = self.grid().columns().len(),
            labels = self.month_labels().len(),
            "painted calendar"
        );
    }
}
