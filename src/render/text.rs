//! Plain-text output for terminals: one glyph per day.

use super::CalendarSurface;
use crate::calendar::Calendar;
use crate::consts::DAYS_PER_WEEK;
use crate::layout::WeekdayTitle;
use crate::types::{DayCell, MonthLabel};

/// Columns taken by the weekday title in front of each row
const TITLE_WIDTH: usize = 2;
/// Characters per week column: the glyph and a gap
const CELL_WIDTH: usize = 2;

/// Renders a [`Calendar`] as rows of glyphs, one per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    glyphs: [char; 5],
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            glyphs: ['·', '░', '▒', '▓', '█'],
        }
    }
}

impl TextRenderer {
    /// Renderer drawing level `n` with `glyphs[n]`
    pub const fn with_glyphs(glyphs: [char; 5]) -> Self {
        Self { glyphs }
    }

    /// Month header line followed by seven weekday rows, trailing blanks trimmed
    pub fn render(&self, calendar: &Calendar) -> String {
        let width = TITLE_WIDTH + calendar.grid().columns().len() * CELL_WIDTH;
        let mut surface = TextSurface {
            glyphs: self.glyphs,
            header: vec![' '; width],
            rows:   vec![vec![' '; width]; DAYS_PER_WEEK],
        };
        calendar.paint(&mut surface);

        std::iter::once(&surface.header)
            .chain(surface.rows.iter())
            .map(|line| line.iter().collect::<String>().trim_end().to_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

struct TextSurface {
    glyphs: [char; 5],
    header: Vec<char>,
    rows:   Vec<Vec<char>>,
}

const fn column_offset(column: usize) -> usize {
    TITLE_WIDTH + column * CELL_WIDTH
}

impl CalendarSurface for TextSurface {
    fn draw_cell(&mut self, row: usize, column: usize, cell: &DayCell) {
        let glyph = self.glyphs[usize::from(cell.level().get())];
        if let Some(slot) = self.rows.get_mut(row).and_then(|line| line.get_mut(column_offset(column))) {
            *slot = glyph;
        }
    }

    fn draw_month_label(&mut self, label: &MonthLabel) {
        let start = column_offset(label.column());
        for (offset, letter) in label.name().chars().enumerate() {
            // the last label may run past the grid
            match self.header.get_mut(start + offset) {
                Some(slot) => *slot = letter,
                None => self.header.push(letter),
            }
        }
    }

    fn draw_weekday_title(&mut self, title: &WeekdayTitle) {
        for (slot, letter) in self
            .rows
            .get_mut(title.row)
            .into_iter()
            .flat_map(|line| line.iter_mut())
            .zip(title.text.chars())
        {
            *slot = letter;
        }
    }
}
