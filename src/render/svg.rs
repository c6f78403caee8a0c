//! SVG output using GitLab's contribution calendar geometry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::CalendarSurface;
use super::colour::{ColourError, ColourStrategy};
use crate::calendar::Calendar;
use crate::consts::{
    BOTTOM_PADDING, CELL_RADIUS, DAY_SIZE, DAY_SPACE, DAYS_PER_WEEK, FONT_SIZE, LAST_LABEL_PADDING, WEEKDAY_TITLE_X,
};
use crate::layout::WeekdayTitle;
use crate::selection::Selection;
use crate::tooltip::format_tooltip;
use crate::types::{DayCell, MonthLabel};

/// Loose renderer settings, as they arrive from a query string or config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgRendererBuilder {
    pub font_size:       Option<usize>,
    pub cell_size:       Option<usize>,
    pub colour_strategy: Option<String>,
    pub inactive_colour: Option<String>,
    pub active_colour:   Option<String>,
}

impl SvgRendererBuilder {
    /// Fills in defaults and parses the colour settings.
    ///
    /// # Errors
    /// Returns a `ColourError` if the strategy name or a colour is invalid.
    pub fn build(self) -> Result<SvgRenderer, ColourError> {
        let colour_strategy = ColourStrategy::from_settings(
            self.colour_strategy.as_deref(),
            self.inactive_colour.as_deref(),
            self.active_colour.as_deref(),
        )?;

        Ok(SvgRenderer {
            font_size: self.font_size.unwrap_or(FONT_SIZE),
            cell_size: self.cell_size.unwrap_or(DAY_SIZE),
            colour_strategy,
        })
    }
}

/// Renders a [`Calendar`] as a standalone SVG document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgRenderer {
    font_size:       usize,
    cell_size:       usize,
    colour_strategy: ColourStrategy,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            font_size:       FONT_SIZE,
            cell_size:       DAY_SIZE,
            colour_strategy: ColourStrategy::Gitlab,
        }
    }
}

impl SvgRenderer {
    pub fn builder() -> SvgRendererBuilder {
        SvgRendererBuilder::default()
    }

    #[must_use]
    pub const fn with_colour_strategy(mut self, colour_strategy: ColourStrategy) -> Self {
        self.colour_strategy = colour_strategy;
        self
    }

    /// Distance between the left edges of two neighbouring columns
    pub const fn column_pitch(&self) -> usize {
        self.cell_size + DAY_SPACE * 2
    }

    /// Top edge of the first grid row, leaving room for the month labels
    const fn grid_top(&self) -> usize {
        self.font_size + 7
    }

    /// Left edge of week `column`; the grid is shifted one column right for the weekday titles
    const fn column_x(&self, column: usize) -> usize {
        self.column_pitch() * column + 1 + self.column_pitch()
    }

    /// Document width: one pitch per column plus the title column, widened
    /// when the last column starts in a different month than the one before it
    pub fn width(&self, calendar: &Calendar) -> usize {
        let columns = calendar.grid().columns();
        let padding = match columns {
            [.., second_last, last] => match (second_last.first(), last.first()) {
                (Some(a), Some(b)) if a.month0() != b.month0() => LAST_LABEL_PADDING,
                _ => 0,
            },
            _ => 0,
        };
        (columns.len() + 1) * self.column_pitch() + padding
    }

    pub const fn height(&self) -> usize {
        self.grid_top() + DAYS_PER_WEEK * self.column_pitch() + BOTTOM_PADDING
    }

    pub fn render(&self, calendar: &Calendar) -> String {
        self.render_with_selection(calendar, &Selection::new())
    }

    /// Renders with the selected day marked `is-active`
    pub fn render_with_selection(&self, calendar: &Calendar, selection: &Selection) -> String {
        let mut surface = SvgSurface {
            renderer:      self,
            average_count: calendar.grid().average_count(),
            selected:      selection.selected(),
            open_column:   None,
            cells:         String::new(),
            months:        String::new(),
            titles:        String::new(),
        };
        calendar.paint(&mut surface);
        surface.close_column();

        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" class="contrib-calendar" data-testid="contrib-calendar">
{style}
{cells}
<g direction="ltr">
{months}</g>
<g>
{titles}</g>
</svg>"#,
            width = self.width(calendar),
            height = self.height(),
            style = self.style(),
            cells = surface.cells.trim_end(),
            months = surface.months,
            titles = surface.titles,
        );
        trace!(bytes = svg.len(), "rendered svg calendar");
        svg
    }

    fn style(&self) -> String {
        format!(
            r#"<style>
    .user-contrib-text {{
        font-size: {}px;
        font-family: "Noto Sans", Ubuntu, Cantarell, "Helvetica Neue", sans-serif;
        fill: #3a383f;
    }}
    .user-contrib-cell.is-active {{
        stroke: #3a383f;
        stroke-width: 1px;
    }}
</style>"#,
            self.font_size
        )
    }
}

/// Accumulates SVG fragments while a calendar is painted.
struct SvgSurface<'a> {
    renderer:      &'a SvgRenderer,
    average_count: f32,
    selected:      Option<NaiveDate>,
    open_column:   Option<usize>,
    cells:         String,
    months:        String,
    titles:        String,
}

impl SvgSurface<'_> {
    fn open_column(&mut self, column: usize) {
        if self.open_column == Some(column) {
            return;
        }
        self.close_column();
        self.cells.push_str(&format!(
            "<g transform=\"translate({}, {})\" data-testid=\"user-contrib-cell-group\">\n",
            self.renderer.column_x(column),
            self.renderer.grid_top()
        ));
        self.open_column = Some(column);
    }

    fn close_column(&mut self) {
        if self.open_column.take().is_some() {
            self.cells.push_str("</g>\n");
        }
    }
}

impl CalendarSurface for SvgSurface<'_> {
    fn draw_cell(&mut self, row: usize, column: usize, cell: &DayCell) {
        self.open_column(column);

        let size = self.renderer.cell_size;
        let y = self.renderer.column_pitch() * row;
        let fill = self
            .renderer
            .colour_strategy
            .colour_for(cell.level(), cell.count(), self.average_count);
        let class = if self.selected == Some(cell.date()) {
            "user-contrib-cell has-tooltip is-active"
        } else {
            "user-contrib-cell has-tooltip"
        };

        self.cells.push_str(&format!(
            concat!(
                r#"<rect x="0" y="{y}" rx="{radius}" ry="{radius}" width="{size}" height="{size}" fill="{fill}" "#,
                r#"data-level="{level}" data-date="{date}" title="{title}" class="{class}" "#,
                r#"data-testid="user-contrib-cell"></rect>"#,
                "\n",
            ),
            y = y,
            radius = CELL_RADIUS,
            size = size,
            fill = fill,
            class = class,
            level = cell.level(),
            date = cell.date(),
            title = format_tooltip(cell),
        ));
    }

    fn draw_month_label(&mut self, label: &MonthLabel) {
        self.months.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" class=\"user-contrib-text\">{}</text>\n",
            self.renderer.column_x(label.column()),
            self.renderer.font_size.saturating_sub(1),
            label.name()
        ));
    }

    fn draw_weekday_title(&mut self, title: &WeekdayTitle) {
        self.titles.push_str(&format!(
            "<text text-anchor=\"middle\" x=\"{WEEKDAY_TITLE_X}\" y=\"{}\" class=\"user-contrib-text\">{}</text>\n",
            self.renderer.grid_top() + self.renderer.font_size + self.renderer.column_pitch() * title.row,
            title.text
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ContributionActivity;
    use crate::test_utils::date;
    use chrono::Weekday;

    fn one_month_calendar() -> Calendar {
        let activity: ContributionActivity = [(date(2024, 1, 10), 15)].into_iter().collect();
        Calendar::build(date(2024, 1, 15), 1, Weekday::Sun, &activity).expect("failed to build calendar")
    }

    #[test]
    fn test_default_geometry() {
        let renderer = SvgRenderer::default();
        let calendar = one_month_calendar();

        assert_eq!(renderer.column_pitch(), 16);
        assert_eq!(renderer.height(), 140);
        // six columns plus the title column, last two columns both in January
        assert_eq!(renderer.width(&calendar), 112);
    }

    #[test]
    fn test_width_pads_when_last_column_opens_month() {
        let renderer = SvgRenderer::default();
        // last column starts Sunday 2024-02-04, the one before it in January
        let calendar = Calendar::build(date(2024, 2, 5), 1, Weekday::Sun, &ContributionActivity::new())
            .expect("failed to build calendar");
        let columns = calendar.grid().columns().len();

        assert_eq!(renderer.width(&calendar), (columns + 1) * 16 + 6);
    }

    #[test]
    fn test_render_document() {
        let svg = SvgRenderer::default().render(&one_month_calendar());

        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="112" height="140" class="contrib-calendar""#
        ));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect ").count(), 32);
        assert_eq!(svg.matches(r#"data-testid="user-contrib-cell-group""#).count(), 6);
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count() - 1);
    }

    #[test]
    fn test_render_cell() {
        let svg = SvgRenderer::default().render(&one_month_calendar());

        // 2024-01-10 is the Wednesday of the fifth column
        assert!(svg.contains(r#"<g transform="translate(81, 18)" data-testid="user-contrib-cell-group">"#));
        assert!(svg.contains(
            r##"<rect x="0" y="48" rx="2" ry="2" width="14" height="14" fill="#7992f5ff" data-level="2" data-date="2024-01-10" title="15 contributions on Wednesday January 10 2024" class="user-contrib-cell has-tooltip" data-testid="user-contrib-cell"></rect>"##
        ));
    }

    #[test]
    fn test_render_labels() {
        let svg = SvgRenderer::default().render(&one_month_calendar());

        assert!(svg.contains(r#"<text x="33" y="10" class="user-contrib-text">Dec</text>"#));
        assert!(svg.contains(r#"<text x="81" y="10" class="user-contrib-text">Jan</text>"#));
        assert!(svg.contains(r#"<text text-anchor="middle" x="8" y="45" class="user-contrib-text">M</text>"#));
        assert!(svg.contains(r#"<text text-anchor="middle" x="8" y="77" class="user-contrib-text">W</text>"#));
        assert!(svg.contains(r#"<text text-anchor="middle" x="8" y="109" class="user-contrib-text">F</text>"#));
    }

    #[test]
    fn test_render_marks_selection() {
        let mut selection = Selection::new();
        selection.click(date(2024, 1, 10));

        let svg = SvgRenderer::default().render_with_selection(&one_month_calendar(), &selection);
        assert_eq!(svg.matches("is-active\"").count(), 1);
        assert!(svg.contains(r#"data-date="2024-01-10" title="15 contributions on Wednesday January 10 2024" class="user-contrib-cell has-tooltip is-active""#));
    }

    #[test]
    fn test_builder_defaults_and_sizes() {
        let renderer = SvgRenderer::builder().build().expect("default builder is valid");
        assert_eq!(renderer, SvgRenderer::default());

        let renderer = SvgRendererBuilder {
            font_size: Some(12),
            cell_size: Some(10),
            ..SvgRendererBuilder::default()
        }
        .build()
        .expect("sized builder is valid");
        assert_eq!(renderer.column_pitch(), 12);
        assert_eq!(renderer.height(), 12 + 7 + 7 * 12 + 10);
    }

    #[test]
    fn test_builder_interpolation() {
        let renderer = SvgRendererBuilder {
            colour_strategy: Some("interpolation".to_owned()),
            inactive_colour: Some("#000000".to_owned()),
            active_colour: Some("#ffffff".to_owned()),
            ..SvgRendererBuilder::default()
        }
        .build()
        .expect("interpolation builder is valid");

        // the only active day has 15 contributions against an average of 15/32
        let svg = renderer.render(&one_month_calendar());
        assert!(svg.contains(r##"fill="#000000ff" data-level="0""##));
        assert!(!svg.contains(r##"fill="#ffffffff""##));
    }

    #[test]
    fn test_builder_rejects_bad_colour() {
        let result = SvgRendererBuilder {
            colour_strategy: Some("interpolation".to_owned()),
            inactive_colour: Some("#000000".to_owned()),
            active_colour: Some("white".to_owned()),
            ..SvgRendererBuilder::default()
        }
        .build();
        assert!(matches!(result, Err(ColourError::InvalidLength(_))));
    }

    #[test]
    fn test_builder_deserializes() {
        let builder: SvgRendererBuilder =
            serde_json::from_str(r#"{"cell_size":12}"#).expect("failed to deserialize builder");
        assert_eq!(builder.cell_size, Some(12));
        assert_eq!(builder.font_size, None);
    }
}
