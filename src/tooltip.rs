use chrono::Datelike;

use crate::types::DayCell;

/// "No contributions", "1 contribution" or "`n` contributions"
pub fn contribution_text(count: u32) -> String {
    match count {
        0 => "No contributions".to_owned(),
        1 => "1 contribution".to_owned(),
        n => format!("{n} contributions"),
    }
}

/// Hover text for a cell, e.g. `15 contributions on Wednesday January 10 2024`
pub fn format_tooltip(cell: &DayCell) -> String {
    let date = cell.date();
    format!(
        "{} on {} {} {} {}",
        contribution_text(cell.count()),
        cell.weekday_name(),
        cell.month_name(),
        date.day(),
        date.year()
    )
}
