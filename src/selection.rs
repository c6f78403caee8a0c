use chrono::NaiveDate;

/// Result of clicking a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// A different day became selected
    Selected(NaiveDate),
    /// The selected day was clicked again and is no longer selected
    Cleared,
}

impl SelectionChange {
    /// `yyyy-mm-dd` string handed to the host's click callback
    pub fn iso_date(&self) -> Option<String> {
        match self {
            Self::Selected(date) => Some(date.to_string()),
            Self::Cleared => None,
        }
    }
}

/// The currently selected day, owned by whoever renders the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<NaiveDate>,
}

impl Selection {
    pub const fn new() -> Self {
        Self { selected: None }
    }

    pub const fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected == Some(date)
    }

    /// Selects `date`, or clears the selection when `date` is already selected
    pub fn click(&mut self, date: NaiveDate) -> SelectionChange {
        if self.is_selected(date) {
            self.selected = None;
            SelectionChange::Cleared
        } else {
            self.selected = Some(date);
            SelectionChange::Selected(date)
        }
    }

    pub const fn clear(&mut self) {
        self.selected = None;
    }
}
