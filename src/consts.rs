/// Highest contribution level (inclusive)
pub const MAX_LEVEL: u8 = 4;

/// Number of rows in a week column
pub const DAYS_PER_WEEK: usize = 7;

/// Default lookback window in months
pub const DEFAULT_MONTHS_BACK: i32 = 12;

/// Lower bound of each contribution level, indexed by level.
/// A count belongs to the highest level whose minimum it reaches.
pub const LEVEL_THRESHOLDS: [u32; 5] = [
    0,  // level 0: no contributions
    1,  // level 1: 1-9
    10, // level 2: 10-19
    20, // level 3: 20-29
    30, // level 4: 30+
];

/// Legend titles, indexed by level
pub const LEVEL_TITLES: [&str; 5] = [
    "No contributions",
    "1-9 contributions",
    "10-19 contributions",
    "20-29 contributions",
    "30+ contributions",
];

/// Full English weekday names, indexed from Sunday (0) to Saturday (6)
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Full English month names, zero-indexed
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Abbreviated month names used for labels above the grid, zero-indexed
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// ISO 8601 calendar date format (`yyyy-mm-dd`)
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';

/// Side length of a day cell in pixels
pub const DAY_SIZE: usize = 14;
/// Gap on each side of a day cell in pixels
pub const DAY_SPACE: usize = 1;
/// Font size of month and weekday labels in pixels
pub const FONT_SIZE: usize = 11;
/// Corner radius of a day cell in pixels
pub const CELL_RADIUS: usize = 2;
/// Horizontal offset of the weekday titles
pub const WEEKDAY_TITLE_X: usize = 8;
/// Space below the grid
pub(crate) const BOTTOM_PADDING: usize = 10;
/// Extra width reserved when the last column opens a new month
pub(crate) const LAST_LABEL_PADDING: usize = 6;
