use chrono::{Datelike, NaiveDate};

use crate::calendar::DisplayedMonth;
use crate::error::Result;

/// Turns calendar values into display strings.
///
/// The browser implementation goes through the user's locale and can fail;
/// callers fall back to [`EnglishDateFormatter`] or the raw ISO string.
pub trait DateFormatter {
    /// Title above the grid, e.g. "May 2025".
    fn month_title(&self, month: DisplayedMonth) -> Result<String>;

    /// Long form of a single date, e.g. "May 18, 2025".
    fn long_date(&self, date: NaiveDate) -> Result<String>;
}

/// Locale-independent formatter with English month names
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishDateFormatter;

impl DateFormatter for EnglishDateFormatter {
    fn month_title(&self, month: DisplayedMonth) -> Result<String> {
        Ok(format!("{} {}", month_name(month.month()), month.year()))
    }

    fn long_date(&self, date: NaiveDate) -> Result<String> {
        Ok(format!("{} {}, {}", month_name(date.month0()), date.day(), date.year()))
    }
}

/// Full English name of a 0-indexed month
pub fn month_name(month: u32) -> &'static str {
    match month {
        0 => "January",
        1 => "February",
        2 => "March",
        3 => "April",
        4 => "May",
        5 => "June",
        6 => "July",
        7 => "August",
        8 => "September",
        9 => "October",
        10 => "November",
        11 => "December",
        _ => "Invalid Month",
    }
}
