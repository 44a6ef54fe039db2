//! Calendar arithmetic and month grid construction.
//!
//! Months are 0-indexed (0 = January) throughout, matching the way the page
//! and its navigation controls count them. All dates are plain civil dates:
//! ISO strings are built from the year/month/day fields directly, so no
//! timezone can shift a cell onto a neighbouring day.

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::error::{CalendarError, Result};
use crate::mood::MoodEntriesByDate;

/// Sunday-first weekday labels for the header row
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The month currently shown by the calendar.
///
/// Invariant: `month` is always in `0..=11`. Navigation goes through
/// [`DisplayedMonth::next`] and [`DisplayedMonth::previous`], which roll the
/// year over exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayedMonth {
    year: i32,
    month: u32,
}

impl DisplayedMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if month > 11 {
            return Err(CalendarError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-indexed month (0 = January).
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(self) -> Self {
        if self.month == 11 {
            Self { year: self.year + 1, month: 0 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 0 {
            Self { year: self.year - 1, month: 11 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Day 1 of this month, `None` only outside chrono's supported year range.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    /// Weekday of day 1 (0 = Sunday, 6 = Saturday).
    pub fn first_weekday(&self) -> u32 {
        self.first_day()
            .map(|date| date.weekday().num_days_from_sunday())
            .unwrap_or(0)
    }
}

impl fmt::Display for DisplayedMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month + 1)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a 0-indexed month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// Zero-padded `YYYY-MM-DD` for a 0-indexed month.
pub fn iso_date(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month + 1, day)
}

/// Parse a strict `YYYY-MM-DD` string into a calendar date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_formed {
        return Err(CalendarError::InvalidDate(value.to_string()));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CalendarError::InvalidDate(value.to_string()))
}

/// Whether a grid square is alignment padding or a real day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCellKind {
    /// Empty square before day 1 so the month lines up with its weekday
    PaddingBefore,
    MonthDay,
}

/// One square of the rendered grid. Rebuilt from scratch on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub kind: DayCellKind,
    /// Day of month, 0 for padding.
    pub day: u32,
    /// `None` for padding.
    pub iso_date: Option<String>,
    pub is_today: bool,
    /// Emoji (or fallback glyph) shown when the day has an entry.
    pub mood_indicator: Option<String>,
}

impl DayCell {
    fn padding() -> Self {
        Self {
            kind: DayCellKind::PaddingBefore,
            day: 0,
            iso_date: None,
            is_today: false,
            mood_indicator: None,
        }
    }

    pub fn has_entry(&self) -> bool {
        self.mood_indicator.is_some()
    }

    pub fn is_padding(&self) -> bool {
        self.kind == DayCellKind::PaddingBefore
    }
}

/// The full set of cells for one month, padding first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: DisplayedMonth,
    /// 0 = Sunday
    pub first_day_of_week: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn build(
        month: DisplayedMonth,
        entries: &MoodEntriesByDate,
        today_iso: Option<&str>,
        indicator_fallback: &str,
    ) -> Self {
        let first_day_of_week = month.first_weekday();
        let days_in_month = month.days_in_month();

        let mut cells = Vec::with_capacity((first_day_of_week + days_in_month) as usize);
        cells.extend((0..first_day_of_week).map(|_| DayCell::padding()));

        for day in 1..=days_in_month {
            let iso = iso_date(month.year(), month.month(), day);
            let is_today = today_iso == Some(iso.as_str());
            let mood_indicator = entries
                .get(&iso)
                .map(|entry| entry.emoji_or(indicator_fallback).to_string());

            cells.push(DayCell {
                kind: DayCellKind::MonthDay,
                day,
                iso_date: Some(iso),
                is_today,
                mood_indicator,
            });
        }

        log::debug!(
            target: "calendar",
            "built grid for {}: {} padding cells, {} days",
            month,
            first_day_of_week,
            days_in_month
        );

        Self {
            month,
            first_day_of_week,
            cells,
        }
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|cell| cell.is_padding()).count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter(|cell| !cell.is_padding())
    }
}
