//! Platform-independent core of the mood calendar.
//!
//! Everything here runs without a browser: the wasm frontend supplies the
//! rendering surface, the dialog, and a locale-aware date formatter.

pub mod calendar;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod error;
pub mod format;
pub mod mood;
pub mod render;

#[cfg(test)]
pub(crate) mod test_utils;

pub use calendar::{DayCell, DayCellKind, DisplayedMonth, MonthGrid, WEEKDAY_LABELS};
pub use config::CalendarConfig;
pub use controller::CalendarController;
pub use dialog::{ClickRegion, Dialog, DialogFields, DialogState, MoodDialogController};
pub use error::{CalendarError, Result};
pub use format::{DateFormatter, EnglishDateFormatter};
pub use mood::{MoodEntriesByDate, MoodEntry, PageData};
pub use render::{CalendarGridRenderer, CalendarSurface};
