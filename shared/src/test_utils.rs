//! In-memory stand-ins for the browser surface and dialog.

use chrono::NaiveDate;

use crate::calendar::{DayCell, DisplayedMonth};
use crate::dialog::{Dialog, DialogFields};
use crate::error::{CalendarError, Result};
use crate::format::DateFormatter;
use crate::render::CalendarSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Clear,
    Header,
    Cell,
    Title,
}

/// Records what the renderer writes. Setting `missing` makes the next
/// render fail its target check.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub header: Vec<String>,
    pub cells: Vec<DayCell>,
    pub title: Option<String>,
    pub clears: usize,
    pub events: Vec<SurfaceEvent>,
    pub missing: Option<String>,
}

impl CalendarSurface for RecordingSurface {
    fn check_targets(&self) -> Result<()> {
        match &self.missing {
            Some(id) => Err(CalendarError::MissingElement(id.clone())),
            None => Ok(()),
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.header.clear();
        self.cells.clear();
        self.events.clear();
        self.clears += 1;
        self.events.push(SurfaceEvent::Clear);
        Ok(())
    }

    fn append_weekday_header(&mut self, labels: &[&str]) -> Result<()> {
        self.header = labels.iter().map(|l| l.to_string()).collect();
        self.events.push(SurfaceEvent::Header);
        Ok(())
    }

    fn append_cell(&mut self, cell: &DayCell) -> Result<()> {
        self.cells.push(cell.clone());
        self.events.push(SurfaceEvent::Cell);
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = Some(title.to_string());
        self.events.push(SurfaceEvent::Title);
        Ok(())
    }
}

/// Dialog double tracking visibility, focus and field contents
#[derive(Debug, Default)]
pub struct FakeDialog {
    pub open: bool,
    pub focused: bool,
    pub date: Option<String>,
    pub emoji: Option<String>,
    pub text_response: Option<String>,
    pub shows: usize,
    pub hides: usize,
    /// Whether focus was still on the dialog when `hide` ran
    pub hidden_while_focused: bool,
}

impl Dialog for FakeDialog {
    fn show(&mut self) {
        self.open = true;
        self.shows += 1;
    }

    fn hide(&mut self) {
        if self.focused {
            self.hidden_while_focused = true;
        }
        self.open = false;
        self.hides += 1;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn clear_focus(&mut self) {
        self.focused = false;
    }
}

impl DialogFields for FakeDialog {
    fn set_date(&mut self, text: &str) {
        self.date = Some(text.to_string());
    }

    fn set_emoji(&mut self, text: &str) {
        self.emoji = Some(text.to_string());
    }

    fn set_text_response(&mut self, text: &str) {
        self.text_response = Some(text.to_string());
    }
}

/// Formatter whose locale calls always throw
#[derive(Debug, Default)]
pub struct FailingFormatter;

impl DateFormatter for FailingFormatter {
    fn month_title(&self, month: DisplayedMonth) -> Result<String> {
        Err(CalendarError::DateFormat {
            input: month.to_string(),
            reason: "RangeError: invalid language tag".to_string(),
        })
    }

    fn long_date(&self, date: NaiveDate) -> Result<String> {
        Err(CalendarError::DateFormat {
            input: date.to_string(),
            reason: "RangeError: invalid language tag".to_string(),
        })
    }
}
