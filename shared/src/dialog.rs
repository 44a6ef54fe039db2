//! The popup showing the mood recorded for a clicked day.
//!
//! The popup widget itself is opaque: it is reached only through the
//! [`Dialog`] capability and the [`DialogFields`] it displays.

use std::rc::Rc;

use crate::calendar::parse_iso_date;
use crate::config::DisplayText;
use crate::format::DateFormatter;
use crate::mood::MoodEntriesByDate;

/// Visibility and focus of the popup widget
pub trait Dialog {
    fn show(&mut self);
    fn hide(&mut self);
    fn is_open(&self) -> bool;
    /// Whether the dialog element itself currently holds input focus.
    fn has_focus(&self) -> bool;
    fn clear_focus(&mut self);
}

/// The text slots inside the dialog. Implementations skip slots the page
/// does not have.
pub trait DialogFields {
    fn set_date(&mut self, text: &str);
    fn set_emoji(&mut self, text: &str);
    fn set_text_response(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Open,
}

/// Where on the page a click landed, relative to the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickRegion {
    Dialog,
    CalendarGrid,
    /// Title and navigation controls
    Header,
    Outside,
}

/// Normalize the date attribute read from a clicked day cell. Blank or
/// missing values mean the click did not hit a usable cell.
pub fn day_cell_date(attribute: Option<&str>) -> Option<&str> {
    attribute.map(str::trim).filter(|date| !date.is_empty())
}

pub struct MoodDialogController<D> {
    dialog: D,
    entries: Rc<MoodEntriesByDate>,
    formatter: Box<dyn DateFormatter>,
    text: DisplayText,
}

impl<D: Dialog + DialogFields> MoodDialogController<D> {
    pub fn new(dialog: D, entries: Rc<MoodEntriesByDate>, formatter: Box<dyn DateFormatter>, text: DisplayText) -> Self {
        Self {
            dialog,
            entries,
            formatter,
            text,
        }
    }

    pub fn state(&self) -> DialogState {
        if self.dialog.is_open() {
            DialogState::Open
        } else {
            DialogState::Closed
        }
    }

    /// Fill the dialog for `iso_date` and show it. An absent or empty date
    /// hides the dialog instead.
    pub fn on_day_cell_activated(&mut self, iso_date: Option<&str>) {
        let Some(iso_date) = iso_date.filter(|date| !date.is_empty()) else {
            self.hide();
            return;
        };

        let date_label = self.date_label(iso_date);
        self.dialog.set_date(&date_label);

        match self.entries.get(iso_date) {
            Some(entry) => {
                self.dialog.set_emoji(entry.emoji_or(&self.text.emoji_fallback));
                self.dialog
                    .set_text_response(entry.text_response_or(&self.text.text_response_fallback));
            }
            None => {
                self.dialog.set_emoji("");
                self.dialog.set_text_response(&self.text.no_mood_message);
            }
        }

        log::debug!(target: "mood-dialog", "showing mood for {}", iso_date);
        self.dialog.show();
    }

    /// Dismiss the dialog when a page click lands outside the calendar.
    pub fn on_document_click(&mut self, region: ClickRegion) {
        if !self.dialog.is_open() {
            return;
        }
        if region == ClickRegion::Outside {
            log::debug!(target: "mood-dialog", "click outside calendar, hiding dialog");
            self.hide();
        }
    }

    /// Hide the dialog, releasing focus from it first.
    pub fn hide(&mut self) {
        release_focus(&mut self.dialog);
        self.dialog.hide();
    }

    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    fn date_label(&self, iso_date: &str) -> String {
        let formatted = parse_iso_date(iso_date).and_then(|date| self.formatter.long_date(date));
        match formatted {
            Ok(label) => label,
            Err(err) => {
                log::warn!(target: "mood-dialog", "could not format date {}: {}", iso_date, err);
                iso_date.to_string()
            }
        }
    }
}

/// Clear focus if the dialog holds it. Runs right before any hide so the
/// widget never hides a focused element from assistive technology.
pub fn release_focus<D: Dialog + ?Sized>(dialog: &mut D) {
    if dialog.has_focus() {
        dialog.clear_focus();
    }
}
