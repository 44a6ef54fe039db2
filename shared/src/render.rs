//! Rebuilding the visible month on a rendering surface.

use crate::calendar::{DayCell, DisplayedMonth, MonthGrid, WEEKDAY_LABELS};
use crate::error::Result;
use crate::format::{DateFormatter, EnglishDateFormatter};
use crate::mood::MoodEntriesByDate;

/// Where the grid and its title end up.
///
/// The browser implementation writes DOM nodes; tests record the calls.
pub trait CalendarSurface {
    /// Fails with `MissingElement` when the grid container or the title
    /// target cannot be found. Called before anything is cleared.
    fn check_targets(&self) -> Result<()>;

    /// Drop everything rendered for the previous month.
    fn clear(&mut self) -> Result<()>;

    fn append_weekday_header(&mut self, labels: &[&str]) -> Result<()>;

    fn append_cell(&mut self, cell: &DayCell) -> Result<()>;

    fn set_title(&mut self, title: &str) -> Result<()>;
}

pub struct CalendarGridRenderer<S> {
    surface: S,
    formatter: Box<dyn DateFormatter>,
    indicator_fallback: String,
}

impl<S: CalendarSurface> CalendarGridRenderer<S> {
    pub fn new(surface: S, formatter: Box<dyn DateFormatter>, indicator_fallback: impl Into<String>) -> Self {
        Self {
            surface,
            formatter,
            indicator_fallback: indicator_fallback.into(),
        }
    }

    /// Replace the surface content with `month`.
    ///
    /// Aborts before touching the surface if a target is missing, so a
    /// failed render leaves the previous month on screen.
    pub fn render(
        &mut self,
        month: DisplayedMonth,
        entries: &MoodEntriesByDate,
        today_iso: Option<&str>,
    ) -> Result<()> {
        self.surface.check_targets()?;

        let grid = MonthGrid::build(month, entries, today_iso, &self.indicator_fallback);

        self.surface.clear()?;
        self.surface.append_weekday_header(&WEEKDAY_LABELS)?;
        for cell in &grid.cells {
            self.surface.append_cell(cell)?;
        }

        let title = self.formatter.month_title(month).or_else(|err| {
            log::warn!(target: "calendar", "falling back to English month title: {}", err);
            EnglishDateFormatter.month_title(month)
        })?;
        self.surface.set_title(&title)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
