//! Month navigation: which month is shown and when it is redrawn.

use chrono::NaiveDate;
use std::rc::Rc;

use crate::calendar::{parse_iso_date, DisplayedMonth};
use crate::mood::MoodEntriesByDate;
use crate::render::{CalendarGridRenderer, CalendarSurface};

/// Month to show first: the one containing the server's "today" when it
/// parses, otherwise the one containing the local date.
pub fn initial_month(today_iso: Option<&str>, local_today: NaiveDate) -> DisplayedMonth {
    match today_iso.map(parse_iso_date) {
        Some(Ok(today)) => DisplayedMonth::containing(today),
        Some(Err(err)) => {
            log::warn!(target: "calendar", "ignoring server date for initial month: {}", err);
            DisplayedMonth::containing(local_today)
        }
        None => DisplayedMonth::containing(local_today),
    }
}

/// Owns the displayed month and re-renders when navigation changes it.
///
/// Every render receives the same entries snapshot and today marker that
/// were handed to [`CalendarController::initialize`].
pub struct CalendarController<S> {
    renderer: CalendarGridRenderer<S>,
    entries: Rc<MoodEntriesByDate>,
    today_iso: Option<String>,
    displayed: DisplayedMonth,
}

impl<S: CalendarSurface> CalendarController<S> {
    /// Pick the initial month and perform the first render.
    pub fn initialize(
        renderer: CalendarGridRenderer<S>,
        entries: Rc<MoodEntriesByDate>,
        today_iso: Option<String>,
        local_today: NaiveDate,
    ) -> Self {
        let displayed = initial_month(today_iso.as_deref(), local_today);
        log::info!(
            target: "calendar",
            "initializing at {} with {} mood entries",
            displayed,
            entries.len()
        );

        let mut controller = Self {
            renderer,
            entries,
            today_iso,
            displayed,
        };
        controller.refresh();
        controller
    }

    pub fn on_previous(&mut self) {
        self.displayed = self.displayed.previous();
        self.refresh();
    }

    pub fn on_next(&mut self) {
        self.displayed = self.displayed.next();
        self.refresh();
    }

    pub fn displayed_month(&self) -> DisplayedMonth {
        self.displayed
    }

    pub fn renderer(&self) -> &CalendarGridRenderer<S> {
        &self.renderer
    }

    /// Render the current month, reporting failures instead of returning them.
    pub fn refresh(&mut self) {
        if let Err(err) = self
            .renderer
            .render(self.displayed, &self.entries, self.today_iso.as_deref())
        {
            log::error!(target: "calendar", "could not render {}: {}", self.displayed, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::EnglishDateFormatter;
    use crate::test_utils::RecordingSurface;

    fn local(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn controller(today_iso: Option<&str>, local_today: NaiveDate) -> CalendarController<RecordingSurface> {
        let renderer = CalendarGridRenderer::new(RecordingSurface::default(), Box::new(EnglishDateFormatter), "●");
        CalendarController::initialize(
            renderer,
            Rc::new(MoodEntriesByDate::default()),
            today_iso.map(str::to_string),
            local_today,
        )
    }

    #[test]
    fn test_initial_month_prefers_server_date() {
        let month = initial_month(Some("2025-05-18"), local(2030, 1, 1));
        assert_eq!(month, DisplayedMonth::new(2025, 4).unwrap());
    }

    #[test]
    fn test_initial_month_uses_local_clock_without_server_date() {
        let month = initial_month(None, local(2026, 10, 19));
        assert_eq!(month, DisplayedMonth::new(2026, 9).unwrap());
    }

    #[test]
    fn test_initial_month_ignores_malformed_server_date() {
        let month = initial_month(Some("18/05/2025"), local(2026, 10, 19));
        assert_eq!(month, DisplayedMonth::new(2026, 9).unwrap());
    }

    #[test]
    fn test_initialize_renders_once() {
        let controller = controller(Some("2025-05-18"), local(2030, 1, 1));
        let surface = controller.renderer().surface();
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.title.as_deref(), Some("May 2025"));
        assert!(surface
            .cells
            .iter()
            .any(|c| c.is_today && c.iso_date.as_deref() == Some("2025-05-18")));
    }

    #[test]
    fn test_navigation_across_year_boundaries() {
        let mut controller = controller(Some("2025-12-03"), local(2030, 1, 1));
        controller.on_next();
        assert_eq!(controller.displayed_month(), DisplayedMonth::new(2026, 0).unwrap());
        assert_eq!(controller.renderer().surface().title.as_deref(), Some("January 2026"));

        let mut controller = self::controller(Some("2025-01-10"), local(2030, 1, 1));
        controller.on_previous();
        assert_eq!(controller.displayed_month(), DisplayedMonth::new(2024, 11).unwrap());
        assert_eq!(controller.renderer().surface().clears, 2);
    }

    #[test]
    fn test_today_marker_survives_navigation() {
        let mut controller = controller(Some("2025-05-18"), local(2030, 1, 1));
        controller.on_next();
        assert!(controller.renderer().surface().cells.iter().all(|c| !c.is_today));
        controller.on_previous();
        let today: Vec<_> = controller
            .renderer()
            .surface()
            .cells
            .iter()
            .filter(|c| c.is_today)
            .map(|c| c.day)
            .collect();
        assert_eq!(today, vec![18]);
    }

    #[test]
    fn test_render_failure_is_contained() {
        let renderer = CalendarGridRenderer::new(
            RecordingSurface {
                missing: Some("moodCalendar".to_string()),
                ..RecordingSurface::default()
            },
            Box::new(EnglishDateFormatter),
            "●",
        );
        let mut controller =
            CalendarController::initialize(renderer, Rc::new(MoodEntriesByDate::default()), None, local(2025, 5, 1));
        controller.on_next();

        assert_eq!(controller.displayed_month(), DisplayedMonth::new(2025, 5).unwrap());
        assert_eq!(controller.renderer().surface().clears, 0);
    }
}
