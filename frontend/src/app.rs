//! Page bootstrapping: reads what the server embedded, renders the calendar
//! and wires the mood dialog.

use anyhow::{Context, Result};
use gloo::events::EventListener;
use shared::{CalendarController, CalendarGridRenderer};
use std::cell::RefCell;
use std::rc::Rc;

use crate::components::calendar::{wire_navigation, DomCalendarSurface};
use crate::components::mood_modal::wire_mood_dialog;
use crate::services::date_utils::{local_today, IntlDateFormatter};
use crate::services::logging::Logger;
use crate::services::page;

/// Run `start` once the DOM is parsed.
pub fn on_dom_ready(start: impl FnOnce() + 'static) {
    let document = match page::document() {
        Ok(document) => document,
        Err(err) => {
            log::error!(target: "app", "{}", err);
            return;
        }
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", move |_| start()).forget();
    } else {
        start();
    }
}

/// Set up the calendar and the mood dialog.
///
/// Pages without a calendar container are left alone. Missing page data
/// skips both features.
pub fn start() -> Result<()> {
    let config = page::read_config();
    Logger::init(config.log_level.into());

    let document = page::document()?;
    let Some(grid) = page::element_by_id(&document, &config.elements.calendar_container) else {
        log::debug!(target: "app", "no calendar on this page");
        return Ok(());
    };

    let data = page::read_page_data(&config).context("skipping calendar and mood dialog")?;
    let entries = Rc::new(data.mood_entries);
    let local_today = local_today().context("local clock returned an invalid date")?;

    let surface = DomCalendarSurface::new(
        document.clone(),
        config.elements.calendar_container.clone(),
        config.elements.month_title.clone(),
    );
    let renderer = CalendarGridRenderer::new(
        surface,
        Box::new(IntlDateFormatter),
        config.text.indicator_fallback.clone(),
    );
    let calendar = Rc::new(RefCell::new(CalendarController::initialize(
        renderer,
        entries.clone(),
        data.today_iso,
        local_today,
    )));
    wire_navigation(
        &document,
        &config.elements.previous_button,
        &config.elements.next_button,
        &calendar,
    );

    if wire_mood_dialog(&document, &grid, &config, entries).is_none() {
        log::debug!(target: "app", "mood dialog not wired");
    }

    Ok(())
}
