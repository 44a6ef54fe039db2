//! Access to what the server-rendered page provides: `window` globals and
//! elements looked up by id or selector.

use js_sys::{Reflect, JSON};
use shared::{CalendarConfig, CalendarError, PageData};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use crate::services::date_utils::describe_js_error;

pub fn window() -> Result<Window, CalendarError> {
    web_sys::window().ok_or_else(|| browser_unavailable("window"))
}

pub fn document() -> Result<Document, CalendarError> {
    window()?.document().ok_or_else(|| browser_unavailable("document"))
}

/// `window` and `document` come from the browser, not from the page's
/// embedded data.
fn browser_unavailable(what: &str) -> CalendarError {
    CalendarError::Dom(format!("no browser `{}` available", what))
}

/// Value of `window[name]`, `None` when it is `undefined`.
fn global(window: &Window, name: &str) -> Result<Option<JsValue>, CalendarError> {
    let value = Reflect::get(window, &JsValue::from_str(name)).map_err(|e| CalendarError::MalformedGlobalData {
        name: name.to_string(),
        reason: describe_js_error(&e),
    })?;
    Ok((!value.is_undefined()).then_some(value))
}

fn to_json(name: &str, value: &JsValue) -> Result<String, CalendarError> {
    JSON::stringify(value)
        .map(String::from)
        .map_err(|e| CalendarError::MalformedGlobalData {
            name: name.to_string(),
            reason: describe_js_error(&e),
        })
}

/// Read the mood entries and today's date the page embedded.
///
/// Both globals must be defined. `todayISOGlobal` may be `null` or empty,
/// in which case the local clock decides the initial month.
pub fn read_page_data(config: &CalendarConfig) -> Result<PageData, CalendarError> {
    let window = window()?;
    let names = &config.globals;

    let entries = global(&window, &names.mood_entries)?
        .ok_or_else(|| CalendarError::MissingGlobalData(names.mood_entries.clone()))?;
    let today = global(&window, &names.today_iso)?
        .ok_or_else(|| CalendarError::MissingGlobalData(names.today_iso.clone()))?;

    let entries_json = to_json(&names.mood_entries, &entries)?;
    PageData::from_page(&names.mood_entries, &entries_json, today.as_string().as_deref())
}

/// Configuration overrides from the page, or the defaults.
pub fn read_config() -> CalendarConfig {
    let defaults = CalendarConfig::default();
    let name = defaults.globals.config.clone();

    let overrides = window()
        .and_then(|window| global(&window, &name))
        .and_then(|value| value.map(|value| to_json(&name, &value)).transpose());

    match overrides {
        Ok(Some(json)) => CalendarConfig::from_json(&json).unwrap_or_else(|err| {
            log::warn!(target: "page", "ignoring page configuration: {}", err);
            defaults
        }),
        Ok(None) => defaults,
        Err(err) => {
            log::warn!(target: "page", "ignoring page configuration: {}", err);
            defaults
        }
    }
}

pub fn element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

pub fn query_selector(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// Like [`element_by_id`] for elements the calendar can live without.
pub fn optional_element(document: &Document, id: &str) -> Option<HtmlElement> {
    let element = element_by_id(document, id);
    if element.is_none() {
        log::debug!(
            target: "page",
            "{}",
            CalendarError::MissingOptionalElement(id.to_string())
        );
    }
    element
}
