//! The mood popup: a Bootstrap modal when the page loads Bootstrap, a plain
//! `hidden`-toggled element otherwise.

use gloo::events::EventListener;
use js_sys::Reflect;
use shared::config::{CalendarConfig, ElementIds};
use shared::dialog::day_cell_date;
use shared::{ClickRegion, Dialog, DialogFields, MoodDialogController, MoodEntriesByDate};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Node};

use crate::components::calendar::{DATE_ATTRIBUTE, DAY_CELL_CLASS};
use crate::services::date_utils::{describe_js_error, IntlDateFormatter};
use crate::services::page;

const OPEN_CLASS: &str = "show";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap, js_name = Modal)]
    type BootstrapModal;

    #[wasm_bindgen(constructor, catch, js_namespace = bootstrap, js_class = "Modal")]
    fn new(element: &Element) -> Result<BootstrapModal, JsValue>;

    #[wasm_bindgen(method, js_class = "Modal")]
    fn show(this: &BootstrapModal);

    #[wasm_bindgen(method, js_class = "Modal")]
    fn hide(this: &BootstrapModal);
}

fn bootstrap_available() -> bool {
    let Ok(window) = page::window() else {
        return false;
    };
    Reflect::get(&window, &JsValue::from_str("bootstrap"))
        .ok()
        .filter(|bootstrap| bootstrap.is_object())
        .and_then(|bootstrap| Reflect::get(&bootstrap, &JsValue::from_str("Modal")).ok())
        .map_or(false, |modal| modal.is_function())
}

enum Backend {
    Bootstrap {
        modal: BootstrapModal,
        _on_hide: EventListener,
    },
    Plain,
}

/// The page's dialog element and its text slots
pub struct MoodModal {
    document: Document,
    element: HtmlElement,
    backend: Backend,
    open: Rc<Cell<bool>>,
    date: Option<HtmlElement>,
    emoji: Option<HtmlElement>,
    text_response: Option<HtmlElement>,
}

impl MoodModal {
    pub fn attach(document: &Document, element: HtmlElement, ids: &ElementIds) -> Self {
        let open = Rc::new(Cell::new(false));
        let backend = if bootstrap_available() {
            match BootstrapModal::new(&element) {
                Ok(modal) => Backend::Bootstrap {
                    modal,
                    _on_hide: on_bootstrap_hide(document, &element, open.clone()),
                },
                Err(err) => {
                    log::warn!(target: "mood-dialog", "bootstrap modal unavailable, using plain dialog: {}", describe_js_error(&err));
                    Backend::Plain
                }
            }
        } else {
            Backend::Plain
        };

        if matches!(backend, Backend::Plain) {
            element.set_hidden(true);
            let _ = element.class_list().remove_1(OPEN_CLASS);
        }

        Self {
            document: document.clone(),
            backend,
            open,
            date: page::optional_element(document, &ids.dialog_date),
            emoji: page::optional_element(document, &ids.dialog_emoji),
            text_response: page::optional_element(document, &ids.dialog_text_response),
            element,
        }
    }
}

/// Bootstrap hides the modal on its own for the close button, Escape and
/// backdrop clicks. Track those and release focus before the hide starts.
fn on_bootstrap_hide(document: &Document, element: &HtmlElement, open: Rc<Cell<bool>>) -> EventListener {
    let document = document.clone();
    let modal = element.clone();
    EventListener::new(element, "hide.bs.modal", move |_| {
        open.set(false);
        if element_has_focus(&document, &modal) {
            blur(&modal);
        }
    })
}

fn element_has_focus(document: &Document, element: &HtmlElement) -> bool {
    let element: &Node = element;
    document
        .active_element()
        .map_or(false, |active| active.is_same_node(Some(element)))
}

fn blur(element: &HtmlElement) {
    if let Err(err) = element.blur() {
        log::warn!(target: "mood-dialog", "could not release focus: {}", describe_js_error(&err));
    }
}

impl Dialog for MoodModal {
    fn show(&mut self) {
        self.open.set(true);
        match &self.backend {
            Backend::Bootstrap { modal, .. } => modal.show(),
            Backend::Plain => {
                self.element.set_hidden(false);
                let _ = self.element.class_list().add_1(OPEN_CLASS);
            }
        }
    }

    fn hide(&mut self) {
        self.open.set(false);
        match &self.backend {
            Backend::Bootstrap { modal, .. } => modal.hide(),
            Backend::Plain => {
                let _ = self.element.class_list().remove_1(OPEN_CLASS);
                self.element.set_hidden(true);
            }
        }
    }

    fn is_open(&self) -> bool {
        self.open.get()
    }

    fn has_focus(&self) -> bool {
        element_has_focus(&self.document, &self.element)
    }

    fn clear_focus(&mut self) {
        blur(&self.element);
    }
}

impl DialogFields for MoodModal {
    fn set_date(&mut self, text: &str) {
        if let Some(field) = &self.date {
            field.set_text_content(Some(text));
        }
    }

    fn set_emoji(&mut self, text: &str) {
        if let Some(field) = &self.emoji {
            field.set_text_content(Some(text));
        }
    }

    fn set_text_response(&mut self, text: &str) {
        if let Some(field) = &self.text_response {
            field.set_text_content(Some(text));
        }
    }
}

/// ISO date of the day cell a click landed in, if any.
pub fn clicked_day_cell_date(target: Option<EventTarget>) -> Option<String> {
    let node = target?.dyn_into::<Node>().ok()?;
    let element = match node.dyn_ref::<Element>() {
        Some(element) => element.clone(),
        None => node.parent_element()?,
    };
    let cell = element.closest(&format!(".{}", DAY_CELL_CLASS)).ok().flatten()?;
    day_cell_date(cell.get_attribute(DATE_ATTRIBUTE).as_deref()).map(str::to_string)
}

/// The three page areas whose clicks never dismiss the dialog
pub struct CalendarRegions {
    dialog: Node,
    grid: Node,
    header: Node,
}

impl CalendarRegions {
    pub fn new(dialog: Node, grid: Node, header: Node) -> Self {
        Self { dialog, grid, header }
    }

    pub fn classify(&self, target: Option<&EventTarget>) -> ClickRegion {
        let Some(node) = target.and_then(|target| target.dyn_ref::<Node>()) else {
            return ClickRegion::Outside;
        };

        if self.dialog.contains(Some(node)) {
            ClickRegion::Dialog
        } else if self.grid.contains(Some(node)) {
            ClickRegion::CalendarGrid
        } else if self.header.contains(Some(node)) {
            ClickRegion::Header
        } else {
            ClickRegion::Outside
        }
    }
}

/// Set up the dialog: delegated day-cell clicks on the grid and dismissal
/// on clicks elsewhere on the page. Skipped when the page has no dialog or
/// no header region.
pub fn wire_mood_dialog(
    document: &Document,
    grid: &HtmlElement,
    config: &CalendarConfig,
    entries: Rc<MoodEntriesByDate>,
) -> Option<Rc<RefCell<MoodDialogController<MoodModal>>>> {
    let ids = &config.elements;
    let dialog_element = page::optional_element(document, &ids.dialog)?;
    let Some(header) = page::query_selector(document, &ids.header_selector) else {
        log::debug!(target: "mood-dialog", "no header region `{}`, mood dialog disabled", ids.header_selector);
        return None;
    };

    let regions = CalendarRegions::new(
        dialog_element.clone().into(),
        grid.clone().into(),
        header.into(),
    );
    let modal = MoodModal::attach(document, dialog_element, ids);
    let controller = Rc::new(RefCell::new(MoodDialogController::new(
        modal,
        entries,
        Box::new(IntlDateFormatter),
        config.text.clone(),
    )));

    {
        let controller = controller.clone();
        EventListener::new(grid, "click", move |event| {
            if let Some(date) = clicked_day_cell_date(event.target()) {
                controller.borrow_mut().on_day_cell_activated(Some(&date));
            }
        })
        .forget();
    }

    {
        let controller = controller.clone();
        EventListener::new(document, "click", move |event| {
            let region = regions.classify(event.target().as_ref());
            controller.borrow_mut().on_document_click(region);
        })
        .forget();
    }

    log::info!(target: "mood-dialog", "mood dialog ready");
    Some(controller)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use shared::DialogState;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn html(document: &Document, markup: &str) -> HtmlElement {
        let wrapper = document.create_element("div").unwrap();
        wrapper.set_inner_html(markup);
        document.body().unwrap().append_child(&wrapper).unwrap();
        wrapper.dyn_into::<HtmlElement>().unwrap()
    }

    fn by_id(document: &Document, id: &str) -> HtmlElement {
        page::element_by_id(document, id).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_click_target_resolves_enclosing_cell() {
        let document = page::document().unwrap();
        html(
            &document,
            r#"<div class="calendar-day date-cell" data-dateiso="2025-05-18">18 <span id="t-indicator" class="mood-indicator">😊</span></div>
               <div id="t-empty" class="calendar-day empty-cell"></div>
               <div id="t-blank" class="calendar-day date-cell" data-dateiso=""></div>"#,
        );

        let indicator: EventTarget = by_id(&document, "t-indicator").into();
        assert_eq!(clicked_day_cell_date(Some(indicator)).as_deref(), Some("2025-05-18"));

        let empty: EventTarget = by_id(&document, "t-empty").into();
        assert_eq!(clicked_day_cell_date(Some(empty)), None);

        let blank: EventTarget = by_id(&document, "t-blank").into();
        assert_eq!(clicked_day_cell_date(Some(blank)), None);
    }

    #[wasm_bindgen_test]
    fn test_regions_classify_clicks() {
        let document = page::document().unwrap();
        html(
            &document,
            r#"<div id="r-dialog"><button id="r-close">x</button></div>
               <div id="r-grid"><div id="r-cell"></div></div>
               <div id="r-header"><button id="r-next">next</button></div>
               <p id="r-elsewhere"></p>"#,
        );
        let regions = CalendarRegions::new(
            by_id(&document, "r-dialog").into(),
            by_id(&document, "r-grid").into(),
            by_id(&document, "r-header").into(),
        );

        let classify = |id: &str| {
            let target: EventTarget = by_id(&document, id).into();
            regions.classify(Some(&target))
        };
        assert_eq!(classify("r-close"), ClickRegion::Dialog);
        assert_eq!(classify("r-cell"), ClickRegion::CalendarGrid);
        assert_eq!(classify("r-next"), ClickRegion::Header);
        assert_eq!(classify("r-elsewhere"), ClickRegion::Outside);
        assert_eq!(regions.classify(None), ClickRegion::Outside);
    }

    #[wasm_bindgen_test]
    fn test_plain_dialog_populates_and_toggles() {
        let document = page::document().unwrap();
        html(
            &document,
            r#"<div id="m-root" tabindex="-1"><span id="m-date"></span><span id="m-emoji"></span><p id="m-text"></p></div>"#,
        );
        let ids = ElementIds {
            dialog: "m-root".to_string(),
            dialog_date: "m-date".to_string(),
            dialog_emoji: "m-emoji".to_string(),
            dialog_text_response: "m-text".to_string(),
            ..ElementIds::default()
        };
        let modal = MoodModal::attach(&document, by_id(&document, "m-root"), &ids);
        assert!(by_id(&document, "m-root").hidden());

        let entries = Rc::new(MoodEntriesByDate::from_json(r#"{"2025-05-18": {"emoji": "😊", "text_response": "good"}}"#).unwrap());
        let mut controller = MoodDialogController::new(
            modal,
            entries,
            Box::new(shared::EnglishDateFormatter),
            shared::config::DisplayText::default(),
        );

        controller.on_day_cell_activated(Some("2025-05-18"));
        assert_eq!(controller.state(), DialogState::Open);
        assert!(!by_id(&document, "m-root").hidden());
        assert_eq!(by_id(&document, "m-date").text_content().as_deref(), Some("May 18, 2025"));
        assert_eq!(by_id(&document, "m-emoji").text_content().as_deref(), Some("😊"));
        assert_eq!(by_id(&document, "m-text").text_content().as_deref(), Some("good"));

        by_id(&document, "m-root").focus().unwrap();
        controller.on_document_click(ClickRegion::Outside);
        assert_eq!(controller.state(), DialogState::Closed);
        assert!(by_id(&document, "m-root").hidden());
        let still_focused = document
            .active_element()
            .map_or(false, |active| active.id() == "m-root");
        assert!(!still_focused);
    }

    #[wasm_bindgen_test]
    fn test_wired_listeners_open_keep_and_dismiss() {
        let document = page::document().unwrap();
        html(
            &document,
            r#"<div id="w-header"><button id="w-next">next</button></div>
               <div id="w-grid"><div class="calendar-day date-cell" data-dateiso="2025-05-18">18 <span id="w-indicator" class="mood-indicator">😊</span></div></div>
               <div id="w-dialog"><span id="w-date"></span><span id="w-emoji"></span><p id="w-text"></p></div>
               <p id="w-elsewhere">footer</p>"#,
        );
        let mut config = CalendarConfig::default();
        config.elements.dialog = "w-dialog".to_string();
        config.elements.dialog_date = "w-date".to_string();
        config.elements.dialog_emoji = "w-emoji".to_string();
        config.elements.dialog_text_response = "w-text".to_string();
        config.elements.header_selector = "#w-header".to_string();
        let entries = Rc::new(MoodEntriesByDate::from_json(r#"{"2025-05-18": {"emoji": "😊"}}"#).unwrap());

        let controller = wire_mood_dialog(&document, &by_id(&document, "w-grid"), &config, entries).unwrap();
        let dialog = by_id(&document, "w-dialog");
        assert!(dialog.hidden());

        // The grid listener opens the dialog before the document listener
        // sees the same click.
        by_id(&document, "w-indicator").click();
        assert!(!dialog.hidden());
        assert_eq!(controller.borrow().state(), DialogState::Open);
        assert_eq!(by_id(&document, "w-emoji").text_content().as_deref(), Some("😊"));

        by_id(&document, "w-next").click();
        assert!(!dialog.hidden());

        by_id(&document, "w-date").click();
        assert!(!dialog.hidden());

        by_id(&document, "w-elsewhere").click();
        assert!(dialog.hidden());
        assert_eq!(controller.borrow().state(), DialogState::Closed);
    }

    #[wasm_bindgen_test]
    fn test_wiring_needs_header_region() {
        let document = page::document().unwrap();
        html(&document, r#"<div id="h-grid"></div><div id="h-dialog"></div>"#);
        let mut config = CalendarConfig::default();
        config.elements.dialog = "h-dialog".to_string();
        config.elements.header_selector = "#h-header-missing".to_string();

        let entries = Rc::new(MoodEntriesByDate::default());
        assert!(wire_mood_dialog(&document, &by_id(&document, "h-grid"), &config, entries).is_none());
    }
}
