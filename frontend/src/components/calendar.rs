use gloo::events::EventListener;
use shared::{CalendarError, CalendarSurface, DayCell};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Document, Element, HtmlElement};

use crate::services::date_utils::describe_js_error;
use crate::services::page;

/// Marks every real day cell; click delegation looks for it
pub const DAY_CELL_CLASS: &str = "date-cell";
/// Attribute carrying a day cell's `YYYY-MM-DD` date
pub const DATE_ATTRIBUTE: &str = "data-dateiso";

/// Writes the month grid into the page's calendar container.
///
/// Elements are looked up on every render so a container removed after
/// startup is reported instead of written to while detached.
pub struct DomCalendarSurface {
    document: Document,
    container_id: String,
    title_id: String,
}

impl DomCalendarSurface {
    pub fn new(document: Document, container_id: impl Into<String>, title_id: impl Into<String>) -> Self {
        Self {
            document,
            container_id: container_id.into(),
            title_id: title_id.into(),
        }
    }

    fn required(&self, id: &str) -> Result<HtmlElement, CalendarError> {
        page::element_by_id(&self.document, id).ok_or_else(|| CalendarError::MissingElement(id.to_string()))
    }

    fn container(&self) -> Result<HtmlElement, CalendarError> {
        self.required(&self.container_id)
    }

    fn div(&self, classes: &str) -> Result<Element, CalendarError> {
        let element = self.document.create_element("div").map_err(dom_error)?;
        element.set_class_name(classes);
        Ok(element)
    }
}

impl CalendarSurface for DomCalendarSurface {
    fn check_targets(&self) -> Result<(), CalendarError> {
        self.container()?;
        self.required(&self.title_id)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), CalendarError> {
        self.container()?.set_inner_html("");
        Ok(())
    }

    fn append_weekday_header(&mut self, labels: &[&str]) -> Result<(), CalendarError> {
        let row = self.div("calendar-days-header")?;
        for label in labels {
            let cell = self.div("calendar-day-label")?;
            cell.set_text_content(Some(*label));
            row.append_child(&cell).map_err(dom_error)?;
        }
        self.container()?.append_child(&row).map_err(dom_error)?;
        Ok(())
    }

    fn append_cell(&mut self, cell: &DayCell) -> Result<(), CalendarError> {
        let element = match &cell.iso_date {
            None => self.div("calendar-day empty-cell")?,
            Some(iso_date) => {
                let element = self.div(&day_cell_classes(cell))?;
                element.set_attribute(DATE_ATTRIBUTE, iso_date).map_err(dom_error)?;
                element.set_text_content(Some(cell.day.to_string().as_str()));

                if let Some(indicator) = &cell.mood_indicator {
                    let span = self.document.create_element("span").map_err(dom_error)?;
                    span.set_class_name("mood-indicator");
                    span.set_text_content(Some(indicator.as_str()));
                    element.append_with_str_1(" ").map_err(dom_error)?;
                    element.append_child(&span).map_err(dom_error)?;
                }
                element
            }
        };

        self.container()?.append_child(&element).map_err(dom_error)?;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<(), CalendarError> {
        self.required(&self.title_id)?.set_text_content(Some(title));
        Ok(())
    }
}

fn day_cell_classes(cell: &DayCell) -> String {
    let mut classes = format!("calendar-day {}", DAY_CELL_CLASS);
    if cell.is_today {
        classes.push_str(" today");
    }
    if cell.has_entry() {
        classes.push_str(" has-entry");
    }
    classes
}

fn dom_error(err: wasm_bindgen::JsValue) -> CalendarError {
    CalendarError::Dom(describe_js_error(&err))
}

/// Hook the previous/next buttons up to the controller. Absent buttons are
/// skipped.
pub fn wire_navigation<S: CalendarSurface + 'static>(
    document: &Document,
    previous_id: &str,
    next_id: &str,
    controller: &Rc<RefCell<shared::CalendarController<S>>>,
) {
    if let Some(button) = page::optional_element(document, previous_id) {
        let controller = controller.clone();
        EventListener::new(&button, "click", move |_| {
            controller.borrow_mut().on_previous();
        })
        .forget();
    }

    if let Some(button) = page::optional_element(document, next_id) {
        let controller = controller.clone();
        EventListener::new(&button, "click", move |_| {
            controller.borrow_mut().on_next();
        })
        .forget();
    }
}
