use chrono::{Datelike, NaiveDate};
use js_sys::{Date, Object, Reflect};
use shared::{CalendarError, DateFormatter, DisplayedMonth};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Date)]
    type LocaleDate;

    /// `Date.prototype.toLocaleDateString` with thrown exceptions surfaced.
    #[wasm_bindgen(method, catch, js_name = toLocaleDateString)]
    fn to_locale_date_string_checked(this: &LocaleDate, locales: &JsValue, options: &JsValue) -> Result<JsValue, JsValue>;
}

/// Today's date from the local clock
pub fn local_today() -> Option<NaiveDate> {
    let now = Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

/// Formats through the browser's `Intl` support in the user's locale
#[derive(Debug, Clone, Copy, Default)]
pub struct IntlDateFormatter;

impl DateFormatter for IntlDateFormatter {
    fn month_title(&self, month: DisplayedMonth) -> shared::Result<String> {
        let input = month.to_string();
        // JS maps years 0..=99 onto the 1900s
        if !(100..=9999).contains(&month.year()) {
            return Err(format_error(&input, "year outside locale formatter range"));
        }

        let date = Date::new_with_year_month_day(month.year() as u32, month.month() as i32, 1);
        let options = options(&[("month", "long"), ("year", "numeric")]).map_err(|e| format_error(&input, describe_js_error(&e)))?;
        locale_date_string(&date, &options).map_err(|e| format_error(&input, describe_js_error(&e)))
    }

    fn long_date(&self, date: NaiveDate) -> shared::Result<String> {
        let input = date.format("%Y-%m-%d").to_string();
        if !(100..=9999).contains(&date.year()) {
            return Err(format_error(&input, "year outside locale formatter range"));
        }

        // Date-only ISO strings parse as UTC midnight; formatting in UTC
        // keeps the same calendar day whatever the local offset.
        let js_date = Date::new(&JsValue::from_str(&input));
        let options = options(&[("year", "numeric"), ("month", "long"), ("day", "numeric"), ("timeZone", "UTC")])
            .map_err(|e| format_error(&input, describe_js_error(&e)))?;
        locale_date_string(&js_date, &options).map_err(|e| format_error(&input, describe_js_error(&e)))
    }
}

fn options(pairs: &[(&str, &str)]) -> Result<Object, JsValue> {
    let options = Object::new();
    for (key, value) in pairs {
        Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value))?;
    }
    Ok(options)
}

fn locale_date_string(date: &Date, options: &Object) -> Result<String, JsValue> {
    date.unchecked_ref::<LocaleDate>()
        .to_locale_date_string_checked(&JsValue::UNDEFINED, options)?
        .as_string()
        .ok_or_else(|| JsValue::from_str("toLocaleDateString returned a non-string"))
}

fn format_error(input: &str, reason: impl Into<String>) -> CalendarError {
    CalendarError::DateFormat {
        input: input.to_string(),
        reason: reason.into(),
    }
}

/// Best-effort text for a thrown JS value
pub fn describe_js_error(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}
