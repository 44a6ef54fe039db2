//! Runtime configuration for the calendar page.
//!
//! Defaults match the markup the server renders. A page can override any
//! subset by defining a `moodCalendarConfig` object before the script loads.

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub elements: ElementIds,
    pub globals: GlobalNames,
    pub text: DisplayText,
    /// One of `error`, `warn`, `info`, `debug`, `trace`, `off`.
    pub log_level: LogLevel,
}

impl CalendarConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CalendarError::MalformedGlobalData {
            name: GlobalNames::default().config,
            reason: e.to_string(),
        })
    }
}

/// Ids (and one selector) of the page elements the calendar works with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub calendar_container: String,
    pub month_title: String,
    pub previous_button: String,
    pub next_button: String,
    pub dialog: String,
    pub dialog_date: String,
    pub dialog_emoji: String,
    pub dialog_text_response: String,
    /// CSS selector for the header/navigation region
    pub header_selector: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            calendar_container: "moodCalendar".to_string(),
            month_title: "currentMonthYear".to_string(),
            previous_button: "prevMonthBtn".to_string(),
            next_button: "nextMonthBtn".to_string(),
            dialog: "moodModal".to_string(),
            dialog_date: "modalDate".to_string(),
            dialog_emoji: "modalEmoji".to_string(),
            dialog_text_response: "modalTextResponse".to_string(),
            header_selector: ".calendar-header-section".to_string(),
        }
    }
}

/// Names of the `window` properties the server-rendered page defines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalNames {
    pub mood_entries: String,
    pub today_iso: String,
    pub config: String,
}

impl Default for GlobalNames {
    fn default() -> Self {
        Self {
            mood_entries: "moodEntriesByDateGlobal".to_string(),
            today_iso: "todayISOGlobal".to_string(),
            config: "moodCalendarConfig".to_string(),
        }
    }
}

/// User-visible fallback strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayText {
    /// Shown in a day cell whose entry has no emoji
    pub indicator_fallback: String,
    /// Shown in the dialog when the entry has no emoji
    pub emoji_fallback: String,
    pub text_response_fallback: String,
    pub no_mood_message: String,
}

impl Default for DisplayText {
    fn default() -> Self {
        Self {
            indicator_fallback: "●".to_string(),
            emoji_fallback: "❓".to_string(),
            text_response_fallback: "No text response recorded.".to_string(),
            no_mood_message: "No mood recorded for this day.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
