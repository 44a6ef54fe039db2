use thiserror::Error;

/// Every condition the calendar and dialog can run into.
///
/// None of these are fatal to the page: they are reported at the boundary
/// where they occur and the affected feature is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// A required rendering target is absent from the page.
    #[error("required element `{0}` not found")]
    MissingElement(String),

    /// A non-essential control or listener target is absent.
    #[error("optional element `{0}` not found")]
    MissingOptionalElement(String),

    /// The host page did not define a global the calendar depends on.
    #[error("page global `{0}` is not defined")]
    MissingGlobalData(String),

    /// The host page defined a global but its contents could not be read.
    #[error("page global `{name}` is malformed: {reason}")]
    MalformedGlobalData { name: String, reason: String },

    /// Locale formatting of a date failed.
    #[error("could not format date `{input}`: {reason}")]
    DateFormat { input: String, reason: String },

    #[error("invalid ISO date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("month index {0} is out of range 0..=11")]
    InvalidMonth(u32),

    /// A DOM call on the rendering surface failed.
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
