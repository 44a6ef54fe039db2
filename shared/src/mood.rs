//! Mood records delivered by the host page.
//!
//! The page embeds a JSON object keyed by ISO date. It is read once at
//! startup and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CalendarError, Result};

/// One recorded mood for a calendar date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub text_response: Option<String>,
}

impl MoodEntry {
    /// Emoji to display, with empty strings counting as absent.
    pub fn emoji_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty(self.emoji.as_deref()).unwrap_or(fallback)
    }

    /// Text response to display, with empty strings counting as absent.
    pub fn text_response_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        non_empty(self.text_response.as_deref()).unwrap_or(fallback)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Read-only mapping from `YYYY-MM-DD` to the mood recorded that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<MoodEntry>>")]
pub struct MoodEntriesByDate {
    entries: BTreeMap<String, MoodEntry>,
}

impl From<BTreeMap<String, Option<MoodEntry>>> for MoodEntriesByDate {
    fn from(raw: BTreeMap<String, Option<MoodEntry>>) -> Self {
        // `null` values mean the page has a key but nothing recorded
        let entries = raw
            .into_iter()
            .filter_map(|(date, entry)| entry.map(|entry| (date, entry)))
            .collect();
        Self { entries }
    }
}

impl FromIterator<(String, MoodEntry)> for MoodEntriesByDate {
    fn from_iter<I: IntoIterator<Item = (String, MoodEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl MoodEntriesByDate {
    /// Parse the page's JSON object. `null` is accepted as an empty map.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let parsed: Option<Self> = serde_json::from_str(json)?;
        Ok(parsed.unwrap_or_default())
    }

    pub fn get(&self, iso_date: &str) -> Option<&MoodEntry> {
        self.entries.get(iso_date)
    }

    pub fn contains(&self, iso_date: &str) -> bool {
        self.entries.contains_key(iso_date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Snapshot handed over by the host page at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageData {
    pub mood_entries: MoodEntriesByDate,
    /// Today's date as the server saw it. `None` means use the local clock.
    pub today_iso: Option<String>,
}

impl PageData {
    /// Build the snapshot from the raw page values.
    ///
    /// `entries_global` names the global the JSON came from so a parse
    /// failure can say which one was malformed.
    pub fn from_page(entries_global: &str, entries_json: &str, today_iso: Option<&str>) -> Result<Self> {
        let mood_entries =
            MoodEntriesByDate::from_json(entries_json).map_err(|e| CalendarError::MalformedGlobalData {
                name: entries_global.to_string(),
                reason: e.to_string(),
            })?;

        let today_iso = today_iso
            .map(str::trim)
            .filter(|today| !today.is_empty())
            .map(str::to_string);

        Ok(Self {
            mood_entries,
            today_iso,
        })
    }
}
