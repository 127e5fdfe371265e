use serde::{Deserialize, Serialize};

/// Kind of calendar entry, used for styling on the public calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Default,
    Special,
}

/// A church calendar entry.
///
/// Dates are civil dates ("YYYY-MM-DD") with no time-of-day or timezone;
/// a missing end date means a single-day event. Entries are created and
/// edited only through the admin surface.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_en: Option<String>,
    #[serde(default)]
    pub kind: EventKind,
}

impl CalendarEvent {
    /// Title in the requested locale, falling back to Korean
    pub fn display_title(&self, locale: &str) -> &str {
        if locale == "en" {
            if let Some(title_en) = &self.title_en {
                if !title_en.is_empty() {
                    return title_en;
                }
            }
        }
        &self.title
    }

    /// Note in the requested locale, falling back to Korean
    pub fn display_note(&self, locale: &str) -> &str {
        if locale == "en" {
            if let Some(note_en) = &self.note_en {
                if !note_en.is_empty() {
                    return note_en;
                }
            }
        }
        self.note.as_deref().unwrap_or("")
    }
}
