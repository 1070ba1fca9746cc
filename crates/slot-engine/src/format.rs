//! Human-readable slot text, as pasted into emails and chat.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::block::TimeBlock;
use crate::clock::minutes_to_hhmm;

/// Display language for weekday names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl Language {
    /// Resolve a language code; anything unrecognized falls back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "ja" => Language::Ja,
            _ => Language::En,
        }
    }

    /// Weekday names indexed Sunday = 0.
    fn weekdays(self) -> [&'static str; 7] {
        match self {
            Language::En => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            Language::Ja => ["日", "月", "火", "水", "木", "金", "土"],
        }
    }
}

/// Render a slot as `MM/DD(Wkd) HH:MM ~ HH:MM`.
pub fn format_slot(slot: &TimeBlock, lang: Language) -> String {
    let date = slot.date();
    let weekday = lang.weekdays()[date.weekday().num_days_from_sunday() as usize];
    format!(
        "{:02}/{:02}({}) {} ~ {}",
        date.month(),
        date.day(),
        weekday,
        minutes_to_hhmm(slot.start()),
        minutes_to_hhmm(slot.end())
    )
}

/// One formatted slot per line.
pub fn format_slots(slots: &[TimeBlock], lang: Language) -> String {
    slots
        .iter()
        .map(|s| format_slot(s, lang))
        .collect::<Vec<_>>()
        .join("\n")
}
