//! Calendar events as delivered by a calendar provider.
//!
//! The serde shape follows the Google Calendar v3 event resource: each
//! endpoint is either `{"date": "YYYY-MM-DD"}` for all-day events or
//! `{"dateTime": "<RFC 3339>", "timeZone": "<IANA>"}` for timed events. Fields
//! the slot search doesn't read are ignored on input.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// One endpoint of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEventTime", into = "RawEventTime")]
pub enum EventTime {
    /// A pure calendar date (all-day events). End dates are exclusive.
    Date(NaiveDate),
    /// An instant carrying its UTC offset.
    DateTime(DateTime<FixedOffset>),
}

/// A read-only busy event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

impl CalendarEvent {
    pub fn timed(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self {
            summary: None,
            start: EventTime::DateTime(start),
            end: EventTime::DateTime(end),
        }
    }

    /// An all-day event covering `start..end` (end exclusive).
    pub fn all_day(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            summary: None,
            start: EventTime::Date(start),
            end: EventTime::Date(end),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// An event is all-day when its start carries no time component.
    pub fn is_all_day(&self) -> bool {
        matches!(self.start, EventTime::Date(_))
    }
}

/// Wire representation of an [`EventTime`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
}

impl TryFrom<RawEventTime> for EventTime {
    type Error = SlotError;

    fn try_from(raw: RawEventTime) -> Result<Self> {
        if let Some(dt) = raw.date_time.as_deref() {
            return parse_date_time(dt, raw.time_zone.as_deref()).map(EventTime::DateTime);
        }
        if let Some(d) = raw.date.as_deref() {
            return NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map(EventTime::Date)
                .map_err(|_| SlotError::InvalidDate(d.to_string()));
        }
        Err(SlotError::InvalidEvent(
            "event time has neither `date` nor `dateTime`".to_string(),
        ))
    }
}

impl From<EventTime> for RawEventTime {
    fn from(time: EventTime) -> Self {
        match time {
            EventTime::Date(d) => RawEventTime {
                date: Some(d.format("%Y-%m-%d").to_string()),
                ..Default::default()
            },
            EventTime::DateTime(dt) => RawEventTime {
                date_time: Some(dt.to_rfc3339()),
                ..Default::default()
            },
        }
    }
}

/// Parse an RFC 3339 instant, or a naive local datetime resolved in `time_zone`.
fn parse_date_time(s: &str, time_zone: Option<&str>) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| SlotError::InvalidEvent(format!("unparseable dateTime '{}'", s)))?;
    let zone = time_zone.ok_or_else(|| {
        SlotError::InvalidEvent(format!("dateTime '{}' has no offset and no timeZone", s))
    })?;
    let tz: Tz = zone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(zone.to_string()))?;

    // Inside a DST gap there is no earliest mapping; the hour is skipped.
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
        .ok_or_else(|| SlotError::InvalidEvent(format!("'{}' does not exist in {}", s, zone)))
}

/// Either a bare event array or a provider list response with `items`.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventsDocument {
    List(Vec<CalendarEvent>),
    Page { items: Vec<CalendarEvent> },
}

/// Parse events from JSON: a bare array, or an object with an `items` array.
///
/// # Errors
/// Returns `SlotError::Json` when the document matches neither shape or any
/// event endpoint fails to parse.
pub fn parse_events_json(json: &str) -> Result<Vec<CalendarEvent>> {
    let doc: EventsDocument = serde_json::from_str(json)?;
    Ok(match doc {
        EventsDocument::List(events) => events,
        EventsDocument::Page { items } => items,
    })
}
