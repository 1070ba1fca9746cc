//! Turn selected slots into event-creation requests.
//!
//! The payload mirrors what a calendar provider's insert endpoint expects:
//! a summary plus `start.dateTime` / `end.dateTime` as local RFC 3339 strings
//! with the zone's UTC offset on that date. Sending the request is the
//! caller's job.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;

use crate::block::TimeBlock;
use crate::error::{Result, SlotError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTime {
    pub date_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRequest {
    pub summary: String,
    pub start: BookingTime,
    pub end: BookingTime,
}

/// Resolve a slot's bounds to instants in `tz`.
///
/// A slot ending at 24:00 ends at midnight of the following date.
///
/// # Errors
/// Returns `SlotError::InvalidTime` if a bound falls in a DST gap.
pub fn slot_instants(slot: &TimeBlock, tz: Tz) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
    let midnight = slot.date().and_time(chrono::NaiveTime::MIN);
    Ok((
        resolve(midnight + Duration::minutes(i64::from(slot.start())), tz)?,
        resolve(midnight + Duration::minutes(i64::from(slot.end())), tz)?,
    ))
}

fn resolve(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(&local)
        .earliest()
        .ok_or_else(|| SlotError::InvalidTime(format!("{} does not exist in {}", local, tz)))
}

fn rfc3339_local(dt: &DateTime<Tz>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Build one request per slot, numbering summaries `"<name> (i/n)"`.
///
/// # Errors
/// Propagates [`slot_instants`] failures.
pub fn event_requests(slots: &[TimeBlock], base_name: &str, tz: Tz) -> Result<Vec<EventRequest>> {
    let total = slots.len();
    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let (start, end) = slot_instants(slot, tz)?;
            Ok(EventRequest {
                summary: format!("{} ({}/{})", base_name, i + 1, total),
                start: BookingTime {
                    date_time: rfc3339_local(&start),
                },
                end: BookingTime {
                    date_time: rfc3339_local(&end),
                },
            })
        })
        .collect()
}
