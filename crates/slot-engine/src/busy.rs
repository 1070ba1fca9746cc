//! Convert calendar events into quantized busy blocks.
//!
//! Timed events are read in the user's timezone: the block's date and minute
//! offsets come from local wall-clock components, never from slicing a UTC
//! instant. All-day events block every date they span, end date exclusive.

use std::ops::Range;

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::block::{TimeBlock, MINUTES_PER_DAY};
use crate::event::{CalendarEvent, EventTime};
use crate::quantize::widen_obstruction;

/// Build busy blocks for every event, already widened to the grid.
///
/// A timed event that ends on a later local date is not split: its end is
/// capped at 24:00 of the start date. Events that are empty after widening
/// are dropped. Output order follows input order.
///
/// All-day events expand to one block per spanned date, so a very long event
/// yields a very long list. Use [`busy_blocks_within`] when only a bounded
/// range of dates matters.
pub fn to_busy_blocks(events: &[CalendarEvent], tz: Tz) -> Vec<TimeBlock> {
    collect_blocks(events, tz, None)
}

/// Like [`to_busy_blocks`], keeping only blocks dated inside `horizon`.
///
/// All-day spans are clipped to the horizon before they are expanded, so the
/// output never holds more than one full-day block per horizon date per event.
pub fn busy_blocks_within(
    events: &[CalendarEvent],
    tz: Tz,
    horizon: &Range<NaiveDate>,
) -> Vec<TimeBlock> {
    collect_blocks(events, tz, Some(horizon))
}

fn collect_blocks(
    events: &[CalendarEvent],
    tz: Tz,
    horizon: Option<&Range<NaiveDate>>,
) -> Vec<TimeBlock> {
    let mut blocks = Vec::with_capacity(events.len());
    for event in events {
        match &event.start {
            EventTime::Date(start) => all_day_blocks(event, *start, tz, horizon, &mut blocks),
            EventTime::DateTime(start) => {
                let Some(block) = timed_block(*start, &event.end, tz) else {
                    continue;
                };
                if horizon.is_none_or(|h| h.contains(&block.date())) {
                    blocks.push(block);
                }
            }
        }
    }
    blocks
}

fn timed_block(start: DateTime<FixedOffset>, end: &EventTime, tz: Tz) -> Option<TimeBlock> {
    let local_start = start.with_timezone(&tz);
    let date = local_start.date_naive();
    let start_minutes = local_start.hour() * 60 + local_start.minute();

    // End measured from the start date's midnight, so crossing midnight
    // lands at or past 1440 and gets capped.
    let end_minutes: i64 = match end {
        EventTime::DateTime(end) => {
            let local_end = end.with_timezone(&tz);
            let days = (local_end.date_naive() - date).num_days();
            let mut minutes = i64::from(local_end.hour() * 60 + local_end.minute());
            if local_end.second() > 0 {
                minutes += 1;
            }
            days * i64::from(MINUTES_PER_DAY) + minutes
        }
        EventTime::Date(end_date) => (*end_date - date).num_days() * i64::from(MINUTES_PER_DAY),
    };
    let end_minutes = end_minutes.clamp(0, i64::from(MINUTES_PER_DAY)) as u32;

    let block = widen_obstruction(date, start_minutes, end_minutes);
    if block.is_empty() {
        debug!(%date, start_minutes, end_minutes, "dropping empty timed event");
        return None;
    }
    Some(block)
}

fn all_day_blocks(
    event: &CalendarEvent,
    start: NaiveDate,
    tz: Tz,
    horizon: Option<&Range<NaiveDate>>,
    out: &mut Vec<TimeBlock>,
) {
    let end = match &event.end {
        EventTime::Date(d) => *d,
        EventTime::DateTime(dt) => dt.with_timezone(&tz).date_naive(),
    };

    // A missing or inverted end still blocks the start date.
    let days = (end - start).num_days().max(1);
    if days > 1 {
        warn!(
            summary = event.summary.as_deref().unwrap_or(""),
            %start,
            days,
            "multi-day all-day event"
        );
    }

    let mut first = start;
    let mut count = days;
    if let Some(horizon) = horizon {
        if first < horizon.start {
            count -= (horizon.start - first).num_days();
            first = horizon.start;
        }
        count = count.min((horizon.end - first).num_days());
    }
    if count <= 0 {
        return;
    }

    out.extend(
        first
            .iter_days()
            .take(count as usize)
            .map(TimeBlock::full_day),
    );
}
