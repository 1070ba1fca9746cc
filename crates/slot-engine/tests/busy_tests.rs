//! Tests for converting calendar events into busy blocks.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use slot_engine::busy::{busy_blocks_within, to_busy_blocks};
use slot_engine::{CalendarEvent, TimeBlock};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn timed(start: &str, end: &str) -> CalendarEvent {
    CalendarEvent::timed(
        DateTime::parse_from_rfc3339(start).unwrap(),
        DateTime::parse_from_rfc3339(end).unwrap(),
    )
}

fn utc() -> Tz {
    Tz::UTC
}

#[test]
fn timed_event_widens_to_grid() {
    // 10:07-10:52 -> 10:00-11:00
    let blocks = to_busy_blocks(&[timed("2024-06-03T10:07:00Z", "2024-06-03T10:52:00Z")], utc());
    assert_eq!(blocks, vec![TimeBlock::new(date(2024, 6, 3), 600, 660)]);
}

#[test]
fn aligned_timed_event_is_unchanged() {
    let blocks = to_busy_blocks(&[timed("2024-06-03T14:00:00Z", "2024-06-03T15:30:00Z")], utc());
    assert_eq!(blocks, vec![TimeBlock::new(date(2024, 6, 3), 840, 930)]);
}

#[test]
fn timed_event_uses_local_date_and_time() {
    // 23:30Z is 08:30 the next morning in Tokyo.
    let tokyo: Tz = "Asia/Tokyo".parse().unwrap();
    let blocks = to_busy_blocks(
        &[timed("2024-06-03T23:30:00Z", "2024-06-04T00:15:00Z")],
        tokyo,
    );
    assert_eq!(blocks, vec![TimeBlock::new(date(2024, 6, 4), 510, 570)]);
}

#[test]
fn offset_in_event_does_not_leak_into_local_view() {
    // Same instant written with a +09:00 offset, viewed from New York (EDT, -04:00).
    let ny: Tz = "America/New_York".parse().unwrap();
    let blocks = to_busy_blocks(
        &[timed("2024-06-04T09:00:00+09:00", "2024-06-04T10:00:00+09:00")],
        ny,
    );
    assert_eq!(blocks, vec![TimeBlock::new(date(2024, 6, 3), 1200, 1260)]);
}

#[test]
fn event_crossing_midnight_is_capped_at_end_of_start_date() {
    let blocks = to_busy_blocks(&[timed("2024-06-03T23:00:00Z", "2024-06-04T01:00:00Z")], utc());
    assert_eq!(blocks, vec![TimeBlock::new(date(2024, 6, 3), 1380, 1440)]);
}

#[test]
fn trailing_seconds_round_the_end_up() {
    let blocks = to_busy_blocks(&[timed("2024-06-03T10:00:00Z", "2024-06-03T10:30:30Z")], utc());
    assert_eq!(blocks, vec![TimeBlock::new(date(2024, 6, 3), 600, 660)]);
}

#[test]
fn aligned_zero_length_event_is_dropped() {
    let blocks = to_busy_blocks(&[timed("2024-06-03T10:00:00Z", "2024-06-03T10:00:00Z")], utc());
    assert!(blocks.is_empty());
}

#[test]
fn inverted_timed_event_is_dropped() {
    let blocks = to_busy_blocks(&[timed("2024-06-03T11:00:00Z", "2024-06-03T10:00:00Z")], utc());
    assert!(blocks.is_empty());
}

#[test]
fn single_all_day_event_blocks_one_date() {
    let blocks = to_busy_blocks(
        &[CalendarEvent::all_day(date(2024, 6, 3), date(2024, 6, 4))],
        utc(),
    );
    assert_eq!(blocks, vec![TimeBlock::full_day(date(2024, 6, 3))]);
}

#[test]
fn multi_day_all_day_event_blocks_each_date_end_exclusive() {
    let blocks = to_busy_blocks(
        &[CalendarEvent::all_day(date(2024, 6, 3), date(2024, 6, 5))],
        utc(),
    );
    assert_eq!(
        blocks,
        vec![
            TimeBlock::full_day(date(2024, 6, 3)),
            TimeBlock::full_day(date(2024, 6, 4)),
        ]
    );
}

#[test]
fn all_day_event_with_inverted_end_still_blocks_start_date() {
    let blocks = to_busy_blocks(
        &[CalendarEvent::all_day(date(2024, 6, 3), date(2024, 6, 3))],
        utc(),
    );
    assert_eq!(blocks, vec![TimeBlock::full_day(date(2024, 6, 3))]);
}

#[test]
fn all_day_events_span_month_boundary() {
    let blocks = to_busy_blocks(
        &[CalendarEvent::all_day(date(2024, 6, 30), date(2024, 7, 2))],
        utc(),
    );
    let dates: Vec<NaiveDate> = blocks.iter().map(|b| b.date()).collect();
    assert_eq!(dates, vec![date(2024, 6, 30), date(2024, 7, 1)]);
}

// ── horizon clipping ────────────────────────────────────────────────────────

#[test]
fn very_long_all_day_event_is_clipped_to_horizon() {
    let event = CalendarEvent::all_day(NaiveDate::MIN, NaiveDate::MAX);
    let horizon = date(2024, 6, 3)..date(2024, 6, 6);
    let blocks = busy_blocks_within(&[event], utc(), &horizon);
    assert_eq!(
        blocks,
        vec![
            TimeBlock::full_day(date(2024, 6, 3)),
            TimeBlock::full_day(date(2024, 6, 4)),
            TimeBlock::full_day(date(2024, 6, 5)),
        ]
    );
}

#[test]
fn all_day_event_overlapping_horizon_start_keeps_inner_dates() {
    let event = CalendarEvent::all_day(date(2024, 5, 30), date(2024, 6, 5));
    let horizon = date(2024, 6, 3)..date(2024, 6, 10);
    let blocks = busy_blocks_within(&[event], utc(), &horizon);
    assert_eq!(
        blocks,
        vec![
            TimeBlock::full_day(date(2024, 6, 3)),
            TimeBlock::full_day(date(2024, 6, 4)),
        ]
    );
}

#[test]
fn events_outside_horizon_are_dropped() {
    let events = vec![
        CalendarEvent::all_day(date(2024, 5, 1), date(2024, 5, 3)),
        CalendarEvent::all_day(date(2024, 7, 1), date(2024, 7, 2)),
        timed("2024-06-02T10:00:00Z", "2024-06-02T11:00:00Z"),
        timed("2024-06-03T10:00:00Z", "2024-06-03T11:00:00Z"),
    ];
    let horizon = date(2024, 6, 3)..date(2024, 6, 10);
    let blocks = busy_blocks_within(&events, utc(), &horizon);
    assert_eq!(blocks, vec![TimeBlock::new(date(2024, 6, 3), 600, 660)]);
}

#[test]
fn empty_horizon_yields_no_blocks() {
    let event = CalendarEvent::all_day(date(2024, 6, 3), date(2024, 6, 5));
    let horizon = date(2024, 6, 3)..date(2024, 6, 3);
    assert!(busy_blocks_within(&[event], utc(), &horizon).is_empty());
}
