//! WASM bindings for slot-engine.
//!
//! Exposes the slot search, slot formatting, and booking-payload helpers to
//! JavaScript via `wasm-bindgen`. All complex types cross the boundary as JSON
//! strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir extension/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{Days, NaiveDate};
use chrono_tz::Tz;
use serde::Deserialize;
use slot_engine::{Language, Policy, TimeBlock};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// A slot handed back from JavaScript, e.g. one the user ticked for booking.
#[derive(Deserialize)]
struct SlotInput {
    date: NaiveDate,
    start: u32,
    end: u32,
}

impl From<SlotInput> for TimeBlock {
    fn from(s: SlotInput) -> Self {
        TimeBlock::new(s.date, s.start, s.end)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

fn parse_timezone(name: &str) -> Result<Tz, JsValue> {
    name.parse::<Tz>()
        .map_err(|_| JsValue::from_str(&format!("Invalid timezone: {}", name)))
}

fn parse_date(date: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| js_err(&format!("Invalid date '{}'", date), e))
}

fn parse_slots_json(json: &str) -> Result<Vec<TimeBlock>, JsValue> {
    let inputs: Vec<SlotInput> =
        serde_json::from_str(json).map_err(|e| js_err("Invalid slots JSON", e))?;
    Ok(inputs.into_iter().map(TimeBlock::from).collect())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_err("Serialization error", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find open meeting slots.
///
/// `policy_json` is a camelCase policy object (see `slot_engine::Policy`);
/// `events_json` is an array of provider events or a list response with an
/// `items` array. Returns a JSON array of `{date, start, end, duration}`.
#[wasm_bindgen(js_name = "findAvailableSlots")]
pub fn find_available_slots(policy_json: &str, events_json: &str) -> Result<String, JsValue> {
    let policy: Policy =
        serde_json::from_str(policy_json).map_err(|e| js_err("Invalid policy JSON", e))?;
    policy.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let events = slot_engine::parse_events_json(events_json)
        .map_err(|e| js_err("Invalid events JSON", e))?;

    to_json(&slot_engine::find_available_slots(&policy, &events))
}

/// Render one slot as `MM/DD(Wkd) HH:MM ~ HH:MM`.
///
/// `lang` is `"en"` or `"ja"`; anything else falls back to English.
#[wasm_bindgen(js_name = "formatSlot")]
pub fn format_slot(date: &str, start: u32, end: u32, lang: &str) -> Result<String, JsValue> {
    let date = parse_date(date)?;
    Ok(slot_engine::format_slot(
        &TimeBlock::new(date, start, end),
        Language::from_code(lang),
    ))
}

/// Render a JSON array of slots, one per line (clipboard text).
#[wasm_bindgen(js_name = "formatSlots")]
pub fn format_slots(slots_json: &str, lang: &str) -> Result<String, JsValue> {
    let slots = parse_slots_json(slots_json)?;
    Ok(slot_engine::format_slots(&slots, Language::from_code(lang)))
}

/// Build event-creation payloads for the given slots.
///
/// Returns a JSON array of `{summary, start: {dateTime}, end: {dateTime}}`.
#[wasm_bindgen(js_name = "bookingRequests")]
pub fn booking_requests(slots_json: &str, base_name: &str, timezone: &str) -> Result<String, JsValue> {
    let slots = parse_slots_json(slots_json)?;
    let tz = parse_timezone(timezone)?;
    let requests = slot_engine::booking::event_requests(&slots, base_name, tz)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&requests)
}

/// Quantized busy blocks for a set of events, read in `timezone`, limited to
/// the `num_days` dates starting at `start_date` (`YYYY-MM-DD`).
#[wasm_bindgen(js_name = "busyBlocks")]
pub fn busy_blocks(
    events_json: &str,
    timezone: &str,
    start_date: &str,
    num_days: u32,
) -> Result<String, JsValue> {
    let events = slot_engine::parse_events_json(events_json)
        .map_err(|e| js_err("Invalid events JSON", e))?;
    let tz = parse_timezone(timezone)?;
    let start = parse_date(start_date)?;
    let end = start
        .checked_add_days(Days::new(u64::from(num_days)))
        .unwrap_or(NaiveDate::MAX);
    to_json(&slot_engine::busy::busy_blocks_within(&events, tz, &(start..end)))
}
