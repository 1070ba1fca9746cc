//! # slot-engine
//!
//! Deterministic meeting-slot search over a working-hours policy and a set of
//! busy calendar events.
//!
//! The engine is a pure function of `(policy, events)`: it does no I/O, reads
//! no clock, and never fails. Insufficient availability shows up as a shorter
//! slot list, not an error.
//!
//! ## Pipeline
//!
//! events → [`busy`] → per-day [`window`] (uses [`subtract`] and [`quantize`])
//! → candidate pool → [`selector`] → ordered slots
//!
//! ## Modules
//!
//! - [`block`]: `TimeBlock`, a half-open interval on one date in minutes
//! - [`clock`]: `TimeOfDay` (`HH:MM`)
//! - [`quantize`]: 30-minute grid snapping, biased by role
//! - [`subtract`]: free blocks minus obstructions
//! - [`event`]: calendar events in provider (Google Calendar) shape
//! - [`busy`]: events → quantized busy blocks
//! - [`policy`]: the user's scheduling policy
//! - [`window`]: per-day availability within the daily window
//! - [`selector`]: duration adjustment and spread-aware selection
//! - [`format`]: human-readable slot text
//! - [`booking`]: slots → event-creation payloads
//! - [`error`]: Error types

pub mod block;
pub mod booking;
pub mod busy;
pub mod clock;
pub mod error;
pub mod event;
pub mod format;
pub mod policy;
pub mod quantize;
pub mod selector;
pub mod subtract;
pub mod window;

pub use block::TimeBlock;
pub use clock::TimeOfDay;
pub use error::SlotError;
pub use event::{parse_events_json, CalendarEvent, EventTime};
pub use format::{format_slot, format_slots, Language};
pub use policy::{Exclusion, Policy, WeekdayMask};

use tracing::debug;

/// Find open meeting slots for `policy` given the user's busy `events`.
///
/// Returns at most `policy.num_slots_required` slots sorted by (date, start),
/// each lasting between the policy's minimum and maximum duration and starting
/// on a 30-minute boundary. Events outside the search horizon are ignored.
///
/// The policy is not validated here. An empty daily window or a maximum below
/// the minimum simply leaves no candidates, and the result is empty; callers
/// that want an error should run [`Policy::validate`] first.
pub fn find_available_slots(policy: &Policy, events: &[CalendarEvent]) -> Vec<TimeBlock> {
    let busy = busy::busy_blocks_within(events, policy.timezone, &policy.horizon());
    let pool = window::build_availability(policy, &busy);
    debug!(
        events = events.len(),
        busy_blocks = busy.len(),
        pool = pool.len(),
        "availability pool built"
    );

    selector::select_slots(
        &pool,
        policy.min_duration_minutes,
        policy.max_duration_minutes,
        policy.num_slots_required,
        policy.spread_days_target,
    )
}
