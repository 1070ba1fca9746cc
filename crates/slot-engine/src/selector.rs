//! Pick the final slot list from the free-block pool.
//!
//! Selection is chronological-first with a spread fallback:
//!
//! 1. **Chronological pass**: walk the dates in order and admit each date's
//!    candidates earliest first. Once `spread_days_target` dates are in use, a
//!    date stops admitting after `ceil(num_required / spread_days_target)`
//!    slots. Before that point every candidate is admitted, so an early date
//!    with plenty of room can fill the request on its own.
//! 2. **Spread pass**: if the count is still short and fewer than
//!    `spread_days_target` dates are used, take the earliest candidate of each
//!    unused date.
//! 3. **Fill**: top up with the earliest remaining candidates.
//!
//! The result is sorted by (date, start) and holds exactly `num_required`
//! slots whenever the pool has that many candidates.

use std::ops::Range;

use tracing::{debug, warn};

use crate::block::TimeBlock;
use crate::quantize::quantize_candidate_start;

/// Turn a free block into a slot that honors the duration range.
///
/// The start snaps up to the grid, then the duration is capped at
/// `max_duration` by pulling in the end. Returns `None` when the block is
/// shorter than `min_duration` at any step.
pub fn adjust_slot(block: &TimeBlock, min_duration: u32, max_duration: u32) -> Option<TimeBlock> {
    let start = quantize_candidate_start(block.start());
    if start >= block.end() || block.end() - start < min_duration {
        return None;
    }

    let duration = (block.end() - start).min(max_duration);
    if duration < min_duration {
        return None;
    }

    Some(TimeBlock::new(block.date(), start, start + duration))
}

/// Select up to `num_required` slots from `pool`, sorted by (date, start).
///
/// When fewer than `num_required` adjusted candidates exist, all of them are
/// returned. A short list is the normal way to report insufficient
/// availability.
pub fn select_slots(
    pool: &[TimeBlock],
    min_duration: u32,
    max_duration: u32,
    num_required: usize,
    spread_days_target: usize,
) -> Vec<TimeBlock> {
    let mut candidates: Vec<TimeBlock> = pool
        .iter()
        .filter(|b| b.duration() >= min_duration)
        .filter_map(|b| adjust_slot(b, min_duration, max_duration))
        .collect();
    candidates.sort_by_key(TimeBlock::chrono_key);

    if candidates.len() < num_required {
        warn!(
            found = candidates.len(),
            required = num_required,
            min_duration,
            "fewer candidate slots than requested; returning all"
        );
        return candidates;
    }

    let days = day_ranges(&candidates);
    let per_day = num_required.div_ceil(spread_days_target.max(1));
    let mut taken = vec![false; candidates.len()];
    let mut day_used = vec![false; days.len()];
    let mut picked: Vec<usize> = Vec::with_capacity(num_required);
    let mut dates_used = 0;

    for (day, range) in days.iter().enumerate() {
        if picked.len() >= num_required {
            break;
        }
        let mut added_today = 0;
        for i in range.clone() {
            if picked.len() >= num_required {
                break;
            }
            if added_today >= per_day && dates_used >= spread_days_target {
                break;
            }
            if added_today == 0 {
                day_used[day] = true;
                dates_used += 1;
            }
            taken[i] = true;
            picked.push(i);
            added_today += 1;
        }
    }
    debug!(picked = picked.len(), dates_used, per_day, "chronological pass done");

    if picked.len() < num_required && dates_used < spread_days_target {
        for (day, range) in days.iter().enumerate() {
            if picked.len() >= num_required {
                break;
            }
            if !day_used[day] {
                taken[range.start] = true;
                picked.push(range.start);
            }
        }
        debug!(picked = picked.len(), "spread pass done");
    }

    for (i, is_taken) in taken.iter_mut().enumerate() {
        if picked.len() >= num_required {
            break;
        }
        if !*is_taken {
            *is_taken = true;
            picked.push(i);
        }
    }

    picked.sort_unstable();
    picked.truncate(num_required);
    picked.into_iter().map(|i| candidates[i]).collect()
}

/// Index ranges of same-date runs in chronologically sorted candidates.
fn day_ranges(candidates: &[TimeBlock]) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for (i, candidate) in candidates.iter().enumerate() {
        if let Some(range) = ranges.last_mut() {
            if candidates[range.start].date() == candidate.date() {
                range.end = i + 1;
                continue;
            }
        }
        ranges.push(i..i + 1);
    }
    ranges
}
