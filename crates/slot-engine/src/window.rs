//! Build the pool of free candidate blocks across the search horizon.

use chrono::NaiveDate;
use tracing::debug;

use crate::block::TimeBlock;
use crate::policy::{Exclusion, Policy};
use crate::quantize::widen_obstruction;
use crate::subtract::subtract;

/// Free blocks for every eligible day in the horizon.
///
/// For each day `searchStartDate + i`, `i` in `0..numDaysToSearch`, whose
/// weekday passes the mask: start from the whole day, subtract that day's busy
/// blocks and widened exclusions, then clip each remainder to the daily
/// window. `busy` is expected to be already quantized (see
/// [`crate::busy::busy_blocks_within`]).
///
/// Output is grouped by date in horizon order and by start within a date.
pub fn build_availability(policy: &Policy, busy: &[TimeBlock]) -> Vec<TimeBlock> {
    let window_start = policy.daily_window_start.minutes();
    let window_end = policy.daily_window_end.minutes();

    let horizon = policy.horizon();
    let mut pool = Vec::new();
    for date in horizon.start.iter_days().take_while(|d| horizon.contains(d)) {
        if !policy.weekday_mask.allows_date(date) {
            continue;
        }

        let mut obstructions: Vec<TimeBlock> =
            busy.iter().filter(|b| b.date() == date).copied().collect();
        obstructions.extend(exclusion_blocks(&policy.exclusions, date));

        let free = subtract(&[TimeBlock::full_day(date)], &obstructions);
        let before = pool.len();
        pool.extend(free.iter().filter_map(|b| b.intersect(window_start, window_end)));

        debug!(
            %date,
            obstructions = obstructions.len(),
            free_blocks = pool.len() - before,
            "built day availability"
        );
    }
    pool
}

/// Exclusions placed on `date`, widened to the grid like any obstruction.
pub fn exclusion_blocks(exclusions: &[Exclusion], date: NaiveDate) -> Vec<TimeBlock> {
    exclusions
        .iter()
        .map(|ex| widen_obstruction(date, ex.start.minutes(), ex.end.minutes()))
        .collect()
}
