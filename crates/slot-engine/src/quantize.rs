//! Snap block boundaries to a fixed grid.
//!
//! Rounding is biased by role. Obstructions (busy events, exclusions) only ever
//! grow, so busy time is never under-reported. Candidate slot starts only ever
//! move later, so a slot never begins inside time that was not free.

use chrono::NaiveDate;

use crate::block::{TimeBlock, MINUTES_PER_DAY};

/// Grid size in minutes.
pub const GRID_MINUTES: u32 = 30;

/// Round down to the previous grid point (identity when aligned).
pub fn floor_to_grid(minutes: u32) -> u32 {
    minutes - minutes % GRID_MINUTES
}

/// Round up to the next grid point (identity when aligned).
pub fn ceil_to_grid(minutes: u32) -> u32 {
    match minutes % GRID_MINUTES {
        0 => minutes,
        rem => minutes + (GRID_MINUTES - rem),
    }
}

/// Widen raw obstruction bounds outward to the grid.
///
/// `start` rounds down, `end` rounds up and is capped at 24:00. If the widened
/// interval is empty, an interval that originally had positive length becomes
/// one grid step starting at `start` (still capped at 24:00); anything else
/// collapses to a zero-duration block at `start`.
pub fn widen_obstruction(date: NaiveDate, start: u32, end: u32) -> TimeBlock {
    let snapped_start = floor_to_grid(start.min(MINUTES_PER_DAY));
    let mut snapped_end = ceil_to_grid(end).min(MINUTES_PER_DAY);

    if snapped_start >= snapped_end {
        snapped_end = if end > start {
            (snapped_start + GRID_MINUTES).min(MINUTES_PER_DAY)
        } else {
            snapped_start
        };
    }

    TimeBlock::new(date, snapped_start, snapped_end)
}

/// Widen an existing obstruction block outward to the grid.
pub fn quantize_obstruction(block: &TimeBlock) -> TimeBlock {
    widen_obstruction(block.date(), block.start(), block.end())
}

/// Round a candidate slot start up to the next grid point.
pub fn quantize_candidate_start(minutes: u32) -> u32 {
    ceil_to_grid(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn aligned_zero_length_input_stays_zero_length() {
        let block = widen_obstruction(day(), 600, 600);
        assert_eq!((block.start(), block.end()), (600, 600));
    }

    #[test]
    fn unaligned_zero_length_input_widens_to_its_grid_cell() {
        let block = widen_obstruction(day(), 615, 615);
        assert_eq!((block.start(), block.end()), (600, 630));
    }

    #[test]
    fn inverted_input_collapses_at_snapped_start() {
        let block = widen_obstruction(day(), 700, 650);
        assert_eq!((block.start(), block.end()), (690, 690));
    }

    #[test]
    fn end_is_capped_at_midnight() {
        let block = widen_obstruction(day(), 1425, 1439);
        assert_eq!((block.start(), block.end()), (1410, 1440));
    }
}
