//! Tests for grid quantization of obstructions and candidate starts.

use chrono::NaiveDate;
use slot_engine::quantize::{
    ceil_to_grid, floor_to_grid, quantize_candidate_start, quantize_obstruction,
    widen_obstruction, GRID_MINUTES,
};
use slot_engine::TimeBlock;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
}

#[test]
fn grid_is_half_hour() {
    assert_eq!(GRID_MINUTES, 30);
}

#[test]
fn floor_and_ceil_leave_aligned_values_alone() {
    for m in [0, 30, 540, 1410, 1440] {
        assert_eq!(floor_to_grid(m), m);
        assert_eq!(ceil_to_grid(m), m);
    }
}

#[test]
fn floor_and_ceil_move_in_opposite_directions() {
    assert_eq!(floor_to_grid(607), 600);
    assert_eq!(ceil_to_grid(607), 630);
    assert_eq!(floor_to_grid(29), 0);
    assert_eq!(ceil_to_grid(1), 30);
}

#[test]
fn obstruction_widens_outward() {
    // 10:07-10:52 covers 10:00-11:00 once widened.
    let block = quantize_obstruction(&TimeBlock::new(day(), 607, 652));
    assert_eq!((block.start(), block.end()), (600, 660));
}

#[test]
fn obstruction_already_on_grid_is_unchanged() {
    let original = TimeBlock::new(day(), 720, 780);
    assert_eq!(quantize_obstruction(&original), original);
}

#[test]
fn obstruction_never_shrinks() {
    for (start, end) in [(1, 2), (15, 45), (599, 601), (1000, 1439)] {
        let block = widen_obstruction(day(), start, end);
        assert!(block.start() <= start, "start moved later for {start}-{end}");
        assert!(block.end() >= end, "end moved earlier for {start}-{end}");
    }
}

#[test]
fn obstruction_end_never_passes_midnight() {
    let block = widen_obstruction(day(), 1430, 1440);
    assert_eq!((block.start(), block.end()), (1410, 1440));
}

#[test]
fn obstruction_keeps_its_date() {
    let other = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    assert_eq!(widen_obstruction(other, 10, 20).date(), other);
}

#[test]
fn candidate_start_rounds_up_only() {
    assert_eq!(quantize_candidate_start(540), 540);
    assert_eq!(quantize_candidate_start(541), 570);
    assert_eq!(quantize_candidate_start(569), 570);
    assert_eq!(quantize_candidate_start(1411), 1440);
}
