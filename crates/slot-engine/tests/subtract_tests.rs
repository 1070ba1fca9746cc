//! Tests for interval subtraction.

use chrono::NaiveDate;
use slot_engine::subtract::subtract;
use slot_engine::TimeBlock;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn block(d: u32, start: u32, end: u32) -> TimeBlock {
    TimeBlock::new(day(d), start, end)
}

fn bounds(blocks: &[TimeBlock]) -> Vec<(u32, u32)> {
    blocks.iter().map(|b| (b.start(), b.end())).collect()
}

#[test]
fn obstruction_inside_free_block_splits_it() {
    // 09:00-18:00 minus 12:00-13:00
    let free = subtract(&[block(3, 540, 1080)], &[block(3, 720, 780)]);
    assert_eq!(bounds(&free), vec![(540, 720), (780, 1080)]);
}

#[test]
fn obstruction_covering_free_block_removes_it() {
    let free = subtract(&[block(3, 600, 660)], &[block(3, 540, 720)]);
    assert!(free.is_empty());

    // Exact match is also full coverage.
    let free = subtract(&[block(3, 600, 660)], &[block(3, 600, 660)]);
    assert!(free.is_empty());
}

#[test]
fn obstruction_overlapping_start_trims_front() {
    let free = subtract(&[block(3, 540, 1080)], &[block(3, 480, 600)]);
    assert_eq!(bounds(&free), vec![(600, 1080)]);
}

#[test]
fn obstruction_overlapping_end_trims_back() {
    let free = subtract(&[block(3, 540, 1080)], &[block(3, 1020, 1200)]);
    assert_eq!(bounds(&free), vec![(540, 1020)]);
}

#[test]
fn adjacent_obstruction_is_disjoint() {
    let free = subtract(&[block(3, 540, 720)], &[block(3, 720, 780), block(3, 480, 540)]);
    assert_eq!(bounds(&free), vec![(540, 720)]);
}

#[test]
fn obstructions_on_other_dates_do_not_interact() {
    let free = subtract(&[block(3, 540, 1080)], &[block(4, 600, 700)]);
    assert_eq!(free, vec![block(3, 540, 1080)]);
}

#[test]
fn obstructions_apply_to_current_state_not_original() {
    // The second obstruction only touches the right half produced by the first.
    let free = subtract(
        &[block(3, 0, 1440)],
        &[block(3, 600, 660), block(3, 900, 960)],
    );
    assert_eq!(bounds(&free), vec![(0, 600), (660, 900), (960, 1440)]);
}

#[test]
fn obstruction_order_does_not_change_result_set() {
    let obstructions = [block(3, 600, 700), block(3, 650, 800), block(3, 1000, 1020)];
    let mut reversed = obstructions;
    reversed.reverse();

    let mut a = subtract(&[block(3, 540, 1080)], &obstructions);
    let mut b = subtract(&[block(3, 540, 1080)], &reversed);
    a.sort_by_key(TimeBlock::chrono_key);
    b.sort_by_key(TimeBlock::chrono_key);
    assert_eq!(a, b);
    assert_eq!(bounds(&a), vec![(540, 600), (800, 1000), (1020, 1080)]);
}

#[test]
fn zero_duration_obstruction_removes_nothing() {
    let free = subtract(&[block(3, 540, 1080)], &[block(3, 600, 600)]);
    assert_eq!(bounds(&free), vec![(540, 1080)]);
}

#[test]
fn zero_duration_free_blocks_are_dropped() {
    let free = subtract(&[block(3, 600, 600), block(3, 700, 800)], &[]);
    assert_eq!(bounds(&free), vec![(700, 800)]);
}

#[test]
fn empty_obstruction_list_is_identity() {
    let input = vec![block(3, 540, 720), block(4, 780, 1080)];
    assert_eq!(subtract(&input, &[]), input);
}
