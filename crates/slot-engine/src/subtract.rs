//! Subtract obstruction blocks from free blocks.
//!
//! Obstructions are applied one at a time, each against the output of the
//! previous pass. Only blocks sharing a date interact. Zero-duration results
//! are dropped, and zero-duration obstructions remove nothing.

use crate::block::TimeBlock;

/// Compute `free \ obstructions`, date by date.
///
/// For each obstruction `o` and each current free block `f` on the same date:
///
/// - disjoint: `f` is kept as-is
/// - `o` covers `f`: `f` is removed
/// - `o` strictly inside `f`: `f` splits into `[f.start, o.start)` and `[o.end, f.end)`
/// - `o` overlaps the start of `f`: `f` becomes `[o.end, f.end)`
/// - `o` overlaps the end of `f`: `f` becomes `[f.start, o.start)`
///
/// Output order follows input order, with split halves kept in place.
pub fn subtract(free: &[TimeBlock], obstructions: &[TimeBlock]) -> Vec<TimeBlock> {
    let mut current: Vec<TimeBlock> = free.iter().filter(|b| !b.is_empty()).copied().collect();

    for obstruction in obstructions.iter().filter(|o| !o.is_empty()) {
        let mut next = Vec::with_capacity(current.len() + 1);
        for block in &current {
            subtract_one(block, obstruction, &mut next);
        }
        current = next;
    }

    current
}

/// Subtract a single obstruction from a single free block, pushing survivors.
fn subtract_one(block: &TimeBlock, obstruction: &TimeBlock, out: &mut Vec<TimeBlock>) {
    if !block.overlaps(obstruction) {
        out.push(*block);
        return;
    }

    let date = block.date();
    if obstruction.start() > block.start() {
        out.push(TimeBlock::new(date, block.start(), obstruction.start()));
    }
    if obstruction.end() < block.end() {
        out.push(TimeBlock::new(date, obstruction.end(), block.end()));
    }
}
