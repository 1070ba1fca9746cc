//! The half-open time interval every other module works in.
//!
//! A [`TimeBlock`] lives on one calendar date and is measured in minutes since
//! local midnight. Blocks are plain values: operations that "change" a block
//! return a new one.

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Minutes in one calendar day; the exclusive upper bound of every block.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A half-open interval `[start, end)` on a single calendar date.
///
/// Invariant: `0 <= start <= end <= 1440`. The duration is derived from the
/// bounds and never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBlock {
    date: NaiveDate,
    start: u32,
    end: u32,
}

impl TimeBlock {
    /// Build a block, clamping malformed bounds instead of rejecting them.
    ///
    /// Both bounds are capped at [`MINUTES_PER_DAY`]. An `end` before `start`
    /// collapses to a zero-duration block at `start`, so no negative duration
    /// ever leaves this constructor.
    pub fn new(date: NaiveDate, start: u32, end: u32) -> Self {
        let start = start.min(MINUTES_PER_DAY);
        let end = end.clamp(start, MINUTES_PER_DAY);
        Self { date, start, end }
    }

    /// The whole day `[00:00, 24:00)`.
    pub fn full_day(date: NaiveDate) -> Self {
        Self::new(date, 0, MINUTES_PER_DAY)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn duration(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when both blocks share a date and their interiors intersect.
    ///
    /// Adjacent blocks (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeBlock) -> bool {
        self.date == other.date && self.start < other.end && other.start < self.end
    }

    /// Clip this block to `[start, end)`, returning `None` when nothing is left.
    pub fn intersect(&self, start: u32, end: u32) -> Option<TimeBlock> {
        let new_start = self.start.max(start);
        let new_end = self.end.min(end);
        (new_start < new_end).then(|| TimeBlock::new(self.date, new_start, new_end))
    }

    /// Sort key giving chronological order across dates.
    pub fn chrono_key(&self) -> (NaiveDate, u32, u32) {
        (self.date, self.start, self.end)
    }
}

impl Serialize for TimeBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TimeBlock", 4)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.serialize_field("duration", &self.duration())?;
        state.end()
    }
}
