//! The user's scheduling policy: working hours, exclusions, weekdays, and the
//! shape of the slot list they want back.

use std::ops::Range;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::TimeOfDay;
use crate::error::{Result, SlotError};

/// A recurring daily period that is never offered (e.g. lunch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Exclusion {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }
}

/// Which weekdays are eligible, indexed Sunday = 0 through Saturday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdayMask(pub [bool; 7]);

impl WeekdayMask {
    pub const ALL: WeekdayMask = WeekdayMask([true; 7]);
    pub const WEEKDAYS: WeekdayMask = WeekdayMask([false, true, true, true, true, true, false]);

    pub fn allows(&self, weekday: Weekday) -> bool {
        self.0[weekday.num_days_from_sunday() as usize]
    }

    pub fn allows_date(&self, date: NaiveDate) -> bool {
        self.allows(date.weekday())
    }
}

impl Default for WeekdayMask {
    fn default() -> Self {
        Self::WEEKDAYS
    }
}

/// Fully resolved input for one slot search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// First date of the search horizon. Supplied by the caller, never read
    /// from the clock.
    pub search_start_date: NaiveDate,
    pub num_days_to_search: u32,
    pub daily_window_start: TimeOfDay,
    pub daily_window_end: TimeOfDay,
    pub exclusions: Vec<Exclusion>,
    pub weekday_mask: WeekdayMask,
    pub min_duration_minutes: u32,
    pub max_duration_minutes: u32,
    pub num_slots_required: usize,
    pub spread_days_target: usize,
    /// IANA zone in which timed events are read and slots are expressed.
    pub timezone: Tz,
}

impl Policy {
    /// Dates searched, `search_start_date` inclusive to
    /// `search_start_date + num_days_to_search` exclusive.
    pub fn horizon(&self) -> Range<NaiveDate> {
        let end = self
            .search_start_date
            .checked_add_days(Days::new(u64::from(self.num_days_to_search)))
            .unwrap_or(NaiveDate::MAX);
        self.search_start_date..end
    }

    /// Check the caller-level constraints the slot search assumes.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidPolicy` when the maximum duration is below the
    /// minimum or the daily window is empty. Asking for fewer slots than the
    /// spread target is allowed and only logged.
    pub fn validate(&self) -> Result<()> {
        if self.max_duration_minutes < self.min_duration_minutes {
            return Err(SlotError::InvalidPolicy(format!(
                "maximum duration ({} min) is less than minimum duration ({} min)",
                self.max_duration_minutes, self.min_duration_minutes
            )));
        }
        if self.daily_window_start >= self.daily_window_end {
            return Err(SlotError::InvalidPolicy(format!(
                "daily window {}-{} is empty",
                self.daily_window_start, self.daily_window_end
            )));
        }
        if self.num_slots_required < self.spread_days_target {
            warn!(
                num_slots = self.num_slots_required,
                spread_days = self.spread_days_target,
                "fewer slots requested than spread target; spread cannot be fully met"
            );
        }
        Ok(())
    }
}
