//! Wall-clock times of day in `HH:MM` form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::block::MINUTES_PER_DAY;
use crate::error::{Result, SlotError};

/// A time of day stored as minutes since midnight, `0..=1440`.
///
/// `24:00` is accepted so that a window or exclusion can run to the end of
/// the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Build from hours and minutes, clamping anything past `24:00`.
    pub const fn at(hours: u32, minutes: u32) -> Self {
        if hours >= 24 || minutes >= MINUTES_PER_DAY {
            return TimeOfDay(MINUTES_PER_DAY);
        }
        let total = hours * 60 + minutes;
        if total > MINUTES_PER_DAY {
            TimeOfDay(MINUTES_PER_DAY)
        } else {
            TimeOfDay(total)
        }
    }

    /// Build from hours and minutes, rejecting anything past `24:00`.
    pub fn from_hm(hours: u32, minutes: u32) -> Result<Self> {
        if hours > 24 || minutes >= 60 {
            return Err(SlotError::InvalidTime(format!("{:02}:{:02}", hours, minutes)));
        }
        TimeOfDay::from_minutes(hours * 60 + minutes)
            .map_err(|_| SlotError::InvalidTime(format!("{:02}:{:02}", hours, minutes)))
    }

    /// Build from minutes since midnight, rejecting anything past `24:00`.
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes > MINUTES_PER_DAY {
            return Err(SlotError::InvalidTime(format!("{} minutes", minutes)));
        }
        Ok(TimeOfDay(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| SlotError::InvalidTime(s.to_string()))?;
        let hours: u32 = h.parse().map_err(|_| SlotError::InvalidTime(s.to_string()))?;
        let minutes: u32 = m.parse().map_err(|_| SlotError::InvalidTime(s.to_string()))?;
        TimeOfDay::from_hm(hours, minutes).map_err(|_| SlotError::InvalidTime(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Render minutes since midnight as `HH:MM`.
pub fn minutes_to_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
