//! Settings file for the `slots` CLI.
//!
//! A TOML file whose fields mirror the scheduling policy. Every field is
//! optional; missing ones take the defaults a fresh install starts with.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;
use slot_engine::{Exclusion, Language, Policy, TimeOfDay, WeekdayMask};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub language: Language,
    pub timezone: Tz,
    pub start_date: Option<NaiveDate>,
    pub num_days: u32,
    pub available_from: TimeOfDay,
    pub available_until: TimeOfDay,
    pub exclusions: Vec<Exclusion>,
    pub selected_days: WeekdayMask,
    pub min_duration: u32,
    pub max_duration: u32,
    pub num_slots: usize,
    pub spread_days: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::En,
            timezone: Tz::UTC,
            start_date: None,
            num_days: 14,
            available_from: TimeOfDay::at(9, 0),
            available_until: TimeOfDay::at(18, 0),
            exclusions: vec![Exclusion::new(TimeOfDay::at(12, 0), TimeOfDay::at(13, 0))],
            selected_days: WeekdayMask::WEEKDAYS,
            min_duration: 60,
            max_duration: 120,
            num_slots: 3,
            spread_days: 2,
        }
    }
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub start_date: Option<NaiveDate>,
    pub num_days: Option<u32>,
    pub min_duration: Option<u32>,
    pub max_duration: Option<u32>,
    pub num_slots: Option<usize>,
    pub spread_days: Option<usize>,
    pub timezone: Option<Tz>,
}

impl Settings {
    /// Load settings from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(d) = overrides.start_date {
            self.start_date = Some(d);
        }
        if let Some(n) = overrides.num_days {
            self.num_days = n;
        }
        if let Some(m) = overrides.min_duration {
            self.min_duration = m;
        }
        if let Some(m) = overrides.max_duration {
            self.max_duration = m;
        }
        if let Some(n) = overrides.num_slots {
            self.num_slots = n;
        }
        if let Some(s) = overrides.spread_days {
            self.spread_days = s;
        }
        if let Some(tz) = overrides.timezone {
            self.timezone = tz;
        }
    }

    /// Resolve into a validated policy. `today` is used when no start date is set.
    pub fn to_policy(&self, today: NaiveDate) -> Result<Policy> {
        let policy = Policy {
            search_start_date: self.start_date.unwrap_or(today),
            num_days_to_search: self.num_days,
            daily_window_start: self.available_from,
            daily_window_end: self.available_until,
            exclusions: self.exclusions.clone(),
            weekday_mask: self.selected_days,
            min_duration_minutes: self.min_duration,
            max_duration_minutes: self.max_duration,
            num_slots_required: self.num_slots,
            spread_days_target: self.spread_days,
            timezone: self.timezone,
        };
        policy.validate().context("Invalid settings")?;
        Ok(policy)
    }
}
