//! Error types for slot-engine parsing and validation.
//!
//! The slot computation itself never fails; these errors only surface while
//! turning loosely-typed input (strings, JSON) into a [`crate::Policy`] or
//! [`crate::CalendarEvent`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
