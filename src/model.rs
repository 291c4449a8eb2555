//! Validated schedule events.
//!
//! Everything the platform sends is loosely shaped text; this module is the
//! one place where those strings become dates and times. Downstream code
//! (grid, indexer, slot layout) only ever sees a `ScheduleEvent` whose
//! invariants already hold.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::api::types::RawScheduleEvent;
use crate::logging::log_warn;

/// Why a wire event was rejected at the boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventParseError {
    #[error("bad date {0:?}, expected DD/MM/YYYY")]
    BadDate(String),

    #[error("bad time {0:?}, expected HH:MM or HH:MM-HH:MM")]
    BadTime(String),

    #[error("end date {end} before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("time range {0:?} ends at or before its start")]
    EmptyTimeRange(String),
}

/// Time-of-day attached to an event: a single point or a start-end range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    At(NaiveTime),
    Between(NaiveTime, NaiveTime),
}

/// A validated schedule event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEvent {
    pub title: String,
    pub start_date: NaiveDate,
    /// Set for multi-day events; absent means the event is `start_date` only
    pub end_date: Option<NaiveDate>,
    pub time: Option<TimeOfDay>,
    pub description: String,
    /// Opaque styling identifier, passed through to the renderer
    pub color_tag: String,
}

impl ScheduleEvent {
    /// Validate a wire event. Enforces DD/MM/YYYY dates, HH:MM times,
    /// `end_date >= start_date` and non-empty time ranges.
    pub fn from_raw(raw: &RawScheduleEvent) -> Result<Self, EventParseError> {
        let start_date = parse_wire_date(&raw.due_date)?;

        let end_date = match raw.end_date.as_deref() {
            Some(s) => {
                let end = parse_wire_date(s)?;
                if end < start_date {
                    return Err(EventParseError::EndBeforeStart { start: start_date, end });
                }
                Some(end)
            }
            None => None,
        };

        let time = match raw.time.as_deref() {
            Some(s) if !s.trim().is_empty() => Some(parse_wire_time(s)?),
            _ => None,
        };

        Ok(Self {
            title: raw.title.clone(),
            start_date,
            end_date,
            time,
            description: raw.description.clone(),
            color_tag: raw.color.clone(),
        })
    }

    /// Last date the event covers
    pub fn last_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    /// Whether `date` falls inside the event's inclusive date span
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.last_date()
    }

    /// Start time as "HH:MM", or None for untimed events
    pub fn time_str(&self) -> Option<String> {
        self.time.map(|t| {
            let start = match t {
                TimeOfDay::At(start) => start,
                TimeOfDay::Between(start, _) => start,
            };
            start.format("%H:%M").to_string()
        })
    }
}

/// Convert a batch of wire events, dropping and logging the malformed ones.
/// This is the only place malformed data is handled; it never panics and
/// never propagates an error to the view.
pub fn validate_events(raw: &[RawScheduleEvent]) -> Vec<ScheduleEvent> {
    raw.iter()
        .filter_map(|r| match ScheduleEvent::from_raw(r) {
            Ok(event) => Some(event),
            Err(e) => {
                log_warn(format!("dropping event {:?}: {}", r.title, e));
                None
            }
        })
        .collect()
}

/// Parse a "DD/MM/YYYY" wire date
fn parse_wire_date(s: &str) -> Result<NaiveDate, EventParseError> {
    let bad = || EventParseError::BadDate(s.to_string());

    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() != 3 {
        return Err(bad());
    }

    let day: u32 = parts[0].trim().parse().map_err(|_| bad())?;
    let month: u32 = parts[1].trim().parse().map_err(|_| bad())?;
    let year: i32 = parts[2].trim().parse().map_err(|_| bad())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(bad)
}

/// Parse "HH:MM" or "HH:MM-HH:MM"
fn parse_wire_time(s: &str) -> Result<TimeOfDay, EventParseError> {
    match s.split_once('-') {
        Some((start, end)) => {
            let start = parse_hhmm(start).ok_or_else(|| EventParseError::BadTime(s.to_string()))?;
            let end = parse_hhmm(end).ok_or_else(|| EventParseError::BadTime(s.to_string()))?;
            if end <= start {
                return Err(EventParseError::EmptyTimeRange(s.to_string()));
            }
            Ok(TimeOfDay::Between(start, end))
        }
        None => {
            let at = parse_hhmm(s).ok_or_else(|| EventParseError::BadTime(s.to_string()))?;
            Ok(TimeOfDay::At(at))
        }
    }
}

fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    let (hour, minute) = s.trim().split_once(':')?;
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}
