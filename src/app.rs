//! Schedule view state: zoom level, focused date, fetch bookkeeping.
//!
//! Navigation transitions are plain methods over `(granularity, current_date)`
//! so they can be tested without a terminal or a network.

use chrono::{Datelike, Duration, NaiveDate};

use crate::grid::{WeekStart, days_in_month, week_columns};
use crate::model::ScheduleEvent;

/// Calendar zoom level being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Year,
    Month,
    Week,
    Day,
}

/// Application state
pub struct App {
    pub granularity: Granularity,
    pub current_date: NaiveDate,
    pub week_start: WeekStart,
    pub events: Vec<ScheduleEvent>,
    pub using_demo_data: bool,
    pub loading: bool,
    pub needs_fetch: bool,
    pub show_logs: bool,
    pub status_message: Option<String>,
    pub status_message_time: Option<std::time::Instant>,
}

impl App {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            granularity: Granularity::Month,
            current_date: today,
            week_start: WeekStart::Monday,
            events: Vec::new(),
            using_demo_data: false,
            loading: false,
            needs_fetch: true,
            show_logs: false,
            status_message: None,
            status_message_time: None,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(std::time::Instant::now());
    }

    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_message_time
            && time.elapsed() > std::time::Duration::from_secs(3)
        {
            self.status_message = None;
            self.status_message_time = None;
        }
    }

    /// Jump to today without changing the zoom level
    pub fn goto_today(&mut self, today: NaiveDate) {
        let old_range = self.visible_range();
        self.current_date = today;
        self.mark_dirty_if_range_changed(old_range);
    }

    pub fn next(&mut self) {
        self.shift(1);
    }

    pub fn prev(&mut self) {
        self.shift(-1);
    }

    fn shift(&mut self, step: i32) {
        let old_range = self.visible_range();
        self.current_date = match self.granularity {
            Granularity::Year => shift_year(self.current_date, step),
            Granularity::Month => shift_month(self.current_date, step),
            Granularity::Week => self.current_date + Duration::weeks(step as i64),
            Granularity::Day => self.current_date + Duration::days(step as i64),
        };
        self.mark_dirty_if_range_changed(old_range);
    }

    /// Change the zoom level; the focused date stays put
    pub fn set_granularity(&mut self, granularity: Granularity) {
        if self.granularity == granularity {
            return;
        }
        let old_range = self.visible_range();
        self.granularity = granularity;
        self.mark_dirty_if_range_changed(old_range);
    }

    fn mark_dirty_if_range_changed(&mut self, old_range: (NaiveDate, NaiveDate)) {
        if self.visible_range() != old_range {
            self.needs_fetch = true;
        }
    }

    /// Inclusive date span whose events the current view can show. For the
    /// month view this is the full 42-cell grid including padding days.
    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        let date = self.current_date;
        match self.granularity {
            Granularity::Year => (
                NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap(),
            ),
            Granularity::Month => {
                let first = date.with_day(1).unwrap();
                let grid_start =
                    first - Duration::days(self.week_start.column_of(first) as i64);
                (grid_start, grid_start + Duration::days(41))
            }
            Granularity::Week => {
                let columns = week_columns(date, self.week_start);
                (columns[0], columns[6])
            }
            Granularity::Day => (date, date),
        }
    }

    /// Install a fetched (or fallback) event list
    pub fn apply_events(&mut self, events: Vec<ScheduleEvent>, from_demo: bool) {
        self.events = events;
        self.using_demo_data = from_demo;
        self.loading = false;
    }
}

/// Shift by whole calendar months, landing on day 1 of the target month so
/// month-length overflow can never produce an invalid date.
fn shift_month(date: NaiveDate, step: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month() as i32 - 1 + step;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// Shift by whole years, clamping the day for Feb 29 targets
fn shift_year(date: NaiveDate, step: i32) -> NaiveDate {
    let year = date.year() + step;
    NaiveDate::from_ymd_opt(year, date.month(), date.day()).unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(year, date.month(), days_in_month(year, date.month())).unwrap()
    })
}
