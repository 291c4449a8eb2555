//! Vertical placement of timed events for the week and day views.
//!
//! Positions are percentages of the visible hour window, not rows or pixels;
//! the renderer decides what a percent maps to. Events outside the window
//! still get a placement (possibly negative or beyond 100%) because clipping
//! is a rendering concern.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::model::{ScheduleEvent, TimeOfDay};

/// Hour window the week and day views display
pub const VIEW_START_HOUR: u32 = 8;
pub const VIEW_END_HOUR: u32 = 19;

/// Duration assumed for point-in-time events
const POINT_EVENT_HOURS: f64 = 1.0;

/// Placement of one timed event within the visible hour window
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlotPlacement {
    pub event: ScheduleEvent,
    /// 0-based column within the rendered week; always 0 in the day view
    pub day_column: usize,
    pub top_percent: f64,
    pub height_percent: f64,
}

fn fractional_hour(time: NaiveTime) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0
}

fn span_hours(time: TimeOfDay) -> (f64, f64) {
    match time {
        TimeOfDay::At(start) => {
            let start = fractional_hour(start);
            (start, start + POINT_EVENT_HOURS)
        }
        TimeOfDay::Between(start, end) => (fractional_hour(start), fractional_hour(end)),
    }
}

/// Callers must pass a non-empty window (`view_end > view_start`); both views
/// use the fixed VIEW_START_HOUR..VIEW_END_HOUR range.
fn place(
    event: &ScheduleEvent,
    time: TimeOfDay,
    day_column: usize,
    view_start: u32,
    view_end: u32,
) -> TimeSlotPlacement {
    let visible = f64::from(view_end) - f64::from(view_start);
    let (start, end) = span_hours(time);

    TimeSlotPlacement {
        event: event.clone(),
        day_column,
        top_percent: (start - f64::from(view_start)) / visible * 100.0,
        height_percent: (end - start) / visible * 100.0,
    }
}

/// Placements for a single day. Only events starting on `day` that carry a
/// time-of-day take a slot; untimed events are the renderer's all-day list.
pub fn layout_day(
    events: &[ScheduleEvent],
    day: NaiveDate,
    view_start: u32,
    view_end: u32,
) -> Vec<TimeSlotPlacement> {
    events
        .iter()
        .filter(|e| e.start_date == day)
        .filter_map(|e| e.time.map(|t| place(e, t, 0, view_start, view_end)))
        .collect()
}

/// Placements for a week. `day_column` indexes into `columns`; events whose
/// start date matches none of the seven columns are omitted rather than
/// clamped to an edge.
pub fn layout_week(
    events: &[ScheduleEvent],
    columns: &[NaiveDate; 7],
    view_start: u32,
    view_end: u32,
) -> Vec<TimeSlotPlacement> {
    events
        .iter()
        .filter_map(|e| {
            let day_column = columns.iter().position(|&d| d == e.start_date)?;
            let time = e.time?;
            Some(place(e, time, day_column, view_start, view_end))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{WeekStart, week_columns};
    use chrono::{NaiveDate, NaiveTime};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn hhmm(s: &str) -> NaiveTime {
        let (hour, minute) = s.split_once(':').unwrap();
        NaiveTime::from_hms_opt(hour.parse().unwrap(), minute.parse().unwrap(), 0).unwrap()
    }

    fn timed(title: &str, start: NaiveDate, time: &str) -> ScheduleEvent {
        let time = match time.split_once('-') {
            Some((a, b)) => TimeOfDay::Between(hhmm(a), hhmm(b)),
            None => TimeOfDay::At(hhmm(time)),
        };
        ScheduleEvent {
            title: title.to_string(),
            start_date: start,
            end_date: None,
            time: Some(time),
            description: String::new(),
            color_tag: String::new(),
        }
    }

    #[test]
    fn test_range_event_at_window_start() {
        let events = vec![timed("Lecture", date(2025, 5, 10), "08:00-09:00")];

        let placements = layout_day(&events, date(2025, 5, 10), VIEW_START_HOUR, VIEW_END_HOUR);

        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].top_percent, 0.0);
        // One hour of an eleven-hour window
        assert!((placements[0].height_percent - 100.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_event_gets_one_hour() {
        let events = vec![timed("Quiz", date(2025, 5, 10), "11:00")];

        let placements = layout_day(&events, date(2025, 5, 10), VIEW_START_HOUR, VIEW_END_HOUR);

        assert_eq!(placements.len(), 1);
        assert!((placements[0].top_percent - 3.0 / 11.0 * 100.0).abs() < 1e-9);
        assert!((placements[0].height_percent - 100.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_half_hours_are_fractional() {
        let events = vec![timed("Tutorial", date(2025, 5, 10), "09:30-10:15")];

        let placements = layout_day(&events, date(2025, 5, 10), VIEW_START_HOUR, VIEW_END_HOUR);

        assert!((placements[0].top_percent - 1.5 / 11.0 * 100.0).abs() < 1e-9);
        assert!((placements[0].height_percent - 0.75 / 11.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_events_outside_window_are_not_clipped() {
        let events = vec![
            timed("Early", date(2025, 5, 10), "06:00-07:00"),
            timed("Late", date(2025, 5, 10), "20:00-21:00"),
        ];

        let placements = layout_day(&events, date(2025, 5, 10), VIEW_START_HOUR, VIEW_END_HOUR);

        assert_eq!(placements.len(), 2);
        assert!(placements[0].top_percent < 0.0);
        assert!(placements[1].top_percent > 100.0);
    }

    #[test]
    fn test_other_days_and_untimed_events_take_no_slot() {
        let untimed = ScheduleEvent {
            title: "Reading".to_string(),
            start_date: date(2025, 5, 10),
            end_date: None,
            time: None,
            description: String::new(),
            color_tag: String::new(),
        };
        let events = vec![untimed, timed("Quiz", date(2025, 5, 11), "11:00")];

        let placements = layout_day(&events, date(2025, 5, 10), VIEW_START_HOUR, VIEW_END_HOUR);

        assert!(placements.is_empty());
    }

    #[test]
    fn test_week_layout_assigns_columns() {
        let columns = week_columns(date(2025, 1, 15), WeekStart::Monday);
        let events = vec![
            timed("Monday lab", date(2025, 1, 13), "09:00-11:00"),
            timed("Friday quiz", date(2025, 1, 17), "14:00"),
        ];

        let placements = layout_week(&events, &columns, VIEW_START_HOUR, VIEW_END_HOUR);

        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].day_column, 0);
        assert_eq!(placements[1].day_column, 4);
    }

    #[test]
    fn test_week_layout_omits_events_outside_week() {
        let columns = week_columns(date(2025, 1, 15), WeekStart::Monday);
        let events = vec![timed("Next month", date(2025, 2, 3), "09:00")];

        let placements = layout_week(&events, &columns, VIEW_START_HOUR, VIEW_END_HOUR);

        assert!(placements.is_empty());
    }
}
