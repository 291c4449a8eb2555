//! Fallback demo schedule used when the platform API is unreachable.
//!
//! Dated relative to the view's anchor so the fallback always lands in the
//! period currently on screen, and run through the same validation boundary
//! as fetched events.

use chrono::{Duration, NaiveDate};

use crate::api::RawScheduleEvent;
use crate::model::{ScheduleEvent, validate_events};

pub fn demo_events(anchor: NaiveDate) -> Vec<ScheduleEvent> {
    validate_events(&demo_raw(anchor))
}

fn demo_raw(anchor: NaiveDate) -> Vec<RawScheduleEvent> {
    let wire = |d: NaiveDate| d.format("%d/%m/%Y").to_string();

    vec![
        RawScheduleEvent {
            title: "Algebra quiz".to_string(),
            due_date: wire(anchor),
            end_date: None,
            time: Some("11:00".to_string()),
            description: "Chapters 4 and 5".to_string(),
            color: "amber".to_string(),
        },
        RawScheduleEvent {
            title: "Physics lab".to_string(),
            due_date: wire(anchor - Duration::days(1)),
            end_date: None,
            time: Some("09:00-10:30".to_string()),
            description: "Bring lab notebook".to_string(),
            color: "teal".to_string(),
        },
        RawScheduleEvent {
            title: "Group project".to_string(),
            due_date: wire(anchor + Duration::days(1)),
            end_date: Some(wire(anchor + Duration::days(3))),
            time: None,
            description: "History presentation, room 2B".to_string(),
            color: "violet".to_string(),
        },
        RawScheduleEvent {
            title: "Essay draft due".to_string(),
            due_date: wire(anchor + Duration::days(4)),
            end_date: None,
            time: Some("16:00".to_string()),
            description: "Submit through the portal".to_string(),
            color: "rose".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_demo_events_all_validate() {
        let anchor = date(2025, 5, 10);
        assert_eq!(demo_events(anchor).len(), demo_raw(anchor).len());
    }

    #[test]
    fn test_demo_events_track_the_anchor() {
        let anchor = date(2025, 5, 10);
        let events = demo_events(anchor);

        assert_eq!(events[0].start_date, anchor);
        assert_eq!(events[1].start_date, anchor - Duration::days(1));
        assert_eq!(events[2].start_date, anchor + Duration::days(1));
        assert_eq!(events[2].end_date, Some(anchor + Duration::days(3)));
    }

    #[test]
    fn test_demo_events_survive_month_boundaries() {
        // Anchors at the edges of months still produce valid wire dates
        for anchor in [date(2024, 2, 29), date(2024, 12, 31), date(2025, 1, 1)] {
            assert_eq!(demo_events(anchor).len(), 4);
        }
    }
}
