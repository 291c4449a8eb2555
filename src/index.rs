//! Attaching schedule events to month-grid cells.

use crate::grid::CalendarCell;
use crate::model::ScheduleEvent;

/// Attach each event to every cell whose date its inclusive
/// `[start_date, end_date]` span covers. Events keep the input list's order
/// within a cell; nothing is sorted. Cells are cleared first, so repeated
/// calls over the same input produce the same result.
pub fn attach_events(cells: &mut [CalendarCell], events: &[ScheduleEvent]) {
    for cell in cells.iter_mut() {
        cell.events.clear();
        for event in events {
            if event.occurs_on(cell.date) {
                cell.events.push(event.clone());
            }
        }
    }
}
