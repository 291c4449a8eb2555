//! Calendar grid construction for the year and month views.
//!
//! Pure date arithmetic: no ambient clock access. Callers compute "today"
//! once per render and pass it in, so the same grid logic is deterministic
//! under test and a rendered grid is only as stale as its caller lets it be.

use chrono::{Datelike, Duration, NaiveDate};

use crate::model::ScheduleEvent;

/// Total cells in a month grid: six full weeks
pub const MONTH_GRID_CELLS: usize = 42;

/// Which weekday occupies the grid's first column.
///
/// The platform never settled on one convention, so it is an explicit
/// parameter threaded through every builder instead of a baked-in constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekStart {
    Sunday,
    Monday,
}

impl WeekStart {
    /// Column index (0..=6) of `date`'s weekday under this convention
    pub fn column_of(&self, date: NaiveDate) -> u32 {
        match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        }
    }

    /// Column header labels, first column first
    pub fn labels(&self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            WeekStart::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }
}

/// One cell of a month grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// False for padding days borrowed from the adjacent months
    pub in_focused_month: bool,
    pub is_today: bool,
    pub events: Vec<ScheduleEvent>,
}

/// A month's 42-cell grid plus the (year, month) it focuses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

/// Number of days in a calendar month, taken as the day before the first of
/// the next month so leap years need no day-count table.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    first_of_next_month(year, month)
        .pred_opt()
        .expect("previous day exists")
        .day()
}

fn first_of_next_month(year: i32, month: u32) -> NaiveDate {
    let (y, m) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(y, m, 1).expect("valid month start")
}

/// Weekday column of the 1st of `(year, month)` under `week_start`
pub fn start_weekday(year: i32, month: u32, week_start: WeekStart) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid first of month");
    week_start.column_of(first)
}

/// Build the 42-cell grid for `(year, month)`: tail days of the previous
/// month, days 1..=days_in_month, then head days of the next month.
pub fn build_month_grid(year: i32, month: u32, week_start: WeekStart, today: NaiveDate) -> MonthGrid {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid first of month");
    let grid_start = first - Duration::days(week_start.column_of(first) as i64);

    let cells = (0..MONTH_GRID_CELLS as i64)
        .map(|offset| {
            let date = grid_start + Duration::days(offset);
            CalendarCell {
                date,
                in_focused_month: date.year() == year && date.month() == month,
                is_today: date == today,
                events: Vec::new(),
            }
        })
        .collect();

    MonthGrid { year, month, cells }
}

/// Twelve month grids for the year view
pub fn build_year_grid(year: i32, week_start: WeekStart, today: NaiveDate) -> Vec<MonthGrid> {
    (1..=12)
        .map(|month| build_month_grid(year, month, week_start, today))
        .collect()
}

/// The seven dates of the week containing `anchor`
pub fn week_columns(anchor: NaiveDate, week_start: WeekStart) -> [NaiveDate; 7] {
    let start = anchor - Duration::days(week_start.column_of(anchor) as i64);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_days_in_month_leap_year() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_days_in_month_december_rolls_year() {
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn test_month_grid_has_42_cells() {
        for month in 1..=12 {
            let grid = build_month_grid(2024, month, WeekStart::Monday, date(2024, 1, 1));
            assert_eq!(grid.cells.len(), MONTH_GRID_CELLS);
        }
    }

    #[test]
    fn test_month_grid_focused_cells_cover_the_month() {
        let grid = build_month_grid(2024, 6, WeekStart::Monday, date(2024, 1, 1));

        let focused: Vec<_> = grid.cells.iter().filter(|c| c.in_focused_month).collect();
        assert_eq!(focused.len(), days_in_month(2024, 6) as usize);
        assert_eq!(focused[0].date, date(2024, 6, 1));
        assert_eq!(focused.last().unwrap().date, date(2024, 6, 30));

        // Focused run starts at the weekday offset of June 1st and is contiguous
        let offset = start_weekday(2024, 6, WeekStart::Monday) as usize;
        assert!(grid.cells[..offset].iter().all(|c| !c.in_focused_month));
        assert!(grid.cells[offset..offset + 30].iter().all(|c| c.in_focused_month));
        assert!(grid.cells[offset + 30..].iter().all(|c| !c.in_focused_month));
    }

    #[test]
    fn test_month_grid_padding_days_come_from_adjacent_months() {
        // June 2024 starts on a Saturday; Monday-first grid leads with May 27-31
        let grid = build_month_grid(2024, 6, WeekStart::Monday, date(2024, 1, 1));
        assert_eq!(grid.cells[0].date, date(2024, 5, 27));
        assert!(!grid.cells[0].in_focused_month);
        assert_eq!(grid.cells[41].date, date(2024, 7, 7));
        assert!(!grid.cells[41].in_focused_month);
    }

    #[test]
    fn test_month_grid_january_borrows_from_previous_year() {
        let grid = build_month_grid(2024, 1, WeekStart::Monday, date(2024, 1, 1));
        // Jan 1, 2024 is a Monday, so the grid starts on it directly
        assert_eq!(grid.cells[0].date, date(2024, 1, 1));

        let grid = build_month_grid(2026, 1, WeekStart::Monday, date(2026, 1, 1));
        // Jan 1, 2026 is a Thursday; the lead cells are December 2025
        assert_eq!(grid.cells[0].date, date(2025, 12, 29));
        assert!(!grid.cells[0].in_focused_month);
    }

    #[test]
    fn test_month_grid_december_borrows_from_next_year() {
        let grid = build_month_grid(2024, 12, WeekStart::Monday, date(2024, 1, 1));
        let trailing = grid.cells.last().unwrap();
        assert_eq!(trailing.date.year(), 2025);
        assert_eq!(trailing.date.month(), 1);
    }

    #[test]
    fn test_sunday_and_monday_conventions_differ() {
        // June 1, 2024 is a Saturday: column 5 from Monday, 6 from Sunday
        assert_eq!(start_weekday(2024, 6, WeekStart::Monday), 5);
        assert_eq!(start_weekday(2024, 6, WeekStart::Sunday), 6);

        let monday_first = build_month_grid(2024, 6, WeekStart::Monday, date(2024, 1, 1));
        let sunday_first = build_month_grid(2024, 6, WeekStart::Sunday, date(2024, 1, 1));
        assert_eq!(monday_first.cells[0].date, date(2024, 5, 27));
        assert_eq!(sunday_first.cells[0].date, date(2024, 5, 26));
    }

    #[test]
    fn test_is_today_uses_injected_date() {
        let grid = build_month_grid(2024, 6, WeekStart::Monday, date(2024, 6, 15));
        let today_cells: Vec<_> = grid.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(today_cells.len(), 1);
        assert_eq!(today_cells[0].date, date(2024, 6, 15));

        // A "today" outside the grid marks nothing
        let grid = build_month_grid(2024, 6, WeekStart::Monday, date(2030, 1, 1));
        assert!(grid.cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_year_grid_is_twelve_month_grids() {
        let grids = build_year_grid(2024, WeekStart::Monday, date(2024, 1, 1));
        assert_eq!(grids.len(), 12);
        for (i, grid) in grids.iter().enumerate() {
            assert_eq!(grid.year, 2024);
            assert_eq!(grid.month, i as u32 + 1);
            assert_eq!(grid.cells.len(), MONTH_GRID_CELLS);
        }
    }

    #[test]
    fn test_week_columns_monday_first() {
        let columns = week_columns(date(2025, 1, 15), WeekStart::Monday);
        assert_eq!(columns[0], date(2025, 1, 13));
        assert_eq!(columns[0].weekday(), Weekday::Mon);
        assert_eq!(columns[6], date(2025, 1, 19));
        assert_eq!(columns[6].weekday(), Weekday::Sun);
    }

    #[test]
    fn test_week_columns_sunday_first() {
        let columns = week_columns(date(2025, 1, 15), WeekStart::Sunday);
        assert_eq!(columns[0], date(2025, 1, 12));
        assert_eq!(columns[0].weekday(), Weekday::Sun);
    }

    #[test]
    fn test_week_columns_anchor_on_week_start() {
        let monday = date(2025, 1, 13);
        let columns = week_columns(monday, WeekStart::Monday);
        assert_eq!(columns[0], monday);
    }

    #[test]
    fn test_week_columns_span_month_boundary() {
        let columns = week_columns(date(2024, 12, 31), WeekStart::Monday);
        assert_eq!(columns[0], date(2024, 12, 30));
        assert_eq!(columns[6], date(2025, 1, 5));
    }
}
