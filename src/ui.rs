use crate::app::Granularity;
use crate::grid::{MonthGrid, WeekStart, build_month_grid, build_year_grid, week_columns};
use crate::index::attach_events;
use crate::logging::get_recent_logs;
use crate::model::ScheduleEvent;
use crate::slots::{TimeSlotPlacement, VIEW_END_HOUR, VIEW_START_HOUR, layout_day, layout_week};
use crate::utils::truncate_str;
use chrono::{Datelike, NaiveDate};
use crossterm::{
    cursor, execute,
    style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io::{Write, stdout};

/// Width of the hour gutter in the week and day views
const HOUR_GUTTER: u16 = 6;

pub struct RenderState<'a> {
    pub granularity: Granularity,
    pub current_date: NaiveDate,
    pub today: NaiveDate,
    pub week_start: WeekStart,
    pub events: &'a [ScheduleEvent],
    pub loading: bool,
    pub using_demo_data: bool,
    pub status_message: Option<&'a str>,
    pub show_logs: bool,
}

pub fn render(state: &RenderState) {
    let mut out = stdout();
    let (term_width, term_height) = terminal::size().unwrap_or((80, 24));

    execute!(out, Clear(ClearType::All), cursor::Hide).unwrap();

    match state.granularity {
        Granularity::Month => render_month(&mut out, state, term_width),
        Granularity::Year => render_year(&mut out, state, term_width),
        Granularity::Week => render_week(&mut out, state, term_width),
        Granularity::Day => render_day(&mut out, state, term_width),
    }

    if state.show_logs {
        render_logs(&mut out, term_width, term_height);
    }
    render_status(&mut out, state, term_width, term_height);

    out.flush().unwrap();
}

fn header(out: &mut impl Write, text: &str, loading: bool, width: u16) {
    execute!(
        out,
        cursor::MoveTo(0, 0),
        SetForegroundColor(Color::Cyan),
        SetAttribute(Attribute::Bold)
    )
    .unwrap();
    let loading_indicator = if loading { " *" } else { "" };
    print!(
        "{}",
        truncate_str(&format!(" {}{}", text, loading_indicator), width as usize)
    );
    execute!(out, ResetColor, SetAttribute(Attribute::Reset)).unwrap();
}

/// Map a color tag from the platform to a terminal color. Unknown tags fall
/// back to the default foreground; the tag itself is never interpreted by
/// the layout code.
fn color_for_tag(tag: &str) -> Color {
    match tag {
        "amber" => Color::Yellow,
        "teal" => Color::Cyan,
        "violet" => Color::Magenta,
        "rose" => Color::Red,
        "green" => Color::Green,
        "blue" => Color::Blue,
        _ => Color::Reset,
    }
}

fn render_month(out: &mut impl Write, state: &RenderState, width: u16) {
    let date = state.current_date;
    header(
        out,
        &format!(
            "{} {}",
            date.format("%B").to_string().to_uppercase(),
            date.year()
        ),
        state.loading,
        width,
    );

    // Weekday header
    execute!(out, cursor::MoveTo(0, 1), SetForegroundColor(Color::DarkGrey)).unwrap();
    for label in state.week_start.labels() {
        print!(" {}", label);
    }
    execute!(out, ResetColor).unwrap();

    let mut grid = build_month_grid(date.year(), date.month(), state.week_start, state.today);
    attach_events(&mut grid.cells, state.events);

    for (i, cell) in grid.cells.iter().enumerate() {
        let row = (i / 7) as u16;
        let col = (i % 7) as u16;
        execute!(out, cursor::MoveTo(1 + col * 3, 2 + row)).unwrap();

        let is_focus = cell.date == state.current_date;
        if is_focus {
            execute!(out, SetAttribute(Attribute::Reverse)).unwrap();
        } else if cell.is_today {
            execute!(
                out,
                SetForegroundColor(Color::Green),
                SetAttribute(Attribute::Bold)
            )
            .unwrap();
        } else if !cell.in_focused_month {
            execute!(out, SetForegroundColor(Color::DarkGrey)).unwrap();
        }

        if cell.events.is_empty() {
            print!("{:2} ", cell.date.day());
        } else {
            print!("{:2}\u{2022}", cell.date.day());
        }
        execute!(out, ResetColor, SetAttribute(Attribute::Reset)).unwrap();
    }

    // Events of the focused day below the grid
    execute!(out, cursor::MoveTo(0, 9), SetForegroundColor(Color::Yellow)).unwrap();
    print!(" {} {}", date.format("%a"), date.format("%b %d"));
    execute!(out, ResetColor).unwrap();

    let day_events: Vec<&ScheduleEvent> =
        state.events.iter().filter(|e| e.occurs_on(date)).collect();
    if day_events.is_empty() {
        execute!(out, cursor::MoveTo(1, 10), SetForegroundColor(Color::DarkGrey)).unwrap();
        print!("No events");
        execute!(out, ResetColor).unwrap();
    }
    for (i, event) in day_events.iter().enumerate() {
        execute!(out, cursor::MoveTo(1, 10 + i as u16)).unwrap();
        let time = event.time_str().unwrap_or_else(|| "all day".to_string());
        execute!(out, SetForegroundColor(Color::DarkGrey)).unwrap();
        print!("{:>7} ", time);
        execute!(out, SetForegroundColor(color_for_tag(&event.color_tag))).unwrap();
        print!(
            "{}",
            truncate_str(&event.title, width.saturating_sub(10) as usize)
        );
        execute!(out, ResetColor).unwrap();
    }
}

fn render_year(out: &mut impl Write, state: &RenderState, width: u16) {
    header(
        out,
        &state.current_date.year().to_string(),
        state.loading,
        width,
    );

    let mut grids = build_year_grid(state.current_date.year(), state.week_start, state.today);
    for grid in grids.iter_mut() {
        attach_events(&mut grid.cells, state.events);
    }

    // Four mini-months per band, 23 columns each
    for (i, grid) in grids.iter().enumerate() {
        let x = (i % 4) as u16 * 23;
        let y = 2 + (i / 4) as u16 * 8;
        render_mini_month(out, grid, x, y);
    }
}

fn render_mini_month(out: &mut impl Write, grid: &MonthGrid, x: u16, y: u16) {
    let name = NaiveDate::from_ymd_opt(grid.year, grid.month, 1)
        .unwrap()
        .format("%B")
        .to_string();
    execute!(out, cursor::MoveTo(x + 1, y), SetForegroundColor(Color::Cyan)).unwrap();
    print!("{}", truncate_str(&name, 21));
    execute!(out, ResetColor).unwrap();

    for (i, cell) in grid.cells.iter().enumerate() {
        // Padding days stay blank in the year view
        if !cell.in_focused_month {
            continue;
        }
        let row = (i / 7) as u16;
        let col = (i % 7) as u16;
        execute!(out, cursor::MoveTo(x + 1 + col * 3, y + 1 + row)).unwrap();

        if cell.is_today {
            execute!(
                out,
                SetForegroundColor(Color::Green),
                SetAttribute(Attribute::Bold)
            )
            .unwrap();
        }
        if cell.events.is_empty() {
            print!("{:2} ", cell.date.day());
        } else {
            print!("{:2}\u{2022}", cell.date.day());
        }
        execute!(out, ResetColor, SetAttribute(Attribute::Reset)).unwrap();
    }
}

/// Rows of the hour grid shared by the week and day views
const HOUR_ROWS: u16 = (VIEW_END_HOUR - VIEW_START_HOUR) as u16;

fn hour_gutter(out: &mut impl Write, top: u16) {
    execute!(out, SetForegroundColor(Color::DarkGrey)).unwrap();
    for row in 0..HOUR_ROWS {
        execute!(out, cursor::MoveTo(0, top + row)).unwrap();
        print!("{:02}:00", VIEW_START_HOUR + row as u32);
    }
    execute!(out, ResetColor).unwrap();
}

/// Terminal row offset for a placement, one row per visible hour. Placements
/// outside the window are clipped here, at the rendering edge.
fn placement_row(placement: &TimeSlotPlacement) -> Option<u16> {
    let row = (placement.top_percent / 100.0 * f64::from(HOUR_ROWS)).floor();
    if row < 0.0 || row >= f64::from(HOUR_ROWS) {
        return None;
    }
    Some(row as u16)
}

fn render_week(out: &mut impl Write, state: &RenderState, width: u16) {
    let columns = week_columns(state.current_date, state.week_start);
    header(
        out,
        &format!(
            "WEEK OF {} {}",
            columns[0].format("%b %d"),
            columns[0].year()
        ),
        state.loading,
        width,
    );

    let col_width = width.saturating_sub(HOUR_GUTTER).max(7) / 7;

    // Day headers
    for (i, day) in columns.iter().enumerate() {
        let x = HOUR_GUTTER + i as u16 * col_width;
        execute!(out, cursor::MoveTo(x, 1)).unwrap();
        if *day == state.today {
            execute!(
                out,
                SetForegroundColor(Color::Green),
                SetAttribute(Attribute::Bold)
            )
            .unwrap();
        } else {
            execute!(out, SetForegroundColor(Color::DarkGrey)).unwrap();
        }
        print!(
            "{}",
            truncate_str(&day.format("%a %d").to_string(), col_width as usize)
        );
        execute!(out, ResetColor, SetAttribute(Attribute::Reset)).unwrap();
    }

    // Untimed events occurring in the week, one marker line per column
    for (i, day) in columns.iter().enumerate() {
        let untimed: Vec<&ScheduleEvent> = state
            .events
            .iter()
            .filter(|e| e.time.is_none() && e.occurs_on(*day))
            .collect();
        if untimed.is_empty() {
            continue;
        }
        let x = HOUR_GUTTER + i as u16 * col_width;
        execute!(out, cursor::MoveTo(x, 2), SetForegroundColor(Color::DarkGrey)).unwrap();
        print!(
            "{}",
            truncate_str(&untimed[0].title, col_width.saturating_sub(1) as usize)
        );
        execute!(out, ResetColor).unwrap();
    }

    let grid_top = 3;
    hour_gutter(out, grid_top);

    let placements = layout_week(state.events, &columns, VIEW_START_HOUR, VIEW_END_HOUR);
    for placement in &placements {
        let Some(row) = placement_row(placement) else {
            continue;
        };
        let x = HOUR_GUTTER + placement.day_column as u16 * col_width;
        execute!(
            out,
            cursor::MoveTo(x, grid_top + row),
            SetForegroundColor(color_for_tag(&placement.event.color_tag))
        )
        .unwrap();
        print!(
            "{}",
            truncate_str(
                &placement.event.title,
                col_width.saturating_sub(1) as usize
            )
        );
        execute!(out, ResetColor).unwrap();
    }
}

fn render_day(out: &mut impl Write, state: &RenderState, width: u16) {
    let day = state.current_date;
    header(
        out,
        &day.format("%A, %B %d %Y").to_string().to_uppercase(),
        state.loading,
        width,
    );

    // All-day entries first
    let untimed: Vec<&ScheduleEvent> = state
        .events
        .iter()
        .filter(|e| e.time.is_none() && e.occurs_on(day))
        .collect();
    for (i, event) in untimed.iter().enumerate() {
        execute!(out, cursor::MoveTo(1, 1 + i as u16)).unwrap();
        execute!(out, SetForegroundColor(Color::DarkGrey)).unwrap();
        print!("all day ");
        execute!(out, SetForegroundColor(color_for_tag(&event.color_tag))).unwrap();
        print!(
            "{}",
            truncate_str(&event.title, width.saturating_sub(10) as usize)
        );
        execute!(out, ResetColor).unwrap();
    }

    let grid_top = 2 + untimed.len() as u16;
    hour_gutter(out, grid_top);

    let placements = layout_day(state.events, day, VIEW_START_HOUR, VIEW_END_HOUR);
    for placement in &placements {
        let Some(row) = placement_row(placement) else {
            continue;
        };
        execute!(
            out,
            cursor::MoveTo(HOUR_GUTTER + 1, grid_top + row),
            SetForegroundColor(color_for_tag(&placement.event.color_tag))
        )
        .unwrap();
        let line = if placement.event.description.is_empty() {
            placement.event.title.clone()
        } else {
            format!("{} — {}", placement.event.title, placement.event.description)
        };
        print!(
            "{}",
            truncate_str(&line, width.saturating_sub(HOUR_GUTTER + 2) as usize)
        );
        execute!(out, ResetColor).unwrap();
    }
}

fn render_logs(out: &mut impl Write, width: u16, height: u16) {
    let count = height.saturating_sub(4).min(10) as usize;
    let top = height.saturating_sub(count as u16 + 2);
    execute!(out, SetForegroundColor(Color::DarkGrey)).unwrap();
    for (i, line) in get_recent_logs(count).iter().enumerate() {
        execute!(out, cursor::MoveTo(0, top + i as u16)).unwrap();
        print!(" {}", truncate_str(line, width.saturating_sub(1) as usize));
    }
    execute!(out, ResetColor).unwrap();
}

fn render_status(out: &mut impl Write, state: &RenderState, width: u16, height: u16) {
    let status_row = height.saturating_sub(2);
    execute!(out, cursor::MoveTo(0, status_row)).unwrap();

    if let Some(msg) = state.status_message {
        execute!(out, SetForegroundColor(Color::Yellow)).unwrap();
        print!(" {}", truncate_str(msg, width.saturating_sub(2) as usize));
        execute!(out, ResetColor).unwrap();
    } else if state.using_demo_data {
        execute!(out, SetForegroundColor(Color::Yellow)).unwrap();
        print!(" using demo data");
        execute!(out, ResetColor).unwrap();
    }

    execute!(
        out,
        cursor::MoveTo(0, height.saturating_sub(1)),
        SetForegroundColor(Color::DarkGrey)
    )
    .unwrap();
    print!(" h/l:nav t:today y/m/w/d:view r:refresh L:logs q:quit");
    execute!(out, ResetColor).unwrap();
}
