mod api;
mod app;
mod config;
mod demo;
mod error;
mod grid;
mod index;
mod logging;
mod model;
mod slots;
mod ui;
mod utils;

use api::ScheduleClient;
use app::{App, Granularity};
use chrono::{Local, NaiveDate};
use config::{Config, SessionToken};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use error::Result;
use model::{ScheduleEvent, validate_events};
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;

/// Result of one fetch round, applied to state on the next frame. The task
/// is not cancelled on navigation; a late response simply lands on whatever
/// state is current.
enum FetchOutcome {
    Remote(Vec<ScheduleEvent>),
    Fallback(Vec<ScheduleEvent>),
}

fn spawn_fetch(
    client: Option<ScheduleClient>,
    session: Option<SessionToken>,
    student_id: String,
    range: (NaiveDate, NaiveDate),
    anchor: NaiveDate,
    tx: mpsc::UnboundedSender<FetchOutcome>,
) {
    tokio::spawn(async move {
        let outcome = match client {
            Some(client) => {
                match client
                    .list_events(session.as_ref(), &student_id, range.0, range.1)
                    .await
                {
                    Ok(raw) => FetchOutcome::Remote(validate_events(&raw)),
                    Err(e) => {
                        logging::log_warn(format!("schedule fetch failed: {}", e));
                        FetchOutcome::Fallback(demo::demo_events(anchor))
                    }
                }
            }
            None => FetchOutcome::Fallback(demo::demo_events(anchor)),
        };
        let _ = tx.send(outcome);
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    let session = config::load_session()?;
    if config.is_none() {
        logging::log_warn("no config found, running on demo data");
    }
    let client = config
        .as_ref()
        .map(|c| ScheduleClient::new(c.base_url.clone()));
    let student_id = config
        .as_ref()
        .map(|c| c.student_id.clone())
        .unwrap_or_else(|| "me".to_string());

    let mut app = App::new(Local::now().date_naive());
    let (tx, mut rx) = mpsc::unbounded_channel();

    enable_raw_mode()?;

    loop {
        if app.needs_fetch && !app.loading {
            app.needs_fetch = false;
            app.loading = true;
            spawn_fetch(
                client.clone(),
                session.clone(),
                student_id.clone(),
                app.visible_range(),
                app.current_date,
                tx.clone(),
            );
        }

        while let Ok(outcome) = rx.try_recv() {
            match outcome {
                FetchOutcome::Remote(events) => app.apply_events(events, false),
                FetchOutcome::Fallback(events) => {
                    app.apply_events(events, true);
                    app.set_status("Schedule unavailable, showing demo data");
                }
            }
        }
        app.clear_expired_status();

        ui::render(&ui::RenderState {
            granularity: app.granularity,
            current_date: app.current_date,
            today: Local::now().date_naive(),
            week_start: app.week_start,
            events: &app.events,
            loading: app.loading,
            using_demo_data: app.using_demo_data,
            status_message: app.status_message.as_deref(),
            show_logs: app.show_logs,
        });

        // Wait for a key event, waking periodically to drain fetch results
        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key_event) = event::read()? {
                // Only handle key press events (not release)
                if key_event.kind == KeyEventKind::Press {
                    match key_event.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('h') | KeyCode::Left => app.prev(),
                        KeyCode::Char('l') | KeyCode::Right => app.next(),
                        KeyCode::Char('t') => app.goto_today(Local::now().date_naive()),
                        KeyCode::Char('y') => app.set_granularity(Granularity::Year),
                        KeyCode::Char('m') => app.set_granularity(Granularity::Month),
                        KeyCode::Char('w') => app.set_granularity(Granularity::Week),
                        KeyCode::Char('d') => app.set_granularity(Granularity::Day),
                        KeyCode::Char('r') => app.needs_fetch = true,
                        KeyCode::Char('L') => app.show_logs = !app.show_logs,
                        _ => {}
                    }
                }
            }
        }
    }

    // Cleanup: restore cursor, clear screen, disable raw mode
    disable_raw_mode()?;
    execute!(stdout(), cursor::Show, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    Ok(())
}
