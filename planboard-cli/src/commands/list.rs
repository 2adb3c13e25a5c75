use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use owo_colors::OwoColorize;
use planboard_core::upcoming::{join_alerts, upcoming_alerts};
use planboard_core::view::{CalendarOptions, CalendarView};

use super::Context;
use crate::render::{agenda_line, day_label};

pub async fn run(ctx: &mut Context, view: Option<CalendarView>, date: Option<NaiveDate>) -> Result<()> {
    // Switching views is remembered for next time
    if let Some(view) = view {
        ctx.prefs.record_view(view, &mut ctx.store)?;
    }

    let options = CalendarOptions::from_prefs(&ctx.prefs);
    let palette = ctx.palette();
    let today = Local::now().date_naive();
    let span = options
        .initial_view
        .visible_range(date.unwrap_or(today), options.first_day);

    let session = ctx.open_session().await?;

    let alerts = upcoming_alerts(session.events(), today, &Local);
    if !alerts.is_empty() {
        println!("{}", join_alerts(&alerts).yellow());
        println!();
    }

    let last = span.end - Duration::days(1);
    println!(
        "{}",
        palette.muted(&format!(
            "{}  {} - {}",
            options.initial_view,
            ctx.prefs.date_format.format(span.start),
            ctx.prefs.date_format.format(last)
        ))
    );

    let entries = session.agenda(span, &Local, &options);
    if entries.is_empty() {
        println!("{}", palette.muted("No events found"));
        return Ok(());
    }

    // Group events by day and print
    let mut current_day: Option<NaiveDate> = None;

    for (day, event) in entries {
        if current_day != Some(day) {
            println!();
            println!("{}", palette.heading(&day_label(day, today, &ctx.prefs)));
            current_day = Some(day);
        }

        println!("{}", agenda_line(event, day, &options, palette));
    }

    Ok(())
}
