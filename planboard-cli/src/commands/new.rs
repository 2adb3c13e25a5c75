use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use dialoguer::Input;
use owo_colors::OwoColorize;
use planboard_core::{Color, DateClick, EventForm};

use super::{Context, parse_date, parse_time};
use crate::utils::tui::{prompt_optional, prompt_with_retry};

/// Values given on the command line; anything missing is asked for.
pub struct NewArgs {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub at: Option<DateClick>,
    pub time: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub category: Option<Color>,
    pub all_day: bool,
}

pub async fn run(ctx: &Context, args: NewArgs) -> Result<()> {
    let mut form = build_form(&args);
    let interactive = args.title.is_none() || form.date.is_none();

    // --- Title ---
    if let Some(title) = args.title {
        form.title = title;
    } else {
        form.title = Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?;
    }

    // --- Date ---
    if form.date.is_none() {
        form.date = Some(prompt_with_retry("  Date (YYYY-MM-DD)", parse_date)?);
    }

    // --- Times ---
    if interactive && !form.all_day() {
        let layout = form.layout();
        if form.time.is_none() {
            form.time = Some(prompt_with_retry(&format!("  {}", layout.start_label), parse_time)?);
        }
        if layout.end_time_visible && form.end_time.is_none() {
            form.end_time = prompt_optional("  End Time (skip)", None, parse_time)?;
        }
    }

    let mut session = ctx.open_session().await?;
    session.save_form(&form).await?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", form.title.trim()).green());

    Ok(())
}

/// Start from a clicked day/slot if given, then apply the explicit flags.
fn build_form(args: &NewArgs) -> EventForm {
    let mut form = match args.at {
        Some(click) => EventForm::from_date_click(click),
        None => EventForm::new(),
    };

    if let Some(date) = args.date {
        form.date = Some(date);
    }
    if let Some(color) = &args.category {
        form.color = color.clone();
    }
    if args.time.is_some() || args.end.is_some() {
        form.set_all_day(false);
    }
    if args.all_day {
        form.set_all_day(true);
    }
    if let Some(time) = args.time {
        form.time = Some(time);
    }
    if let Some(end) = args.end {
        form.end_time = Some(end);
    }

    form
}
