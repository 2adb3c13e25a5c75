use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};
use dialoguer::Input;
use owo_colors::OwoColorize;
use planboard_core::format::local_clock_of;
use planboard_core::{Color, Event, EventForm, EventId};

use super::{Context, parse_date, parse_time};
use crate::utils::tui::prompt_optional;

/// Fields to change. With none given, every field is prompted for.
pub struct EditArgs {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub category: Option<Color>,
    /// `Some(true)` for --all-day, `Some(false)` for --timed
    pub all_day: Option<bool>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.end.is_none()
            && self.category.is_none()
            && self.all_day.is_none()
    }
}

pub async fn run(ctx: &Context, id: EventId, args: EditArgs) -> Result<()> {
    let mut session = ctx.open_session().await?;
    let event = session.find(&id)?.clone();
    let mut form = EventForm::from_event(&event, &Local);

    if args.is_empty() {
        prompt_all(&mut form, &event)?;
    } else {
        apply(&mut form, args);
    }

    session.save_form(&form).await?;
    println!("{}", format!("  Updated: {}", form.title.trim()).yellow());

    Ok(())
}

fn apply(form: &mut EventForm, args: EditArgs) {
    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(date) = args.date {
        form.date = Some(date);
    }
    if let Some(color) = args.category {
        form.color = color;
    }
    if let Some(all_day) = args.all_day {
        form.set_all_day(all_day);
    }
    if args.time.is_some() || args.end.is_some() {
        form.set_all_day(false);
    }
    if let Some(time) = args.time {
        form.time = Some(time);
    }
    if let Some(end) = args.end {
        form.end_time = Some(end);
    }
}

/// Walk through the form with the event's current values as defaults.
fn prompt_all(form: &mut EventForm, event: &Event) -> Result<()> {
    form.title = Input::<String>::new()
        .with_prompt("  Title")
        .default(form.title.clone())
        .interact_text()?;

    let current_date = form.date.map(|d| d.format("%Y-%m-%d").to_string());
    if let Some(date) = prompt_optional("  Date", current_date, parse_date)? {
        form.date = Some(date);
    }

    if form.all_day() {
        return Ok(());
    }

    let layout = form.layout();
    let current_time = local_clock_of(&event.start, &Local);
    form.time = prompt_optional(&format!("  {}", layout.start_label), current_time, parse_time)?;

    if layout.end_time_visible {
        let current_end = event.end.and_then(|end| local_clock_of(&end, &Local));
        form.end_time = prompt_optional("  End Time (skip)", current_end, parse_time)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn timed_event() -> Event {
        Event {
            id: EventId::new("8"),
            title: "Review".into(),
            start: "2025-03-20T14:00".parse().unwrap(),
            end: Some("2025-03-20T15:00".parse().unwrap()),
            all_day: Some(false),
            background_color: Color::default(),
            border_color: None,
        }
    }

    fn no_changes() -> EditArgs {
        EditArgs {
            title: None,
            date: None,
            time: None,
            end: None,
            category: None,
            all_day: None,
        }
    }

    #[test]
    fn empty_args_are_detected() {
        assert!(no_changes().is_empty());
    }

    #[test]
    fn switching_to_all_day_drops_times() {
        let mut form = EventForm::from_event(&timed_event(), &Utc);
        apply(&mut form, EditArgs {
            all_day: Some(true),
            ..no_changes()
        });

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.start.to_string(), "2025-03-20");
        assert!(payload.end.is_none());
    }

    #[test]
    fn new_end_before_start_becomes_overnight() {
        let mut form = EventForm::from_event(&timed_event(), &Utc);
        apply(&mut form, EditArgs {
            end: NaiveTime::from_hms_opt(1, 0, 0),
            ..no_changes()
        });

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.end.unwrap().to_string(), "2025-03-21T01:00");
    }
}
