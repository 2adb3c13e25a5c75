//! Terminal rendering for planboard types.
//!
//! Colors follow the saved theme; category colors are drawn in truecolor.

use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;
use planboard_core::category::Color;
use planboard_core::format::describe_when;
use planboard_core::prefs::{Preferences, Theme};
use planboard_core::view::{CalendarOptions, DEADLINE_CLASS};
use planboard_core::Event;

/// Colors for headings and secondary text, per theme.
#[derive(Clone, Copy)]
pub struct Palette {
    theme: Theme,
}

impl Palette {
    pub fn new(theme: Theme) -> Self {
        Palette { theme }
    }

    pub fn heading(&self, text: &str) -> String {
        match self.theme {
            Theme::Light => text.bold().to_string(),
            Theme::Dark => text.bright_white().bold().to_string(),
        }
    }

    pub fn muted(&self, text: &str) -> String {
        match self.theme {
            Theme::Light => text.dimmed().to_string(),
            Theme::Dark => text.bright_black().to_string(),
        }
    }
}

/// A colored dot for the event's category.
pub fn category_dot(color: &Color) -> String {
    match color.rgb() {
        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
        None => "●".to_string(),
    }
}

/// Day heading: "Today", "Tomorrow", or e.g. "Thu 20-03-2025".
pub fn day_label(day: NaiveDate, today: NaiveDate, prefs: &Preferences) -> String {
    match (day - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => format!("{} {}", day.format("%a"), prefs.date_format.format(day)),
    }
}

/// Time column for an agenda row (e.g. "9:30 AM", "all-day", "due 5:00 PM").
pub fn agenda_time(event: &Event, day: NaiveDate, options: &CalendarOptions) -> String {
    if event.is_all_day() {
        return "all-day".to_string();
    }

    let start = event.start.naive_in(&Local);
    if start.date() != day {
        return "...".to_string();
    }

    let label = options.time_format.format_slot_label(start.time());
    if options.event_class_names(event).contains(&DEADLINE_CLASS) {
        format!("due {}", label)
    } else {
        label
    }
}

/// One agenda row.
pub fn agenda_line(
    event: &Event,
    day: NaiveDate,
    options: &CalendarOptions,
    palette: Palette,
) -> String {
    let time = format!("{:>12}", agenda_time(event, day, options));
    let title = if event.is_deadline() {
        event.title.red().bold().to_string()
    } else {
        event.title.clone()
    };
    let id = format!("#{}", event.id);

    format!(
        "  {} {} {} {}",
        time,
        category_dot(event.category()),
        title,
        palette.muted(&id)
    )
}

/// Multi-line details block for a single event.
pub fn event_details(event: &Event, prefs: &Preferences, palette: Palette) -> String {
    let when = describe_when(event, prefs.date_format, prefs.time_format, &Local);

    let mut lines = vec![
        palette.heading(&event.title),
        format!("  {}", when),
        format!("  {} {}", category_dot(event.category()), event.category()),
    ];
    if event.is_deadline() {
        lines.push(format!("  {}", "Deadline".red()));
    }
    lines.push(palette.muted(&format!("  id {}", event.id)));

    lines.join("\n")
}
