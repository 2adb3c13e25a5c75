//! "Today" / "Tomorrow" reminders shown when the calendar opens.

use std::fmt;

use chrono::{Duration, NaiveDate, TimeZone};

use crate::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    Today,
    Tomorrow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub due: Due,
    pub title: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.due {
            Due::Today => write!(f, "Today: {}", self.title),
            Due::Tomorrow => write!(f, "Tomorrow: {}", self.title),
        }
    }
}

/// Alerts for events starting on `today` or the day after, in list order.
pub fn upcoming_alerts<Tz: TimeZone>(events: &[Event], today: NaiveDate, tz: &Tz) -> Vec<Alert> {
    let tomorrow = today + Duration::days(1);

    events
        .iter()
        .filter_map(|event| {
            let day = event.start.date_in(tz);
            let due = if day == today {
                Due::Today
            } else if day == tomorrow {
                Due::Tomorrow
            } else {
                return None;
            };
            Some(Alert {
                due,
                title: event.title.clone(),
            })
        })
        .collect()
}

/// Single-line banner text, e.g. `Today: Standup | Tomorrow: Dentist`.
pub fn join_alerts(alerts: &[Alert]) -> String {
    alerts
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Color;
    use crate::event::EventId;
    use chrono::Utc;

    fn event(title: &str, start: &str) -> Event {
        Event {
            id: EventId::new(title),
            title: title.into(),
            start: start.parse().unwrap(),
            end: None,
            all_day: None,
            background_color: Color::default(),
            border_color: None,
        }
    }

    #[test]
    fn picks_today_and_tomorrow_only() {
        let events = vec![
            event("Standup", "2025-03-20T09:00"),
            event("Yesterday", "2025-03-19"),
            event("Dentist", "2025-03-21T15:00"),
            event("Later", "2025-03-22"),
            event("Holiday", "2025-03-20"),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();

        let alerts = upcoming_alerts(&events, today, &Utc);
        assert_eq!(
            join_alerts(&alerts),
            "Today: Standup | Tomorrow: Dentist | Today: Holiday"
        );
    }

    #[test]
    fn nothing_upcoming_is_empty() {
        let events = vec![event("Later", "2025-04-01")];
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        assert!(upcoming_alerts(&events, today, &Utc).is_empty());
        assert_eq!(join_alerts(&[]), "");
    }
}
