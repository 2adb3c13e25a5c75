//! Display formatting for dates, times and event spans.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::PlanboardError;
use crate::event::{Event, EventTime};

/// How calendar dates are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    #[default]
    YearMonthDay,
    DayMonthYear,
    MonthDayYear,
}

impl DateFormat {
    pub const ALL: [DateFormat; 3] = [
        DateFormat::YearMonthDay,
        DateFormat::DayMonthYear,
        DateFormat::MonthDayYear,
    ];

    /// Stored preference value.
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFormat::YearMonthDay => "YYYY-MM-DD",
            DateFormat::DayMonthYear => "DD-MM-YYYY",
            DateFormat::MonthDayYear => "MM-DD-YYYY",
        }
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let pattern = match self {
            DateFormat::YearMonthDay => "%Y-%m-%d",
            DateFormat::DayMonthYear => "%d-%m-%Y",
            DateFormat::MonthDayYear => "%m-%d-%Y",
        };
        date.format(pattern).to_string()
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFormat {
    type Err = PlanboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| PlanboardError::Preference {
                key: "dateFormat".into(),
                value: s.to_string(),
            })
    }
}

/// 12-hour or 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl TimeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFormat::TwelveHour => "12",
            TimeFormat::TwentyFourHour => "24",
        }
    }

    /// Two-digit hour: `09:30 AM` or `09:30`.
    pub fn format_time(&self, time: NaiveTime) -> String {
        match self {
            TimeFormat::TwelveHour => time.format("%I:%M %p").to_string(),
            TimeFormat::TwentyFourHour => time.format("%H:%M").to_string(),
        }
    }

    /// Compact label for agenda rows: `9:30 AM` or `09:30`.
    pub fn format_slot_label(&self, time: NaiveTime) -> String {
        match self {
            TimeFormat::TwelveHour => time.format("%-I:%M %p").to_string(),
            TimeFormat::TwentyFourHour => time.format("%H:%M").to_string(),
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFormat {
    type Err = PlanboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "12" => Ok(TimeFormat::TwelveHour),
            "24" => Ok(TimeFormat::TwentyFourHour),
            _ => Err(PlanboardError::Preference {
                key: "timeFormat".into(),
                value: s.to_string(),
            }),
        }
    }
}

/// Calendar day of a start or end, written the way the viewer prefers.
pub fn format_display_date<Tz: TimeZone>(time: &EventTime, format: DateFormat, tz: &Tz) -> String {
    format.format(time.date_in(tz))
}

/// One-line description of when an event happens, as shown in its details.
///
/// - `20-03-2025 (All Day)`
/// - `20-03-2025 | 03:00 PM - 04:00 PM`
/// - `20-03-2025 at 03:00 PM`
pub fn describe_when<Tz: TimeZone>(
    event: &Event,
    date_format: DateFormat,
    time_format: TimeFormat,
    tz: &Tz,
) -> String {
    let date = format_display_date(&event.start, date_format, tz);

    if event.is_all_day() {
        return format!("{} (All Day)", date);
    }

    let start = time_format.format_time(event.start.naive_in(tz).time());
    match &event.end {
        Some(end) => {
            let end = time_format.format_time(end.naive_in(tz).time());
            format!("{} | {} - {}", date, start, end)
        }
        None => format!("{} at {}", date, start),
    }
}

/// `HH:MM` of an instant in the viewer's zone.
pub fn local_time_of<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).naive_local().format("%H:%M").to_string()
}

/// `HH:MM` of an event time as the viewer sees it, `None` for bare dates.
pub fn local_clock_of<Tz: TimeZone>(time: &EventTime, tz: &Tz) -> Option<String> {
    match time {
        EventTime::Date(_) => None,
        EventTime::Floating(dt) => Some(dt.format("%H:%M").to_string()),
        EventTime::Instant(dt) => Some(local_time_of(dt, tz)),
    }
}

/// End of a span that starts on `date` at `start`.
/// An end earlier in the day than the start belongs to the next day.
pub fn overnight_end(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> NaiveDateTime {
    if end < start {
        (date + Duration::days(1)).and_time(end)
    } else {
        date.and_time(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Color;
    use crate::event::EventId;
    use chrono::FixedOffset;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn event(start: &str, end: Option<&str>) -> Event {
        Event {
            id: EventId::new("3"),
            title: "Review".into(),
            start: start.parse().unwrap(),
            end: end.map(|e| e.parse().unwrap()),
            all_day: None,
            background_color: Color::default(),
            border_color: None,
        }
    }

    #[test]
    fn date_formats() {
        let cases = [
            (DateFormat::YearMonthDay, "2025-03-07"),
            (DateFormat::DayMonthYear, "07-03-2025"),
            (DateFormat::MonthDayYear, "03-07-2025"),
        ];
        for (format, expected) in cases {
            for iso in ["2025-03-07", "2025-03-07T10:30"] {
                let time: EventTime = iso.parse().unwrap();
                assert_eq!(format_display_date(&time, format, &Utc), expected);
            }
        }
    }

    #[test]
    fn date_format_parses_stored_values() {
        assert_eq!("DD-MM-YYYY".parse::<DateFormat>().unwrap(), DateFormat::DayMonthYear);
        assert!("DD/MM/YYYY".parse::<DateFormat>().is_err());
    }

    #[test]
    fn time_formats() {
        assert_eq!(TimeFormat::TwelveHour.format_time(hm(9, 5)), "09:05 AM");
        assert_eq!(TimeFormat::TwelveHour.format_time(hm(21, 30)), "09:30 PM");
        assert_eq!(TimeFormat::TwentyFourHour.format_time(hm(21, 30)), "21:30");
        assert_eq!(TimeFormat::TwelveHour.format_slot_label(hm(9, 5)), "9:05 AM");
    }

    #[test]
    fn describes_all_day_event() {
        let e = event("2025-03-20", None);
        assert_eq!(
            describe_when(&e, DateFormat::DayMonthYear, TimeFormat::TwelveHour, &Utc),
            "20-03-2025 (All Day)"
        );
    }

    #[test]
    fn describes_timed_span() {
        let e = event("2025-03-20T15:00", Some("2025-03-20T16:30"));
        assert_eq!(
            describe_when(&e, DateFormat::YearMonthDay, TimeFormat::TwentyFourHour, &Utc),
            "2025-03-20 | 15:00 - 16:30"
        );
    }

    #[test]
    fn describes_open_ended_event() {
        let e = event("2025-03-20T15:00", None);
        assert_eq!(
            describe_when(&e, DateFormat::MonthDayYear, TimeFormat::TwelveHour, &Utc),
            "03-20-2025 at 03:00 PM"
        );
    }

    #[test]
    fn local_time_applies_offset() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 20, 14, 0, 0).unwrap();
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(local_time_of(&instant, &minus_five), "09:00");
    }

    #[test]
    fn local_clock_of_each_shape() {
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let clock = |s: &str| local_clock_of(&s.parse().unwrap(), &minus_five);

        assert_eq!(clock("2025-03-20T14:00:00.000Z").as_deref(), Some("09:00"));
        assert_eq!(clock("2025-03-20T14:05:59").as_deref(), Some("14:05"));
        assert_eq!(clock("2025-03-20"), None);
    }

    #[test]
    fn end_before_start_rolls_to_next_day() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(
            overnight_end(date, hm(22, 0), hm(1, 0)),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().and_time(hm(1, 0))
        );
        assert_eq!(overnight_end(date, hm(9, 0), hm(9, 0)), date.and_time(hm(9, 0)));
    }
}
