//! Calendar view modes and the options the calendar is drawn with.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

use crate::error::PlanboardError;
use crate::event::{DEFAULT_TIMED_MINUTES, Event};
use crate::format::TimeFormat;
use crate::prefs::Preferences;

/// CSS-ish class attached to deadline events.
pub const DEADLINE_CLASS: &str = "deadline-event";

/// Ends before this time of day don't spill the event onto its end day.
pub fn next_day_threshold() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarView {
    #[default]
    DayGridMonth,
    TimeGridWeek,
    ListWeek,
}

impl CalendarView {
    pub const ALL: [CalendarView; 3] = [
        CalendarView::DayGridMonth,
        CalendarView::TimeGridWeek,
        CalendarView::ListWeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarView::DayGridMonth => "dayGridMonth",
            CalendarView::TimeGridWeek => "timeGridWeek",
            CalendarView::ListWeek => "listWeek",
        }
    }

    fn short_name(&self) -> &'static str {
        match self {
            CalendarView::DayGridMonth => "month",
            CalendarView::TimeGridWeek => "week",
            CalendarView::ListWeek => "list",
        }
    }

    /// Days covered when the view is anchored on `anchor`.
    ///
    /// The month grid is padded out to whole weeks.
    pub fn visible_range(&self, anchor: NaiveDate, week_start: WeekStart) -> DateSpan {
        match self {
            CalendarView::DayGridMonth => {
                let first = anchor.with_day(1).unwrap_or(anchor);
                let next_month = first
                    .checked_add_months(chrono::Months::new(1))
                    .unwrap_or(first + Duration::days(31));
                let last = next_month - Duration::days(1);

                DateSpan {
                    start: week_start.week_containing(first),
                    end: week_start.week_containing(last) + Duration::days(7),
                }
            }
            CalendarView::TimeGridWeek | CalendarView::ListWeek => {
                let start = week_start.week_containing(anchor);
                DateSpan {
                    start,
                    end: start + Duration::days(7),
                }
            }
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarView {
    type Err = PlanboardError;

    /// Accepts the stored names (`timeGridWeek`) and the short ones (`week`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalendarView::ALL
            .into_iter()
            .find(|v| v.as_str() == s || v.short_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PlanboardError::Preference {
                key: "currentView".into(),
                value: s.to_string(),
            })
    }
}

/// First day of the week. Stored as `0` (Sunday) through `6` (Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekStart(pub Weekday);

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart(Weekday::Sun)
    }
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        self.0
    }

    /// First day of the week that contains `date`.
    pub fn week_containing(&self, date: NaiveDate) -> NaiveDate {
        let offset = (7 + date.weekday().num_days_from_sunday()
            - self.0.num_days_from_sunday())
            % 7;
        date - Duration::days(offset as i64)
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.num_days_from_sunday())
    }
}

impl FromStr for WeekStart {
    type Err = PlanboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlanboardError::Preference {
            key: "weekStart".into(),
            value: s.to_string(),
        };

        let weekday = match s.trim().parse::<u8>().map_err(|_| invalid())? {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => return Err(invalid()),
        };
        Ok(WeekStart(weekday))
    }
}

/// Half-open range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    /// Exclusive
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d < self.end)
    }
}

/// Settings the calendar is drawn with, derived from user preferences.
#[derive(Debug, Clone)]
pub struct CalendarOptions {
    pub initial_view: CalendarView,
    pub first_day: WeekStart,
    pub time_format: TimeFormat,
    pub next_day_threshold: NaiveTime,
    pub default_timed_duration: Duration,
}

impl CalendarOptions {
    pub fn from_prefs(prefs: &Preferences) -> Self {
        CalendarOptions {
            initial_view: prefs.current_view,
            first_day: prefs.week_start,
            time_format: prefs.time_format,
            next_day_threshold: next_day_threshold(),
            default_timed_duration: Duration::minutes(DEFAULT_TIMED_MINUTES),
        }
    }

    /// Style classes for an event.
    pub fn event_class_names(&self, event: &Event) -> Vec<&'static str> {
        if event.is_deadline() {
            vec![DEADLINE_CLASS]
        } else {
            Vec::new()
        }
    }
}
