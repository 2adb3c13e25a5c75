//! Event types as exchanged with the events API.
//!
//! The server stores start/end as plain strings, so `EventTime` keeps track
//! of which of the three shapes it came in as and writes it back the same way.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Timelike,
    Utc,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::category::Color;
use crate::error::{PlanboardError, PlanboardResult};

/// Minutes assumed for timed events the server returns without an end.
pub const DEFAULT_TIMED_MINUTES: i64 = 60;

/// Server-assigned event identifier.
///
/// The API hands out integers, but nothing here depends on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        EventId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId(s.to_string())
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => EventId(n.to_string()),
            RawId::Text(s) => EventId(s),
        })
    }
}

/// Start or end of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventTime {
    /// `YYYY-MM-DD`, no time of day
    Date(NaiveDate),
    /// `YYYY-MM-DDTHH:MM[:SS]` in the viewer's local time
    Floating(NaiveDateTime),
    /// RFC 3339 instant, e.g. `2025-03-20T14:00:00.000Z`
    Instant(DateTime<Utc>),
}

impl EventTime {
    pub fn parse(s: &str) -> PlanboardResult<Self> {
        s.parse()
    }

    pub fn is_date(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }

    /// Calendar day of this time as seen from `tz`.
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.naive_in(tz).date()
    }

    /// Wall-clock value as seen from `tz`. Dates map to midnight.
    pub fn naive_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDateTime {
        match self {
            EventTime::Date(d) => d.and_time(NaiveTime::MIN),
            EventTime::Floating(dt) => *dt,
            EventTime::Instant(dt) => dt.with_timezone(tz).naive_local(),
        }
    }

    /// Time of day as seen from `tz`, `None` for dates.
    pub fn time_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveTime> {
        match self {
            EventTime::Date(_) => None,
            _ => Some(self.naive_in(tz).time()),
        }
    }

    /// The same kind of time placed at wall-clock `wall` in `tz`.
    ///
    /// Instants are converted back through `tz`; a local time skipped by a
    /// DST gap falls back to shifting by the wall-clock difference.
    pub fn at_wall_clock<Tz: TimeZone>(&self, wall: NaiveDateTime, tz: &Tz) -> Self {
        match self {
            EventTime::Date(_) => EventTime::Date(wall.date()),
            EventTime::Floating(_) => EventTime::Floating(wall),
            EventTime::Instant(dt) => match tz.from_local_datetime(&wall).earliest() {
                Some(local) => EventTime::Instant(local.with_timezone(&Utc)),
                None => EventTime::Instant(*dt + (wall - self.naive_in(tz))),
            },
        }
    }

    /// Shift by `delta`. Dates move by whole days only.
    pub fn shifted(&self, delta: Duration) -> Self {
        match self {
            EventTime::Date(d) => EventTime::Date(*d + Duration::days(delta.num_days())),
            EventTime::Floating(dt) => EventTime::Floating(*dt + delta),
            EventTime::Instant(dt) => EventTime::Instant(*dt + delta),
        }
    }
}

impl FromStr for EventTime {
    type Err = PlanboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(EventTime::Date(date));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(EventTime::Instant(dt.with_timezone(&Utc)));
        }

        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(EventTime::Floating(dt));
            }
        }

        Err(PlanboardError::InvalidTime(s.to_string()))
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            EventTime::Floating(dt) if dt.second() == 0 && dt.nanosecond() == 0 => {
                write!(f, "{}", dt.format("%Y-%m-%dT%H:%M"))
            }
            EventTime::Floating(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            EventTime::Instant(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl TryFrom<String> for EventTime {
    type Error = PlanboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventTime> for String {
    fn from(value: EventTime) -> Self {
        value.to_string()
    }
}

/// A calendar event as returned by `GET /api/events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub start: EventTime,
    /// Exclusive end
    #[serde(default)]
    pub end: Option<EventTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
    #[serde(default)]
    pub background_color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

impl Event {
    /// All-day when the server says so, or when the start carries no time.
    pub fn is_all_day(&self) -> bool {
        self.all_day.unwrap_or_else(|| self.start.is_date())
    }

    pub fn is_deadline(&self) -> bool {
        self.background_color.is_deadline()
    }

    pub fn category(&self) -> &Color {
        &self.background_color
    }

    /// End as wall-clock time. Timed events without one last `default_timed`.
    pub fn effective_end<Tz: TimeZone>(&self, tz: &Tz, default_timed: Duration) -> NaiveDateTime {
        if let Some(end) = &self.end {
            return end.naive_in(tz);
        }

        let start = self.start.naive_in(tz);
        if self.is_all_day() {
            start + Duration::days(1)
        } else {
            start + default_timed
        }
    }

    /// Calendar days this event shows up on.
    ///
    /// Timed events whose end falls before `next_day_threshold` are not
    /// drawn on their end day, so a 22:00-01:00 party stays on one day.
    pub fn occupied_days<Tz: TimeZone>(
        &self,
        tz: &Tz,
        next_day_threshold: NaiveTime,
        default_timed: Duration,
    ) -> Vec<NaiveDate> {
        let first = self.start.date_in(tz);
        let end = self.effective_end(tz, default_timed);

        let last = if self.is_all_day() {
            // all-day ends are exclusive dates
            end.date().pred_opt().unwrap_or(first)
        } else if end.date() > first && end.time() < next_day_threshold {
            end.date().pred_opt().unwrap_or(first)
        } else {
            end.date()
        };

        first
            .iter_days()
            .take_while(|day| *day <= last.max(first))
            .collect()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
