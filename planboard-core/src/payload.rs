//! Request bodies for the events API.

use chrono::{Duration, TimeZone};
use serde::Serialize;

use crate::category::Color;
use crate::event::{Event, EventTime};

/// Full body for `POST /api/events` and form edits via `PUT /api/events/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    pub start: EventTime,
    /// Sent as `null` when absent
    pub end: Option<EventTime>,
    pub background_color: Color,
}

/// Partial body for `PUT /api/events/{id}`. Absent fields are left alone
/// by the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventTime>,
    /// `Some(None)` clears the end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Option<EventTime>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
}

impl From<&EventPayload> for EventUpdate {
    fn from(payload: &EventPayload) -> Self {
        EventUpdate {
            title: Some(payload.title.clone()),
            start: Some(payload.start),
            end: Some(payload.end),
            background_color: Some(payload.background_color.clone()),
        }
    }
}

/// Rescheduling an event without opening the form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventMove {
    /// Shift start and end by a duration
    By(Duration),
    /// Move the start here. A bare date keeps the event's time of day.
    To(EventTime),
}

impl EventMove {
    /// The update to send for `event`.
    ///
    /// Timed events keep their length. All-day events are sent as a bare
    /// start date with a cleared end.
    pub fn update_for<Tz: TimeZone>(&self, event: &Event, tz: &Tz) -> EventUpdate {
        let start = event.start;

        let (new_start, new_end) = match self {
            EventMove::By(delta) => (start.shifted(*delta), event.end.map(|end| end.shifted(*delta))),
            EventMove::To(target) => {
                let old_wall = start.naive_in(tz);
                let new_wall = match target {
                    EventTime::Date(date) => date.and_time(old_wall.time()),
                    other => other.naive_in(tz),
                };
                let new_start = match target {
                    EventTime::Date(_) => start.at_wall_clock(new_wall, tz),
                    other => *other,
                };

                // the end moves by the same wall-clock amount, so DST changes
                // in between don't stretch the event
                let delta = new_wall - old_wall;
                let new_end = event
                    .end
                    .map(|end| end.at_wall_clock(end.naive_in(tz) + delta, tz));
                (new_start, new_end)
            }
        };

        if event.is_all_day() {
            return EventUpdate {
                start: Some(EventTime::Date(new_start.date_in(tz))),
                end: Some(None),
                ..Default::default()
            };
        }

        EventUpdate {
            start: Some(new_start),
            end: new_end.map(Some),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;
    use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Utc};
    use serde_json::json;

    fn event(start: &str, end: Option<&str>, all_day: Option<bool>) -> Event {
        Event {
            id: EventId::new("12"),
            title: "Offsite".into(),
            start: start.parse().unwrap(),
            end: end.map(|e| e.parse().unwrap()),
            all_day,
            background_color: Color::default(),
            border_color: None,
        }
    }

    #[test]
    fn payload_sends_null_end() {
        let payload = EventPayload {
            title: "Holiday".into(),
            start: "2025-12-25".parse().unwrap(),
            end: None,
            background_color: Color::default(),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "title": "Holiday",
                "start": "2025-12-25",
                "end": null,
                "backgroundColor": "#3788d8"
            })
        );
    }

    #[test]
    fn moving_timed_event_keeps_duration() {
        let e = event("2025-03-20T15:00", Some("2025-03-20T16:30"), None);
        let update = EventMove::By(Duration::days(2)).update_for(&e, &Utc);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"start": "2025-03-22T15:00", "end": "2025-03-22T16:30"})
        );
    }

    #[test]
    fn moving_to_a_date_keeps_time_of_day() {
        let e = event("2025-03-20T15:00", Some("2025-03-20T16:00"), None);
        let update = EventMove::To("2025-03-18".parse().unwrap()).update_for(&e, &Utc);
        assert_eq!(update.start, Some("2025-03-18T15:00".parse().unwrap()));
        assert_eq!(update.end, Some(Some("2025-03-18T16:00".parse().unwrap())));
    }

    /// +01:00 until 2025-03-30 01:00 UTC, +02:00 after, with the usual
    /// 02:00-03:00 local gap.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn switch_utc() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2025, 3, 30).unwrap().and_hms_opt(1, 0, 0).unwrap()
        }

        fn winter() -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }

        fn summer() -> FixedOffset {
            FixedOffset::east_opt(2 * 3600).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = Self::switch_utc() + Duration::hours(1);
            if *local < gap_start {
                LocalResult::Single(Self::winter())
            } else if *local < gap_start + Duration::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::summer())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch_utc() {
                Self::winter()
            } else {
                Self::summer()
            }
        }
    }

    #[test]
    fn moving_instant_across_dst_keeps_local_time() {
        // 10:00-11:00 local on Friday 28 March
        let e = event("2025-03-28T09:00:00.000Z", Some("2025-03-28T10:00:00.000Z"), None);
        let update = EventMove::To("2025-03-31".parse().unwrap()).update_for(&e, &SpringForward);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"start": "2025-03-31T08:00:00.000Z", "end": "2025-03-31T09:00:00.000Z"})
        );
    }

    #[test]
    fn shifting_instant_by_duration_is_exact() {
        let e = event("2025-03-28T09:00:00.000Z", Some("2025-03-28T10:00:00.000Z"), None);
        let update = EventMove::By(Duration::days(3)).update_for(&e, &SpringForward);
        assert_eq!(update.start, Some("2025-03-31T09:00:00.000Z".parse().unwrap()));
    }

    #[test]
    fn moving_open_ended_event_omits_end() {
        let e = event("2025-03-20T15:00", None, None);
        let update = EventMove::To("2025-03-20T17:15".parse().unwrap()).update_for(&e, &Utc);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"start": "2025-03-20T17:15"})
        );
    }

    #[test]
    fn moving_all_day_event_sends_date_and_null_end() {
        let e = event("2025-03-20", Some("2025-03-22"), Some(true));
        let update = EventMove::By(Duration::days(1)).update_for(&e, &Utc);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"start": "2025-03-21", "end": null})
        );
    }

    #[test]
    fn form_payload_converts_to_full_update() {
        let payload = EventPayload {
            title: "Call".into(),
            start: "2025-03-20T09:00".parse().unwrap(),
            end: None,
            background_color: Color::deadline(),
        };
        let update = EventUpdate::from(&payload);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::to_value(&payload).unwrap()
        );
    }
}
