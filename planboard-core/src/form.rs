//! The add/edit event form.
//!
//! Holds what the user typed, decides which inputs apply, and turns a
//! filled-in form into a request body.

use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use thiserror::Error;

use crate::category::Color;
use crate::error::PlanboardError;
use crate::event::{Event, EventId, EventTime};
use crate::format::overnight_end;
use crate::payload::EventPayload;

/// Missing input. The message is what the user is shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter a title and date.")]
    MissingTitleOrDate,

    #[error("Please select a time.")]
    MissingTime,
}

/// Where a new event was started from: a whole day, or a time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateClick {
    Day(NaiveDate),
    Slot(NaiveDateTime),
}

impl FromStr for DateClick {
    type Err = PlanboardError;

    /// `2025-03-20` or `2025-03-20T10:30[...]`; anything after `HH:MM`
    /// (seconds, offset) is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlanboardError::InvalidTime(s.to_string());

        match s.trim().split_once('T') {
            None => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(DateClick::Day)
                .map_err(|_| invalid()),
            Some((date, time)) => {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
                let time = time.get(..5).ok_or_else(invalid)?;
                let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| invalid())?;
                Ok(DateClick::Slot(date.and_time(time)))
            }
        }
    }
}

/// Which inputs are shown and how they are labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    pub heading: &'static str,
    pub time_inputs_visible: bool,
    pub end_time_visible: bool,
    pub start_label: &'static str,
}

/// What saving the form does.
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    /// `POST /api/events`
    Create(EventPayload),
    /// `PUT /api/events/{id}`
    Update(EventId, EventPayload),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    /// Set when editing an existing event
    pub id: Option<EventId>,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub color: Color,
    all_day: bool,
}

impl Default for EventForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EventForm {
    /// A blank "Add New Event" form. New events start out all-day.
    pub fn new() -> Self {
        EventForm {
            id: None,
            title: String::new(),
            date: None,
            time: None,
            end_time: None,
            color: Color::default(),
            all_day: true,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Pre-fill for a click on an empty day or time slot. Slots get a
    /// one-hour default, wrapping past midnight.
    pub fn from_date_click(click: DateClick) -> Self {
        let mut form = Self::new();

        match click {
            DateClick::Day(date) => {
                form.date = Some(date);
            }
            DateClick::Slot(at) => {
                let start = truncate_to_minute(at.time());
                form.date = Some(at.date());
                form.set_all_day(false);
                form.time = Some(start);
                form.end_time =
                    NaiveTime::from_hms_opt((start.hour() + 1) % 24, start.minute(), 0);
            }
        }

        form
    }

    /// Pre-fill for editing `event`, with times shown in `tz`.
    pub fn from_event<Tz: TimeZone>(event: &Event, tz: &Tz) -> Self {
        let mut form = Self::new();
        form.id = Some(event.id.clone());
        form.title = event.title.clone();
        form.color = event.background_color.clone();
        form.date = Some(event.start.date_in(tz));

        if !event.is_all_day() {
            form.set_all_day(false);
            form.time = event.start.time_in(tz).map(truncate_to_minute);
            form.end_time = event
                .end
                .and_then(|end| end.time_in(tz))
                .map(truncate_to_minute);
        }

        form
    }

    pub fn all_day(&self) -> bool {
        self.all_day
    }

    /// Toggle "all day". Turning it on clears both times.
    pub fn set_all_day(&mut self, all_day: bool) {
        self.all_day = all_day;
        if all_day {
            self.time = None;
            self.end_time = None;
        }
    }

    pub fn is_deadline(&self) -> bool {
        self.color.is_deadline()
    }

    pub fn layout(&self) -> FormLayout {
        FormLayout {
            heading: if self.id.is_some() {
                "Edit Event"
            } else {
                "Add New Event"
            },
            time_inputs_visible: !self.all_day,
            end_time_visible: !self.is_deadline(),
            start_label: if self.is_deadline() {
                "Due Time"
            } else {
                "Start Time"
            },
        }
    }

    /// Validate and build the request body.
    ///
    /// Deadlines get a one-second span and ignore any end time. An end time
    /// earlier than the start is taken to be on the next day.
    pub fn to_payload(&self) -> Result<EventPayload, FormError> {
        let title = self.title.trim();
        let date = match self.date {
            Some(date) if !title.is_empty() => date,
            _ => return Err(FormError::MissingTitleOrDate),
        };

        let (start, end) = if self.all_day {
            (EventTime::Date(date), None)
        } else {
            let time = truncate_to_minute(self.time.ok_or(FormError::MissingTime)?);
            let start = date.and_time(time);

            let end = if self.is_deadline() {
                Some(start + Duration::seconds(1))
            } else {
                self.end_time
                    .map(|end| overnight_end(date, time, truncate_to_minute(end)))
            };

            (EventTime::Floating(start), end.map(EventTime::Floating))
        };

        Ok(EventPayload {
            title: title.to_string(),
            start,
            end,
            background_color: self.color.clone(),
        })
    }

    /// Create or update, depending on whether the form has an id.
    pub fn submit(&self) -> Result<FormSubmission, FormError> {
        let payload = self.to_payload()?;
        Ok(match &self.id {
            Some(id) => FormSubmission::Update(id.clone(), payload),
            None => FormSubmission::Create(payload),
        })
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
