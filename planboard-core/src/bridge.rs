//! Bridge between calendar interactions and the events API.
//!
//! `CalendarSession` keeps a local copy of the server's events. The copy
//! is never patched by hand: every change goes to the server first and the
//! list is fetched again afterwards.

use std::future::Future;

use chrono::{NaiveDate, TimeZone};

use crate::error::{PlanboardError, PlanboardResult};
use crate::event::{Event, EventId};
use crate::form::{EventForm, FormSubmission};
use crate::payload::{EventMove, EventPayload, EventUpdate};
use crate::view::{CalendarOptions, DateSpan};

/// The remote events resource.
pub trait EventsApi {
    /// `GET /api/events`
    fn list_events(&self) -> impl Future<Output = PlanboardResult<Vec<Event>>> + Send;

    /// `POST /api/events`
    fn create_event(
        &self,
        payload: &EventPayload,
    ) -> impl Future<Output = PlanboardResult<()>> + Send;

    /// `PUT /api/events/{id}`
    fn update_event(
        &self,
        id: &EventId,
        update: &EventUpdate,
    ) -> impl Future<Output = PlanboardResult<()>> + Send;

    /// `DELETE /api/events/{id}`
    fn delete_event(&self, id: &EventId) -> impl Future<Output = PlanboardResult<()>> + Send;
}

pub struct CalendarSession<A> {
    api: A,
    events: Vec<Event>,
}

impl<A: EventsApi> CalendarSession<A> {
    /// A session with nothing fetched yet.
    pub fn new(api: A) -> Self {
        CalendarSession {
            api,
            events: Vec::new(),
        }
    }

    /// A session with the event list already fetched.
    pub async fn open(api: A) -> PlanboardResult<Self> {
        let mut session = Self::new(api);
        session.refresh().await?;
        Ok(session)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub async fn refresh(&mut self) -> PlanboardResult<&[Event]> {
        self.events = self.api.list_events().await?;
        log::debug!("Fetched {} events", self.events.len());
        Ok(&self.events)
    }

    pub fn find(&self, id: &EventId) -> PlanboardResult<&Event> {
        self.events
            .iter()
            .find(|e| &e.id == id)
            .ok_or_else(|| PlanboardError::EventNotFound(id.clone()))
    }

    /// `(day, event)` pairs for every day in `span` an event shows up on,
    /// by day, then all-day before timed, then start time.
    pub fn agenda<Tz: TimeZone>(
        &self,
        span: DateSpan,
        tz: &Tz,
        options: &CalendarOptions,
    ) -> Vec<(NaiveDate, &Event)> {
        let threshold = options.next_day_threshold;
        let default_timed = options.default_timed_duration;
        let mut entries: Vec<(NaiveDate, &Event)> = self
            .events
            .iter()
            .flat_map(move |event| {
                event
                    .occupied_days(tz, threshold, default_timed)
                    .into_iter()
                    .filter(move |day| span.contains(*day))
                    .map(move |day| (day, event))
            })
            .collect();

        entries.sort_by_key(|(day, event)| (*day, !event.is_all_day(), event.start.naive_in(tz)));
        entries
    }

    /// Save the add/edit form, then refetch.
    pub async fn save_form(&mut self, form: &EventForm) -> PlanboardResult<FormSubmission> {
        let submission = form.submit()?;

        match &submission {
            FormSubmission::Create(payload) => {
                log::debug!("Creating event '{}'", payload.title);
                self.api.create_event(payload).await?;
            }
            FormSubmission::Update(id, payload) => {
                log::debug!("Updating event {}", id);
                self.api.update_event(id, &EventUpdate::from(payload)).await?;
            }
        }

        self.refresh().await?;
        Ok(submission)
    }

    /// Reschedule a cached event, then refetch.
    pub async fn move_event<Tz: TimeZone>(
        &mut self,
        id: &EventId,
        movement: EventMove,
        tz: &Tz,
    ) -> PlanboardResult<EventUpdate> {
        let update = movement.update_for(self.find(id)?, tz);

        log::debug!("Moving event {}", id);
        self.api.update_event(id, &update).await?;

        self.refresh().await?;
        Ok(update)
    }

    /// Delete on the server, then drop it from the local list.
    pub async fn delete_event(&mut self, id: &EventId) -> PlanboardResult<Event> {
        let event = self.find(id)?.clone();

        log::debug!("Deleting event {}", id);
        self.api.delete_event(id).await?;

        self.events.retain(|e| &e.id != id);
        Ok(event)
    }
}
