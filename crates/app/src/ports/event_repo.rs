//! Event repository port — persistence for events.

use std::future::Future;

use chrono::NaiveDate;

use meetral_domain::error::MeetralError;
use meetral_domain::event::Event;
use meetral_domain::id::EventId;

/// Repository for persisting and querying [`Event`]s.
///
/// Every returned event carries a `favorites_count` precomputed by the
/// store; the application layer never counts favorites itself.
pub trait EventRepository {
    /// Persist a new event.
    fn create(&self, event: Event) -> impl Future<Output = Result<Event, MeetralError>> + Send;

    /// Get an event by its unique identifier.
    fn get_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, MeetralError>> + Send;

    /// List all events, ordered by date ascending.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Event>, MeetralError>> + Send;

    /// List events dated on or after `since`, through any future date.
    ///
    /// This is the candidate set for feed ranking; the caller passes
    /// `now - 30 days`.
    fn list_window(
        &self,
        since: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Event>, MeetralError>> + Send;

    /// Update an existing event.
    fn update(&self, event: Event) -> impl Future<Output = Result<Event, MeetralError>> + Send;

    /// Delete an event by id.
    fn delete(&self, id: EventId) -> impl Future<Output = Result<(), MeetralError>> + Send;
}
