//! Event — something users can browse, favorite, and register for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{MeetralError, ValidationError};
use crate::id::{EventId, UserId};
use crate::time::Timestamp;

/// A community event.
///
/// `registered`, `capacity`, and `favorites_count` are non-negative by
/// construction; the storage adapter coerces malformed rows before they
/// reach this type. `favorites_count` is precomputed by the store — the
/// domain never counts favorites itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub place: String,
    /// Calendar date the event occurs on (no start time is tracked).
    pub date: NaiveDate,
    pub capacity: u32,
    pub registered: u32,
    pub favorites_count: u32,
    pub organizer_id: Option<UserId>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

impl Event {
    /// Create a builder for constructing an [`Event`].
    #[must_use]
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MeetralError::Validation`] when `title` is empty, or when
    /// `registered` exceeds a non-zero `capacity`.
    pub fn validate(&self) -> Result<(), MeetralError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if self.capacity > 0 && self.registered > self.capacity {
            return Err(ValidationError::OverCapacity.into());
        }
        Ok(())
    }

    /// Capacity used for the fullness check.
    ///
    /// A zero capacity is treated as capacity 1 here, so a zero-capacity
    /// event with no registrations stays offerable while any registration
    /// marks it full. This mirrors the historic behavior of the ranking
    /// endpoint and is deliberately not "fixed".
    #[must_use]
    pub fn effective_capacity(&self) -> u32 {
        if self.capacity == 0 { 1 } else { self.capacity }
    }

    /// Whether the event can no longer accept registrations.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.registered >= self.effective_capacity()
    }

    /// Start of the event's calendar date as a UTC instant.
    ///
    /// Events carry no start time, so ranking treats them as starting at
    /// midnight UTC on their date.
    #[must_use]
    pub fn starts_at(&self) -> Timestamp {
        self.date
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc()
    }
}

/// Step-by-step builder for [`Event`].
#[derive(Debug, Default)]
pub struct EventBuilder {
    id: Option<EventId>,
    title: Option<String>,
    description: Option<String>,
    place: Option<String>,
    date: Option<NaiveDate>,
    capacity: Option<u32>,
    registered: Option<u32>,
    favorites_count: Option<u32>,
    organizer_id: Option<UserId>,
    image_url: Option<String>,
    created_at: Option<Timestamp>,
}

impl EventBuilder {
    #[must_use]
    pub fn id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn place(mut self, place: impl Into<String>) -> Self {
        self.place = Some(place.into());
        self
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    #[must_use]
    pub fn registered(mut self, registered: u32) -> Self {
        self.registered = Some(registered);
        self
    }

    #[must_use]
    pub fn favorites_count(mut self, favorites_count: u32) -> Self {
        self.favorites_count = Some(favorites_count);
        self
    }

    #[must_use]
    pub fn organizer_id(mut self, organizer_id: UserId) -> Self {
        self.organizer_id = Some(organizer_id);
        self
    }

    #[must_use]
    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return an [`Event`].
    ///
    /// # Errors
    ///
    /// Returns [`MeetralError::Validation`] if invariants fail.
    pub fn build(self) -> Result<Event, MeetralError> {
        let event = Event {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            place: self.place.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            capacity: self.capacity.unwrap_or_default(),
            registered: self.registered.unwrap_or_default(),
            favorites_count: self.favorites_count.unwrap_or_default(),
            organizer_id: self.organizer_id,
            image_url: self.image_url,
            created_at: self.created_at.unwrap_or_else(crate::time::now),
        };
        event.validate()?;
        Ok(event)
    }
}
