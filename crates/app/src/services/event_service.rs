//! Event service — use-cases for browsing and managing events.

use meetral_domain::error::{MeetralError, NotFoundError, ValidationError};
use meetral_domain::event::Event;
use meetral_domain::id::{EventId, UserId};

use crate::cache::{CacheStore, TtlCache};
use crate::ports::{Clock, EventRepository, FavoritesRepository};

/// Application service for event CRUD, registration, and favorites.
///
/// Every write clears the whole feed-cache namespace: counts and rankings
/// change with each registration or favorite, and the pages are cheap to
/// recompute.
pub struct EventService<ER, FR, S, C> {
    repo: ER,
    favorites: FR,
    cache: TtlCache<S, C>,
}

impl<ER, FR, S, C> EventService<ER, FR, S, C>
where
    ER: EventRepository,
    FR: FavoritesRepository,
    S: CacheStore,
    C: Clock,
{
    /// Create a new service backed by the given repositories.
    ///
    /// Pass the same store the feed service uses so writes invalidate
    /// cached feed pages.
    pub fn new(repo: ER, favorites: FR, store: S, clock: C) -> Self {
        Self {
            repo,
            favorites,
            cache: TtlCache::new(store, clock),
        }
    }

    /// List all events, ordered by date ascending.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_events(&self) -> Result<Vec<Event>, MeetralError> {
        self.repo.get_all().await
    }

    /// Look up an event by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`MeetralError::NotFound`] when no event with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_event(&self, id: EventId) -> Result<Event, MeetralError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Event",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Create a new event after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MeetralError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    pub async fn create_event(&self, event: Event) -> Result<Event, MeetralError> {
        event.validate()?;
        let created = self.repo.create(event).await?;
        self.cache.clear(None);
        Ok(created)
    }

    /// Register one attendee for an event.
    ///
    /// # Errors
    ///
    /// Returns [`MeetralError::NotFound`] when the event does not exist,
    /// [`MeetralError::Validation`] when it is already full, or a storage
    /// error from the repository.
    pub async fn register(&self, id: EventId) -> Result<Event, MeetralError> {
        let mut event = self.get_event(id).await?;
        if event.is_full() {
            return Err(ValidationError::EventFull.into());
        }
        event.registered += 1;
        let updated = self.repo.update(event).await?;
        self.cache.clear(None);
        Ok(updated)
    }

    /// Record that `user` favorited `event`.
    ///
    /// # Errors
    ///
    /// Returns [`MeetralError::NotFound`] when the event does not exist,
    /// or a storage error from the repository.
    pub async fn add_favorite(&self, user: UserId, event: EventId) -> Result<(), MeetralError> {
        // Reject favorites on unknown events before touching storage.
        self.get_event(event).await?;
        self.favorites.add(user, event).await?;
        self.cache.clear(None);
        Ok(())
    }

    /// Remove `user`'s favorite for `event`, if present.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn remove_favorite(&self, user: UserId, event: EventId) -> Result<(), MeetralError> {
        self.favorites.remove(user, event).await?;
        self.cache.clear(None);
        Ok(())
    }
}
