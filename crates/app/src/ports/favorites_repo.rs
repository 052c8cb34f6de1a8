//! Favorites repository port — per-user favorited-event sets.

use std::collections::HashSet;
use std::future::Future;

use meetral_domain::error::MeetralError;
use meetral_domain::id::{EventId, UserId};

/// Repository for user favorites.
pub trait FavoritesRepository {
    /// The set of event ids `user` has favorited.
    fn ids_for_user(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<HashSet<EventId>, MeetralError>> + Send;

    /// Record that `user` favorited `event`. Idempotent.
    fn add(
        &self,
        user: UserId,
        event: EventId,
    ) -> impl Future<Output = Result<(), MeetralError>> + Send;

    /// Remove `user`'s favorite for `event`, if present.
    fn remove(
        &self,
        user: UserId,
        event: EventId,
    ) -> impl Future<Output = Result<(), MeetralError>> + Send;
}
