//! Shared application state for axum handlers.

use std::sync::Arc;

use meetral_app::cache::CacheStore;
use meetral_app::ports::{Clock, EventRepository, FavoritesRepository};
use meetral_app::services::event_service::EventService;
use meetral_app::services::feed_service::FeedService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository, cache-store, and clock types to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying
/// types themselves do not need to be `Clone` — only the `Arc` wrappers
/// are cloned.
pub struct AppState<ER, FR, S, C> {
    /// Ranked feed composition service.
    pub feed_service: Arc<FeedService<ER, FR, S, C>>,
    /// Event CRUD, registration, and favorites service.
    pub event_service: Arc<EventService<ER, FR, S, C>>,
}

impl<ER, FR, S, C> Clone for AppState<ER, FR, S, C> {
    fn clone(&self) -> Self {
        Self {
            feed_service: Arc::clone(&self.feed_service),
            event_service: Arc::clone(&self.event_service),
        }
    }
}

impl<ER, FR, S, C> AppState<ER, FR, S, C>
where
    ER: EventRepository + Send + Sync + 'static,
    FR: FavoritesRepository + Send + Sync + 'static,
    S: CacheStore + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        feed_service: FeedService<ER, FR, S, C>,
        event_service: EventService<ER, FR, S, C>,
    ) -> Self {
        Self {
            feed_service: Arc::new(feed_service),
            event_service: Arc::new(event_service),
        }
    }
}
