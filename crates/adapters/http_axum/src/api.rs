//! JSON API route assembly.

#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod favorites;
#[allow(clippy::missing_errors_doc)]
pub mod feed;

use axum::Router;
use axum::routing::{get, post};

use meetral_app::cache::CacheStore;
use meetral_app::ports::{Clock, EventRepository, FavoritesRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<ER, FR, S, C>() -> Router<AppState<ER, FR, S, C>>
where
    ER: EventRepository + Send + Sync + 'static,
    FR: FavoritesRepository + Send + Sync + 'static,
    S: CacheStore + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    Router::new()
        // Events. The static `/events/feed` segment is matched in
        // preference to the `{id}` capture.
        .route(
            "/events",
            get(events::list::<ER, FR, S, C>).post(events::create::<ER, FR, S, C>),
        )
        .route("/events/feed", get(feed::get::<ER, FR, S, C>))
        .route("/events/{id}", get(events::get::<ER, FR, S, C>))
        .route(
            "/events/{id}/register",
            post(events::register::<ER, FR, S, C>),
        )
        // Favorites
        .route(
            "/favorites",
            post(favorites::add::<ER, FR, S, C>).delete(favorites::remove::<ER, FR, S, C>),
        )
}
