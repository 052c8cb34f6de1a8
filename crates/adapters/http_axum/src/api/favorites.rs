//! JSON handlers for user favorites.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use meetral_app::cache::CacheStore;
use meetral_app::ports::{Clock, EventRepository, FavoritesRepository};
use meetral_domain::id::{EventId, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for adding or removing a favorite.
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub user_id: UserId,
    pub event_id: EventId,
}

/// Possible responses from the favorite endpoints.
pub enum FavoriteResponse {
    NoContent,
}

impl IntoResponse for FavoriteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `POST /api/favorites` — favorite an event.
pub async fn add<ER, FR, S, C>(
    State(state): State<AppState<ER, FR, S, C>>,
    Json(body): Json<FavoriteRequest>,
) -> Result<FavoriteResponse, ApiError>
where
    ER: EventRepository + Send + Sync + 'static,
    FR: FavoritesRepository + Send + Sync + 'static,
    S: CacheStore + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    state
        .event_service
        .add_favorite(body.user_id, body.event_id)
        .await?;
    Ok(FavoriteResponse::NoContent)
}

/// `DELETE /api/favorites` — remove a favorite.
pub async fn remove<ER, FR, S, C>(
    State(state): State<AppState<ER, FR, S, C>>,
    Json(body): Json<FavoriteRequest>,
) -> Result<FavoriteResponse, ApiError>
where
    ER: EventRepository + Send + Sync + 'static,
    FR: FavoritesRepository + Send + Sync + 'static,
    S: CacheStore + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    state
        .event_service
        .remove_favorite(body.user_id, body.event_id)
        .await?;
    Ok(FavoriteResponse::NoContent)
}
