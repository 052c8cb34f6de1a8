//! JSON handler for the ranked event feed.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use meetral_app::cache::CacheStore;
use meetral_app::ports::{Clock, EventRepository, FavoritesRepository};
use meetral_app::services::feed_service::FeedRequest;
use meetral_domain::feed::{DEFAULT_LIMIT, FeedPage};
use meetral_domain::id::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `GET /api/events/feed`.
///
/// Out-of-range values are clamped downstream, never rejected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub user_id: Option<UserId>,
}

/// Possible responses from the feed endpoint.
pub enum FeedResponse {
    Ok(Json<FeedPage>),
}

impl IntoResponse for FeedResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/events/feed` — ranked, capacity-filtered, paginated feed.
pub async fn get<ER, FR, S, C>(
    State(state): State<AppState<ER, FR, S, C>>,
    Query(query): Query<FeedQuery>,
) -> Result<FeedResponse, ApiError>
where
    ER: EventRepository + Send + Sync + 'static,
    FR: FavoritesRepository + Send + Sync + 'static,
    S: CacheStore + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    let request = FeedRequest {
        user_id: query.user_id,
        offset: query.offset.unwrap_or(0),
        limit: query.limit.unwrap_or(DEFAULT_LIMIT),
    };
    let page = state.feed_service.feed(request).await?;
    Ok(FeedResponse::Ok(Json(page)))
}
