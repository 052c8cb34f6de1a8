//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use meetral_app::cache::CacheStore;
use meetral_app::ports::{Clock, EventRepository, FavoritesRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the JSON API under `/api` and includes a [`TraceLayer`] that
/// logs each HTTP request/response at the `DEBUG` level using the
/// `tracing` ecosystem.
pub fn build<ER, FR, S, C>(state: AppState<ER, FR, S, C>) -> Router
where
    ER: EventRepository + Send + Sync + 'static,
    FR: FavoritesRepository + Send + Sync + 'static,
    S: CacheStore + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use meetral_app::cache::MemoryStore;
    use meetral_app::ports::SystemClock;
    use meetral_app::services::event_service::EventService;
    use meetral_app::services::feed_service::FeedService;
    use meetral_domain::error::MeetralError;
    use meetral_domain::event::Event;
    use meetral_domain::id::{EventId, UserId};
    use std::collections::HashSet;
    use tower::ServiceExt;

    struct StubEventRepo;
    struct StubFavoritesRepo;

    impl EventRepository for StubEventRepo {
        async fn create(&self, event: Event) -> Result<Event, MeetralError> {
            Ok(event)
        }
        async fn get_by_id(&self, _id: EventId) -> Result<Option<Event>, MeetralError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Event>, MeetralError> {
            Ok(vec![])
        }
        async fn list_window(
            &self,
            _since: chrono::NaiveDate,
        ) -> Result<Vec<Event>, MeetralError> {
            Ok(vec![])
        }
        async fn update(&self, event: Event) -> Result<Event, MeetralError> {
            Ok(event)
        }
        async fn delete(&self, _id: EventId) -> Result<(), MeetralError> {
            Ok(())
        }
    }

    impl FavoritesRepository for StubFavoritesRepo {
        async fn ids_for_user(&self, _user: UserId) -> Result<HashSet<EventId>, MeetralError> {
            Ok(HashSet::new())
        }
        async fn add(&self, _user: UserId, _event: EventId) -> Result<(), MeetralError> {
            Ok(())
        }
        async fn remove(&self, _user: UserId, _event: EventId) -> Result<(), MeetralError> {
            Ok(())
        }
    }

    fn test_state() -> AppState<StubEventRepo, StubFavoritesRepo, MemoryStore, SystemClock> {
        let store = MemoryStore::new();
        AppState::new(
            FeedService::new(
                StubEventRepo,
                StubFavoritesRepo,
                store.clone(),
                SystemClock,
            ),
            EventService::new(StubEventRepo, StubFavoritesRepo, store, SystemClock),
        )
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_empty_feed_page_from_stub_repos() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events/feed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["total"], 0);
        assert_eq!(json["hasMore"], false);
        assert!(json["events"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_bad_request_for_malformed_event_id() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/events/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
