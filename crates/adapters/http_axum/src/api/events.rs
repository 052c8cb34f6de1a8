//! JSON REST handlers for events.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::Deserialize;

use meetral_app::cache::CacheStore;
use meetral_app::ports::{Clock, EventRepository, FavoritesRepository};
use meetral_domain::error::ValidationError;
use meetral_domain::event::Event;
use meetral_domain::id::{EventId, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Event>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Event>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Event>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Request body for `POST /api/events`.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub place: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub capacity: u32,
    pub organizer_id: Option<UserId>,
    pub image_url: Option<String>,
}

/// `GET /api/events` — list all events, date ascending.
pub async fn list<ER, FR, S, C>(
    State(state): State<AppState<ER, FR, S, C>>,
) -> Result<ListResponse, ApiError>
where
    ER: EventRepository + Send + Sync + 'static,
    FR: FavoritesRepository + Send + Sync + 'static,
    S: CacheStore + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    let events = state.event_service.list_events().await?;
    Ok(ListResponse::Ok(Json(events)))
}

/// `GET /api/events/{id}` — get event by ID.
pub async fn get<ER, FR, S, C>(
    State(state): State<AppState<ER, FR, S, C>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    ER: EventRepository + Send + Sync + 'static,
    FR: FavoritesRepository + Send + Sync + 'static,
    S: CacheStore + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    let event_id = parse_event_id(&id)?;
    let event = state.event_service.get_event(event_id).await?;
    Ok(GetResponse::Ok(Json(event)))
}

/// `POST /api/events` — create a new event.
pub async fn create<ER, FR, S, C>(
    State(state): State<AppState<ER, FR, S, C>>,
    Json(body): Json<CreateEventRequest>,
) -> Result<CreateResponse, ApiError>
where
    ER: EventRepository + Send + Sync + 'static,
    FR: FavoritesRepository + Send + Sync + 'static,
    S: CacheStore + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    let mut builder = Event::builder()
        .title(body.title)
        .description(body.description)
        .place(body.place)
        .date(body.date)
        .capacity(body.capacity);
    if let Some(organizer_id) = body.organizer_id {
        builder = builder.organizer_id(organizer_id);
    }
    if let Some(image_url) = body.image_url {
        builder = builder.image_url(image_url);
    }
    let event = builder.build()?;

    let created = state.event_service.create_event(event).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `POST /api/events/{id}/register` — register one attendee.
pub async fn register<ER, FR, S, C>(
    State(state): State<AppState<ER, FR, S, C>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    ER: EventRepository + Send + Sync + 'static,
    FR: FavoritesRepository + Send + Sync + 'static,
    S: CacheStore + Send + Sync + 'static,
    C: Clock + Clone + Send + Sync + 'static,
{
    let event_id = parse_event_id(&id)?;
    let event = state.event_service.register(event_id).await?;
    Ok(GetResponse::Ok(Json(event)))
}

fn parse_event_id(raw: &str) -> Result<EventId, ApiError> {
    EventId::from_str(raw)
        .map_err(|_| ApiError::from(meetral_domain::error::MeetralError::from(ValidationError::InvalidId)))
}
