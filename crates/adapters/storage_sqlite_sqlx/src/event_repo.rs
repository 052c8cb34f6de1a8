//! `SQLite` implementation of [`EventRepository`].

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use meetral_app::ports::EventRepository;
use meetral_domain::error::MeetralError;
use meetral_domain::event::Event;
use meetral_domain::id::{EventId, UserId};

use crate::error::StorageError;

struct Wrapper(Event);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Event> {
        value.map(|w| w.0)
    }
}

/// Clamp a stored integer into `u32`, coercing negatives to 0.
fn non_negative(value: i64) -> u32 {
    u32::try_from(value.clamp(0, i64::from(u32::MAX))).unwrap_or(0)
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let title: String = row.try_get("title")?;
        let description: String = row.try_get("description")?;
        let place: String = row.try_get("place")?;
        let date_str: String = row.try_get("date")?;
        let capacity: i64 = row.try_get("capacity")?;
        let registered: i64 = row.try_get("registered")?;
        let favorites_count: i64 = row.try_get("favorites_count")?;
        let organizer_id: Option<uuid::Uuid> = row.try_get("organizer_id")?;
        let image_url: Option<String> = row.try_get("image_url")?;
        let created_at_str: String = row.try_get("created_at")?;

        // One malformed row must never break the whole feed: numeric
        // fields are clamped and an unparseable date becomes far-future so
        // the event sorts last instead of erroring.
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or(NaiveDate::MAX);
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.to_utc())
            .unwrap_or_default();

        Ok(Self(Event {
            id: EventId::from_uuid(id),
            title,
            description,
            place,
            date,
            capacity: non_negative(capacity),
            registered: non_negative(registered),
            favorites_count: non_negative(favorites_count),
            organizer_id: organizer_id.map(UserId::from_uuid),
            image_url,
            created_at,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO events (id, title, description, place, date, capacity, registered, organizer_id, image_url, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE: &str = r"
    UPDATE events
    SET title = ?, description = ?, place = ?, date = ?, capacity = ?, registered = ?, organizer_id = ?, image_url = ?
    WHERE id = ?
";

const DELETE: &str = "DELETE FROM events WHERE id = ?";

// Every read includes the per-event favorites count so the domain never
// has to compute it.
const SELECT_BY_ID: &str = r"
    SELECT e.*, (SELECT COUNT(*) FROM favorites f WHERE f.event_id = e.id) AS favorites_count
    FROM events e
    WHERE e.id = ?
";

const SELECT_ALL: &str = r"
    SELECT e.*, (SELECT COUNT(*) FROM favorites f WHERE f.event_id = e.id) AS favorites_count
    FROM events e
    ORDER BY e.date ASC
";

const SELECT_WINDOW: &str = r"
    SELECT e.*, (SELECT COUNT(*) FROM favorites f WHERE f.event_id = e.id) AS favorites_count
    FROM events e
    WHERE e.date >= ?
    ORDER BY e.created_at DESC
";

/// `SQLite`-backed event repository.
pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EventRepository for SqliteEventRepository {
    async fn create(&self, event: Event) -> Result<Event, MeetralError> {
        sqlx::query(INSERT)
            .bind(event.id.as_uuid())
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.place)
            .bind(event.date.to_string())
            .bind(i64::from(event.capacity))
            .bind(i64::from(event.registered))
            .bind(event.organizer_id.map(UserId::as_uuid))
            .bind(&event.image_url)
            .bind(event.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(event)
    }

    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, MeetralError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Event>, MeetralError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn list_window(&self, since: NaiveDate) -> Result<Vec<Event>, MeetralError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_WINDOW)
            .bind(since.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, event: Event) -> Result<Event, MeetralError> {
        sqlx::query(UPDATE)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.place)
            .bind(event.date.to_string())
            .bind(i64::from(event.capacity))
            .bind(i64::from(event.registered))
            .bind(event.organizer_id.map(UserId::as_uuid))
            .bind(&event.image_url)
            .bind(event.id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(event)
    }

    async fn delete(&self, id: EventId) -> Result<(), MeetralError> {
        sqlx::query(DELETE)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
