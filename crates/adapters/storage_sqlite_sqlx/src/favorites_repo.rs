//! `SQLite` implementation of [`FavoritesRepository`].

use std::collections::HashSet;

use sqlx::{Row, SqlitePool};

use meetral_app::ports::FavoritesRepository;
use meetral_domain::error::MeetralError;
use meetral_domain::id::{EventId, UserId};

use crate::error::StorageError;

const SELECT_FOR_USER: &str = "SELECT event_id FROM favorites WHERE user_id = ?";
const INSERT: &str = "INSERT OR IGNORE INTO favorites (user_id, event_id) VALUES (?, ?)";
const DELETE: &str = "DELETE FROM favorites WHERE user_id = ? AND event_id = ?";

/// `SQLite`-backed favorites repository.
pub struct SqliteFavoritesRepository {
    pool: SqlitePool,
}

impl SqliteFavoritesRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl FavoritesRepository for SqliteFavoritesRepository {
    async fn ids_for_user(&self, user: UserId) -> Result<HashSet<EventId>, MeetralError> {
        let rows = sqlx::query(SELECT_FOR_USER)
            .bind(user.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let mut ids = HashSet::with_capacity(rows.len());
        for row in rows {
            let event_id: uuid::Uuid = row.try_get("event_id").map_err(StorageError::from)?;
            ids.insert(EventId::from_uuid(event_id));
        }
        Ok(ids)
    }

    async fn add(&self, user: UserId, event: EventId) -> Result<(), MeetralError> {
        sqlx::query(INSERT)
            .bind(user.as_uuid())
            .bind(event.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn remove(&self, user: UserId, event: EventId) -> Result<(), MeetralError> {
        sqlx::query(DELETE)
            .bind(user.as_uuid())
            .bind(event.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
