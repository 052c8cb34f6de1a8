//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`MeetralError`] via `#[from]`. Adapter-specific errors (sqlx, config)
//! stay in their adapter crates and surface here as boxed storage errors.

/// Top-level error type for domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum MeetralError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The storage layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The event title is empty.
    #[error("title must not be empty")]
    EmptyTitle,

    /// More attendees registered than the event can hold.
    #[error("registered count exceeds capacity")]
    OverCapacity,

    /// The event has no seats left.
    #[error("event is full")]
    EventFull,

    /// A supplied identifier could not be parsed.
    #[error("invalid identifier")]
    InvalidId,
}

/// A lookup for a record that does not exist.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// The kind of record, e.g. `"Event"`.
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}
