//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the use-case layer
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod clock;
pub mod event_repo;
pub mod favorites_repo;

pub use clock::{Clock, SystemClock};
pub use event_repo::EventRepository;
pub use favorites_repo::FavoritesRepository;
