//! # meetral-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `EventRepository` — CRUD and windowed queries for events
//!   - `FavoritesRepository` — per-user favorited-event sets
//!   - `Clock` — injectable current time for deterministic ranking
//! - Define **driving/inbound ports** as use-case structs:
//!   - `FeedService` — compose the ranked home feed
//!   - `EventService` — list, get, create, register
//! - Provide **in-process infrastructure** that doesn't need IO:
//!   - `TtlCache` — namespaced key/value cache with lazy expiry
//!
//! ## Dependency rule
//! Depends on `meetral-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod cache;
pub mod ports;
pub mod services;
