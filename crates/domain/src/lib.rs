//! # meetral-domain
//!
//! Pure domain model for the meetral community-events service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Events** (the things users browse and register for)
//! - Rank events for the home feed (the scoring heuristic and its weights)
//! - Compose paginated, capacity-filtered feed pages
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod feed;
pub mod ranking;
