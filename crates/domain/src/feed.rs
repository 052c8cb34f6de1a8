//! Feed composition — filter, score, sort, and paginate events.
//!
//! `compose_feed` is a pure transformation over data already materialized
//! in memory: no storage, no network, no clock reads. Callers inject `now`,
//! which makes every property here unit-testable without mocks.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::id::EventId;
use crate::ranking::{RankingWeights, score_event};
use crate::time::Timestamp;

/// Page size when the caller does not specify one.
pub const DEFAULT_LIMIT: usize = 200;
/// Hard upper bound on the page size; larger requests are clamped.
pub const MAX_LIMIT: usize = 500;

/// Per-request feed parameters.
#[derive(Debug, Clone)]
pub struct FeedOptions {
    /// Number of ranked events to skip.
    pub offset: usize,
    /// Maximum number of events to return, clamped to `1..=MAX_LIMIT`.
    pub limit: usize,
    /// Event ids the requesting user has favorited, when known.
    /// `None` means no user context; every `is_favorited` will be false.
    pub favorited_ids: Option<HashSet<EventId>>,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
            favorited_ids: None,
        }
    }
}

/// An event annotated with its relevance score and the requesting user's
/// favorite flag. Constructed per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredEvent {
    #[serde(flatten)]
    pub event: Event,
    pub score: f64,
    pub is_favorited: bool,
}

/// One ranked, paginated slice of eligible events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    #[serde(rename = "events")]
    pub items: Vec<ScoredEvent>,
    /// Count of eligible events before pagination. Full events are never
    /// counted.
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

/// Whether an event can still accept registrations and belongs in the feed.
///
/// Soft-deleted or out-of-window events are excluded by the storage query
/// upstream, not here.
#[must_use]
pub fn is_eligible(event: &Event) -> bool {
    !event.is_full()
}

/// Compose a feed page: filter out full events, score the rest, stable-sort
/// descending by score, then paginate.
///
/// Total function: degenerate inputs (empty list, out-of-range pagination)
/// produce an empty or clamped page, never an error. Output is
/// deterministic for identical inputs and identical `now`; equal-score
/// events keep their input order.
#[must_use]
pub fn compose_feed(
    events: Vec<Event>,
    now: Timestamp,
    options: &FeedOptions,
    weights: &RankingWeights,
) -> FeedPage {
    let limit = options.limit.clamp(1, MAX_LIMIT);
    let offset = options.offset;

    let mut scored: Vec<ScoredEvent> = events
        .into_iter()
        .filter(is_eligible)
        .map(|event| ScoredEvent {
            score: score_event(&event, now, weights),
            is_favorited: options
                .favorited_ids
                .as_ref()
                .is_some_and(|ids| ids.contains(&event.id)),
            event,
        })
        .collect();

    // Scores are always finite, so equal-score pairs are the only
    // `None`-comparison case and the stable sort keeps their input order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let total = scored.len();
    let items: Vec<ScoredEvent> = scored.into_iter().skip(offset).take(limit).collect();
    let has_more = offset + limit < total;

    FeedPage {
        items,
        total,
        offset,
        limit,
        has_more,
    }
}
