//! Feed service — compose the ranked home feed.
//!
//! Orchestrates the pipeline around the pure `compose_feed` core: resolve
//! the candidate window from the clock, fetch candidates and the user's
//! favorited-id set through the ports, and cache composed pages for a few
//! minutes so burst traffic doesn't recompute identical feeds.

use chrono::Duration;

use meetral_domain::error::MeetralError;
use meetral_domain::feed::{DEFAULT_LIMIT, FeedOptions, FeedPage, compose_feed};
use meetral_domain::id::UserId;
use meetral_domain::ranking::RankingWeights;

use crate::cache::{CacheStore, TtlCache};
use crate::ports::{Clock, EventRepository, FavoritesRepository};

/// Candidate window: events dated within the last 30 days through any
/// future date. Keeping this pre-filter upstream is what makes the flat
/// imminence floor for past events acceptable.
const WINDOW_DAYS: i64 = 30;

/// One feed request.
#[derive(Debug, Clone)]
pub struct FeedRequest {
    /// Requesting user, when authenticated. Drives `is_favorited` flags.
    pub user_id: Option<UserId>,
    pub offset: usize,
    pub limit: usize,
}

impl Default for FeedRequest {
    fn default() -> Self {
        Self {
            user_id: None,
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Application service composing ranked feed pages.
pub struct FeedService<ER, FR, S, C> {
    events: ER,
    favorites: FR,
    cache: TtlCache<S, C>,
    clock: C,
    weights: RankingWeights,
}

impl<ER, FR, S, C> FeedService<ER, FR, S, C>
where
    ER: EventRepository,
    FR: FavoritesRepository,
    S: CacheStore,
    C: Clock + Clone,
{
    /// Create a new service with the default ranking weights.
    pub fn new(events: ER, favorites: FR, store: S, clock: C) -> Self {
        Self::with_weights(events, favorites, store, clock, RankingWeights::default())
    }

    /// Create a new service with explicit ranking weights.
    pub fn with_weights(
        events: ER,
        favorites: FR,
        store: S,
        clock: C,
        weights: RankingWeights,
    ) -> Self {
        Self {
            events,
            favorites,
            cache: TtlCache::new(store, clock.clone()),
            clock,
            weights,
        }
    }

    /// Compose one feed page.
    ///
    /// Serves a cached page when a fresh one exists for the same
    /// pagination and user; otherwise fetches the candidate window,
    /// resolves favorites, ranks, caches, and returns.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories. The
    /// composition itself never fails.
    pub async fn feed(&self, request: FeedRequest) -> Result<FeedPage, MeetralError> {
        let key = cache_key(&request);
        if let Some(page) = self.cache.get::<FeedPage>(&key) {
            return Ok(page);
        }

        let now = self.clock.now();
        let since = (now - Duration::days(WINDOW_DAYS)).date_naive();
        let candidates = self.events.list_window(since).await?;

        let favorited_ids = match request.user_id {
            Some(user) => Some(self.favorites.ids_for_user(user).await?),
            None => None,
        };

        let options = FeedOptions {
            offset: request.offset,
            limit: request.limit,
            favorited_ids,
        };
        let page = compose_feed(candidates, now, &options, &self.weights);
        tracing::debug!(
            total = page.total,
            returned = page.items.len(),
            "composed feed page"
        );

        self.cache.set(&key, &page);
        Ok(page)
    }
}

fn cache_key(request: &FeedRequest) -> String {
    match request.user_id {
        Some(user) => format!("page_{}_{}_{user}", request.offset, request.limit),
        None => format!("page_{}_{}_anon", request.offset, request.limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use chrono::{NaiveDate, TimeZone, Utc};
    use meetral_domain::event::Event;
    use meetral_domain::id::EventId;
    use meetral_domain::time::Timestamp;
    use std::collections::HashSet;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone)]
    struct FixedClock(Timestamp);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    struct InMemoryEventRepo {
        events: Mutex<Vec<Event>>,
        window_calls: AtomicUsize,
    }

    impl InMemoryEventRepo {
        fn with_events(events: Vec<Event>) -> Self {
            Self {
                events: Mutex::new(events),
                window_calls: AtomicUsize::new(0),
            }
        }
    }

    impl EventRepository for InMemoryEventRepo {
        fn create(&self, event: Event) -> impl Future<Output = Result<Event, MeetralError>> + Send {
            self.events.lock().unwrap().push(event.clone());
            async { Ok(event) }
        }

        fn get_by_id(
            &self,
            id: EventId,
        ) -> impl Future<Output = Result<Option<Event>, MeetralError>> + Send {
            let found = self
                .events
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id)
                .cloned();
            async { Ok(found) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Event>, MeetralError>> + Send {
            let all = self.events.lock().unwrap().clone();
            async { Ok(all) }
        }

        fn list_window(
            &self,
            since: NaiveDate,
        ) -> impl Future<Output = Result<Vec<Event>, MeetralError>> + Send {
            self.window_calls.fetch_add(1, Ordering::SeqCst);
            let matching: Vec<Event> = self
                .events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.date >= since)
                .cloned()
                .collect();
            async { Ok(matching) }
        }

        fn update(&self, event: Event) -> impl Future<Output = Result<Event, MeetralError>> + Send {
            let mut events = self.events.lock().unwrap();
            if let Some(slot) = events.iter_mut().find(|e| e.id == event.id) {
                *slot = event.clone();
            }
            async { Ok(event) }
        }

        fn delete(&self, id: EventId) -> impl Future<Output = Result<(), MeetralError>> + Send {
            self.events.lock().unwrap().retain(|e| e.id != id);
            async { Ok(()) }
        }
    }

    struct InMemoryFavoritesRepo {
        favorited: Mutex<HashSet<(UserId, EventId)>>,
    }

    impl InMemoryFavoritesRepo {
        fn empty() -> Self {
            Self {
                favorited: Mutex::new(HashSet::new()),
            }
        }

        fn with(user: UserId, event: EventId) -> Self {
            Self {
                favorited: Mutex::new(HashSet::from([(user, event)])),
            }
        }
    }

    impl FavoritesRepository for InMemoryFavoritesRepo {
        fn ids_for_user(
            &self,
            user: UserId,
        ) -> impl Future<Output = Result<HashSet<EventId>, MeetralError>> + Send {
            let ids: HashSet<EventId> = self
                .favorited
                .lock()
                .unwrap()
                .iter()
                .filter(|(u, _)| *u == user)
                .map(|(_, e)| *e)
                .collect();
            async { Ok(ids) }
        }

        fn add(
            &self,
            user: UserId,
            event: EventId,
        ) -> impl Future<Output = Result<(), MeetralError>> + Send {
            self.favorited.lock().unwrap().insert((user, event));
            async { Ok(()) }
        }

        fn remove(
            &self,
            user: UserId,
            event: EventId,
        ) -> impl Future<Output = Result<(), MeetralError>> + Send {
            self.favorited.lock().unwrap().remove(&(user, event));
            async { Ok(()) }
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 9, 11, 12, 0, 0).unwrap()
    }

    fn event(days_ahead: i64, registered: u32, capacity: u32) -> Event {
        Event::builder()
            .title("Event")
            .date((now() + Duration::days(days_ahead)).date_naive())
            .capacity(capacity)
            .registered(registered)
            .created_at(now() - Duration::days(1))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_compose_feed_from_window_candidates() {
        let repo = InMemoryEventRepo::with_events(vec![event(1, 2, 10), event(5, 0, 10)]);
        let svc = FeedService::new(
            repo,
            InMemoryFavoritesRepo::empty(),
            MemoryStore::new(),
            FixedClock(now()),
        );

        let page = svc.feed(FeedRequest::default()).await.unwrap();
        assert_eq!(page.total, 2);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn should_exclude_events_older_than_window() {
        let repo = InMemoryEventRepo::with_events(vec![event(-40, 0, 10), event(2, 0, 10)]);
        let svc = FeedService::new(
            repo,
            InMemoryFavoritesRepo::empty(),
            MemoryStore::new(),
            FixedClock(now()),
        );

        let page = svc.feed(FeedRequest::default()).await.unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn should_flag_favorited_events_for_the_requesting_user() {
        let liked = event(2, 0, 10);
        let liked_id = liked.id;
        let user = UserId::new();
        let repo = InMemoryEventRepo::with_events(vec![liked, event(3, 0, 10)]);
        let svc = FeedService::new(
            repo,
            InMemoryFavoritesRepo::with(user, liked_id),
            MemoryStore::new(),
            FixedClock(now()),
        );

        let page = svc
            .feed(FeedRequest {
                user_id: Some(user),
                ..FeedRequest::default()
            })
            .await
            .unwrap();
        for item in &page.items {
            assert_eq!(item.is_favorited, item.event.id == liked_id);
        }
    }

    #[tokio::test]
    async fn should_serve_second_identical_request_from_cache() {
        let repo = InMemoryEventRepo::with_events(vec![event(1, 0, 10)]);
        let svc = FeedService::new(
            repo,
            InMemoryFavoritesRepo::empty(),
            MemoryStore::new(),
            FixedClock(now()),
        );

        let first = svc.feed(FeedRequest::default()).await.unwrap();
        let second = svc.feed(FeedRequest::default()).await.unwrap();
        assert_eq!(first.total, second.total);
        assert_eq!(svc.events.window_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_not_share_cached_pages_across_users() {
        let liked = event(2, 0, 10);
        let liked_id = liked.id;
        let user = UserId::new();
        let repo = InMemoryEventRepo::with_events(vec![liked]);
        let svc = FeedService::new(
            repo,
            InMemoryFavoritesRepo::with(user, liked_id),
            MemoryStore::new(),
            FixedClock(now()),
        );

        let anon = svc.feed(FeedRequest::default()).await.unwrap();
        assert!(!anon.items[0].is_favorited);

        let personalized = svc
            .feed(FeedRequest {
                user_id: Some(user),
                ..FeedRequest::default()
            })
            .await
            .unwrap();
        assert!(personalized.items[0].is_favorited);
    }
}
