//! Relevance scoring for the event feed.
//!
//! Each event gets a weighted sum of five sub-scores: imminence (soon is
//! better), popularity (registrations), fill rate ("almost full" signals
//! social proof without being unavailable), likes (favorites count), and
//! recency (freshly published events get a short boost). Scoring is a pure
//! function of the event and `now` — no randomness, no side effects — so
//! the resulting order is reproducible bit-for-bit.

use chrono::Duration;

use crate::event::Event;
use crate::time::Timestamp;

/// Weights and policy knobs for the scoring formula.
///
/// Hoisted out of the formula so tuning does not require touching the
/// control flow. The defaults reproduce the historic ranking exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingWeights {
    pub imminence: f64,
    pub popularity: f64,
    pub fill_rate: f64,
    pub likes: f64,
    pub recency: f64,
    /// When false, the likes term is omitted from the sum entirely.
    ///
    /// A later revision of the ranking endpoint dropped the likes term for
    /// performance; the two variants rank differently, so the choice is an
    /// explicit policy rather than a silent default.
    pub include_likes: bool,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            imminence: 3.0,
            popularity: 2.0,
            fill_rate: 1.5,
            likes: 1.0,
            recency: 1.2,
            include_likes: true,
        }
    }
}

/// Score an event at the given instant.
///
/// Higher is more relevant. Always finite: a degenerate input that would
/// produce a NaN or infinity scores 0 instead so one bad record cannot
/// poison the sort.
#[must_use]
pub fn score_event(event: &Event, now: Timestamp, weights: &RankingWeights) -> f64 {
    let hours_until = hours(event.starts_at() - now);
    let hours_since_created = hours(now - event.created_at);

    let total = imminence_score(hours_until) * weights.imminence
        + popularity_score(event.registered) * weights.popularity
        + fill_rate_score(fill_rate(event)) * weights.fill_rate
        + if weights.include_likes {
            likes_score(event.favorites_count) * weights.likes
        } else {
            0.0
        }
        + recency_score(hours_since_created) * weights.recency;

    if total.is_finite() { total } else { 0.0 }
}

/// Fill rate as a percentage, 0 when capacity is not applicable.
#[must_use]
pub fn fill_rate(event: &Event) -> f64 {
    if event.capacity > 0 {
        f64::from(event.registered) / f64::from(event.capacity) * 100.0
    } else {
        0.0
    }
}

fn hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 3_600_000.0
}

/// Closer events score higher, maxing out inside 24 hours.
///
/// Past events score the floor value: the feed query already restricts to
/// a 30-day window, so no further decay is applied.
fn imminence_score(hours_until: f64) -> f64 {
    if hours_until < 0.0 {
        2.0
    } else if hours_until < 24.0 {
        10.0
    } else if hours_until < 48.0 {
        8.0
    } else if hours_until < 72.0 {
        6.0
    } else if hours_until < 168.0 {
        4.0
    } else {
        2.0
    }
}

fn popularity_score(registered: u32) -> f64 {
    (f64::from(registered) / 10.0 * 2.0).min(10.0)
}

/// 70–90% full is "hot"; completely full events never reach the scorer.
fn fill_rate_score(fill_rate: f64) -> f64 {
    if (70.0..90.0).contains(&fill_rate) {
        10.0
    } else if (50.0..70.0).contains(&fill_rate) {
        6.0
    } else if (30.0..50.0).contains(&fill_rate) {
        3.0
    } else {
        1.0
    }
}

fn likes_score(favorites_count: u32) -> f64 {
    (f64::from(favorites_count) * 0.5).min(10.0)
}

/// Short boost for freshly published events, decaying to 0 after 30 days.
fn recency_score(hours_since_created: f64) -> f64 {
    if hours_since_created < 24.0 {
        6.0
    } else if hours_since_created < 72.0 {
        5.0
    } else if hours_since_created < 168.0 {
        3.0
    } else if hours_since_created < 720.0 {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn event_on(date: NaiveDate) -> Event {
        Event::builder()
            .title("Test")
            .date(date)
            .capacity(100)
            .build()
            .unwrap()
    }

    #[test]
    fn should_bucket_imminence_by_hours_until() {
        assert_eq!(imminence_score(1.0), 10.0);
        assert_eq!(imminence_score(23.9), 10.0);
        assert_eq!(imminence_score(24.0), 8.0);
        assert_eq!(imminence_score(47.9), 8.0);
        assert_eq!(imminence_score(48.0), 6.0);
        assert_eq!(imminence_score(72.0), 4.0);
        assert_eq!(imminence_score(167.9), 4.0);
        assert_eq!(imminence_score(168.0), 2.0);
        assert_eq!(imminence_score(10_000.0), 2.0);
    }

    #[test]
    fn should_score_past_events_at_the_floor() {
        assert_eq!(imminence_score(-5.0), 2.0);
        assert_eq!(imminence_score(-700.0), 2.0);
    }

    #[test]
    fn should_cap_popularity_at_ten() {
        assert_eq!(popularity_score(0), 0.0);
        assert_eq!(popularity_score(10), 2.0);
        assert_eq!(popularity_score(25), 5.0);
        assert_eq!(popularity_score(50), 10.0);
        assert_eq!(popularity_score(500), 10.0);
    }

    #[test]
    fn should_bucket_fill_rate_with_hot_band() {
        assert_eq!(fill_rate_score(0.0), 1.0);
        assert_eq!(fill_rate_score(29.9), 1.0);
        assert_eq!(fill_rate_score(30.0), 3.0);
        assert_eq!(fill_rate_score(50.0), 6.0);
        assert_eq!(fill_rate_score(69.9), 6.0);
        assert_eq!(fill_rate_score(70.0), 10.0);
        assert_eq!(fill_rate_score(89.9), 10.0);
        assert_eq!(fill_rate_score(90.0), 1.0);
        assert_eq!(fill_rate_score(99.0), 1.0);
    }

    #[test]
    fn should_cap_likes_at_ten() {
        assert_eq!(likes_score(0), 0.0);
        assert_eq!(likes_score(4), 2.0);
        assert_eq!(likes_score(20), 10.0);
        assert_eq!(likes_score(1_000), 10.0);
    }

    #[test]
    fn should_bucket_recency_with_thirty_day_decay() {
        assert_eq!(recency_score(1.0), 6.0);
        assert_eq!(recency_score(24.0), 5.0);
        assert_eq!(recency_score(72.0), 3.0);
        assert_eq!(recency_score(168.0), 1.0);
        assert_eq!(recency_score(719.9), 1.0);
        assert_eq!(recency_score(720.0), 0.0);
    }

    #[test]
    fn should_return_zero_fill_rate_when_capacity_is_zero() {
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 9, 12).unwrap());
        event.capacity = 0;
        event.registered = 0;
        assert_eq!(fill_rate(&event), 0.0);
    }

    #[test]
    fn should_weight_sub_scores_into_total() {
        let now = Utc.with_ymd_and_hms(2026, 9, 11, 12, 0, 0).unwrap();
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 9, 12).unwrap());
        event.capacity = 10;
        event.registered = 8; // fill rate 80% => 10
        event.favorites_count = 6; // likes 3
        event.created_at = now - Duration::hours(2); // recency 6

        // imminence 10 (12h away), popularity 1.6
        let expected = 10.0 * 3.0 + 1.6 * 2.0 + 10.0 * 1.5 + 3.0 * 1.0 + 6.0 * 1.2;
        let score = score_event(&event, now, &RankingWeights::default());
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn should_omit_likes_term_when_policy_disables_it() {
        let now = Utc.with_ymd_and_hms(2026, 9, 11, 12, 0, 0).unwrap();
        let mut event = event_on(NaiveDate::from_ymd_opt(2026, 9, 12).unwrap());
        event.favorites_count = 20;

        let with_likes = score_event(&event, now, &RankingWeights::default());
        let weights = RankingWeights {
            include_likes: false,
            ..RankingWeights::default()
        };
        let without_likes = score_event(&event, now, &weights);

        // likes sub-score is capped at 10, weighted 1x
        assert!((with_likes - without_likes - 10.0).abs() < 1e-9);
    }

    #[test]
    fn should_rank_imminent_event_above_distant_one() {
        let now = Utc.with_ymd_and_hms(2026, 9, 11, 12, 0, 0).unwrap();
        let soon = event_on(NaiveDate::from_ymd_opt(2026, 9, 12).unwrap());
        let later = event_on(NaiveDate::from_ymd_opt(2026, 9, 20).unwrap());

        let weights = RankingWeights::default();
        assert!(score_event(&soon, now, &weights) > score_event(&later, now, &weights));
    }

    #[test]
    fn should_be_deterministic_for_identical_inputs() {
        let now = Utc.with_ymd_and_hms(2026, 9, 11, 12, 0, 0).unwrap();
        let event = event_on(NaiveDate::from_ymd_opt(2026, 9, 14).unwrap());
        let weights = RankingWeights::default();

        let first = score_event(&event, now, &weights);
        let second = score_event(&event, now, &weights);
        assert!(first.to_bits() == second.to_bits());
    }
}
