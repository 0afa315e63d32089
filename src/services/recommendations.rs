use std::sync::Arc;

use rand::{seq::IndexedRandom, Rng};
use serde::Serialize;

use crate::{
    dataset::Dataset,
    models::{Mood, MoodPolicy, PriceTier, Restaurant, SearchCriteria, SortKey, SortOrder, WeekdayLabels, MOODS},
    services::{
        availability,
        clock::{Clock, SystemClock},
        filters, ranking,
    },
};

pub const DEFAULT_TOP_N: usize = 10;

/// Ordered listing result
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults<'a> {
    /// Matches before `limit` was applied
    pub total_matches: usize,
    pub restaurants: Vec<&'a Restaurant>,
}

/// Outcome of a random pick; `restaurant` is `None` when nothing matched
#[derive(Debug, Clone, PartialEq)]
pub struct RandomPick<'a> {
    pub matched: usize,
    pub restaurant: Option<&'a Restaurant>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceOption {
    pub tier: PriceTier,
    pub label: Option<&'static str>,
}

/// Choices available in the current dataset
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterOptions {
    pub prices: Vec<PriceOption>,
    pub locations: Vec<String>,
    pub categories: Vec<String>,
    pub moods: Vec<&'static Mood>,
}

/// Stateless query façade over a shared dataset snapshot
#[derive(Clone)]
pub struct RecommendationEngine {
    dataset: Arc<Dataset>,
    weekday_labels: WeekdayLabels,
    mood_policy: MoodPolicy,
    clock: Arc<dyn Clock>,
}

impl RecommendationEngine {
    pub fn new(dataset: Arc<Dataset>, weekday_labels: WeekdayLabels, mood_policy: MoodPolicy) -> Self {
        Self {
            dataset,
            weekday_labels,
            mood_policy,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the source of "now" used when a request carries no time
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn mood_policy(&self) -> MoodPolicy {
        self.mood_policy
    }

    /// Filters, optionally restricts to open restaurants, sorts, truncates
    pub fn search(&self, criteria: &SearchCriteria) -> SearchResults<'_> {
        let candidates = self.candidates(criteria);
        let total_matches = candidates.len();

        let mut restaurants = ranking::sort(&candidates, criteria.sort_by, criteria.order);
        if let Some(limit) = criteria.limit {
            restaurants.truncate(limit);
        }

        tracing::debug!(
            total_matches,
            returned = restaurants.len(),
            sort_by = ?criteria.sort_by,
            order = ?criteria.order,
            "Search complete"
        );

        SearchResults {
            total_matches,
            restaurants,
        }
    }

    /// Picks one matching restaurant uniformly at random
    pub fn random_pick<R: Rng + ?Sized>(&self, criteria: &SearchCriteria, rng: &mut R) -> RandomPick<'_> {
        let candidates = self.candidates(criteria);
        RandomPick {
            matched: candidates.len(),
            restaurant: candidates.choose(rng).copied(),
        }
    }

    /// Most popular matches, highest first
    pub fn top(&self, n: usize, criteria: &SearchCriteria) -> Vec<&Restaurant> {
        let criteria = SearchCriteria {
            sort_by: SortKey::Popularity,
            order: SortOrder::Desc,
            limit: Some(n),
            ..criteria.clone()
        };
        self.search(&criteria).restaurants
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            prices: self
                .dataset
                .price_tiers()
                .into_iter()
                .map(|tier| PriceOption {
                    tier,
                    label: tier.label(),
                })
                .collect(),
            locations: self.dataset.location_tags().into_iter().map(String::from).collect(),
            categories: self.dataset.category_tags().into_iter().map(String::from).collect(),
            moods: MOODS.iter().collect(),
        }
    }

    /// Applies the attribute/mood filters per the mood policy, then open-now
    fn candidates(&self, criteria: &SearchCriteria) -> Vec<&Restaurant> {
        let all = self.dataset.view();

        let filtered = match (criteria.mood(), self.mood_policy) {
            (Some(mood), MoodPolicy::Exclusive) => filters::by_mood(&all, mood),
            (Some(mood), MoodPolicy::Combined) => {
                let narrowed = self.by_attributes(&all, criteria);
                filters::by_mood(&narrowed, mood)
            }
            (None, _) => self.by_attributes(&all, criteria),
        };

        if !criteria.open_now {
            return filtered;
        }

        let at = criteria.at.unwrap_or_else(|| self.clock.now());
        availability::filter_open(&filtered, at, &self.weekday_labels)
    }

    fn by_attributes<'a>(&self, view: &[&'a Restaurant], criteria: &SearchCriteria) -> Vec<&'a Restaurant> {
        filters::by_attributes(
            view,
            &criteria.price_levels,
            &criteria.locations,
            &criteria.categories,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::MockClock;
    use chrono::{NaiveDate, NaiveDateTime};
    use rand::{rngs::StdRng, SeedableRng};

    fn tier(code: u8) -> PriceTier {
        PriceTier::try_from(code).unwrap()
    }

    fn monday_at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn three_records() -> Dataset {
        Dataset::new(vec![
            Restaurant {
                rating: Some(4.5),
                user_ratings_total: Some(100),
                price_level: Some(tier(1)),
                ..Restaurant::new("one")
            },
            Restaurant {
                rating: Some(3.0),
                user_ratings_total: Some(5),
                price_level: Some(tier(2)),
                ..Restaurant::new("two")
            },
            Restaurant {
                rating: Some(4.0),
                user_ratings_total: Some(50),
                price_level: Some(tier(3)),
                ..Restaurant::new("three")
            },
        ])
    }

    fn campus() -> Dataset {
        let hours = |h: &str| Some(h.to_string());
        Dataset::new(vec![
            Restaurant {
                rating: Some(4.2),
                user_ratings_total: Some(800),
                price_level: Some(tier(1)),
                location_tags: vec!["公館".to_string()],
                category_tags: vec!["炸物".to_string()],
                opening_hours: hours("星期一：17:00 - 星期二 01:00"),
                ..Restaurant::new("師園鹽酥雞")
            },
            Restaurant {
                rating: Some(4.6),
                user_ratings_total: Some(300),
                price_level: Some(tier(2)),
                location_tags: vec!["溫州街".to_string()],
                category_tags: vec!["咖啡廳".to_string(), "甜點".to_string()],
                opening_hours: hours("星期一：10:00 - 星期一 22:00"),
                ..Restaurant::new("溫州街咖啡")
            },
            Restaurant {
                rating: Some(3.9),
                user_ratings_total: Some(40),
                price_level: Some(tier(1)),
                location_tags: vec!["公館".to_string()],
                category_tags: vec!["便當".to_string()],
                opening_hours: hours("星期一：10:30 - 星期一 14:00"),
                ..Restaurant::new("自助餐")
            },
        ])
    }

    fn engine(dataset: Dataset, policy: MoodPolicy) -> RecommendationEngine {
        RecommendationEngine::new(Arc::new(dataset), WeekdayLabels::default(), policy)
    }

    fn names(view: &[&Restaurant]) -> Vec<String> {
        view.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_price_filter_result_is_independent_of_sorting() {
        let engine = engine(three_records(), MoodPolicy::Exclusive);
        for sort_by in [SortKey::Popularity, SortKey::Rating] {
            for order in [SortOrder::Desc, SortOrder::Asc] {
                let criteria = SearchCriteria {
                    price_levels: vec![tier(2)],
                    sort_by,
                    order,
                    ..SearchCriteria::default()
                };
                let results = engine.search(&criteria);
                assert_eq!(results.total_matches, 1);
                assert_eq!(names(&results.restaurants), vec!["two"]);
            }
        }
    }

    #[test]
    fn test_search_sorts_and_truncates() {
        let engine = engine(three_records(), MoodPolicy::Exclusive);
        let criteria = SearchCriteria {
            limit: Some(2),
            ..SearchCriteria::default()
        };
        let results = engine.search(&criteria);
        assert_eq!(results.total_matches, 3);
        assert_eq!(names(&results.restaurants), vec!["one", "three"]);
    }

    #[test]
    fn test_search_without_matches_is_empty() {
        let engine = engine(three_records(), MoodPolicy::Exclusive);
        let criteria = SearchCriteria {
            locations: vec!["nowhere".to_string()],
            ..SearchCriteria::default()
        };
        let results = engine.search(&criteria);
        assert_eq!(results.total_matches, 0);
        assert!(results.restaurants.is_empty());
    }

    #[test]
    fn test_exclusive_mood_ignores_attribute_filters() {
        let engine = engine(campus(), MoodPolicy::Exclusive);
        let criteria = SearchCriteria {
            mood: Some("下午茶時光".to_string()),
            locations: vec!["公館".to_string()],
            ..SearchCriteria::default()
        };
        assert_eq!(names(&engine.search(&criteria).restaurants), vec!["溫州街咖啡"]);
    }

    #[test]
    fn test_combined_mood_narrows_attribute_filters() {
        let engine = engine(campus(), MoodPolicy::Combined);
        let criteria = SearchCriteria {
            mood: Some("afternoon-tea".to_string()),
            locations: vec!["公館".to_string()],
            ..SearchCriteria::default()
        };
        assert!(engine.search(&criteria).restaurants.is_empty());

        let criteria = SearchCriteria {
            mood: Some("late-night".to_string()),
            locations: vec!["公館".to_string()],
            ..SearchCriteria::default()
        };
        assert_eq!(names(&engine.search(&criteria).restaurants), vec!["師園鹽酥雞"]);
    }

    #[test]
    fn test_open_now_uses_explicit_time() {
        let engine = engine(campus(), MoodPolicy::Exclusive);
        let criteria = SearchCriteria {
            open_now: true,
            at: Some(monday_at(23, 0)),
            ..SearchCriteria::default()
        };
        assert_eq!(names(&engine.search(&criteria).restaurants), vec!["師園鹽酥雞"]);
    }

    #[test]
    fn test_open_now_falls_back_to_clock() {
        let mut clock = MockClock::new();
        clock.expect_now().times(1).returning(|| monday_at(12, 0));
        let engine = engine(campus(), MoodPolicy::Exclusive).with_clock(Arc::new(clock));

        let criteria = SearchCriteria {
            open_now: true,
            ..SearchCriteria::default()
        };
        assert_eq!(
            names(&engine.search(&criteria).restaurants),
            vec!["溫州街咖啡", "自助餐"]
        );
    }

    #[test]
    fn test_clock_untouched_without_open_now() {
        let mut clock = MockClock::new();
        clock.expect_now().never();
        let engine = engine(campus(), MoodPolicy::Exclusive).with_clock(Arc::new(clock));
        assert_eq!(engine.search(&SearchCriteria::default()).total_matches, 3);
    }

    #[test]
    fn test_random_pick_without_matches() {
        let engine = engine(campus(), MoodPolicy::Exclusive);
        let criteria = SearchCriteria {
            mood: Some("天氣很熱".to_string()),
            ..SearchCriteria::default()
        };
        let pick = engine.random_pick(&criteria, &mut StdRng::seed_from_u64(7));
        assert_eq!(pick.matched, 0);
        assert!(pick.restaurant.is_none());
    }

    #[test]
    fn test_random_pick_comes_from_filtered_set() {
        let engine = engine(campus(), MoodPolicy::Exclusive);
        let criteria = SearchCriteria {
            price_levels: vec![tier(1)],
            ..SearchCriteria::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let pick = engine.random_pick(&criteria, &mut rng);
            assert_eq!(pick.matched, 2);
            let restaurant = pick.restaurant.unwrap();
            assert_eq!(restaurant.price_level, Some(tier(1)));
        }
    }

    #[test]
    fn test_random_pick_respects_open_now() {
        let engine = engine(campus(), MoodPolicy::Exclusive);
        let criteria = SearchCriteria {
            open_now: true,
            at: Some(monday_at(23, 30)),
            ..SearchCriteria::default()
        };
        let pick = engine.random_pick(&criteria, &mut StdRng::seed_from_u64(1));
        assert_eq!(pick.matched, 1);
        assert_eq!(pick.restaurant.unwrap().name, "師園鹽酥雞");
    }

    #[test]
    fn test_top_ignores_requested_sort() {
        let engine = engine(three_records(), MoodPolicy::Exclusive);
        let criteria = SearchCriteria {
            sort_by: SortKey::Rating,
            order: SortOrder::Asc,
            ..SearchCriteria::default()
        };
        assert_eq!(names(&engine.top(2, &criteria)), vec!["one", "three"]);
        assert!(engine.top(0, &criteria).is_empty());
    }

    #[test]
    fn test_filter_options() {
        let engine = engine(campus(), MoodPolicy::Exclusive);
        let options = engine.filter_options();
        assert_eq!(
            options.prices,
            vec![
                PriceOption { tier: tier(1), label: Some("平價") },
                PriceOption { tier: tier(2), label: Some("中等") },
            ]
        );
        assert_eq!(options.locations, vec!["公館", "溫州街"]);
        assert_eq!(options.moods.len(), 10);
    }
}
