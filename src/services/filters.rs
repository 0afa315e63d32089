//! Pure predicates over restaurant views.
//!
//! Every filter takes a view and returns a new one holding the matching
//! records in their original relative order. An empty selection for price,
//! location or category keeps everything.

use crate::models::{Mood, PriceTier, Restaurant};

pub fn by_price<'a>(restaurants: &[&'a Restaurant], tiers: &[PriceTier]) -> Vec<&'a Restaurant> {
    if tiers.is_empty() {
        return restaurants.to_vec();
    }
    restaurants
        .iter()
        .copied()
        .filter(|r| r.price_level.is_some_and(|tier| tiers.contains(&tier)))
        .collect()
}

pub fn by_location<'a>(restaurants: &[&'a Restaurant], locations: &[String]) -> Vec<&'a Restaurant> {
    if locations.is_empty() {
        return restaurants.to_vec();
    }
    restaurants
        .iter()
        .copied()
        .filter(|r| r.has_any_location(locations))
        .collect()
}

pub fn by_category<'a>(
    restaurants: &[&'a Restaurant],
    categories: &[String],
) -> Vec<&'a Restaurant> {
    if categories.is_empty() {
        return restaurants.to_vec();
    }
    restaurants
        .iter()
        .copied()
        .filter(|r| r.has_any_category(categories))
        .collect()
}

/// Restaurants matching the mood named by `mood` (key or slug).
/// An unknown mood matches nothing.
pub fn by_mood<'a>(restaurants: &[&'a Restaurant], mood: &str) -> Vec<&'a Restaurant> {
    let Some(mood) = Mood::lookup(mood) else {
        tracing::debug!(mood, "Unknown mood");
        return Vec::new();
    };
    restaurants
        .iter()
        .copied()
        .filter(|r| mood.matches(r))
        .collect()
}

/// Price, then location, then category
pub fn by_attributes<'a>(
    restaurants: &[&'a Restaurant],
    tiers: &[PriceTier],
    locations: &[String],
    categories: &[String],
) -> Vec<&'a Restaurant> {
    let narrowed = by_price(restaurants, tiers);
    let narrowed = by_location(&narrowed, locations);
    by_category(&narrowed, categories)
}
