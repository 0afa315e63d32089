use std::cmp::Ordering;

use crate::models::{Restaurant, SortKey, SortOrder};

/// `rating × ln(1 + user_ratings_total)`, with missing, negative or
/// non-finite values counted as zero
pub fn popularity_score(restaurant: &Restaurant) -> f64 {
    let rating = restaurant
        .rating
        .filter(|r| r.is_finite())
        .unwrap_or(0.0)
        .max(0.0);
    let count = restaurant.user_ratings_total.unwrap_or(0) as f64;
    rating * count.ln_1p()
}

/// Returns a new, stably sorted view. Ties keep their input order in both
/// directions. Records without a rating go last when sorting by rating.
pub fn sort<'a>(restaurants: &[&'a Restaurant], key: SortKey, order: SortOrder) -> Vec<&'a Restaurant> {
    let mut sorted = restaurants.to_vec();
    match key {
        SortKey::Popularity => {
            sorted.sort_by(|a, b| directed(popularity_score(a).total_cmp(&popularity_score(b)), order));
        }
        SortKey::Rating => {
            sorted.sort_by(|a, b| match (rating_of(a), rating_of(b)) {
                (Some(x), Some(y)) => directed(x.total_cmp(&y), order),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }
    }
    sorted
}

fn rating_of(restaurant: &Restaurant) -> Option<f64> {
    restaurant.rating.filter(|r| r.is_finite())
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}
