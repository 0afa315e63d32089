use chrono::{Datelike, NaiveDateTime};

use crate::{
    models::{Restaurant, WeekdayLabels},
    services::schedule::parse_schedule,
};

/// Decides whether a restaurant is open at `at`.
///
/// The schedule is parsed fresh from the record's opening-hours text and
/// looked up under the label for `at`'s weekday. Missing hours, or no entry
/// for that day, count as closed.
pub fn is_open(restaurant: &Restaurant, at: NaiveDateTime, labels: &WeekdayLabels) -> bool {
    let Some(hours) = restaurant.opening_hours.as_deref() else {
        return false;
    };

    let schedule = parse_schedule(hours);
    let day = labels.label_for(at.weekday());

    schedule
        .get(day)
        .is_some_and(|window| window.contains(at.time()))
}

/// Keeps only the restaurants open at `at`, preserving order
pub fn filter_open<'a>(
    restaurants: &[&'a Restaurant],
    at: NaiveDateTime,
    labels: &WeekdayLabels,
) -> Vec<&'a Restaurant> {
    if restaurants.is_empty() {
        return Vec::new();
    }

    let open: Vec<&Restaurant> = restaurants
        .iter()
        .copied()
        .filter(|r| is_open(r, at, labels))
        .collect();

    tracing::debug!(
        candidates = restaurants.len(),
        open = open.len(),
        at = %at,
        "Evaluated opening hours"
    );

    open
}
