use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Mood, PriceTier, Restaurant, SearchCriteria, MOODS},
    services::{ranking::popularity_score, recommendations::DEFAULT_TOP_N, FilterOptions},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct RestaurantResponse {
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub price_level: Option<PriceTier>,
    pub price_label: Option<&'static str>,
    pub location_tags: Vec<String>,
    pub category_tags: Vec<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub map_url: Option<String>,
    pub popularity_score: f64,
}

impl From<&Restaurant> for RestaurantResponse {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            name: restaurant.name.clone(),
            address: restaurant.address.clone(),
            rating: restaurant.rating,
            user_ratings_total: restaurant.user_ratings_total,
            price_level: restaurant.price_level,
            price_label: restaurant.price_level.and_then(PriceTier::label),
            location_tags: restaurant.location_tags.clone(),
            category_tags: restaurant.category_tags.clone(),
            lat: restaurant.lat,
            lng: restaurant.lng,
            map_url: restaurant.map_url.clone(),
            popularity_score: popularity_score(restaurant),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub total_matches: usize,
    pub restaurants: Vec<RestaurantResponse>,
}

#[derive(Debug, Serialize)]
pub struct RandomPickResponse {
    pub matched: usize,
    pub restaurant: Option<RestaurantResponse>,
}

#[derive(Debug, Deserialize)]
pub struct TopQuery {
    pub n: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "restaurants": state.engine.dataset().len(),
        })),
    )
}

/// Price tiers, tags and moods available for filtering
pub async fn filter_options(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(state.engine.filter_options())
}

/// The fixed mood table
pub async fn list_moods() -> Json<&'static [Mood]> {
    Json(MOODS.as_slice())
}

/// Filtered, sorted listing
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<SearchCriteria>, JsonRejection>,
) -> AppResult<Json<SearchResponse>> {
    let Json(criteria) = body.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    tracing::info!(
        request_id = %request_id,
        price_levels = criteria.price_levels.len(),
        locations = criteria.locations.len(),
        categories = criteria.categories.len(),
        mood = ?criteria.mood(),
        open_now = criteria.open_now,
        "Processing search request"
    );

    let results = state.engine.search(&criteria);
    let restaurants: Vec<RestaurantResponse> = results
        .restaurants
        .iter()
        .copied()
        .map(RestaurantResponse::from)
        .collect();

    tracing::info!(
        request_id = %request_id,
        total_matches = results.total_matches,
        returned = restaurants.len(),
        "Search completed"
    );

    Ok(Json(SearchResponse {
        count: restaurants.len(),
        total_matches: results.total_matches,
        restaurants,
    }))
}

/// One random restaurant from the filtered set, or none
pub async fn random_pick(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<SearchCriteria>, JsonRejection>,
) -> AppResult<Json<RandomPickResponse>> {
    let Json(criteria) = body.map_err(|e| AppError::InvalidInput(e.body_text()))?;

    let pick = state.engine.random_pick(&criteria, &mut rand::rng());

    tracing::info!(
        request_id = %request_id,
        matched = pick.matched,
        picked = ?pick.restaurant.map(|r| r.name.as_str()),
        "Random pick completed"
    );

    Ok(Json(RandomPickResponse {
        matched: pick.matched,
        restaurant: pick.restaurant.map(RestaurantResponse::from),
    }))
}

/// Popularity leaderboard over the whole dataset
pub async fn top(
    State(state): State<AppState>,
    Query(params): Query<TopQuery>,
) -> Json<Vec<RestaurantResponse>> {
    let n = params.n.unwrap_or(DEFAULT_TOP_N);
    let restaurants = state
        .engine
        .top(n, &SearchCriteria::default())
        .into_iter()
        .map(RestaurantResponse::from)
        .collect();
    Json(restaurants)
}
