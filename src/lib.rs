//! Restaurant recommendations over a static dataset.
//!
//! The engine filters by price tier, location and category tags or a mood
//! preset, restricts to restaurants open at a given time, and ranks by
//! popularity or rating. [`api`] exposes it over HTTP.

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

pub use dataset::Dataset;
pub use error::{AppError, AppResult};
pub use services::RecommendationEngine;
