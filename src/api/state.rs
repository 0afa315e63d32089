use std::sync::Arc;

use crate::{
    config::Config,
    dataset::Dataset,
    error::AppResult,
    services::RecommendationEngine,
};

/// Shared application state
///
/// The dataset behind the engine is read-only for the life of the process,
/// so no lock is needed.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    pub fn new(engine: RecommendationEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Builds the engine for `dataset` using the configured labels and mood policy
    pub fn from_config(config: &Config, dataset: Dataset) -> AppResult<Self> {
        let engine = RecommendationEngine::new(
            Arc::new(dataset),
            config.weekday_labels()?,
            config.mood_policy,
        );
        Ok(Self::new(engine))
    }
}
