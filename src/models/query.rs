use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::PriceTier;

/// Key used to order results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Popularity,
    Rating,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

/// Selection criteria sent by the client for listing and random picks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Accepted price tiers; empty means any
    pub price_levels: Vec<PriceTier>,
    /// Accepted location tags; empty means any
    pub locations: Vec<String>,
    /// Accepted category tags; empty means any
    pub categories: Vec<String>,
    /// Mood key or slug
    pub mood: Option<String>,
    /// Keep only restaurants open at `at` (or now)
    pub open_now: bool,
    pub sort_by: SortKey,
    pub order: SortOrder,
    /// Truncate to the first N results
    pub limit: Option<usize>,
    /// Evaluation time for `open_now`; local wall-clock time when absent
    pub at: Option<NaiveDateTime>,
}

impl SearchCriteria {
    /// The selected mood, ignoring blank strings
    pub fn mood(&self) -> Option<&str> {
        self.mood.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }
}
