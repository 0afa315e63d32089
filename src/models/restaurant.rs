use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Relative cost level of a restaurant
///
/// The dataset stores tiers as numbers (often float-formatted, e.g. `"2.0"`);
/// they are normalized to a small integer code at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PriceTier(u8);

impl PriceTier {
    pub const MAX: u8 = 4;

    pub fn code(self) -> u8 {
        self.0
    }

    /// Display label shown next to the tier
    pub fn label(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("平價"),
            2 => Some("中等"),
            3 => Some("奢華"),
            _ => None,
        }
    }
}

impl TryFrom<u8> for PriceTier {
    type Error = AppError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        if code > Self::MAX {
            return Err(AppError::InvalidInput(format!(
                "price tier {} is out of range 0..={}",
                code,
                Self::MAX
            )));
        }
        Ok(PriceTier(code))
    }
}

impl From<PriceTier> for u8 {
    fn from(tier: PriceTier) -> Self {
        tier.0
    }
}

impl FromStr for PriceTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("not a price tier: {:?}", s)))?;
        if value.fract() != 0.0 || !(0.0..=f64::from(Self::MAX)).contains(&value) {
            return Err(AppError::InvalidInput(format!("not a price tier: {:?}", s)));
        }
        PriceTier::try_from(value as u8)
    }
}

impl Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A restaurant record from the dataset snapshot
///
/// Every schema field is present on every record; values missing from the
/// source are `None` (or an empty tag list).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Restaurant {
    pub name: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub price_level: Option<PriceTier>,
    pub location_tags: Vec<String>,
    pub category_tags: Vec<String>,
    pub opening_hours: Option<String>,
    pub map_url: Option<String>,
}

impl Restaurant {
    /// Creates a record with only a name; every other field has no value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            rating: None,
            user_ratings_total: None,
            lat: None,
            lng: None,
            price_level: None,
            location_tags: Vec::new(),
            category_tags: Vec::new(),
            opening_hours: None,
            map_url: None,
        }
    }

    pub fn has_any_location(&self, wanted: &[String]) -> bool {
        self.location_tags.iter().any(|tag| wanted.contains(tag))
    }

    pub fn has_any_category(&self, wanted: &[String]) -> bool {
        self.category_tags.iter().any(|tag| wanted.contains(tag))
    }
}
