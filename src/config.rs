use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{MoodPolicy, WeekdayLabels},
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the restaurant CSV file
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Monday-first weekday labels, as they appear in the opening-hours text
    #[serde(default = "default_weekday_labels")]
    pub weekday_labels: Vec<String>,

    /// Delimiter between tags in the location and category columns
    #[serde(default = "default_tag_delimiter")]
    pub tag_delimiter: String,

    /// Whether a selected mood replaces or narrows the attribute filters
    #[serde(default)]
    pub mood_policy: MoodPolicy,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/restaurants.csv")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_weekday_labels() -> Vec<String> {
    WeekdayLabels::default().as_slice().to_vec()
}

fn default_tag_delimiter() -> String {
    ",".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            host: default_host(),
            port: default_port(),
            weekday_labels: default_weekday_labels(),
            tag_delimiter: default_tag_delimiter(),
            mood_policy: MoodPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.weekday_labels()?;
        Ok(config)
    }

    /// Validated weekday labels
    pub fn weekday_labels(&self) -> AppResult<WeekdayLabels> {
        WeekdayLabels::new(self.weekday_labels.clone())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
