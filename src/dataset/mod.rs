use std::{collections::BTreeSet, io::Read, path::Path};

use crate::{
    error::AppResult,
    models::{PriceTier, Restaurant},
};

pub mod loader;

pub use loader::{split_tags, REQUIRED_COLUMNS};

/// Immutable snapshot of every restaurant, loaded once per process
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    restaurants: Vec<Restaurant>,
}

impl Dataset {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    /// Loads the CSV file at `path`
    ///
    /// Fails with `DataSourceNotFound` when the file does not exist and with
    /// `DataLoad` for any other I/O or parse failure.
    pub fn from_path(path: impl AsRef<Path>, tag_delimiter: &str) -> AppResult<Self> {
        loader::load_from_path(path.as_ref(), tag_delimiter).map(Self::new)
    }

    pub fn from_reader<R: Read>(reader: R, tag_delimiter: &str) -> AppResult<Self> {
        loader::load_from_reader(reader, tag_delimiter).map(Self::new)
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// A fresh view over every record, in dataset order
    pub fn view(&self) -> Vec<&Restaurant> {
        self.restaurants.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// Sorted distinct location tags
    pub fn location_tags(&self) -> Vec<&str> {
        distinct(self.restaurants.iter().flat_map(|r| r.location_tags.iter()))
    }

    /// Sorted distinct category tags
    pub fn category_tags(&self) -> Vec<&str> {
        distinct(self.restaurants.iter().flat_map(|r| r.category_tags.iter()))
    }

    /// Sorted distinct price tiers
    pub fn price_tiers(&self) -> Vec<PriceTier> {
        self.restaurants
            .iter()
            .filter_map(|r| r.price_level)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn distinct<'a>(tags: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    tags.map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
