pub mod availability;
pub mod clock;
pub mod filters;
pub mod ranking;
pub mod recommendations;
pub mod schedule;

pub use clock::{Clock, SystemClock};
pub use recommendations::{FilterOptions, RandomPick, RecommendationEngine, SearchResults};
