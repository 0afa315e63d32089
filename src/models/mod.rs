pub mod mood;
pub mod query;
pub mod restaurant;
pub mod schedule;

pub use mood::{Mood, MoodPolicy, MOODS};
pub use query::{SearchCriteria, SortKey, SortOrder};
pub use restaurant::{PriceTier, Restaurant};
pub use schedule::{Schedule, TimeWindow, WeekdayLabels};
