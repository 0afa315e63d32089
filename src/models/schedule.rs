use std::collections::HashMap;

use chrono::{NaiveTime, Weekday};

use crate::error::{AppError, AppResult};

/// Opening window for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether `time` falls inside the window, inclusive at both ends.
    /// A window whose start is after its end wraps past midnight.
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= time && time <= self.end
        } else {
            time >= self.start || time <= self.end
        }
    }
}

/// Weekly schedule keyed by the day label used in the source text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    windows: HashMap<String, TimeWindow>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window for a day, replacing any earlier one
    pub fn insert(&mut self, day: impl Into<String>, window: TimeWindow) {
        self.windows.insert(day.into(), window);
    }

    pub fn get(&self, day: &str) -> Option<&TimeWindow> {
        self.windows.get(day)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// Monday-first weekday names matching the labels in the opening-hours text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayLabels(Vec<String>);

impl WeekdayLabels {
    pub fn new(labels: Vec<String>) -> AppResult<Self> {
        let labels: Vec<String> = labels.into_iter().map(|l| l.trim().to_string()).collect();
        if labels.len() != 7 {
            return Err(AppError::Config(format!(
                "expected 7 weekday labels, got {}",
                labels.len()
            )));
        }
        if labels.iter().any(String::is_empty) {
            return Err(AppError::Config("weekday labels must not be empty".to_string()));
        }
        Ok(Self(labels))
    }

    pub fn label_for(&self, weekday: Weekday) -> &str {
        &self.0[weekday.num_days_from_monday() as usize]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for WeekdayLabels {
    fn default() -> Self {
        Self(
            ["星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }
}
