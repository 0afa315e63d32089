use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

use crate::models::{Schedule, TimeWindow};

/// `<start-day>：<H:MM> - <end-day> <H:MM>`, anchored at the start of a line.
/// Day labels are whatever word the source uses, in any script.
static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\s*[：:]\s*(\d{1,2}:\d{2})\s*-\s*(\w+)\s*(\d{1,2}:\d{2})")
        .expect("valid schedule regex")
});

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

/// Parses free-text weekly opening hours into a per-day window table.
///
/// Lines that don't match, or whose times don't parse, are skipped. An entry
/// ending on a different day than it starts is clamped to 23:59 of the start
/// day. A day listed twice keeps its last entry.
pub fn parse_schedule(text: &str) -> Schedule {
    let mut schedule = Schedule::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(caps) = ENTRY_RE.captures(line) else {
            tracing::trace!(line, "Skipping unrecognized opening-hours line");
            continue;
        };

        let (start_day, start, end_day, end) = (&caps[1], &caps[2], &caps[3], &caps[4]);

        let (Ok(start), Ok(end)) = (
            NaiveTime::parse_from_str(start, "%H:%M"),
            NaiveTime::parse_from_str(end, "%H:%M"),
        ) else {
            tracing::trace!(line, "Skipping opening-hours line with invalid time");
            continue;
        };

        let end = if start_day != end_day { end_of_day() } else { end };
        schedule.insert(start_day, TimeWindow::new(start, end));
    }

    schedule
}
