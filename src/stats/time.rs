use tracing::debug;

use crate::config::Day;
use crate::stats::types::{Stat, TimeStats};
use crate::stats::utility::mode;
use crate::trip::TripTable;

/// English name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    chrono::Month::try_from(month).ok().map(|m| m.name())
}

/// Most common month, weekday and start hour.
pub fn time_stats(table: &TripTable) -> TimeStats {
    if table.is_empty() {
        debug!("No trips for time statistics");
    }

    let month = mode(table.iter().map(|t| t.month)).and_then(month_name);
    let weekday = mode(table.iter().map(|t| t.weekday)).map(|w| Day::from(w).name());
    let hour = mode(table.iter().map(|t| t.hour));

    TimeStats {
        most_common_month: Stat::from(month.map(str::to_string)),
        most_common_weekday: Stat::from(weekday.map(str::to_string)),
        most_common_hour: Stat::from(hour),
    }
}
