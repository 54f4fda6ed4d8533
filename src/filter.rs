//! Month and weekday filters over a loaded trip table.
//!
//! Filters never modify their input; each returns a new table with the
//! matching trips in their original order.

use tracing::debug;

use crate::config::{DayFilter, MonthFilter};
use crate::trip::TripTable;

/// Keeps trips whose start month equals the selected month.
pub fn filter_by_month(table: &TripTable, month: MonthFilter) -> TripTable {
    match month {
        MonthFilter::All => table.clone(),
        MonthFilter::Only(month) => {
            let ordinal = month.ordinal();
            let filtered = table.retain_from(|t| t.month == ordinal);
            debug!(month = month.name(), rows = filtered.len(), "Applied month filter");
            filtered
        }
    }
}

/// Keeps trips whose start weekday matches the selected day, ignoring case.
pub fn filter_by_day(table: &TripTable, day: DayFilter) -> TripTable {
    match day {
        DayFilter::All => table.clone(),
        DayFilter::Only(day) => {
            let wanted = day.name();
            let filtered = table.retain_from(|t| t.weekday_name().eq_ignore_ascii_case(wanted));
            debug!(day = wanted, rows = filtered.len(), "Applied day filter");
            filtered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{City, Day, Month};
    use crate::trip::{Schema, Trip};
    use chrono::NaiveDate;

    fn trip(month: u32, day: u32, station: &str) -> Trip {
        let start = NaiveDate::from_ymd_opt(2017, month, day)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Trip::new(start, station, "Dock", 60.0)
    }

    fn table() -> TripTable {
        // 2017-01-02 and 2017-03-06 are Mondays, 2017-01-03 is a Tuesday
        TripTable::new(
            City::Chicago,
            Schema::default(),
            vec![trip(1, 2, "a"), trip(1, 3, "b"), trip(3, 6, "c")],
        )
    }

    #[test]
    fn test_all_is_identity() {
        let source = table();
        assert_eq!(filter_by_month(&source, MonthFilter::All), source);
        assert_eq!(filter_by_day(&source, DayFilter::All), source);
    }

    #[test]
    fn test_filter_by_month() {
        let source = table();
        let january = filter_by_month(&source, MonthFilter::Only(Month::January));

        assert_eq!(january.len(), 2);
        assert!(january.iter().all(|t| t.month == 1));
        assert_eq!(source.len(), 3);
    }

    #[test]
    fn test_filter_by_day() {
        let mondays = filter_by_day(&table(), DayFilter::Only(Day::Monday));

        let stations: Vec<_> = mondays.iter().map(|t| t.start_station.as_str()).collect();
        assert_eq!(stations, vec!["a", "c"]);
    }

    #[test]
    fn test_month_then_day() {
        let january = filter_by_month(&table(), MonthFilter::Only(Month::January));
        let result = filter_by_day(&january, DayFilter::Only(Day::Tuesday));

        assert_eq!(result.len(), 1);
        assert_eq!(result.trips()[0].start_station, "b");
    }

    #[test]
    fn test_no_match_gives_empty_table() {
        let june = filter_by_month(&table(), MonthFilter::Only(Month::June));
        assert!(june.is_empty());
        assert_eq!(june.city(), City::Chicago);
    }
}
