use tracing::debug;

use crate::duration::split_seconds;
use crate::stats::types::{DurationStats, Stat};
use crate::trip::TripTable;

/// Total and mean trip duration, raw and split into hours/minutes/seconds.
pub fn trip_duration_stats(table: &TripTable) -> DurationStats {
    if table.is_empty() {
        debug!("No trips for duration statistics");
        return DurationStats {
            total_seconds: Stat::NoData,
            total: Stat::NoData,
            mean_seconds: Stat::NoData,
            mean: Stat::NoData,
        };
    }

    let total: f64 = table.iter().map(|t| t.duration_secs).sum();
    let mean = total / table.len() as f64;

    DurationStats {
        total_seconds: Stat::Value(total),
        total: Stat::Value(split_seconds(total)),
        mean_seconds: Stat::Value(mean),
        mean: Stat::Value(split_seconds(mean)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::City;
    use crate::trip::{Schema, Trip};
    use chrono::NaiveDate;

    fn table(durations: &[f64]) -> TripTable {
        let start = NaiveDate::from_ymd_opt(2017, 5, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        let trips = durations
            .iter()
            .map(|d| Trip::new(start, "A", "B", *d))
            .collect();
        TripTable::new(City::Washington, Schema::default(), trips)
    }

    #[test]
    fn test_total_and_mean() {
        let stats = trip_duration_stats(&table(&[100.0, 200.0, 300.0]));

        assert_eq!(stats.total_seconds, Stat::Value(600.0));
        let total = stats.total.value().unwrap();
        assert_eq!((total.hours, total.minutes, total.seconds), (0, 10, 0.0));

        assert_eq!(stats.mean_seconds, Stat::Value(200.0));
        let mean = stats.mean.value().unwrap();
        assert_eq!((mean.hours, mean.minutes, mean.seconds), (0, 3, 20.0));
    }

    #[test]
    fn test_mean_fraction_is_truncated_in_whole_seconds() {
        let stats = trip_duration_stats(&table(&[61.0, 62.0]));
        let mean = stats.mean.value().unwrap();

        assert_eq!((mean.hours, mean.minutes), (0, 1));
        assert_eq!(mean.whole_seconds(), 1);
    }

    #[test]
    fn test_empty_table() {
        let stats = trip_duration_stats(&table(&[]));

        assert!(stats.total_seconds.is_no_data());
        assert!(stats.total.is_no_data());
        assert!(stats.mean_seconds.is_no_data());
        assert!(stats.mean.is_no_data());
    }
}
