use crate::stats::types::{Stat, StationStats};
use crate::stats::utility::mode;
use crate::trip::{Trip, TripTable};

/// Most common start station, end station and start-to-end combination.
pub fn station_stats(table: &TripTable) -> StationStats {
    StationStats {
        most_common_start_station: most_common(table, |t| t.start_station.as_str()),
        most_common_end_station: most_common(table, |t| t.end_station.as_str()),
        most_common_combination: most_common(table, |t| t.station_combo.as_str()),
    }
}

fn most_common(table: &TripTable, pick: fn(&Trip) -> &str) -> Stat<String> {
    Stat::from(mode(table.iter().map(pick)).map(str::to_string))
}
