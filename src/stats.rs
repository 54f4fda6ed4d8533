//! Descriptive statistics over a filtered trip table.
//!
//! Each generator is a pure function of the table and returns a typed
//! record. Missing optional columns and empty tables produce explicit
//! markers ([`Availability::NotAvailable`], [`Stat::NoData`]) instead of
//! errors, so one gap never stops the rest of a report.

pub mod station;
pub mod time;
pub mod trip_duration;
pub mod types;
pub mod user;
pub mod utility;

use serde::Serialize;

use crate::config::City;
use crate::trip::TripTable;

pub use station::station_stats;
pub use time::time_stats;
pub use trip_duration::trip_duration_stats;
pub use types::{
    Availability, BirthYearStats, CategoryCounts, DurationStats, Stat, StationStats, TimeStats,
    UserStats,
};
pub use user::user_stats;

/// Every statistic group for one filtered table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub city: City,
    pub trips: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

impl Report {
    pub fn from_table(table: &TripTable) -> Self {
        Report {
            city: table.city(),
            trips: table.len(),
            time: time_stats(table),
            stations: station_stats(table),
            durations: trip_duration_stats(table),
            users: user_stats(table),
        }
    }
}
