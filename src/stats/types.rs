//! Result records returned by the statistic generators.

use indexmap::IndexMap;
use serde::Serialize;

use crate::duration::SplitDuration;

/// A statistic over the filtered trips, or a marker that there were no
/// trips (or no non-empty values) to compute it from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Stat<T> {
    Value(T),
    NoData,
}

impl<T> Stat<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Stat::Value(v) => Some(v),
            Stat::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Stat::NoData)
    }
}

impl<T> From<Option<T>> for Stat<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Stat::NoData, Stat::Value)
    }
}

/// A sub-result that depends on an optional column of the city file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "availability", content = "data", rename_all = "snake_case")]
pub enum Availability<T> {
    Available(T),
    NotAvailable,
}

impl<T> Availability<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Availability::Available(v) => Some(v),
            Availability::NotAvailable => None,
        }
    }
}

/// Occurrences per category, most frequent first; ties keep discovery order.
pub type CategoryCounts = IndexMap<String, usize>;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub most_common_month: Stat<String>,
    pub most_common_weekday: Stat<String>,
    pub most_common_hour: Stat<u32>,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: Stat<String>,
    pub most_common_end_station: Stat<String>,
    pub most_common_combination: Stat<String>,
}

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: Stat<f64>,
    pub total: Stat<SplitDuration>,
    pub mean_seconds: Stat<f64>,
    pub mean: Stat<SplitDuration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Rider breakdown by user type, gender and birth year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Stat<CategoryCounts>,
    pub genders: Availability<Stat<CategoryCounts>>,
    pub birth_years: Availability<Stat<BirthYearStats>>,
}
