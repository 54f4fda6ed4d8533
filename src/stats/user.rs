use tracing::debug;

use crate::stats::types::{Availability, BirthYearStats, CategoryCounts, Stat, UserStats};
use crate::stats::utility::{mode, value_counts};
use crate::trip::TripTable;

/// Counts by user type and gender, plus birth-year extremes and mode.
///
/// Gender and birth-year results are [`Availability::NotAvailable`] when the
/// city file has no such column. Empty cells are skipped.
pub fn user_stats(table: &TripTable) -> UserStats {
    let schema = table.schema();

    let genders = if schema.has_gender {
        Availability::Available(category_counts(
            table.iter().filter_map(|t| t.gender.as_deref()),
        ))
    } else {
        debug!(city = %table.city(), "No gender column");
        Availability::NotAvailable
    };

    let birth_years = if schema.has_birth_year {
        Availability::Available(birth_year_stats(table))
    } else {
        debug!(city = %table.city(), "No birth year column");
        Availability::NotAvailable
    };

    UserStats {
        user_types: category_counts(table.iter().filter_map(|t| t.user_type.as_deref())),
        genders,
        birth_years,
    }
}

fn category_counts<'a, I>(values: I) -> Stat<CategoryCounts>
where
    I: Iterator<Item = &'a str>,
{
    let counts: CategoryCounts = value_counts(values)
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    if counts.is_empty() {
        Stat::NoData
    } else {
        Stat::Value(counts)
    }
}

fn birth_year_stats(table: &TripTable) -> Stat<BirthYearStats> {
    let years: Vec<i32> = table.iter().filter_map(|t| t.birth_year).collect();

    let (Some(earliest), Some(most_recent), Some(most_common)) = (
        years.iter().min().copied(),
        years.iter().max().copied(),
        mode(years.iter().copied()),
    ) else {
        return Stat::NoData;
    };

    Stat::Value(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}
