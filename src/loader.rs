//! CSV loader for per-city bikeshare trip files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::{City, Selection, Settings};
use crate::error::{LoadError, Result};
use crate::filter::{filter_by_day, filter_by_month};
use crate::trip::{Schema, Trip, TripTable};

/// Start-time layouts accepted in the `Start Time` column, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// One CSV row as written in the source file. Unknown columns (such as the
/// unnamed leading index) are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    // written as a float (`1992.0`) in some exports; `nan`/`NA` mean missing
    #[serde(rename = "Birth Year", default, deserialize_with = "csv::invalid_option")]
    birth_year: Option<f64>,
}

/// Parses a start timestamp in any of the supported layouts.
pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Loads the selected city and applies the month filter, then the day filter.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, a required column is
/// missing, or any row is malformed. Nothing is returned for a partial load.
#[tracing::instrument(skip(settings), fields(city = %selection.city))]
pub fn load_data(settings: &Settings, selection: &Selection) -> Result<TripTable> {
    let table = load_city(&settings.source_path(selection.city), selection.city)?;
    let table = filter_by_month(&table, selection.month);
    let table = filter_by_day(&table, selection.day);

    info!(rows = table.len(), "Trip table ready");
    Ok(table)
}

/// Reads every trip of `city` from the CSV file at `path`, unfiltered.
pub fn load_city(path: &Path, city: City) -> Result<TripTable> {
    debug!(path = %path.display(), "Opening trip file");
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_trips(city, file)
}

/// Reads trips for `city` from any CSV source.
pub fn read_trips<R: Read>(city: City, source: R) -> Result<TripTable> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(source);

    let headers = reader.headers()?.clone();
    if let Some(column) = Schema::missing_required(&headers) {
        return Err(LoadError::MissingColumn { column });
    }
    let schema = Schema::from_headers(&headers);
    debug!(
        has_gender = schema.has_gender,
        has_birth_year = schema.has_birth_year,
        "Detected schema"
    );

    let mut trips = Vec::new();
    let mut record = StringRecord::new();

    while reader
        .read_record(&mut record)
        .map_err(|source| LoadError::InvalidRecord {
            line: source.position().map_or(0, |p| p.line()),
            source,
        })?
    {
        let line = record.position().map_or(0, |p| p.line());
        let raw: RawTrip = record
            .deserialize(Some(&headers))
            .map_err(|source| LoadError::InvalidRecord { line, source })?;
        trips.push(to_trip(raw, line)?);
    }

    info!(%city, rows = trips.len(), "Loaded trips");
    Ok(TripTable::new(city, schema, trips))
}

fn to_trip(raw: RawTrip, line: u64) -> Result<Trip> {
    let start_time =
        parse_start_time(&raw.start_time).ok_or_else(|| LoadError::MalformedTimestamp {
            line,
            value: raw.start_time.clone(),
        })?;

    Ok(
        Trip::new(start_time, raw.start_station, raw.end_station, raw.trip_duration)
            .with_end_time(raw.end_time)
            .with_user_type(raw.user_type)
            .with_gender(raw.gender)
            .with_birth_year(raw.birth_year.filter(|y| y.is_finite()).map(|y| y as i32)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Availability, Stat, user_stats};
    use chrono::{Datelike, Timelike};

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,,
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    #[test]
    fn test_parse_start_time_formats() {
        let plain = parse_start_time("2017-01-01 09:07:57").unwrap();
        assert_eq!(plain.hour(), 9);

        let fractional = parse_start_time("2017-01-01 09:07:57.123").unwrap();
        assert_eq!(fractional.second(), 57);

        let iso = parse_start_time("2017-03-05T23:59:00").unwrap();
        assert_eq!(iso.month(), 3);

        let us = parse_start_time("06/30/2017 7:05").unwrap();
        assert_eq!(us.day(), 30);
    }

    #[test]
    fn test_parse_start_time_rejects_garbage() {
        assert!(parse_start_time("not a time").is_none());
        assert!(parse_start_time("").is_none());
    }

    #[test]
    fn test_read_trips_with_demographics() {
        let table = read_trips(City::Chicago, CHICAGO.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.schema().has_gender);
        assert!(table.schema().has_birth_year);

        let first = &table.trips()[0];
        assert_eq!(first.month, 6);
        assert_eq!(first.weekday_name(), "Friday");
        assert_eq!(first.hour, 15);
        assert_eq!(first.duration_secs, 321.0);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
        assert_eq!(
            first.station_combo,
            "Wood St & Hubbard St to Damen Ave & Chicago Ave"
        );

        let second = &table.trips()[1];
        assert_eq!(second.gender, None);
        assert_eq!(second.birth_year, None);
    }

    #[test]
    fn test_read_trips_without_demographics() {
        let table = read_trips(City::Washington, WASHINGTON.as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.schema(), Schema::default());
        assert_eq!(table.trips()[0].duration_secs, 489.066);
        assert_eq!(table.trips()[0].gender, None);
    }

    #[test]
    fn test_malformed_timestamp_is_fatal() {
        let data = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 09:07:57,100,A,B,Subscriber
sometime,100,A,B,Subscriber
";
        let err = read_trips(City::Chicago, data.as_bytes()).unwrap_err();
        match err {
            LoadError::MalformedTimestamp { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "sometime");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_column() {
        let data = "Start Time,Start Station,End Station,User Type\n";
        let err = read_trips(City::Chicago, data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "Trip Duration"
            }
        ));
    }

    #[test]
    fn test_invalid_duration_reports_line() {
        let data = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 09:07:57,soon,A,B,Subscriber
";
        let err = read_trips(City::Chicago, data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_unknown_birth_year_is_missing() {
        let data = "\
Start Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
2017-01-01 09:07:57,100,A,B,Customer,,nan
2017-01-01 10:07:57,100,A,B,Customer,,NA
2017-01-01 11:07:57,100,A,B,Customer,,inf
2017-01-01 12:07:57,100,A,B,,,
2017-01-01 13:07:57,100,A,B,Subscriber,Male,1988.0
";
        let table = read_trips(City::Chicago, data.as_bytes()).unwrap();
        let years: Vec<_> = table.iter().map(|t| t.birth_year).collect();

        assert_eq!(years, vec![None, None, None, None, Some(1988)]);

        let without_known = table.retain_from(|t| t.user_type.as_deref() != Some("Subscriber"));
        assert_eq!(
            user_stats(&without_known).birth_years,
            Availability::Available(Stat::NoData)
        );
    }

    #[test]
    fn test_ragged_row_reports_line() {
        let data = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 09:07:57,100,A,B
";
        let err = read_trips(City::Chicago, data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_load_city_missing_file() {
        let err = load_city(Path::new("/nonexistent/chicago.csv"), City::Chicago).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
