//! Fixed enumerations (cities, months, weekdays) and runtime settings.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Weekday;
use clap::ValueEnum;
use serde::Serialize;

use crate::error::{LoadError, SelectorError};

/// Width of the dashed line printed after every report section.
pub const SEPARATOR_WIDTH: usize = 40;

/// Number of raw records shown when the user asks to see the data.
pub const PREVIEW_ROWS: usize = 5;

pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = ".";

/// Selector name and CSV file name for every supported city.
pub const CITY_DATA: [(City, &str, &str); 3] = [
    (City::Chicago, "chicago", "chicago.csv"),
    (City::NewYorkCity, "new york city", "new_york_city.csv"),
    (City::Washington, "washington", "washington.csv"),
];

/// Months covered by the published data sets, in calendar order.
pub const MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    #[value(name = "new-york-city", aliases = ["new york city", "nyc"])]
    NewYorkCity,
    Washington,
}

impl City {
    pub fn name(self) -> &'static str {
        CITY_DATA[self as usize].1
    }

    pub fn file_name(self) -> &'static str {
        CITY_DATA[self as usize].2
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CITY_DATA
            .into_iter()
            .find(|(_, name, _)| *name == wanted)
            .map(|(city, _, _)| city)
            .ok_or_else(|| LoadError::UnknownCity(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based calendar ordinal (January = 1).
    pub fn ordinal(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
        }
    }
}

impl FromStr for Month {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        MONTHS
            .iter()
            .position(|m| *m == wanted)
            .map(|i| Month::ALL[i])
            .ok_or_else(|| SelectorError {
                kind: "month",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Capitalized weekday name, the form stored on every trip.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }
}

impl FromStr for Day {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        [
            Day::Monday,
            Day::Tuesday,
            Day::Wednesday,
            Day::Thursday,
            Day::Friday,
            Day::Saturday,
            Day::Sunday,
        ]
        .into_iter()
        .find(|d| d.name().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| SelectorError {
            kind: "day",
            value: s.to_string(),
        })
    }
}

/// Month selector: either no filter or one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

impl From<Option<Month>> for MonthFilter {
    fn from(month: Option<Month>) -> Self {
        month.map_or(MonthFilter::All, MonthFilter::Only)
    }
}

impl FromStr for MonthFilter {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        s.parse().map(MonthFilter::Only)
    }
}

/// Weekday selector: either no filter or one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayFilter {
    #[default]
    All,
    Only(Day),
}

impl From<Option<Day>> for DayFilter {
    fn from(day: Option<Day>) -> Self {
        day.map_or(DayFilter::All, DayFilter::Only)
    }
}

impl FromStr for DayFilter {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        s.parse().map(DayFilter::Only)
    }
}

/// The validated (city, month, day) triple driving one load-filter-report cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Selection {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }
}

/// Runtime settings resolved from CLI flags and the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
}

impl Settings {
    /// Reads `BIKESHARE_DATA_DIR`, falling back to the working directory.
    pub fn from_env() -> Self {
        let data_dir =
            std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Self {
            data_dir: PathBuf::from(data_dir),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn source_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }
}
