//! In-memory trip records and the per-city table that holds them.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use csv::StringRecord;

use crate::config::{City, Day};

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    START_TIME,
    START_STATION,
    END_STATION,
    TRIP_DURATION,
    USER_TYPE,
];

/// A single rental with its derived calendar and route fields.
///
/// The derived fields are computed once in [`Trip::new`] and never touched
/// again.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: Option<String>,
    pub start_station: String,
    pub end_station: String,
    pub duration_secs: f64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived
    pub month: u32,
    pub weekday: Weekday,
    pub hour: u32,
    pub station_combo: String,
}

impl Trip {
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        duration_secs: f64,
    ) -> Self {
        let start_station = start_station.into();
        let end_station = end_station.into();
        let station_combo = format!("{} to {}", start_station, end_station);

        Trip {
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
            start_time,
            end_time: None,
            start_station,
            end_station,
            duration_secs,
            user_type: None,
            gender: None,
            birth_year: None,
            station_combo,
        }
    }

    pub fn with_end_time(mut self, end_time: Option<String>) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn with_user_type(mut self, user_type: Option<String>) -> Self {
        self.user_type = user_type;
        self
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    /// Capitalized weekday name, e.g. `"Monday"`.
    pub fn weekday_name(&self) -> &'static str {
        Day::from(self.weekday).name()
    }
}

/// Which optional demographic columns a city file carries.
///
/// Checked once from the header row; optional columns are present for all
/// rows of a city or for none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let has = |name: &str| headers.iter().any(|h| h.trim() == name);
        Schema {
            has_gender: has(GENDER),
            has_birth_year: has(BIRTH_YEAR),
        }
    }

    /// Returns the first required column missing from `headers`, if any.
    pub fn missing_required(headers: &StringRecord) -> Option<&'static str> {
        REQUIRED_COLUMNS
            .into_iter()
            .find(|required| !headers.iter().any(|h| h.trim() == *required))
    }
}

/// All trips of one city, in file order, sharing one [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    city: City,
    schema: Schema,
    trips: Vec<Trip>,
}

impl TripTable {
    pub fn new(city: City, schema: Schema, trips: Vec<Trip>) -> Self {
        Self {
            city,
            schema,
            trips,
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }

    /// The first `n` trips, or all of them if the table is shorter.
    pub fn head(&self, n: usize) -> &[Trip] {
        &self.trips[..n.min(self.trips.len())]
    }

    /// Builds a new table holding the trips that satisfy `keep`, in order.
    pub fn retain_from<F>(&self, mut keep: F) -> TripTable
    where
        F: FnMut(&Trip) -> bool,
    {
        TripTable {
            city: self.city,
            schema: self.schema,
            trips: self.trips.iter().filter(|t| keep(t)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TripTable {
    type Item = &'a Trip;
    type IntoIter = std::slice::Iter<'a, Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.trips.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_trip_derives_fields() {
        let trip = Trip::new(at(2017, 6, 23, 15), "Wood St", "Damen Ave", 321.0);

        assert_eq!(trip.month, 6);
        assert_eq!(trip.weekday, Weekday::Fri);
        assert_eq!(trip.weekday_name(), "Friday");
        assert_eq!(trip.hour, 15);
        assert_eq!(trip.station_combo, "Wood St to Damen Ave");
    }

    #[test]
    fn test_schema_from_headers() {
        let full = StringRecord::from(vec![
            "",
            "Start Time",
            "Trip Duration",
            "Gender",
            "Birth Year",
        ]);
        let schema = Schema::from_headers(&full);
        assert!(schema.has_gender);
        assert!(schema.has_birth_year);

        let bare = StringRecord::from(vec!["Start Time", "Trip Duration"]);
        assert_eq!(Schema::from_headers(&bare), Schema::default());
    }

    #[test]
    fn test_missing_required_column() {
        let headers = StringRecord::from(vec![
            "Start Time",
            "Start Station",
            "End Station",
            "User Type",
        ]);
        assert_eq!(Schema::missing_required(&headers), Some(TRIP_DURATION));
    }

    #[test]
    fn test_head_is_bounded() {
        let trips = vec![
            Trip::new(at(2017, 1, 2, 8), "A", "B", 1.0),
            Trip::new(at(2017, 1, 3, 9), "B", "A", 2.0),
        ];
        let table = TripTable::new(City::Chicago, Schema::default(), trips);

        assert_eq!(table.head(5).len(), 2);
        assert_eq!(table.head(1)[0].start_station, "A");
    }

    #[test]
    fn test_retain_from_preserves_order_and_source() {
        let trips = vec![
            Trip::new(at(2017, 1, 2, 8), "A", "B", 1.0),
            Trip::new(at(2017, 2, 3, 9), "B", "A", 2.0),
            Trip::new(at(2017, 1, 4, 10), "C", "A", 3.0),
        ];
        let table = TripTable::new(City::Chicago, Schema::default(), trips);
        let january = table.retain_from(|t| t.month == 1);

        assert_eq!(table.len(), 3);
        assert_eq!(january.len(), 2);
        assert_eq!(january.trips()[0].start_station, "A");
        assert_eq!(january.trips()[1].start_station, "C");
    }
}
