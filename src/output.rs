//! Console and JSON rendering for trip reports.
//!
//! Every report section is written with its elapsed computation time and a
//! dashed separator line. Renderers take any [`Write`] so they can be
//! pointed at stdout or a buffer.

use std::fmt::Display;
use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use tracing::debug;

use crate::config::SEPARATOR_WIDTH;
use crate::stats::{
    Availability, CategoryCounts, DurationStats, Report, Stat, StationStats, TimeStats, UserStats,
    station_stats, time_stats, trip_duration_stats, user_stats,
};
use crate::trip::{self, TripTable};

const NO_DATA: &str = "no data for the selected filters";

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

fn show<T: Display>(stat: &Stat<T>) -> String {
    match stat {
        Stat::Value(v) => v.to_string(),
        Stat::NoData => NO_DATA.to_string(),
    }
}

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Writes a report as pretty-printed JSON.
pub fn write_json<W: Write>(w: &mut W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, report)?;
    writeln!(w)?;
    Ok(())
}

/// Writes the first `rows` trips with their source columns only.
pub fn write_preview<W: Write>(w: &mut W, table: &TripTable, rows: usize) -> io::Result<()> {
    let schema = table.schema();

    let mut header = vec![
        trip::START_TIME,
        trip::END_TIME,
        trip::TRIP_DURATION,
        trip::START_STATION,
        trip::END_STATION,
        trip::USER_TYPE,
    ];
    if schema.has_gender {
        header.push(trip::GENDER);
    }
    if schema.has_birth_year {
        header.push(trip::BIRTH_YEAR);
    }
    writeln!(w, "{}", header.join(" | "))?;

    for t in table.head(rows) {
        let mut cells = vec![
            t.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            t.end_time.clone().unwrap_or_default(),
            t.duration_secs.to_string(),
            t.start_station.clone(),
            t.end_station.clone(),
            t.user_type.clone().unwrap_or_default(),
        ];
        if schema.has_gender {
            cells.push(t.gender.clone().unwrap_or_default());
        }
        if schema.has_birth_year {
            cells.push(t.birth_year.map(|y| y.to_string()).unwrap_or_default());
        }
        writeln!(w, "{}", cells.join(" | "))?;
    }

    if table.is_empty() {
        writeln!(w, "(no records match the selected filters)")?;
    }
    Ok(())
}

pub fn write_time_stats<W: Write>(w: &mut W, stats: &TimeStats) -> io::Result<()> {
    writeln!(w, "Most Common Month:  {}", show(&stats.most_common_month))?;
    writeln!(w, "Most Common Weekday:  {}", show(&stats.most_common_weekday))?;
    writeln!(w, "Most Common Hour of Day:  {}", show(&stats.most_common_hour))
}

pub fn write_station_stats<W: Write>(w: &mut W, stats: &StationStats) -> io::Result<()> {
    writeln!(
        w,
        "Most Common Starting Station:  {}",
        show(&stats.most_common_start_station)
    )?;
    writeln!(
        w,
        "Most Common Ending Station:  {}",
        show(&stats.most_common_end_station)
    )?;
    writeln!(
        w,
        "Most Common Station Combination:  {}",
        show(&stats.most_common_combination)
    )
}

pub fn write_duration_stats<W: Write>(w: &mut W, stats: &DurationStats) -> io::Result<()> {
    writeln!(w, "Total Travel Time: {}", show(&stats.total))?;
    writeln!(w, "Average Travel Time: {}", show(&stats.mean))
}

fn write_counts<W: Write>(
    w: &mut W,
    header: &str,
    counts: &Stat<CategoryCounts>,
) -> io::Result<()> {
    writeln!(w, "{header}")?;
    match counts {
        Stat::Value(counts) => {
            for (category, count) in counts {
                writeln!(w, "    {category}\t: {count}")?;
            }
            Ok(())
        }
        Stat::NoData => writeln!(w, "    {NO_DATA}"),
    }
}

pub fn write_user_stats<W: Write>(w: &mut W, stats: &UserStats) -> io::Result<()> {
    write_counts(w, "User Type Counts", &stats.user_types)?;

    match &stats.genders {
        Availability::Available(genders) => write_counts(w, "Gender Counts", genders)?,
        Availability::NotAvailable => writeln!(w, "Selected city does not have gender data.")?,
    }

    match &stats.birth_years {
        Availability::Available(Stat::Value(years)) => {
            writeln!(w, "Earliest User Birth Year:  {}", years.earliest)?;
            writeln!(w, "Most Recent User Birth Year:  {}", years.most_recent)?;
            writeln!(w, "Most Common User Birth Year:  {}", years.most_common)
        }
        Availability::Available(Stat::NoData) => writeln!(w, "Birth Year:  {NO_DATA}"),
        Availability::NotAvailable => writeln!(w, "Selected city does not have birth year data."),
    }
}

/// Computes and writes one section, reporting how long it took.
fn timed_section<W, T, C, R>(w: &mut W, title: &str, compute: C, render: R) -> io::Result<T>
where
    W: Write,
    C: FnOnce() -> T,
    R: FnOnce(&mut W, &T) -> io::Result<()>,
{
    writeln!(w, "\n{title}\n")?;
    let start = Instant::now();

    let result = compute();
    render(&mut *w, &result)?;

    let elapsed = start.elapsed().as_secs_f64();
    debug!(section = title, elapsed, "Section computed");
    writeln!(w, "\nThis took {elapsed:.6} seconds.")?;
    writeln!(w, "{}", separator())?;
    Ok(result)
}

/// Computes and writes all four sections, returning the collected report.
pub fn write_report<W: Write>(w: &mut W, table: &TripTable) -> io::Result<Report> {
    let time = timed_section(
        w,
        "Calculating The Most Frequent Times of Travel...",
        || time_stats(table),
        |w, s| write_time_stats(w, s),
    )?;
    let stations = timed_section(
        w,
        "Calculating The Most Popular Stations and Trip...",
        || station_stats(table),
        |w, s| write_station_stats(w, s),
    )?;
    let durations = timed_section(
        w,
        "Calculating Trip Duration...",
        || trip_duration_stats(table),
        |w, s| write_duration_stats(w, s),
    )?;
    let users = timed_section(
        w,
        "Calculating User Stats...",
        || user_stats(table),
        |w, s| write_user_stats(w, s),
    )?;

    Ok(Report {
        city: table.city(),
        trips: table.len(),
        time,
        stations,
        durations,
        users,
    })
}
