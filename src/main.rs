//! CLI entry point for the bikeshare explorer.
//!
//! Runs the interactive explore loop by default, or a single report for a
//! city and optional month/day given on the command line.

use anyhow::Result;
use bikeshare_explorer::{
    config::{City, Day, Month, PREVIEW_ROWS, Selection, Settings},
    loader::load_data,
    output::{print_pretty, separator, write_json, write_preview, write_report},
    prompt::Prompt,
    stats::Report,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory holding the city CSV files (overrides BIKESHARE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick a city and filters, then print statistics
    Explore,
    /// Print statistics for one city without prompting
    Report {
        #[arg(short, long, value_enum)]
        city: City,

        /// Only include trips starting in this month
        #[arg(short, long, value_enum)]
        month: Option<Month>,

        /// Only include trips starting on this weekday
        #[arg(short, long, value_enum)]
        day: Option<Day>,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Show this many raw records before the report
        #[arg(short, long)]
        preview: Option<usize>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_explorer.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_explorer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(dir) = cli.data_dir {
        settings = settings.with_data_dir(dir);
    }
    info!(data_dir = %settings.data_dir.display(), "Settings resolved");

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => explore(&settings)?,
        Commands::Report {
            city,
            month,
            day,
            json,
            preview,
        } => {
            let selection = Selection::new(city, month.into(), day.into());
            report(&settings, &selection, json, preview)?;
        }
    }

    Ok(())
}

/// Loads one selection and prints its report to stdout.
fn report(
    settings: &Settings,
    selection: &Selection,
    json: bool,
    preview: Option<usize>,
) -> Result<()> {
    let table = load_data(settings, selection)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(rows) = preview {
        write_preview(&mut out, &table, rows)?;
    }

    if json {
        let report = Report::from_table(&table);
        print_pretty(&report);
        write_json(&mut out, &report)?;
    } else {
        let report = write_report(&mut out, &table)?;
        print_pretty(&report);
    }
    Ok(())
}

/// Runs load-filter-report cycles until the user declines to restart or
/// input ends.
fn explore(settings: &Settings) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompt = Prompt::new(stdin.lock(), stdout.lock());

    writeln!(prompt.output(), "Hello! Let's explore some US bikeshare data!")?;

    loop {
        match run_cycle(settings, &mut prompt) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                info!("Input closed, leaving");
                break;
            }
            Err(e) => return Err(e.into()),
        }

        if !prompt.ask_restart()? {
            break;
        }
    }

    Ok(())
}

/// One interactive cycle. A failed load is reported and ends the cycle
/// without a report.
fn run_cycle<R: BufRead, W: Write>(
    settings: &Settings,
    prompt: &mut Prompt<R, W>,
) -> io::Result<()> {
    let selection = prompt.get_filters()?;
    writeln!(prompt.output(), "{}", separator())?;

    let table = match load_data(settings, &selection) {
        Ok(table) => table,
        Err(e) => {
            let e = anyhow::Error::from(e);
            error!(error = %format!("{e:#}"), "Load failed");
            writeln!(prompt.output(), "Could not load data: {e:#}")?;
            return Ok(());
        }
    };

    let question = format!(
        "Would you like to see the first {PREVIEW_ROWS} records of data? Enter yes or no."
    );
    if prompt.ask_yes_no(&question)? {
        write_preview(prompt.output(), &table, PREVIEW_ROWS)?;
    }

    let report = write_report(prompt.output(), &table)?;
    print_pretty(&report);
    Ok(())
}
