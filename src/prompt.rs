//! Interactive prompts that collect a validated selection from the user.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::config::{CITY_DATA, City, DayFilter, MONTHS, MonthFilter, Selection, WEEKDAYS};

const ALL: &str = "all";

/// Reads answers from `input` and writes questions to `output`.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Reads one trimmed, lowercased line.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::UnexpectedEof`] once the input is exhausted.
    fn read_answer(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_lowercase())
    }

    /// Asks `message` until the answer is one of `valid` (or `"all"` when
    /// `accept_all` is set). Matching ignores case and surrounding spaces.
    pub fn ask_choice(
        &mut self,
        message: &str,
        valid: &[&str],
        accept_all: bool,
    ) -> io::Result<String> {
        loop {
            writeln!(self.output, "\n{message}")?;
            self.output.flush()?;

            let answer = self.read_answer()?;
            let is_all = answer == ALL;
            if (is_all && accept_all) || (!is_all && valid.contains(&answer.as_str())) {
                return Ok(answer);
            }

            debug!(answer = %answer, "Rejected input");
            writeln!(self.output, "That input is not recognized.")?;
        }
    }

    pub fn ask_yes_no(&mut self, message: &str) -> io::Result<bool> {
        Ok(self.ask_choice(message, &["yes", "no"], false)? == "yes")
    }

    /// Asks whether to start over. Anything but `yes`, including end of
    /// input, means no.
    pub fn ask_restart(&mut self) -> io::Result<bool> {
        writeln!(self.output, "\nWould you like to restart? Enter yes or no.")?;
        self.output.flush()?;
        match self.read_answer() {
            Ok(answer) => Ok(answer == "yes"),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Asks for city, month and day in turn.
    pub fn get_filters(&mut self) -> io::Result<Selection> {
        let cities: Vec<&str> = CITY_DATA.iter().map(|(_, name, _)| *name).collect();

        let city = self.ask_choice(
            "Enter the city to explore (Chicago, New York City, Washington):",
            &cities,
            false,
        )?;
        let month = self.ask_choice(
            "Enter the month (January, February, March, April, May, June, or All):",
            &MONTHS,
            true,
        )?;
        let day = self.ask_choice(
            "Enter the day of week (Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday, or All):",
            &WEEKDAYS,
            true,
        )?;

        let invalid = |e: String| io::Error::new(io::ErrorKind::InvalidInput, e);
        let selection = Selection::new(
            city.parse::<City>().map_err(|e| invalid(e.to_string()))?,
            month.parse::<MonthFilter>().map_err(|e| invalid(e.to_string()))?,
            day.parse::<DayFilter>().map_err(|e| invalid(e.to_string()))?,
        );
        debug!(?selection, "Filters chosen");
        Ok(selection)
    }
}
