use std::fmt;

use serde::Serialize;

/// A number of seconds broken down into whole hours, whole minutes and the
/// remaining seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitDuration {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: f64,
}

impl SplitDuration {
    /// Remaining seconds with any fractional part truncated, never rounded.
    pub fn whole_seconds(&self) -> u64 {
        self.seconds.trunc() as u64
    }
}

impl fmt::Display for SplitDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hours, {} minutes, and {} seconds",
            self.hours,
            self.minutes,
            self.whole_seconds()
        )
    }
}

/// Splits `total` seconds into hours, minutes and seconds.
///
/// `hours * 3600 + minutes * 60 + seconds == total` for any non-negative
/// finite input. Negative or non-finite input is treated as zero.
pub fn split_seconds(total: f64) -> SplitDuration {
    let total = if total.is_finite() && total > 0.0 {
        total
    } else {
        0.0
    };

    let hours = (total / 3600.0).floor();
    let minutes = (total / 60.0).floor() - hours * 60.0;
    let seconds = total % 60.0;

    SplitDuration {
        hours: hours as u64,
        minutes: minutes as u64,
        seconds,
    }
}
