//! Error types for loading trip data and parsing user selections.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while turning a city's CSV source into a trip table.
///
/// Any of these aborts the current load; no partially loaded table is
/// ever returned.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("failed to open {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required column `{column}`")]
    MissingColumn { column: &'static str },

    #[error("invalid record on line {line}")]
    InvalidRecord {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("malformed start time {value:?} on line {line}")]
    MalformedTimestamp { line: u64, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A month or weekday choice that is not part of the fixed enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized {kind}: {value:?}")]
pub struct SelectorError {
    pub kind: &'static str,
    pub value: String,
}

pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_timestamp_message_names_line_and_value() {
        let err = LoadError::MalformedTimestamp {
            line: 7,
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed start time \"yesterday\" on line 7"
        );
    }

    #[test]
    fn test_selector_error_message() {
        let err = SelectorError {
            kind: "month",
            value: "july".to_string(),
        };
        assert_eq!(err.to_string(), "unrecognized month: \"july\"");
    }
}
