// src/error.rs
use std::path::PathBuf;

use chrono::NaiveDate;

/// Field-level failures. Sections absorb these; they never escape `DayRecord::parse`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed number: {0:?}")]
    MalformedNumber(String),
    #[error("Malformed duration: {0:?}")]
    MalformedDuration(String),
    #[error("Malformed time: {0:?}")]
    MalformedTime(String),
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),
    #[error("Nothing matched {0}")]
    Missing(&'static str),
    #[error("Invalid selector {0:?}")]
    BadSelector(&'static str),
    #[error("Section unavailable")]
    Unavailable,
    #[error("Not parsed yet")]
    NotParsed,
}

/// Errors raised by the fetch collaborator. Propagated to the caller unmodified.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("No markup for {date} (looked in {})", path.display())]
    DayNotFound { date: NaiveDate, path: PathBuf },
    #[error("Reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Nothing to export: the collected day range is empty")]
    EmptyResultSet,
    #[error("Path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
