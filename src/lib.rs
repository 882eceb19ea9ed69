// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod dict;
pub mod error;
pub mod specs;

pub mod csv;
pub mod day;
pub mod fetch;
pub mod file;
pub mod progress;
pub mod runner;
pub mod scrape;

#[cfg(feature = "cli")]
pub mod cli;

pub use day::{DayMarkup, DayRecord};
pub use error::{Error, ExportError, FetchError, ParseError};
pub use fetch::{DayFetcher, SnapshotFetcher};
