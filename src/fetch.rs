// src/fetch.rs
//
// The fetch boundary. Whatever produces the raw markup (a browser session, a
// capture on disk) implements `DayFetcher`; the rest of the crate only sees
// `DayMarkup`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::consts::*;
use crate::day::DayMarkup;
use crate::error::FetchError;
use crate::specs::page::split_day_page;

pub trait DayFetcher {
    /// Raw markup for one date. Errors propagate to the collector unchanged.
    fn fetch_day(&self, date: NaiveDate) -> Result<DayMarkup, FetchError>;
}

/// Reads captured pages from `<root>/<YYYY-MM-DD>/`.
///
/// A day directory holds either `day.html` (the whole page, cut with
/// `split_day_page`) or one file per section. `steps_details.json` is optional
/// in both layouts. A missing section file reads as an unavailable section;
/// a missing day directory is an error.
#[derive(Clone, Debug)]
pub struct SnapshotFetcher {
    root: PathBuf,
}

impl SnapshotFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn day_dir(&self, date: NaiveDate) -> PathBuf {
        self.root.join(date.format(DATE_FORMAT).to_string())
    }
}

impl DayFetcher for SnapshotFetcher {
    fn fetch_day(&self, date: NaiveDate) -> Result<DayMarkup, FetchError> {
        let dir = self.day_dir(date);
        if !dir.is_dir() {
            return Err(FetchError::DayNotFound { date, path: dir });
        }

        let page = read_optional(&dir.join(DAY_PAGE_FILE))?;
        let mut markup = if page.is_empty() {
            DayMarkup {
                summary: read_optional(&dir.join(SUMMARY_FILE))?,
                steps: read_optional(&dir.join(STEPS_FILE))?,
                steps_details: s!(),
                sleep: read_optional(&dir.join(SLEEP_FILE))?,
                activities: read_optional(&dir.join(ACTIVITIES_FILE))?,
                breakdown: read_optional(&dir.join(BREAKDOWN_FILE))?,
            }
        } else {
            split_day_page(&page)
        };
        markup.steps_details = read_optional(&dir.join(STEPS_DETAILS_FILE))?;

        logd!("Fetched {} from {}", date, dir.display());
        Ok(markup)
    }
}

// Missing file → empty text.
fn read_optional(path: &Path) -> Result<String, FetchError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(s!()),
        Err(source) => Err(FetchError::Io { path: path.to_path_buf(), source }),
    }
}
