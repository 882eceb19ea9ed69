// src/specs/activities.rs
//! Activities table of the day.
//!
//! Layout: one `<tr>` per activity after a header row, six `<td>` cells:
//! time of day, kcal, duration, distance, type, name (with a link to the
//! activity page). Some page variants append a totals row; it has no link
//! and fails the key columns, so it is skipped like any other broken row.
//!
//! Isolation is per row: one bad row is dropped and logged, the rest stay.
//! The flat CSV row carries totals only, so every day has the same columns
//! no matter how many activities it holds.

use std::time::Duration;

use scraper::ElementRef;
use serde_json::Value;

use super::{is_unavailable, Section};
use crate::config::consts::{GARMIN_CONNECT_URL, GPX_EXPORT_PATH};
use crate::core::ScalarValue;
use crate::core::html::{attr, find_all, find_first, parse_fragment, text_of};
use crate::core::sanitize::{last_path_segment, text_before};
use crate::core::scalar::{parse_clock_time_12h, parse_duration, parse_locale_number, zero_duration};
use crate::dict::{Dict, FieldValue, FlatRow};
use crate::error::ParseError;

/// Columns every activity row must have.
const COLUMNS: usize = 6;

#[derive(Clone, Debug, PartialEq)]
pub struct Activity {
    /// Clock time, or the raw cell text when it isn't a 12h time.
    pub time_day: ScalarValue,
    pub kcal: f64,
    pub duration: Duration,
    pub distance: f64,
    pub kind: String,
    pub name: String,
    pub url: String,
    pub gpx: String,
}

impl Activity {
    pub fn to_dict(&self) -> Dict {
        Dict::new()
            .with("time_day", Some(self.time_day.clone()))
            .with("kcal", Some(ScalarValue::Number(self.kcal)))
            .with("duration", Some(ScalarValue::Duration(self.duration)))
            .with("distance", Some(ScalarValue::Number(self.distance)))
            .with("type", Some(ScalarValue::Text(self.kind.clone())))
            .with("name", Some(ScalarValue::Text(self.name.clone())))
            .with("url", Some(ScalarValue::Text(self.url.clone())))
            .with("gpx", Some(ScalarValue::Text(self.gpx.clone())))
    }

    /// Column order of `to_dict`, for per-activity exports.
    pub const FIELDS: [&'static str; 8] =
        ["time_day", "kcal", "duration", "distance", "type", "name", "url", "gpx"];
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActivityTotals {
    pub kcal: f64,
    pub duration: Duration,
    pub distance: f64,
}

impl ActivityTotals {
    pub fn to_dict(&self) -> Dict {
        Dict::new()
            .with("kcal", Some(ScalarValue::Number(self.kcal)))
            .with("duration", Some(ScalarValue::Duration(self.duration)))
            .with("distance", Some(ScalarValue::Number(self.distance)))
    }
}

/// A table row that did not make it into the list.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRow {
    /// Row index in the table, header included.
    pub index: usize,
    pub error: ParseError,
}

#[derive(Clone, Debug)]
pub struct Activities {
    html: String,
    base_url: String,
    activities: Vec<Activity>,
    skipped: Vec<SkippedRow>,
}

impl Activities {
    pub const TAG: &'static str = "ACTIVITIES";
    pub const KEY: &'static str = "activities";

    pub fn new(raw_html: impl Into<String>) -> Self {
        Self {
            html: raw_html.into(),
            base_url: s!(GARMIN_CONNECT_URL),
            activities: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Site root used for activity links (regional hosts differ). GPX export
    /// links always point at the main site.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = s!(base_url.trim_end_matches('/'));
        self
    }

    pub fn entries(&self) -> &[Activity] { &self.activities }
    pub fn skipped(&self) -> &[SkippedRow] { &self.skipped }

    // `fold` from +0.0: `sum()` over nothing gives -0.0 and prints "-0".
    pub fn total_kcal(&self) -> f64 {
        self.activities.iter().fold(0.0, |acc, a| acc + a.kcal)
    }

    pub fn total_duration(&self) -> Duration {
        self.activities
            .iter()
            .fold(Duration::ZERO, |acc, a| acc.saturating_add(a.duration))
    }

    pub fn total_distance(&self) -> f64 {
        self.activities.iter().fold(0.0, |acc, a| acc + a.distance)
    }

    pub fn totals(&self) -> ActivityTotals {
        ActivityTotals {
            kcal: self.total_kcal(),
            duration: self.total_duration(),
            distance: self.total_distance(),
        }
    }

    pub fn totals_dict(&self) -> Dict {
        self.totals().to_dict()
    }

    fn parse_activity(&self, row: ElementRef<'_>) -> Result<Activity, ParseError> {
        let cells = find_all(row, "td")?;
        if cells.len() < COLUMNS {
            return Err(ParseError::Missing("td"));
        }

        let time_text = text_of(cells[0]);
        let time_day = parse_clock_time_12h(&time_text)
            .map(ScalarValue::ClockTime)
            .unwrap_or_else(|_| ScalarValue::Text(time_text));

        let kcal = parse_locale_number(&text_of(cells[1]))?;

        // Summed downstream; an unreadable duration counts as zero.
        let duration = parse_duration(&text_of(cells[2])).unwrap_or_else(|e| {
            logd!("Activities: {e}, using zero duration");
            zero_duration()
        });

        let distance = parse_locale_number(text_before(&text_of(cells[3]), "km"))?;

        let link = find_first(cells[5], "a")?;
        let href = attr(link, "href")?;

        Ok(Activity {
            time_day,
            kcal,
            duration,
            distance,
            kind: text_of(cells[4]),
            name: text_of(cells[5]),
            url: self.absolute_url(href),
            gpx: format!("{GARMIN_CONNECT_URL}{GPX_EXPORT_PATH}{}", last_path_segment(href)),
        })
    }

    fn absolute_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            s!(href)
        } else if href.starts_with('/') {
            format!("{}{}", self.base_url, href)
        } else {
            format!("{}/{}", self.base_url, href)
        }
    }
}

impl Section for Activities {
    fn tag(&self) -> &'static str { Self::TAG }
    fn key(&self) -> &'static str { Self::KEY }

    fn parse(&mut self) {
        self.activities.clear();
        self.skipped.clear();
        if is_unavailable(&self.html) {
            return;
        }

        let doc = parse_fragment(&self.html);
        let rows = match find_all(doc.root_element(), "tr") {
            Ok(rows) => rows,
            Err(e) => {
                loge!("Activities: {e}");
                return;
            }
        };

        let mut parsed = Vec::with_capacity(rows.len().saturating_sub(1));
        let mut skipped = Vec::new();
        // Row 0 is the header.
        for (index, row) in rows.into_iter().enumerate().skip(1) {
            match self.parse_activity(row) {
                Ok(a) => parsed.push(a),
                Err(error) => {
                    logd!("Activities: skipping row {index}: {error}");
                    skipped.push(SkippedRow { index, error });
                }
            }
        }
        self.activities = parsed;
        self.skipped = skipped;
    }

    fn to_dict(&self) -> Dict {
        let list = self.activities.iter().map(Activity::to_dict).collect();
        Dict::new().with("activities", FieldValue::List(list))
    }

    fn to_flat_row(&self) -> FlatRow {
        let mut row = FlatRow::new();
        for (k, v) in self.totals_dict().iter() {
            let cell = v.as_scalar().map(ToString::to_string).unwrap_or_default();
            row.push(tagged!(Self::TAG, k), cell);
        }
        row
    }

    /// A plain list of stringified activities.
    fn to_json(&self) -> Value {
        Value::Array(self.activities.iter().map(|a| a.to_dict().to_string_json()).collect())
    }
}
