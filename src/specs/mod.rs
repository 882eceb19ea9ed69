// src/specs/mod.rs
//! # Section “specs” module
//!
//! Each spec owns one section of the Garmin Connect daily summary and encodes
//! *where the values live in the markup* and *how to normalize them*.
//!
//! ## What lives here
//! - **Pure markup parsing** of one fragment per section (summary, steps,
//!   steps details, sleep, activities, breakdown), plus `page::split_day_page`
//!   which cuts a full captured page into those fragments.
//! - **Fixed locators**: CSS class/id signatures of the upstream markup.
//! - **Per-field isolation**: every value is a `Field<T>` holding a
//!   `Result<T, ParseError>`. One failed locator leaves one field null;
//!   its siblings still parse. Activities and step bins isolate per row.
//!
//! ## What does **not** live here
//! - Fetching, retries, login (the `fetch` layer and its collaborators).
//! - File output (`file`, `csv`).
//! - Cross-section composition (`day::DayRecord`).
//!
//! ## Conventions & invariants
//! - `parse()` is idempotent: it re-derives every field from the raw fragment.
//! - An empty fragment is a valid input ("section unavailable"); all fields
//!   end up null and nothing panics.
//! - `to_flat_row()` always emits every known key, so all days share one
//!   CSV header.
//!
//! ## Testing notes
//! Specs are tested offline against small inline fixtures that follow the
//! upstream layout.

use crate::core::ScalarValue;
use crate::dict::{Dict, FieldValue, FlatRow};
use crate::error::ParseError;

pub mod activities;
pub mod breakdown;
pub mod page;
pub mod sleep;
pub mod steps;
pub mod steps_detail;
pub mod summary;

pub use activities::{Activities, Activity, ActivityTotals};
pub use breakdown::Breakdown;
pub use sleep::Sleep;
pub use steps::Steps;
pub use steps_detail::{StepBin, StepsDetail};
pub use summary::Summary;

/// Common capability of every day section.
pub trait Section {
    /// CSV key prefix, e.g. `SUMMARY`.
    fn tag(&self) -> &'static str;

    /// Key in the nested/JSON document, e.g. `summary`.
    fn key(&self) -> &'static str;

    /// Re-derive every field from the raw fragment.
    fn parse(&mut self);

    fn to_dict(&self) -> Dict;

    /// `"<TAG>:<field>"` → stringified value; null becomes an empty cell.
    fn to_flat_row(&self) -> FlatRow {
        let mut row = FlatRow::new();
        for (k, v) in self.to_dict().iter() {
            let cell = v.as_scalar().map(ToString::to_string).unwrap_or_default();
            row.push(tagged!(self.tag(), k), cell);
        }
        row
    }

    /// Section value inside `DayRecord::to_json`.
    fn to_json(&self) -> serde_json::Value {
        self.to_dict().to_string_json()
    }
}

/// One extracted value, or the reason it is missing.
#[derive(Clone, Debug, PartialEq)]
pub struct Field<T>(Result<T, ParseError>);

impl<T> Default for Field<T> {
    fn default() -> Self { Field(Err(ParseError::NotParsed)) }
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> { self.0.as_ref().ok() }
    pub fn error(&self) -> Option<&ParseError> { self.0.as_ref().err() }
    pub fn result(&self) -> &Result<T, ParseError> { &self.0 }
    pub fn is_set(&self) -> bool { self.0.is_ok() }

    pub(crate) fn set(&mut self, r: Result<T, ParseError>) { self.0 = r; }
}

impl<T: Clone + Into<ScalarValue>> Field<T> {
    pub fn to_value(&self) -> FieldValue {
        match self.value() {
            Some(v) => FieldValue::Scalar(v.clone().into()),
            None => FieldValue::Null,
        }
    }
}

impl<T: Copy> Field<T> {
    pub fn get(&self) -> Option<T> { self.value().copied() }
}

/// True when a fragment carries no markup at all.
pub(crate) fn is_unavailable(html: &str) -> bool {
    html.trim().is_empty()
}
