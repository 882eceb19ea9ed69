// src/specs/steps_detail.rs
//! 15-minute step bins.
//!
//! Input is JSON text (not HTML): an array of `{"startGMT": "...", "steps": N}`.
//! The fetch side may hand over bins from the neighbouring days too, to cover
//! windows that cross midnight. Whatever arrives is normalized in input order.
//!
//! Bins are too many for the flat row; they go to per-day side files instead.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{is_unavailable, Section};
use crate::core::ScalarValue;
use crate::dict::{Dict, FieldValue, FlatRow};
use crate::error::ParseError;

const IN_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const OUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepBin {
    /// `YYYY-MM-DD HH:MM:SS`, GMT.
    pub time: String,
    pub steps: u64,
}

impl StepBin {
    pub fn to_dict(&self) -> Dict {
        Dict::new()
            .with("time", Some(ScalarValue::Text(self.time.clone())))
            .with("steps", Some(ScalarValue::Number(self.steps as f64)))
    }
}

#[derive(Clone, Debug)]
pub struct StepsDetail {
    raw: String,
    bins: Vec<StepBin>,
    skipped: usize,
    error: Option<ParseError>,
}

impl StepsDetail {
    pub const TAG: &'static str = "STEPS DETAILS";
    pub const KEY: &'static str = "steps details";

    pub fn new(raw_json: impl Into<String>) -> Self {
        Self { raw: raw_json.into(), bins: Vec::new(), skipped: 0, error: None }
    }

    pub fn bins(&self) -> &[StepBin] { &self.bins }

    /// Entries dropped during the last parse.
    pub fn skipped(&self) -> usize { self.skipped }

    /// Why the whole payload was unusable, if it was.
    pub fn error(&self) -> Option<&ParseError> { self.error.as_ref() }

    /// Lazily normalize the raw payload. Restartable: every call decodes afresh.
    pub fn normalized(&self) -> Result<impl Iterator<Item = Result<StepBin, ParseError>> + use<>, ParseError> {
        let entries: Vec<Value> = serde_json::from_str(&self.raw)
            .map_err(|e| ParseError::MalformedJson(e.to_string()))?;
        Ok(entries.into_iter().map(|v| normalize_bin(&v)))
    }
}

impl Section for StepsDetail {
    fn tag(&self) -> &'static str { Self::TAG }
    fn key(&self) -> &'static str { Self::KEY }

    fn parse(&mut self) {
        self.bins.clear();
        self.skipped = 0;
        self.error = None;

        if is_unavailable(&self.raw) {
            self.error = Some(ParseError::Unavailable);
            return;
        }

        let iter = match self.normalized() {
            Ok(iter) => iter,
            Err(e) => {
                logd!("Steps details: {e}");
                self.error = Some(e);
                return;
            }
        };

        let mut bins = Vec::new();
        let mut skipped = 0;
        for bin in iter {
            match bin {
                Ok(b) => bins.push(b),
                Err(e) => {
                    logd!("Steps details: skipping bin: {e}");
                    skipped += 1;
                }
            }
        }
        self.bins = bins;
        self.skipped = skipped;
    }

    fn to_dict(&self) -> Dict {
        let list = self.bins.iter().map(StepBin::to_dict).collect();
        Dict::new().with("15-min bins", FieldValue::List(list))
    }

    fn to_flat_row(&self) -> FlatRow {
        FlatRow::new()
    }

    fn to_json(&self) -> Value {
        Value::Array(self.bins.iter().map(|b| b.to_dict().to_string_json()).collect())
    }
}

fn normalize_bin(v: &Value) -> Result<StepBin, ParseError> {
    let start = v
        .get("startGMT")
        .and_then(Value::as_str)
        .ok_or(ParseError::Missing("startGMT"))?;
    let steps = v.get("steps").ok_or(ParseError::Missing("steps"))?;

    Ok(StepBin {
        time: canonical_timestamp(start)?,
        steps: step_count(steps)?,
    })
}

/// `2017-03-29T00:15:00.0` → `2017-03-29 00:15:00`
pub fn canonical_timestamp(raw: &str) -> Result<String, ParseError> {
    let trimmed = raw.trim();
    let whole_secs = trimmed.split('.').next().unwrap_or(trimmed);
    NaiveDateTime::parse_from_str(whole_secs, IN_FORMAT)
        .map(|dt| dt.format(OUT_FORMAT).to_string())
        .map_err(|_| ParseError::MalformedTime(s!(trimmed)))
}

fn step_count(v: &Value) -> Result<u64, ParseError> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
            .ok_or_else(|| ParseError::MalformedNumber(n.to_string())),
        Value::String(s) => normalize_step_count(s),
        other => Err(ParseError::MalformedNumber(other.to_string())),
    }
}

/// `"1.234"` → 1234, `"87.0"` → 87.
pub fn normalize_step_count(raw: &str) -> Result<u64, ParseError> {
    let t = raw.trim();
    let t = t.strip_suffix(".0").unwrap_or(t);
    let digits = t.replace('.', "");
    digits
        .parse::<u64>()
        .map_err(|_| ParseError::MalformedNumber(s!(raw)))
}
