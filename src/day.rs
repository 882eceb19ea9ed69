// src/day.rs
//
// One calendar day: the six sections plus the date.
//
// Lifecycle: build from raw markup → parse() once (or again, it is idempotent)
// → read through the serializers. Raw markup stays as owned text until
// parse(), so a record can cross threads.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::config::consts::DATE_FORMAT;
use crate::dict::{Dict, FieldValue, FlatRow};
use crate::specs::{Activities, Breakdown, Section, Sleep, Steps, StepsDetail, Summary};

/// Raw per-section input for one day, as the fetch side hands it over.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DayMarkup {
    pub summary: String,
    pub steps: String,
    /// JSON text, not HTML.
    pub steps_details: String,
    pub sleep: String,
    pub activities: String,
    pub breakdown: String,
}

#[derive(Clone, Debug)]
pub struct DayRecord {
    date: NaiveDate,
    summary: Summary,
    steps: Steps,
    steps_details: StepsDetail,
    sleep: Sleep,
    activities: Activities,
    breakdown: Breakdown,
}

impl DayRecord {
    pub fn new(date: NaiveDate, markup: DayMarkup) -> Self {
        Self {
            date,
            summary: Summary::new(markup.summary),
            steps: Steps::new(markup.steps),
            steps_details: StepsDetail::new(markup.steps_details),
            sleep: Sleep::new(markup.sleep),
            activities: Activities::new(markup.activities),
            breakdown: Breakdown::new(markup.breakdown),
        }
    }

    /// Site root for activity links.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.activities = self.activities.with_base_url(base_url);
        self
    }

    pub fn date(&self) -> NaiveDate { self.date }

    /// `YYYY-MM-DD`
    pub fn date_key(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn summary(&self) -> &Summary { &self.summary }
    pub fn steps(&self) -> &Steps { &self.steps }
    pub fn steps_details(&self) -> &StepsDetail { &self.steps_details }
    pub fn sleep(&self) -> &Sleep { &self.sleep }
    pub fn activities(&self) -> &Activities { &self.activities }
    pub fn breakdown(&self) -> &Breakdown { &self.breakdown }

    /// All six sections in output order.
    pub fn sections(&self) -> [&dyn Section; 6] {
        [
            &self.summary,
            &self.steps,
            &self.steps_details,
            &self.sleep,
            &self.activities,
            &self.breakdown,
        ]
    }

    fn sections_mut(&mut self) -> [&mut dyn Section; 6] {
        [
            &mut self.summary,
            &mut self.steps,
            &mut self.steps_details,
            &mut self.sleep,
            &mut self.activities,
            &mut self.breakdown,
        ]
    }

    /// Look a section up by its nested-document key.
    pub fn section(&self, key: &str) -> Option<&dyn Section> {
        self.sections().into_iter().find(|s| s.key() == key)
    }

    /// Never fails; field problems end up as nulls.
    pub fn parse(&mut self) {
        for s in self.sections_mut() {
            s.parse();
        }
        logd!(
            "Parsed {}: {} activities ({} skipped), {} step bins",
            self.date_key(),
            self.activities.entries().len(),
            self.activities.skipped().len(),
            self.steps_details.bins().len(),
        );
    }

    /// Section key → section dict, every section included.
    pub fn to_nested_dict(&self) -> Dict {
        let mut d = Dict::new();
        for s in self.sections() {
            d.insert(s.key(), FieldValue::Dict(s.to_dict()));
        }
        d
    }

    /// `date` first, then every section's cells. Step bins contribute nothing.
    pub fn to_flat_row(&self) -> FlatRow {
        let mut row = FlatRow::new();
        row.push(s!("date"), self.date_key());
        for s in self.sections() {
            row.extend(s.to_flat_row());
        }
        row
    }

    /// `{"<date>": {<key>: <stringified section>}}`. Step bins are left to
    /// their side files.
    pub fn to_json(&self) -> Value {
        let mut inner = Map::new();
        for s in self.sections() {
            if s.key() == StepsDetail::KEY {
                continue;
            }
            inner.insert(s!(s.key()), s.to_json());
        }
        let mut outer = Map::new();
        outer.insert(self.date_key(), Value::Object(inner));
        Value::Object(outer)
    }
}
