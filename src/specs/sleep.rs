// src/specs/sleep.rs
//! Sleep pane: night/nap/total from the equation strip, bed and wake time,
//! and the deep/light/awake split from the three circle charts.
//!
//! The widgets print hours and minutes (`7:30` is seven and a half hours), so
//! durations here go through `parse_hours_minutes`, not `parse_duration`.

use std::time::Duration;

use chrono::NaiveTime;
use scraper::ElementRef;

use super::{is_unavailable, Field, Section};
use crate::core::html::{find_all, find_first, nth_text, parse_fragment, text_of};
use crate::core::sanitize::{first_token, text_before};
use crate::core::scalar::{parse_clock_time_12h, parse_hours_minutes};
use crate::dict::Dict;
use crate::error::ParseError;

const DEEP_CHART: &str = "div.sleep-chart-secondary.deep-sleep-circle-chart-placeholder";
const LIGHT_CHART: &str = "div.sleep-chart-secondary.light-sleep-circle-chart-placeholder";
const AWAKE_CHART: &str = "div.sleep-chart-secondary.awake-circle-chart-placeholder";

#[derive(Clone, Debug)]
pub struct Sleep {
    html: String,
    night_sleep_time: Field<Duration>,
    nap_time: Field<Duration>,
    total_sleep_time: Field<Duration>,
    bed_time: Field<NaiveTime>,
    wake_time: Field<NaiveTime>,
    deep_sleep_time: Field<Duration>,
    light_sleep_time: Field<Duration>,
    awake_sleep_time: Field<Duration>,
}

impl Sleep {
    pub const TAG: &'static str = "SLEEP";
    pub const KEY: &'static str = "sleep";

    pub fn new(raw_html: impl Into<String>) -> Self {
        Self {
            html: raw_html.into(),
            night_sleep_time: Field::default(),
            nap_time: Field::default(),
            total_sleep_time: Field::default(),
            bed_time: Field::default(),
            wake_time: Field::default(),
            deep_sleep_time: Field::default(),
            light_sleep_time: Field::default(),
            awake_sleep_time: Field::default(),
        }
    }

    pub fn night_sleep_time(&self) -> &Field<Duration> { &self.night_sleep_time }
    pub fn nap_time(&self) -> &Field<Duration> { &self.nap_time }
    /// Usually night + nap.
    pub fn total_sleep_time(&self) -> &Field<Duration> { &self.total_sleep_time }
    pub fn bed_time(&self) -> &Field<NaiveTime> { &self.bed_time }
    pub fn wake_time(&self) -> &Field<NaiveTime> { &self.wake_time }
    pub fn deep_sleep_time(&self) -> &Field<Duration> { &self.deep_sleep_time }
    pub fn light_sleep_time(&self) -> &Field<Duration> { &self.light_sleep_time }
    /// Time awake during the night.
    pub fn awake_sleep_time(&self) -> &Field<Duration> { &self.awake_sleep_time }

    fn durations_mut(&mut self) -> [&mut Field<Duration>; 6] {
        [
            &mut self.night_sleep_time,
            &mut self.nap_time,
            &mut self.total_sleep_time,
            &mut self.deep_sleep_time,
            &mut self.light_sleep_time,
            &mut self.awake_sleep_time,
        ]
    }
}

impl Section for Sleep {
    fn tag(&self) -> &'static str { Self::TAG }
    fn key(&self) -> &'static str { Self::KEY }

    fn parse(&mut self) {
        if is_unavailable(&self.html) {
            for f in self.durations_mut() {
                f.set(Err(ParseError::Unavailable));
            }
            self.bed_time.set(Err(ParseError::Unavailable));
            self.wake_time.set(Err(ParseError::Unavailable));
            return;
        }

        let doc = parse_fragment(&self.html);
        let root = doc.root_element();

        let totals = find_first(root, "div.equation.centered");
        let total_at = |i: usize| {
            totals.clone().and_then(|eq| nth_text(eq, "div.data-bit", i))
        };
        self.night_sleep_time.set(total_at(0).and_then(|t| parse_hours_minutes(&t)));
        self.nap_time.set(total_at(1).and_then(|t| parse_hours_minutes(&t)));
        // "8:15 hrs" style: keep the first token only
        self.total_sleep_time.set(total_at(2).and_then(|t| parse_hours_minutes(first_token(&t))));

        let clocks = find_all(root, "div.time-inline-edit-placeholder");
        let clock_at = |i: usize| -> Result<NaiveTime, ParseError> {
            let all = clocks.clone()?;
            let el = all.get(i).copied().ok_or(ParseError::Missing("div.time-inline-edit-placeholder"))?;
            parse_clock_time_12h(&text_of(el))
        };
        self.bed_time.set(clock_at(0));
        self.wake_time.set(clock_at(1));

        self.deep_sleep_time.set(chart_duration(root, DEEP_CHART));
        self.light_sleep_time.set(chart_duration(root, LIGHT_CHART));
        self.awake_sleep_time.set(chart_duration(root, AWAKE_CHART));
    }

    fn to_dict(&self) -> Dict {
        Dict::new()
            .with("night_sleep_time", self.night_sleep_time.to_value())
            .with("nap_time", self.nap_time.to_value())
            .with("total_sleep_time", self.total_sleep_time.to_value())
            .with("bed_time", self.bed_time.to_value())
            .with("wake_time", self.wake_time.to_value())
            .with("deep_sleep_time", self.deep_sleep_time.to_value())
            .with("light_sleep_time", self.light_sleep_time.to_value())
            .with("awake_sleep_time", self.awake_sleep_time.to_value())
    }
}

// "1:45 hrs" inside the chart's first <span>
fn chart_duration(root: ElementRef<'_>, chart: &'static str) -> Result<Duration, ParseError> {
    let chart = find_first(root, chart)?;
    let text = nth_text(chart, "span", 0)?;
    parse_hours_minutes(text_before(&text, "hrs"))
}
