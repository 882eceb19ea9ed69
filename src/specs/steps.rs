// src/specs/steps.rs
//! Daily step counts: total and goal from the steps chart, distance and the
//! daily average from the stats strip.

use scraper::ElementRef;

use super::summary::daily_stats;
use super::{is_unavailable, Field, Section};
use crate::core::html::{find_first, nth_text, parse_fragment, text_of};
use crate::core::sanitize::{last_token, text_before};
use crate::core::scalar::parse_locale_number;
use crate::dict::Dict;
use crate::error::ParseError;

#[derive(Clone, Debug)]
pub struct Steps {
    html: String,
    total: Field<f64>,
    goal: Field<f64>,
    avg: Field<f64>,
    distance: Field<f64>,
}

impl Steps {
    pub const TAG: &'static str = "STEPS";
    pub const KEY: &'static str = "steps";

    pub fn new(raw_html: impl Into<String>) -> Self {
        Self {
            html: raw_html.into(),
            total: Field::default(),
            goal: Field::default(),
            avg: Field::default(),
            distance: Field::default(),
        }
    }

    pub fn total(&self) -> &Field<f64> { &self.total }
    pub fn goal(&self) -> &Field<f64> { &self.goal }
    pub fn avg(&self) -> &Field<f64> { &self.avg }
    pub fn distance(&self) -> &Field<f64> { &self.distance }
}

impl Section for Steps {
    fn tag(&self) -> &'static str { Self::TAG }
    fn key(&self) -> &'static str { Self::KEY }

    fn parse(&mut self) {
        if is_unavailable(&self.html) {
            for f in [&mut self.total, &mut self.goal, &mut self.avg, &mut self.distance] {
                f.set(Err(ParseError::Unavailable));
            }
            return;
        }

        let doc = parse_fragment(&self.html);
        let root = doc.root_element();

        let chart = find_first(root, "div.span4.text-center.charts");
        self.total.set(chart.clone().and_then(parse_total));
        self.goal.set(chart.and_then(parse_goal));

        match daily_stats(root) {
            Ok(bits) => {
                let nth = |i: usize| bits.get(i).copied().ok_or(ParseError::Missing("div.data-bit"));
                self.distance.set(nth(1).and_then(|el| parse_locale_number(text_before(&text_of(el), "km"))));
                self.avg.set(nth(2).and_then(|el| parse_locale_number(&text_of(el))));
            }
            Err(e) => {
                self.distance.set(Err(e.clone()));
                self.avg.set(Err(e));
            }
        }
    }

    fn to_dict(&self) -> Dict {
        Dict::new()
            .with("total", self.total.to_value())
            .with("goal", self.goal.to_value())
            .with("avg", self.avg.to_value())
            .with("distance", self.distance.to_value())
    }
}

fn parse_total(chart: ElementRef<'_>) -> Result<f64, ParseError> {
    parse_locale_number(&nth_text(chart, "div.data-bit", 0)?)
}

// "Goal: 10.000" → last token
fn parse_goal(chart: ElementRef<'_>) -> Result<f64, ParseError> {
    let text = nth_text(chart, "div.h5", 0)?;
    parse_locale_number(last_token(&text))
}
