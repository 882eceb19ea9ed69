// src/specs/breakdown.rs
//! Activity breakdown pie chart.
//!
//! The four percentages are the chart's `<tspan>` labels in a fixed order:
//! highly active, active, sedentary, sleeping. Nothing in the markup names
//! them; the order is the contract.

use super::{is_unavailable, Field, Section};
use crate::core::html::{find_all, parse_fragment, text_of};
use crate::core::scalar::parse_percent;
use crate::dict::Dict;
use crate::error::ParseError;

#[derive(Clone, Debug)]
pub struct Breakdown {
    html: String,
    highly_active: Field<f64>,
    active: Field<f64>,
    sedentary: Field<f64>,
    sleeping: Field<f64>,
}

impl Breakdown {
    pub const TAG: &'static str = "BREAKDOWN";
    pub const KEY: &'static str = "breakdown";

    pub fn new(raw_html: impl Into<String>) -> Self {
        Self {
            html: raw_html.into(),
            highly_active: Field::default(),
            active: Field::default(),
            sedentary: Field::default(),
            sleeping: Field::default(),
        }
    }

    pub fn highly_active(&self) -> &Field<f64> { &self.highly_active }
    pub fn active(&self) -> &Field<f64> { &self.active }
    pub fn sedentary(&self) -> &Field<f64> { &self.sedentary }
    pub fn sleeping(&self) -> &Field<f64> { &self.sleeping }

    fn fields_mut(&mut self) -> [&mut Field<f64>; 4] {
        [&mut self.highly_active, &mut self.active, &mut self.sedentary, &mut self.sleeping]
    }
}

impl Section for Breakdown {
    fn tag(&self) -> &'static str { Self::TAG }
    fn key(&self) -> &'static str { Self::KEY }

    fn parse(&mut self) {
        if is_unavailable(&self.html) {
            for f in self.fields_mut() {
                f.set(Err(ParseError::Unavailable));
            }
            return;
        }

        let doc = parse_fragment(&self.html);
        let labels: Result<Vec<String>, ParseError> =
            find_all(doc.root_element(), "tspan").map(|v| v.into_iter().map(text_of).collect());

        for (i, f) in self.fields_mut().into_iter().enumerate() {
            let r = match &labels {
                Ok(l) => l.get(i).ok_or(ParseError::Missing("tspan")).and_then(|t| parse_percent(t)),
                Err(e) => Err(e.clone()),
            };
            f.set(r);
        }
    }

    fn to_dict(&self) -> Dict {
        Dict::new()
            .with("highly_active", self.highly_active.to_value())
            .with("active", self.active.to_value())
            .with("sedentary", self.sedentary.to_value())
            .with("sleeping", self.sleeping.to_value())
    }
}
