// src/specs/summary.rs
//! Day header: likes, the user's note, and the day's kcal.

use scraper::ElementRef;

use super::{is_unavailable, Field, Section};
use crate::core::html::{find_all, find_first, nth_text, parse_fragment, text_of};
use crate::core::sanitize::first_token;
use crate::core::scalar::parse_locale_number;
use crate::dict::Dict;
use crate::error::ParseError;

#[derive(Clone, Debug)]
pub struct Summary {
    html: String,
    likes: Field<f64>,
    comment: Field<String>,
    kcal_count: Field<f64>,
}

impl Summary {
    pub const TAG: &'static str = "SUMMARY";
    pub const KEY: &'static str = "summary";

    pub fn new(raw_html: impl Into<String>) -> Self {
        Self {
            html: raw_html.into(),
            likes: Field::default(),
            comment: Field::default(),
            kcal_count: Field::default(),
        }
    }

    pub fn likes(&self) -> &Field<f64> { &self.likes }
    pub fn comment(&self) -> &Field<String> { &self.comment }
    pub fn kcal_count(&self) -> &Field<f64> { &self.kcal_count }
}

impl Section for Summary {
    fn tag(&self) -> &'static str { Self::TAG }
    fn key(&self) -> &'static str { Self::KEY }

    fn parse(&mut self) {
        if is_unavailable(&self.html) {
            self.likes.set(Err(ParseError::Unavailable));
            self.comment.set(Err(ParseError::Unavailable));
            self.kcal_count.set(Err(ParseError::Unavailable));
            return;
        }

        let doc = parse_fragment(&self.html);
        let root = doc.root_element();

        self.likes.set(parse_likes(root));
        self.comment.set(parse_comment(root));
        self.kcal_count.set(parse_kcal_count(root));
    }

    fn to_dict(&self) -> Dict {
        Dict::new()
            .with("likes", self.likes.to_value())
            .with("comment", self.comment.to_value())
            .with("kcal_count", self.kcal_count.to_value())
    }
}

fn parse_likes(root: ElementRef<'_>) -> Result<f64, ParseError> {
    let nav = find_first(root, "div.span4.page-navigation")?;
    let text = nth_text(nav, "span.like.js-like-count", 0)?;
    parse_locale_number(first_token(&text))
}

fn parse_comment(root: ElementRef<'_>) -> Result<String, ParseError> {
    let note = find_first(root, "div.note-container")?;
    let area = find_first(note, "textarea#noteTextarea")?;
    // Only the ends: line breaks and spacing inside the note are the user's.
    Ok(s!(area.text().collect::<String>().trim()))
}

fn parse_kcal_count(root: ElementRef<'_>) -> Result<f64, ParseError> {
    let bits = daily_stats(root)?;
    let first = bits.first().ok_or(ParseError::Missing("div.data-bit"))?;
    parse_locale_number(&text_of(*first))
}

/// The `data-bit` cells of the daily stats strip, shared with the steps spec:
/// `[kcal, distance, avg steps, …]`.
pub(crate) fn daily_stats<'a>(root: ElementRef<'a>) -> Result<Vec<ElementRef<'a>>, ParseError> {
    let placeholder = find_first(root, "div.span8.daily-summary-stats-placeholder")?;
    let row = find_first(placeholder, "div.row-fluid.top-xl")?;
    find_all(row, "div.data-bit")
}
