// src/core/html.rs
// Thin locator layer over `scraper`. Every helper returns a `ParseError` instead of
// panicking so the section specs can absorb failures field by field.

use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;

/// Parse a markup fragment. Never fails; garbage in gives an empty tree.
pub fn parse_fragment(raw: &str) -> Html {
    Html::parse_fragment(raw)
}

pub fn selector(css: &'static str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|_| ParseError::BadSelector(css))
}

/// All matches of `css` below `scope`, in document order.
pub fn find_all<'a>(scope: ElementRef<'a>, css: &'static str) -> Result<Vec<ElementRef<'a>>, ParseError> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).collect())
}

/// The `n`-th match (0-based) of `css` below `scope`.
pub fn find_nth<'a>(scope: ElementRef<'a>, css: &'static str, n: usize) -> Result<ElementRef<'a>, ParseError> {
    let sel = selector(css)?;
    scope.select(&sel).nth(n).ok_or(ParseError::Missing(css))
}

pub fn find_first<'a>(scope: ElementRef<'a>, css: &'static str) -> Result<ElementRef<'a>, ParseError> {
    find_nth(scope, css, 0)
}

/// Visible text of an element, whitespace-collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    super::sanitize::normalize_ws(&raw)
}

/// Text of the `n`-th match, or `Missing`.
pub fn nth_text(scope: ElementRef<'_>, css: &'static str, n: usize) -> Result<String, ParseError> {
    find_nth(scope, css, n).map(text_of)
}

pub fn attr<'a>(el: ElementRef<'a>, name: &'static str) -> Result<&'a str, ParseError> {
    el.value().attr(name).map(str::trim).ok_or(ParseError::Missing(name))
}
