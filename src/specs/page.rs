// src/specs/page.rs
//! Cut a full daily-summary page into the per-section fragments.
//!
//! Locators:
//! - summary: `div.content.page.steps.sleep.calories.timeline` (the whole
//!   timeline block; the summary spec digs further in)
//! - steps: first `div.row-fluid.bottom-m`
//! - sleep / activities / breakdown: `#pane5` / `#pane4` / `#pane2` inside the
//!   first `div.tab-content`
//!
//! The step-bin JSON is not part of the page and stays empty here.
//! A locator that finds nothing yields an empty fragment, which the matching
//! section reads as "unavailable".

use scraper::ElementRef;

use crate::core::html::{find_first, parse_fragment};
use crate::day::DayMarkup;

const SUMMARY: &str = "div.content.page.steps.sleep.calories.timeline";
const STEPS: &str = "div.row-fluid.bottom-m";
const TABS: &str = "div.tab-content";
const SLEEP_PANE: &str = "div#pane5";
const ACTIVITIES_PANE: &str = "div#pane4";
const BREAKDOWN_PANE: &str = "div#pane2";

pub fn split_day_page(page: &str) -> DayMarkup {
    let doc = parse_fragment(page);
    let root = doc.root_element();

    let tabs = find_first(root, TABS).ok();
    let pane = |css: &'static str| -> String {
        tabs.and_then(|t| fragment(t, css)).unwrap_or_default()
    };

    let markup = DayMarkup {
        summary: fragment(root, SUMMARY).unwrap_or_default(),
        steps: fragment(root, STEPS).unwrap_or_default(),
        steps_details: s!(),
        sleep: pane(SLEEP_PANE),
        activities: pane(ACTIVITIES_PANE),
        breakdown: pane(BREAKDOWN_PANE),
    };

    if tabs.is_none() {
        logd!("Page split: no {TABS}, sleep/activities/breakdown unavailable");
    }
    markup
}

fn fragment(scope: ElementRef<'_>, css: &'static str) -> Option<String> {
    match find_first(scope, css) {
        Ok(el) => Some(el.html()),
        Err(e) => {
            logd!("Page split: {e}");
            None
        }
    }
}
