// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// `"3 likes"` → `"3"`
pub fn first_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}

/// `"Goal: 10.000"` → `"10.000"`
pub fn last_token(s: &str) -> &str {
    s.split_whitespace().last().unwrap_or("")
}

/// Everything before the first `marker` (the whole string if absent), trimmed.
/// `"5,2 km"` with `"km"` → `"5,2"`
pub fn text_before<'a>(s: &'a str, marker: &str) -> &'a str {
    s.split(marker).next().unwrap_or("").trim()
}

/// Last `/`-delimited segment, ignoring a trailing slash and any query string.
/// `"/modern/activity/1234567"` → `"1234567"`
pub fn last_path_segment(href: &str) -> &str {
    let path = href.split(['?', '#']).next().unwrap_or("");
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}
