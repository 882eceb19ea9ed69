// src/core/scalar.rs
// Text token → typed value. Pure; no markup knowledge here.

use std::fmt;
use std::time::Duration;

use chrono::NaiveTime;

use crate::error::ParseError;

/// One normalized cell value.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    Number(f64),
    Duration(Duration),
    ClockTime(NaiveTime),
    Text(String),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Number(n) => write!(f, "{n}"),
            ScalarValue::Duration(d) => f.write_str(&fmt_duration(*d)),
            ScalarValue::ClockTime(t) => write!(f, "{}", t.format("%H:%M:%S")),
            ScalarValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ScalarValue {
    fn from(n: f64) -> Self { ScalarValue::Number(n) }
}
impl From<Duration> for ScalarValue {
    fn from(d: Duration) -> Self { ScalarValue::Duration(d) }
}
impl From<NaiveTime> for ScalarValue {
    fn from(t: NaiveTime) -> Self { ScalarValue::ClockTime(t) }
}
impl From<String> for ScalarValue {
    fn from(s: String) -> Self { ScalarValue::Text(s) }
}

/// `1.234,56` → 1234.56. Dots are thousands separators, comma is the decimal mark.
pub fn parse_locale_number(text: &str) -> Result<f64, ParseError> {
    let raw = text.trim();
    let m: String = raw
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    m.parse::<f64>()
        .map_err(|_| ParseError::MalformedNumber(s!(raw)))
}

/// `57%` → 57.0
pub fn parse_percent(text: &str) -> Result<f64, ParseError> {
    parse_locale_number(&text.trim().replace('%', ""))
}

/// Colon count picks the layout: `S`, `M:S` or `H:M:S`.
pub fn parse_duration(text: &str) -> Result<Duration, ParseError> {
    let raw = text.trim();
    let bad = || ParseError::MalformedDuration(s!(raw));

    let parts: Vec<&str> = raw.split(':').collect();
    let nums = parts
        .iter()
        .map(|p| parse_component(p))
        .collect::<Option<Vec<u64>>>()
        .ok_or_else(bad)?;

    let secs = match nums.as_slice() {
        [s] => Some(*s),
        [m, s] if *s < 60 => m.checked_mul(60).and_then(|x| x.checked_add(*s)),
        [h, m, s] if *m < 60 && *s < 60 => h
            .checked_mul(3600)
            .and_then(|x| x.checked_add(m * 60 + s)),
        _ => None,
    };
    secs.map(Duration::from_secs).ok_or_else(bad)
}

/// Sleep widgets: `H:M` or bare `M`.
pub fn parse_hours_minutes(text: &str) -> Result<Duration, ParseError> {
    let raw = text.trim();
    let bad = || ParseError::MalformedDuration(s!(raw));

    let parts: Vec<&str> = raw.split(':').collect();
    let nums = parts
        .iter()
        .map(|p| parse_component(p))
        .collect::<Option<Vec<u64>>>()
        .ok_or_else(bad)?;

    let secs = match nums.as_slice() {
        [m] => m.checked_mul(60),
        [h, m] if *m < 60 => h
            .checked_mul(3600)
            .and_then(|x| x.checked_add(m * 60)),
        _ => None,
    };
    secs.map(Duration::from_secs).ok_or_else(bad)
}

fn parse_component(p: &str) -> Option<u64> {
    let p = p.trim();
    if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    p.parse().ok()
}

/// `hh:mm AM/PM` → time of day.
pub fn parse_clock_time_12h(text: &str) -> Result<NaiveTime, ParseError> {
    let raw = super::sanitize::normalize_ws(text);
    NaiveTime::parse_from_str(&raw, "%I:%M %p")
        .map_err(|_| ParseError::MalformedTime(raw))
}

pub fn zero_duration() -> Duration {
    Duration::ZERO
}

/// `HH:MM:SS`; hours keep counting past 24 for summed spans.
pub fn fmt_duration(d: Duration) -> String {
    let total = d.as_secs();
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_numbers() {
        assert_eq!(parse_locale_number("1.234,56").unwrap(), 1234.56);
        assert_eq!(parse_locale_number(" 10.000 ").unwrap(), 10000.0);
        assert_eq!(parse_locale_number("5,2").unwrap(), 5.2);
        assert!(matches!(
            parse_locale_number("n/a"),
            Err(ParseError::MalformedNumber(_))
        ));
        assert!(parse_locale_number("").is_err());
    }

    #[test]
    fn percent_strips_suffix() {
        assert_eq!(parse_percent("57%").unwrap(), 57.0);
        assert_eq!(parse_percent(" 3,5 % ").unwrap(), 3.5);
    }

    #[test]
    fn duration_by_colon_count() {
        assert_eq!(parse_duration("01:02:03").unwrap().as_secs(), 3723);
        assert_eq!(parse_duration("02:03").unwrap().as_secs(), 123);
        assert_eq!(parse_duration("45").unwrap().as_secs(), 45);
        assert_eq!(parse_duration(" 1:00:00 ").unwrap().as_secs(), 3600);
    }

    #[test]
    fn duration_rejects_garbage() {
        assert!(matches!(parse_duration("1:2:3:4"), Err(ParseError::MalformedDuration(_))));
        assert!(parse_duration("12:75").is_err());
        assert!(parse_duration("--").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-5").is_err());
    }

    #[test]
    fn oversized_durations_are_malformed() {
        assert!(matches!(
            parse_duration("5124095576030432:00:00"),
            Err(ParseError::MalformedDuration(_))
        ));
        assert!(parse_duration("307445734561825861:00").is_err());
        assert!(parse_duration("99999999999999999999").is_err());
        assert_eq!(parse_duration(&u64::MAX.to_string()).unwrap().as_secs(), u64::MAX);
        assert!(matches!(
            parse_hours_minutes("307445734561825861"),
            Err(ParseError::MalformedDuration(_))
        ));
        assert!(parse_hours_minutes("5124095576030432:00").is_err());
    }

    #[test]
    fn hours_minutes_for_sleep() {
        assert_eq!(parse_hours_minutes("7:30").unwrap().as_secs(), 27_000);
        assert_eq!(parse_hours_minutes("45").unwrap().as_secs(), 2_700);
        assert!(parse_hours_minutes("7:30:00").is_err());
    }

    #[test]
    fn clock_time_12h() {
        let t = parse_clock_time_12h("01:30 PM").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(13, 30, 0).unwrap());
        let t = parse_clock_time_12h("12:00 AM").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        let t = parse_clock_time_12h("12:15 PM").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(12, 15, 0).unwrap());
        assert!(matches!(parse_clock_time_12h("13:00"), Err(ParseError::MalformedTime(_))));
    }

    #[test]
    fn durations_render_hms() {
        assert_eq!(fmt_duration(Duration::from_secs(900)), "00:15:00");
        assert_eq!(fmt_duration(Duration::from_secs(3723)), "01:02:03");
        assert_eq!(fmt_duration(Duration::from_secs(100 * 3600)), "100:00:00");
        assert_eq!(fmt_duration(zero_duration()), "00:00:00");
    }

    #[test]
    fn scalar_display() {
        assert_eq!(ScalarValue::Number(350.0).to_string(), "350");
        assert_eq!(ScalarValue::Number(5.25).to_string(), "5.25");
        let t = NaiveTime::from_hms_opt(22, 5, 0).unwrap();
        assert_eq!(ScalarValue::ClockTime(t).to_string(), "22:05:00");
    }
}
