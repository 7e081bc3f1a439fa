//! Coordinate parsing.
//!
//! Wikipedia writes coordinates either as signed decimal degrees (the hidden
//! `geo` microformat, `"17.385; 78.4867"`) or as degrees, minutes and seconds
//! with a compass letter (`"17°23′06″N"`). [`parse`] accepts both and returns
//! signed decimal degrees.

use once_cell::sync::Lazy;
use regex::Regex;

static DMS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?P<deg>\d+)[°:]\s*(?P<min>\d+)?[′:']?\s*(?P<sec>\d+(?:\.\d+)?)?[″:"]?\s*(?P<dir>[NSEW])"#,
    )
    .expect("static DMS regex")
});

/// Parse a coordinate token into signed decimal degrees.
///
/// Plain decimals are returned as-is. Otherwise the first
/// degrees/minutes/seconds group followed by a direction letter is used;
/// `S` and `W` give negative values. Returns `None` for empty or
/// unrecognizable input.
pub fn parse(text: Option<&str>) -> Option<f64> {
    let text = text?.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(decimal) = parse_decimal(text) {
        return Some(decimal);
    }
    parse_sexagesimal(text)
}

/// Parse a plain signed decimal, rejecting `NaN` and infinities.
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_sexagesimal(text: &str) -> Option<f64> {
    let caps = DMS_RE.captures(text)?;
    let component = |name: &str| -> Option<f64> {
        match caps.name(name) {
            Some(m) => m.as_str().parse::<f64>().ok(),
            None => Some(0.0),
        }
    };

    let decimal = component("deg")? + component("min")? / 60.0 + component("sec")? / 3600.0;
    match &caps["dir"] {
        "S" | "W" => Some(-decimal),
        _ => Some(decimal),
    }
}
