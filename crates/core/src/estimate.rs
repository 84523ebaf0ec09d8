//! Best-effort conversion of free-text time estimates into hours.
//!
//! Estimates are written by hand ("1-2 hours", "30-45 minutes", "Ongoing"),
//! so parsing never fails: anything that does not look like a duration
//! simply counts as zero.

use std::sync::LazyLock;

use regex::Regex;

static FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)(?:-([0-9]+))?\s*(hour|minute)").expect("estimate pattern is valid")
});

/// Parse a free-text estimate into hours.
///
/// Every `N[-M] hour|minute` fragment contributes the midpoint of its range;
/// minutes are converted to hours. The result is not rounded.
#[must_use]
pub fn parse_time_estimate(text: &str) -> f64 {
    FRAGMENT
        .captures_iter(text)
        .filter_map(|caps| {
            let low: f64 = caps.get(1)?.as_str().parse().ok()?;
            let high: f64 = match caps.get(2) {
                Some(m) => m.as_str().parse().ok()?,
                None => low,
            };
            let midpoint = (low + high) / 2.0;
            let unit = caps.get(3)?.as_str();
            if unit.eq_ignore_ascii_case("minute") {
                Some(midpoint / 60.0)
            } else {
                Some(midpoint)
            }
        })
        .sum()
}

/// Round to one decimal place.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
