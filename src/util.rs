use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{PlaylinkError, PlaylinkResult};

lazy_static!(
    static ref TIME_REGEX: Regex = Regex::new(r"^([0-9]{1,2})[:ms](([0-9]{1,2})s?)?").unwrap();
);

/// Parses a user-supplied seek position (`1:30`, `90s`, `1m30s`) into
/// milliseconds. A lone number with a `:` or unit suffix is required; bare
/// digits do not match.
pub fn parse_position(input: &str) -> PlaylinkResult<u64> {
    let caps = TIME_REGEX.captures(input).ok_or(PlaylinkError::InvalidTimeString)?;

    let first: u64 = caps[1].parse().unwrap();

    let secs = match caps.get(3) {
        Some(rest) => first * 60 + rest.as_str().parse::<u64>().unwrap(),
        None => first,
    };

    Ok(secs * 1000)
}
