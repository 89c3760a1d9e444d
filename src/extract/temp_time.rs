use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use super::patterns::{FLOAT, RANGE_DASH, has_approx_marker, normalize_cell, parse_float};
use super::quantity::{Extractor, Flag, ParsedQuantity, push_flag};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureTime {
    #[serde(rename = "temperature_C")]
    pub temperature_c: Option<f64>,
    pub growth_time_min: Option<f64>,
}

/// Combined "Temp. Time" cells such as `"650 °C 15 min"`, `"780–650 °C 10 min"` or
/// `"530 °C 30–60 min"`.
///
/// Ranges are never averaged: a temperature range is a profile and stays unresolved, and so
/// does a time range. The two halves are resolved independently, so a temperature profile
/// does not hide a single time value in the same cell. A `±` tolerance (`650 ± 10 °C`) is a
/// range too.
pub struct TemperatureTimeExtractor {
    temperature_profile: Regex,
    temperature_tolerance: Regex,
    temperature: Regex,
    time_range: Regex,
    time: Regex,
}

impl TemperatureTimeExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temperature_profile: Regex::new(&format!(
                r"([0-9]+)\s*{RANGE_DASH}\s*([0-9]+)\s*°?C"
            ))
            .context("failed to compile temperature profile regex")?,
            temperature_tolerance: Regex::new(&format!(r"{FLOAT}\s*±\s*{FLOAT}\s*°?C"))
                .context("failed to compile temperature tolerance regex")?,
            temperature: Regex::new(&format!(r"({FLOAT})\s*°?C"))
                .context("failed to compile temperature regex")?,
            time_range: Regex::new(&format!(r"{FLOAT}\s*(?:{RANGE_DASH}|±)\s*{FLOAT}\s*min"))
                .context("failed to compile time range regex")?,
            time: Regex::new(&format!(r"({FLOAT})\s*min"))
                .context("failed to compile time regex")?,
        })
    }

    fn first_capture(regex: &Regex, raw: &str) -> Option<f64> {
        regex
            .captures(raw)
            .and_then(|captures| captures.get(1))
            .and_then(|value| parse_float(value.as_str()))
    }
}

impl Extractor for TemperatureTimeExtractor {
    type Output = TemperatureTime;

    fn extract(&self, cell: &str) -> ParsedQuantity<TemperatureTime> {
        let raw = normalize_cell(cell);
        let mut flags = Vec::<Flag>::new();

        if has_approx_marker(&raw) {
            flags.push(Flag::ApproximateValuePresent);
        }

        let temperature_c = if self.temperature_profile.is_match(&raw) {
            flags.push(Flag::TemperatureProfileUnparsed);
            None
        } else if self.temperature_tolerance.is_match(&raw) {
            flags.push(Flag::RangeValueUnresolved);
            None
        } else {
            Self::first_capture(&self.temperature, &raw)
        };

        let growth_time_min = if self.time_range.is_match(&raw) {
            push_flag(&mut flags, Flag::RangeValueUnresolved);
            None
        } else {
            Self::first_capture(&self.time, &raw)
        };

        let value = if temperature_c.is_none() && growth_time_min.is_none() {
            None
        } else {
            Some(TemperatureTime {
                temperature_c,
                growth_time_min,
            })
        };

        ParsedQuantity {
            value,
            flags,
            evidence: vec![raw],
        }
    }
}
