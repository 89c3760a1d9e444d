use anyhow::{Context, Result};
use regex::Regex;

use super::patterns::{FLOAT, RANGE_DASH, is_missing_sentinel, normalize_cell, parse_float};
use super::quantity::{Extractor, Flag, ParsedQuantity};

pub const PASCALS_PER_TORR: f64 = 133.322;
pub const AMBIENT_TORR: f64 = 760.0;

/// Pressure cells normalized to Torr. At most one flag is emitted per cell.
pub struct PressureExtractor {
    range: Regex,
    pascal: Regex,
    torr: Regex,
}

impl PressureExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            range: Regex::new(&format!(
                r"(?i){FLOAT}\s*{RANGE_DASH}\s*{FLOAT}\s*(?:Pa|Torr)\b"
            ))
            .context("failed to compile pressure range regex")?,
            pascal: Regex::new(&format!(r"(?i)({FLOAT})\s*Pa\b"))
                .context("failed to compile pascal pressure regex")?,
            torr: Regex::new(&format!(r"(?i)({FLOAT})\s*Torr\b"))
                .context("failed to compile torr pressure regex")?,
        })
    }

    fn capture(regex: &Regex, raw: &str) -> Option<f64> {
        regex
            .captures(raw)
            .and_then(|captures| captures.get(1))
            .and_then(|value| parse_float(value.as_str()))
    }
}

impl Extractor for PressureExtractor {
    type Output = f64;

    fn extract(&self, cell: &str) -> ParsedQuantity<f64> {
        let raw = normalize_cell(cell);

        if raw.eq_ignore_ascii_case("ambient") {
            return ParsedQuantity::resolved(AMBIENT_TORR, &raw).with_flag(Flag::PressureAssumedAmbient);
        }
        if is_missing_sentinel(&raw) {
            return ParsedQuantity::unresolved(&raw).with_flag(Flag::PressureMissing);
        }
        if self.range.is_match(&raw) {
            return ParsedQuantity::unresolved(&raw).with_flag(Flag::PressureUnparsed);
        }
        if let Some(pascals) = Self::capture(&self.pascal, &raw) {
            return ParsedQuantity::resolved(pascals / PASCALS_PER_TORR, &raw);
        }
        if let Some(torr) = Self::capture(&self.torr, &raw) {
            return ParsedQuantity::resolved(torr, &raw);
        }

        ParsedQuantity::unresolved(&raw).with_flag(Flag::PressureUnparsed)
    }
}
