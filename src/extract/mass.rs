use anyhow::{Context, Result};
use regex::Regex;

use super::patterns::{
    FLOAT, RANGE_DASH, has_approx_marker, is_missing_sentinel, normalize_cell, parse_float,
};
use super::quantity::{Extractor, Flag, ParsedQuantity};

/// Gram loads from a source cell, e.g. `"0.0003 g 0.0003 g 0.0005 g"`.
///
/// Qualitative cells (`<0.1 g`, `S rich`, `∼0.2 g`, `0.2-0.4 g`) resolve to `None`; the
/// caller keeps the raw text as a note instead of a number.
pub struct MassExtractor {
    load: Regex,
}

impl MassExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // Group 2 is set only for a `<low>-<high> g` range. The leading guard keeps a
            // formula digit (`MoO3-0.4 g`) from opening a range.
            load: Regex::new(&format!(
                r"(?:^|[^A-Za-z0-9.])({FLOAT})\s*(?:{RANGE_DASH}\s*({FLOAT})\s*)?g\b"
            ))
            .context("failed to compile mass load regex")?,
        })
    }

    /// Every single `<number> g` occurrence in order. Range bounds are not loads.
    pub fn loads(&self, cell: &str) -> Vec<f64> {
        self.load
            .captures_iter(cell)
            .filter(|captures| captures.get(2).is_none())
            .filter_map(|captures| captures.get(1))
            .filter_map(|value| parse_float(value.as_str()))
            .collect()
    }

    fn has_range(&self, cell: &str) -> bool {
        self.load
            .captures_iter(cell)
            .any(|captures| captures.get(2).is_some())
    }
}

impl Extractor for MassExtractor {
    type Output = Vec<f64>;

    fn extract(&self, cell: &str) -> ParsedQuantity<Vec<f64>> {
        let raw = normalize_cell(cell);

        if is_missing_sentinel(&raw) {
            return ParsedQuantity::unresolved(&raw);
        }

        if raw.contains(['<', '>']) {
            return ParsedQuantity::unresolved(&raw).with_flag(Flag::InequalityValuePresent);
        }
        if has_approx_marker(&raw) {
            return ParsedQuantity::unresolved(&raw).with_flag(Flag::ApproximateValuePresent);
        }
        if raw.to_lowercase().contains("rich") {
            return ParsedQuantity::unresolved(&raw);
        }
        if self.has_range(&raw) {
            return ParsedQuantity::unresolved(&raw).with_flag(Flag::RangeValueUnresolved);
        }

        let loads = self.loads(&raw);
        if loads.is_empty() {
            // e.g. "MoO3 nanoribbons": a species name without a load
            return ParsedQuantity::unresolved(&raw);
        }

        ParsedQuantity::resolved(loads, &raw)
    }
}
