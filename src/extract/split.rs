use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use super::mass::MassExtractor;
use super::patterns::{FLOAT, RANGE_DASH, normalize_cell};

/// One sub-condition of a row that lists several parallel loads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiLoadPair {
    pub mass_grams: f64,
    pub co_reagent_note: String,
}

pub struct MultiLoadSplitter {
    co_reagent_token: Regex,
}

impl MultiLoadSplitter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // A range is one token, not two.
            co_reagent_token: Regex::new(&format!(
                r"{FLOAT}\s*{RANGE_DASH}\s*{FLOAT}\s*g\b|<\s*{FLOAT}\s*g\b|{FLOAT}\s*g\b"
            ))
            .context("failed to compile co-reagent load regex")?,
        })
    }

    /// Pairs mass loads with co-reagent tokens positionally when both cells carry at least
    /// two. Unequal counts are refused rather than partially paired.
    pub fn split(
        &self,
        masses: &MassExtractor,
        mass_cell: &str,
        co_reagent_cell: &str,
    ) -> Option<Vec<MultiLoadPair>> {
        let mass_cell = normalize_cell(mass_cell);
        let co_reagent_cell = normalize_cell(co_reagent_cell);

        let loads = masses.loads(&mass_cell);
        let tokens = self
            .co_reagent_token
            .find_iter(&co_reagent_cell)
            .map(|token| normalize_cell(token.as_str()))
            .collect::<Vec<String>>();

        if loads.len() < 2 || tokens.len() < 2 || loads.len() != tokens.len() {
            return None;
        }

        Some(
            loads
                .into_iter()
                .zip(tokens)
                .map(|(mass_grams, co_reagent_note)| MultiLoadPair {
                    mass_grams,
                    co_reagent_note,
                })
                .collect(),
        )
    }
}
