use anyhow::{Context, Result};
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::patterns::{FLOAT, normalize_cell, parse_float};
use super::quantity::{Extractor, Flag, ParsedQuantity};

/// Gas label to flow (sccm), kept in first-seen label order. Serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GasFlows(Vec<(String, f64)>);

impl GasFlows {
    /// Sets the flow for `gas`; a repeated label keeps its first position and takes the
    /// latest value.
    pub fn insert(&mut self, gas: &str, flow: f64) {
        match self.0.iter_mut().find(|(label, _)| label == gas) {
            Some(entry) => entry.1 = flow,
            None => self.0.push((gas.to_string(), flow)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, gas: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(label, _)| label == gas)
            .map(|(_, flow)| *flow)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(label, _)| label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for GasFlows {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, flow) in &self.0 {
            map.serialize_entry(label, flow)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GasReadings {
    pub carrier_gas: Vec<String>,
    pub gas_flows_sccm: GasFlows,
}

/// "Carrier gas Flow rate" cells: `"N2 1 sccm"`, `"Ar14 sccm H2/2 sccm"`.
///
/// The label may touch its number; the shortest label that still leaves a number before
/// `sccm` wins, so `Ar14 sccm` reads as Ar at 14.
pub struct GasFlowExtractor {
    group: Regex,
}

impl GasFlowExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            group: Regex::new(&format!(r"([A-Za-z(][A-Za-z0-9()]*?)\s*({FLOAT})\s*sccm\b"))
                .context("failed to compile gas flow regex")?,
        })
    }
}

impl Extractor for GasFlowExtractor {
    type Output = GasReadings;

    fn extract(&self, cell: &str) -> ParsedQuantity<GasReadings> {
        let raw = normalize_cell(cell);
        let scan = raw.replace('/', " ");

        let mut flows = GasFlows::default();
        for captures in self.group.captures_iter(&scan) {
            let (Some(label), Some(flow)) = (captures.get(1), captures.get(2)) else {
                continue;
            };
            let Some(flow) = parse_float(flow.as_str()) else {
                continue;
            };

            flows.insert(label.as_str(), flow);
        }

        if flows.is_empty() {
            return ParsedQuantity::unresolved(&raw).with_flag(Flag::GasFlowUnparsed);
        }

        // Carrier gases are exactly the flow keys, in first-seen order.
        let readings = GasReadings {
            carrier_gas: flows.labels().map(str::to_string).collect(),
            gas_flows_sccm: flows,
        };
        ParsedQuantity::resolved(readings, &raw)
    }
}
