use anyhow::{Context, Result};

use crate::model::{Condition, Evidence, Outcomes, PaperMeta, Record, paper_doi};

use super::classify::classify_reactants;
use super::gas_flow::GasFlowExtractor;
use super::identity::record_id;
use super::mass::MassExtractor;
use super::patterns::{MISSING_SENTINELS, has_approx_marker, normalize_cell};
use super::pressure::PressureExtractor;
use super::quantity::{Extractor, Flag, push_flag};
use super::scoring::score;
use super::split::{MultiLoadPair, MultiLoadSplitter};
use super::table::TableRow;
use super::temp_time::TemperatureTimeExtractor;

pub const MO_SOURCE_COLUMN: &str = "Mo source";
pub const SULFUR_SOURCE_COLUMN: &str = "Sulfur source";
pub const TEMP_TIME_COLUMN: &str = "Temp. Time";
pub const PRESSURE_COLUMN: &str = "Pressure";
pub const GAS_FLOW_COLUMN: &str = "Carrier gas Flow rate";
pub const SUBSTRATE_COLUMN: &str = "Substrate/ Set-up";
pub const REF_COLUMN: &str = "Ref";

/// Facts about the source table that no cell states.
#[derive(Debug, Clone, PartialEq)]
pub struct TableContext {
    pub material: Option<String>,
    pub growth_method: Option<String>,
    pub method_evidence: String,
}

impl Default for TableContext {
    fn default() -> Self {
        Self {
            material: Some("MoS2".to_string()),
            growth_method: Some("TVD CVD".to_string()),
            method_evidence: "Table 3 (TVD growth parameters)".to_string(),
        }
    }
}

/// Cleaned cells of one row.
#[derive(Debug, Clone)]
struct RowCells {
    mo_source: String,
    sulfur_source: String,
    temp_time: String,
    pressure: String,
    gas_flow: String,
    substrate: String,
    cited_ref: String,
}

impl RowCells {
    fn from_row(row: &TableRow, row_index: usize) -> Result<Self> {
        let optional = |column: &str| {
            row.get(column)
                .map(|cell| normalize_cell(cell))
                .unwrap_or_default()
        };

        let mo_source = row
            .get(MO_SOURCE_COLUMN)
            .map(|cell| normalize_cell(cell))
            .with_context(|| {
                format!("row {row_index} is missing required column {MO_SOURCE_COLUMN:?}")
            })?;

        Ok(Self {
            mo_source,
            sulfur_source: optional(SULFUR_SOURCE_COLUMN),
            temp_time: optional(TEMP_TIME_COLUMN),
            pressure: optional(PRESSURE_COLUMN),
            gas_flow: optional(GAS_FLOW_COLUMN),
            substrate: optional(SUBSTRATE_COLUMN),
            cited_ref: optional(REF_COLUMN),
        })
    }
}

pub struct RecordBuilder {
    masses: MassExtractor,
    temp_time: TemperatureTimeExtractor,
    pressure: PressureExtractor,
    gas_flow: GasFlowExtractor,
    splitter: MultiLoadSplitter,
    context: TableContext,
}

impl RecordBuilder {
    pub fn new(context: TableContext) -> Result<Self> {
        Ok(Self {
            masses: MassExtractor::new()?,
            temp_time: TemperatureTimeExtractor::new()?,
            pressure: PressureExtractor::new()?,
            gas_flow: GasFlowExtractor::new()?,
            splitter: MultiLoadSplitter::new()?,
            context,
        })
    }

    pub fn masses(&self) -> &MassExtractor {
        &self.masses
    }

    pub fn temp_time(&self) -> &TemperatureTimeExtractor {
        &self.temp_time
    }

    pub fn pressure(&self) -> &PressureExtractor {
        &self.pressure
    }

    pub fn gas_flow(&self) -> &GasFlowExtractor {
        &self.gas_flow
    }

    /// Normalized records for one table row: one per paired load when the row encodes
    /// several conditions, otherwise exactly one. `row_index` is 1-based.
    pub fn row_to_records(
        &self,
        row: &TableRow,
        paper: &PaperMeta,
        table_id: &str,
        row_index: usize,
    ) -> Result<Vec<Record>> {
        let cells = RowCells::from_row(row, row_index)?;

        let records = match self
            .splitter
            .split(&self.masses, &cells.mo_source, &cells.sulfur_source)
        {
            Some(pairs) => pairs
                .iter()
                .enumerate()
                .map(|(offset, pair)| {
                    self.build_one(&cells, paper, table_id, row_index, Some((offset + 1, pair)))
                })
                .collect(),
            None => vec![self.build_one(&cells, paper, table_id, row_index, None)],
        };

        Ok(records)
    }

    fn build_one(
        &self,
        cells: &RowCells,
        paper: &PaperMeta,
        table_id: &str,
        row_index: usize,
        split: Option<(usize, &MultiLoadPair)>,
    ) -> Record {
        let mut condition = Condition {
            material: self.context.material.clone(),
            growth_method: self.context.growth_method.clone(),
            ..Condition::default()
        };
        let mut evidence = Evidence::default();
        let mut flags = Vec::<Flag>::new();

        evidence
            .growth_method
            .push(self.context.method_evidence.clone());

        if !cells.substrate.is_empty() {
            condition.substrate = Some(cells.substrate.clone());
            evidence.substrate.push(cells.substrate.clone());
        }

        let temp_time = self.temp_time.extract(&cells.temp_time);
        if let Some(reading) = temp_time.value {
            condition.temperature_c = reading.temperature_c;
            condition.growth_time_min = reading.growth_time_min;
        }
        evidence.temperature_c.extend(temp_time.evidence.iter().cloned());
        evidence.growth_time_min.extend(temp_time.evidence);
        merge_flags(&mut flags, temp_time.flags);

        let pressure = self.pressure.extract(&cells.pressure);
        condition.pressure_torr = pressure.value;
        evidence.pressure_torr.extend(pressure.evidence);
        merge_flags(&mut flags, pressure.flags);

        let gas = self.gas_flow.extract(&cells.gas_flow);
        if let Some(readings) = gas.value {
            condition.carrier_gas = readings.carrier_gas;
            condition.gas_flows_sccm = readings.gas_flows_sccm;
        }
        evidence.gas_flows_sccm.extend(gas.evidence);
        merge_flags(&mut flags, gas.flags);

        let mo_loads = self.masses.extract(&cells.mo_source);
        evidence.reactants.extend(mo_loads.evidence);
        merge_flags(&mut flags, mo_loads.flags);
        if !cells.sulfur_source.is_empty() {
            evidence.reactants.push(cells.sulfur_source.clone());
        }
        condition.reactants = classify_reactants(&cells.mo_source, &cells.sulfur_source);

        condition.notes = Some(render_notes(cells, split.map(|(_, pair)| pair)));

        // Qualitative cues can sit outside the numeric patterns, so scan the raw cells too.
        let sulfur_override = split.map(|(_, pair)| pair.co_reagent_note.as_str());
        if cells.sulfur_source.contains('<')
            || sulfur_override.is_some_and(|note| note.contains('<'))
        {
            push_flag(&mut flags, Flag::InequalityValuePresent);
        }
        if cells.sulfur_source.to_lowercase().contains("rich") {
            push_flag(&mut flags, Flag::SulfurAmountVague);
        }
        if mo_amount_missing(&cells.mo_source) {
            push_flag(&mut flags, Flag::MoSourceAmountMissing);
        }
        if has_approx_marker(&cells.mo_source) || has_approx_marker(&cells.sulfur_source) {
            push_flag(&mut flags, Flag::ApproximateValuePresent);
        }

        let quality = score(&condition, flags, &cells.cited_ref, split.is_some());
        let record_id = record_id(
            paper_doi(paper),
            table_id,
            row_index,
            split.map(|(sub_index, _)| sub_index),
        );

        Record {
            record_id,
            paper: paper.clone(),
            condition,
            outcomes: Outcomes::default(),
            evidence,
            quality,
        }
    }
}

fn merge_flags(flags: &mut Vec<Flag>, incoming: Vec<Flag>) {
    for flag in incoming {
        push_flag(flags, flag);
    }
}

/// A bare sentinel, or a species name followed by one (`"MoO3 powder -"`).
fn mo_amount_missing(mo_cell: &str) -> bool {
    MISSING_SENTINELS
        .iter()
        .any(|sentinel| mo_cell.ends_with(sentinel))
}

fn render_notes(cells: &RowCells, pair: Option<&MultiLoadPair>) -> String {
    let mut parts = Vec::<String>::new();

    match pair {
        Some(pair) => {
            parts.push(format!(
                "Mo source load override from paired list: {} g",
                pair.mass_grams
            ));
            parts.push(format!(
                "S source load override from paired list: {}",
                pair.co_reagent_note
            ));
        }
        None => {
            parts.push(format!("Mo source cell: {}", cells.mo_source));
            if !cells.sulfur_source.is_empty() {
                parts.push(format!("S source cell: {}", cells.sulfur_source));
            }
        }
    }

    if !cells.cited_ref.is_empty() {
        parts.push(format!("Cited ref: {}.", cells.cited_ref));
    }

    parts.join(" ")
}
