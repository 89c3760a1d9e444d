use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::extract::{Flag, GasFlows};

/// Opaque paper metadata; only `doi` is read, everything else is passed through.
pub type PaperMeta = Map<String, Value>;

pub fn paper_doi(paper: &PaperMeta) -> &str {
    paper.get("doi").and_then(Value::as_str).unwrap_or("")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Anneal {
    #[serde(rename = "temperature_C")]
    pub temperature_c: Option<f64>,
    pub time_min: Option<f64>,
    pub atmosphere: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Condition {
    pub material: Option<String>,
    pub growth_method: Option<String>,
    pub substrate: Option<String>,
    #[serde(rename = "temperature_C")]
    pub temperature_c: Option<f64>,
    #[serde(rename = "pressure_Torr")]
    pub pressure_torr: Option<f64>,
    pub growth_time_min: Option<f64>,
    pub carrier_gas: Vec<String>,
    pub reactants: Vec<String>,
    pub gas_flows_sccm: GasFlows,
    #[serde(rename = "ramp_rate_C_per_min")]
    pub ramp_rate_c_per_min: Option<f64>,
    pub cooldown: Option<String>,
    pub anneal: Anneal,
    pub transfer_method: Option<String>,
    pub notes: Option<String>,
}

/// Device characterization; table rows never populate these.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Outcomes {
    pub device_type: Option<String>,
    #[serde(rename = "mobility_cm2_Vs")]
    pub mobility_cm2_vs: Option<f64>,
    pub on_off_ratio: Option<f64>,
    #[serde(rename = "vth_V")]
    pub vth_v: Option<f64>,
    #[serde(rename = "contact_resistance_Ohm_um")]
    pub contact_resistance_ohm_um: Option<f64>,
    pub yield_percent: Option<f64>,
    pub layer_count: Option<u32>,
    pub domain_size_um: Option<f64>,
    pub defect_density_cm2: Option<f64>,
}

/// Raw snippets that justified each field, in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Evidence {
    #[serde(rename = "temperature_C")]
    pub temperature_c: Vec<String>,
    #[serde(rename = "pressure_Torr")]
    pub pressure_torr: Vec<String>,
    pub growth_time_min: Vec<String>,
    pub gas_flows_sccm: Vec<String>,
    pub substrate: Vec<String>,
    pub reactants: Vec<String>,
    pub growth_method: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Quality {
    pub confidence: f64,
    pub missing_required_fields: Vec<String>,
    pub flags: Vec<Flag>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub record_id: String,
    pub paper: PaperMeta,
    pub condition: Condition,
    pub outcomes: Outcomes,
    pub evidence: Evidence,
    pub quality: Quality,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputHash {
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractPaths {
    pub cache_root: String,
    pub table_path: String,
    pub paper_meta_path: String,
    pub output_path: String,
    pub manifest_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractCounts {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub rows_split: usize,
    pub records_written: usize,
    pub records_missing_required: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub table_id: String,
    pub paths: ExtractPaths,
    pub counts: ExtractCounts,
    pub flag_counts: BTreeMap<String, usize>,
    pub mean_confidence: Option<f64>,
    pub source_hashes: Vec<InputHash>,
    pub warnings: Vec<String>,
}
