use crate::model::{Condition, Quality};

use super::quantity::{Flag, push_flag};

/// Starting score for a row read from a reviewed table.
const TABLE_BASE_CONFIDENCE: f64 = 0.90;
const MISSING_PRIMARY_PENALTY: f64 = 0.15;
const AMBIGUOUS_PENALTY: f64 = 0.10;
const RANGE_PENALTY: f64 = 0.08;
const PROFILE_PENALTY: f64 = 0.12;

pub fn confidence(condition: &Condition, flags: &[Flag]) -> f64 {
    let mut score = TABLE_BASE_CONFIDENCE;

    let primaries = [
        condition.temperature_c,
        condition.pressure_torr,
        condition.growth_time_min,
    ];
    for value in primaries {
        if value.is_none() {
            score -= MISSING_PRIMARY_PENALTY;
        }
    }

    if flags.contains(&Flag::AmbiguousValue) {
        score -= AMBIGUOUS_PENALTY;
    }
    if flags.contains(&Flag::RangeValueUnresolved) {
        score -= RANGE_PENALTY;
    }
    if flags.contains(&Flag::TemperatureProfileUnparsed) {
        score -= PROFILE_PENALTY;
    }

    score.clamp(0.0, 1.0)
}

pub fn missing_required_fields(condition: &Condition) -> Vec<String> {
    let mut missing = Vec::new();
    if condition.material.is_none() {
        missing.push("material".to_string());
    }
    if condition.growth_method.is_none() {
        missing.push("growth_method".to_string());
    }
    if condition.temperature_c.is_none() {
        missing.push("temperature_C".to_string());
    }
    missing
}

/// Scores the parsing flags, then appends provenance flags (which never affect the score).
pub fn score(condition: &Condition, mut flags: Vec<Flag>, cited_ref: &str, split: bool) -> Quality {
    let confidence = confidence(condition, &flags);
    let missing_required_fields = missing_required_fields(condition);

    push_flag(&mut flags, Flag::ReviewTableRow);
    if !cited_ref.is_empty() {
        push_flag(&mut flags, Flag::CitedRef(cited_ref.to_string()));
    }
    if split {
        push_flag(&mut flags, Flag::RowSplitIntoMultipleConditions);
    }

    Quality {
        confidence,
        missing_required_fields,
        flags,
    }
}
