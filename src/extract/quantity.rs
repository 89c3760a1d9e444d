use std::fmt;

use serde::{Serialize, Serializer};

/// Fixed vocabulary of parsing assumptions and ambiguities attached to a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Flag {
    ApproximateValuePresent,
    TemperatureProfileUnparsed,
    RangeValueUnresolved,
    PressureAssumedAmbient,
    PressureMissing,
    PressureUnparsed,
    GasFlowUnparsed,
    InequalityValuePresent,
    SulfurAmountVague,
    MoSourceAmountMissing,
    RowSplitIntoMultipleConditions,
    ReviewTableRow,
    /// Reserved for extractors that cannot choose between readings; nothing emits it yet.
    AmbiguousValue,
    CitedRef(String),
}

impl Flag {
    /// Vocabulary name. For `CitedRef` this is only the family prefix; `Display` (and so
    /// serialization) appends the token.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ApproximateValuePresent => "approximate_value_present",
            Self::TemperatureProfileUnparsed => "temperature_profile_unparsed",
            Self::RangeValueUnresolved => "range_value_unresolved",
            Self::PressureAssumedAmbient => "pressure_assumed_ambient",
            Self::PressureMissing => "pressure_missing",
            Self::PressureUnparsed => "pressure_unparsed",
            Self::GasFlowUnparsed => "gas_flow_unparsed",
            Self::InequalityValuePresent => "inequality_value_present",
            Self::SulfurAmountVague => "sulfur_amount_vague",
            Self::MoSourceAmountMissing => "mo_source_amount_missing",
            Self::RowSplitIntoMultipleConditions => "row_split_into_multiple_conditions",
            Self::ReviewTableRow => "review_table_row",
            Self::AmbiguousValue => "ambiguous_value",
            Self::CitedRef(_) => "cited_ref",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CitedRef(token) => write!(f, "{}_{token}", self.as_str()),
            other => f.write_str(other.as_str()),
        }
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Output of every cell extractor. `value == None` means the cell could not be resolved;
/// the raw cell text still travels in `evidence`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedQuantity<T> {
    pub value: Option<T>,
    pub flags: Vec<Flag>,
    pub evidence: Vec<String>,
}

impl<T> ParsedQuantity<T> {
    pub fn resolved(value: T, evidence: &str) -> Self {
        Self {
            value: Some(value),
            flags: Vec::new(),
            evidence: vec![evidence.to_string()],
        }
    }

    pub fn unresolved(evidence: &str) -> Self {
        Self {
            value: None,
            flags: Vec::new(),
            evidence: vec![evidence.to_string()],
        }
    }

    pub fn with_flag(mut self, flag: Flag) -> Self {
        push_flag(&mut self.flags, flag);
        self
    }

    #[cfg(test)]
    pub fn has_flag(&self, flag: &Flag) -> bool {
        self.flags.contains(flag)
    }
}

pub trait Extractor {
    type Output;

    fn extract(&self, cell: &str) -> ParsedQuantity<Self::Output>;
}

/// Appends `flag` unless it is already present, keeping first-seen order.
pub fn push_flag(flags: &mut Vec<Flag>, flag: Flag) {
    if !flags.contains(&flag) {
        flags.push(flag);
    }
}
