use serde_json::{Map, Value, json};

use super::classify::classify_reactants;
use super::gas_flow::GasFlowExtractor;
use super::identity::record_id;
use super::mass::MassExtractor;
use super::pressure::PressureExtractor;
use super::scoring::{confidence, score};
use super::split::MultiLoadSplitter;
use super::table::TableRow;
use super::temp_time::TemperatureTimeExtractor;
use super::*;
use crate::model::{Condition, PaperMeta};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn paper() -> PaperMeta {
    let value = json!({
        "doi": "10.1002/cvde.201500060",
        "title": "CVD Growth of MoS2-based Two-dimensional Materials",
        "year": 2015,
        "venue": "Chemical Vapor Deposition",
        "url": null,
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!("literal is an object"),
    }
}

fn row(cells: &[(&str, &str)]) -> TableRow {
    cells
        .iter()
        .map(|(column, cell)| (column.to_string(), cell.to_string()))
        .collect()
}

fn reference_row() -> TableRow {
    row(&[
        ("Mo source", "MoO3 powder 0.4 g"),
        ("Sulfur source", "S powder 0.8 g"),
        ("Temp. Time", "650 C 15 min"),
        ("Pressure", "ambient"),
        ("Carrier gas Flow rate", "N2 1 sccm"),
        ("Substrate/ Set-up", "SiO2/Si face-down"),
        ("Ref", "14"),
    ])
}

fn builder() -> RecordBuilder {
    RecordBuilder::new(TableContext::default()).expect("builder patterns compile")
}

#[test]
fn mass_extractor_reads_single_and_sequential_loads() {
    let masses = MassExtractor::new().expect("mass regex compiles");

    let single = masses.extract("MoO3 powder 0.4 g");
    assert_eq!(single.value, Some(vec![0.4]));
    assert!(single.flags.is_empty());
    assert_eq!(single.evidence, vec!["MoO3 powder 0.4 g".to_string()]);

    let sequential = masses.extract("0.0003 g 0.0003 g 0.0005 g");
    assert_eq!(sequential.value, Some(vec![0.0003, 0.0003, 0.0005]));

    let compact = masses.extract("MoO3 0.1g");
    assert_eq!(compact.value, Some(vec![0.1]));
}

#[test]
fn mass_extractor_refuses_sentinels_and_qualitative_text() {
    let masses = MassExtractor::new().expect("mass regex compiles");

    for sentinel in ["-", "–", "—", "  –  "] {
        let parsed = masses.extract(sentinel);
        assert_eq!(parsed.value, None, "sentinel {sentinel:?}");
        assert_eq!(parsed.evidence.len(), 1);
    }

    let inequality = masses.extract("<0.1 g");
    assert_eq!(inequality.value, None);
    assert!(inequality.has_flag(&Flag::InequalityValuePresent));

    let approximate = masses.extract("∼0.2 g");
    assert_eq!(approximate.value, None);
    assert!(approximate.has_flag(&Flag::ApproximateValuePresent));

    assert_eq!(masses.extract("S Rich").value, None);
    assert_eq!(masses.extract("MoO3 nanoribbons").value, None);
}

#[test]
fn temperature_time_reads_single_setpoint() {
    let extractor = TemperatureTimeExtractor::new().expect("temperature regexes compile");
    let parsed = extractor.extract("650 °C 15 min");

    let reading = parsed.value.expect("both values resolve");
    assert_eq!(reading.temperature_c, Some(650.0));
    assert_eq!(reading.growth_time_min, Some(15.0));
    assert!(parsed.flags.is_empty());
    assert_eq!(parsed.evidence, vec!["650 °C 15 min".to_string()]);
}

#[test]
fn temperature_profile_is_never_midpointed_but_keeps_single_time() {
    let extractor = TemperatureTimeExtractor::new().expect("temperature regexes compile");

    let parsed = extractor.extract("780–650 °C 10 min");
    let reading = parsed.value.expect("time still resolves");
    assert_eq!(reading.temperature_c, None);
    assert_eq!(reading.growth_time_min, Some(10.0));
    assert_eq!(parsed.flags, vec![Flag::TemperatureProfileUnparsed]);

    let ascii = extractor.extract("700-800 °C 30–60 min");
    assert_eq!(ascii.value, None);
    assert_eq!(
        ascii.flags,
        vec![Flag::TemperatureProfileUnparsed, Flag::RangeValueUnresolved]
    );
    assert_eq!(ascii.evidence, vec!["700-800 °C 30–60 min".to_string()]);
}

#[test]
fn time_range_stays_unresolved() {
    let extractor = TemperatureTimeExtractor::new().expect("temperature regexes compile");

    let parsed = extractor.extract("530 °C 30–60 min");
    let reading = parsed.value.expect("temperature resolves");
    assert_eq!(reading.temperature_c, Some(530.0));
    assert_eq!(reading.growth_time_min, None);
    assert_eq!(parsed.flags, vec![Flag::RangeValueUnresolved]);

    let approximate = extractor.extract("∼650 °C/ 15 – 20 min");
    let reading = approximate.value.expect("temperature resolves");
    assert_eq!(reading.temperature_c, Some(650.0));
    assert_eq!(reading.growth_time_min, None);
    assert_eq!(
        approximate.flags,
        vec![Flag::ApproximateValuePresent, Flag::RangeValueUnresolved]
    );
}

#[test]
fn temperature_time_sentinel_keeps_raw_evidence() {
    let extractor = TemperatureTimeExtractor::new().expect("temperature regexes compile");
    let parsed = extractor.extract("–");

    assert_eq!(parsed.value, None);
    assert_eq!(parsed.evidence, vec!["–".to_string()]);
}

#[test]
fn pressure_converts_units_and_flags_assumptions() {
    let extractor = PressureExtractor::new().expect("pressure regexes compile");

    let pascal = extractor.extract("133.322 Pa");
    assert_close(pascal.value.expect("pascal resolves"), 1.0);
    assert!(pascal.flags.is_empty());

    let low = extractor.extract("30 Pa");
    assert_close(low.value.expect("pascal resolves"), 30.0 / 133.322);

    let torr = extractor.extract("760 Torr");
    assert_eq!(torr.value, Some(760.0));
    assert!(torr.flags.is_empty());

    for ambient in ["ambient", "Ambient", " AMBIENT "] {
        let parsed = extractor.extract(ambient);
        assert_eq!(parsed.value, Some(760.0));
        assert_eq!(parsed.flags, vec![Flag::PressureAssumedAmbient]);
    }

    for sentinel in ["-", "–", "—"] {
        let parsed = extractor.extract(sentinel);
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.flags, vec![Flag::PressureMissing]);
        assert_eq!(parsed.evidence, vec![sentinel.to_string()]);
    }

    let unknown = extractor.extract("low vacuum");
    assert_eq!(unknown.value, None);
    assert_eq!(unknown.flags, vec![Flag::PressureUnparsed]);
}

#[test]
fn pressure_range_is_unparsed_not_negative() {
    let extractor = PressureExtractor::new().expect("pressure regexes compile");

    for cell in ["0.5-1 Torr", "0.5–1 Torr", "10-20 Pa", "10 – 20 pa"] {
        let parsed = extractor.extract(cell);
        assert_eq!(parsed.value, None, "cell {cell:?}");
        assert_eq!(parsed.flags, vec![Flag::PressureUnparsed], "cell {cell:?}");
        assert_eq!(parsed.evidence.len(), 1);
    }
}

#[test]
fn mass_range_is_unresolved_and_not_counted_as_loads() {
    let masses = MassExtractor::new().expect("mass regex compiles");

    for cell in ["0.2-0.4 g", "0.2–0.4 g", "MoO3 0.2 - 0.4 g"] {
        let parsed = masses.extract(cell);
        assert_eq!(parsed.value, None, "cell {cell:?}");
        assert_eq!(parsed.flags, vec![Flag::RangeValueUnresolved], "cell {cell:?}");
    }

    assert_eq!(masses.loads("0.1-0.2 g 0.3 g"), vec![0.3]);
    assert_eq!(masses.extract("MoO3-0.4 g").value, Some(vec![0.4]));
}

#[test]
fn dash_after_unit_separates_rather_than_negates() {
    let extractor = TemperatureTimeExtractor::new().expect("temperature regexes compile");
    let parsed = extractor.extract("650 °C-15 min");

    let reading = parsed.value.expect("both values resolve");
    assert_eq!(reading.temperature_c, Some(650.0));
    assert_eq!(reading.growth_time_min, Some(15.0));
    assert!(parsed.flags.is_empty());
}

#[test]
fn tolerance_is_not_read_as_setpoint() {
    let extractor = TemperatureTimeExtractor::new().expect("temperature regexes compile");

    let parsed = extractor.extract("650 ± 10 °C 15 min");
    let reading = parsed.value.expect("time resolves");
    assert_eq!(reading.temperature_c, None);
    assert_eq!(reading.growth_time_min, Some(15.0));
    assert_eq!(parsed.flags, vec![Flag::RangeValueUnresolved]);

    let both = extractor.extract("650±10 °C 15 ± 2 min");
    assert_eq!(both.value, None);
    assert_eq!(both.flags, vec![Flag::RangeValueUnresolved]);
}

#[test]
fn gas_flow_reads_adjacent_and_slash_separated_groups() {
    let extractor = GasFlowExtractor::new().expect("gas flow regex compiles");

    let single = extractor.extract("N2 1 sccm");
    let readings = single.value.expect("single group resolves");
    assert_eq!(readings.carrier_gas, vec!["N2".to_string()]);
    assert_eq!(readings.gas_flows_sccm.get("N2"), Some(1.0));

    let mixed = extractor.extract("Ar14 sccm H2/2 sccm");
    let readings = mixed.value.expect("both groups resolve");
    assert_eq!(readings.carrier_gas, vec!["Ar".to_string(), "H2".to_string()]);
    assert_eq!(readings.gas_flows_sccm.get("Ar"), Some(14.0));
    assert_eq!(readings.gas_flows_sccm.get("H2"), Some(2.0));
    assert_eq!(
        serde_json::to_string(&readings.gas_flows_sccm).expect("flows serialize"),
        r#"{"Ar":14.0,"H2":2.0}"#
    );

    let slashed = extractor.extract("Ar 10 sccm/H2 5 sccm");
    let readings = slashed.value.expect("slash groups resolve");
    assert_eq!(readings.carrier_gas, vec!["Ar".to_string(), "H2".to_string()]);
}

#[test]
fn gas_flow_repeated_label_keeps_position_and_last_value() {
    let extractor = GasFlowExtractor::new().expect("gas flow regex compiles");
    let parsed = extractor.extract("Ar 10 sccm H2 5 sccm Ar 20 sccm");

    let readings = parsed.value.expect("groups resolve");
    assert_eq!(readings.carrier_gas, vec!["Ar".to_string(), "H2".to_string()]);
    assert_eq!(readings.gas_flows_sccm.get("Ar"), Some(20.0));
    assert_eq!(
        readings.gas_flows_sccm.labels().collect::<Vec<&str>>(),
        vec!["Ar", "H2"]
    );
}

#[test]
fn gas_flow_without_groups_is_flagged_not_guessed() {
    let extractor = GasFlowExtractor::new().expect("gas flow regex compiles");

    for cell in ["Ar", "–", "", "Ar/H2 mixture", "Ar10-20 sccm"] {
        let parsed = extractor.extract(cell);
        assert_eq!(parsed.value, None, "cell {cell:?}");
        assert_eq!(parsed.flags, vec![Flag::GasFlowUnparsed]);
    }
}

#[test]
fn splitter_pairs_loads_positionally() {
    let masses = MassExtractor::new().expect("mass regex compiles");
    let splitter = MultiLoadSplitter::new().expect("co-reagent regex compiles");

    let pairs = splitter
        .split(&masses, "0.2 g 0.4 g", "0.5 g <0.9 g")
        .expect("equal counts split");
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].mass_grams, 0.2);
    assert_eq!(pairs[0].co_reagent_note, "0.5 g");
    assert_eq!(pairs[1].mass_grams, 0.4);
    assert_eq!(pairs[1].co_reagent_note, "<0.9 g");
}

#[test]
fn splitter_refuses_unequal_or_single_loads() {
    let masses = MassExtractor::new().expect("mass regex compiles");
    let splitter = MultiLoadSplitter::new().expect("co-reagent regex compiles");

    assert!(splitter.split(&masses, "0.2 g 0.4 g", "0.5 g 0.9 g 1.2 g").is_none());
    assert!(splitter.split(&masses, "0.4 g", "0.8 g").is_none());
    assert!(splitter.split(&masses, "0.2 g 0.4 g", "S rich").is_none());
    assert!(splitter.split(&masses, "0.1-0.2 g 0.3 g", "0.5 g 0.9 g").is_none());
    assert!(splitter.split(&masses, "0.2 g 0.4 g", "0.5-0.9 g").is_none());

    let pairs = splitter
        .split(&masses, "0.2 g 0.4 g", "0.5-0.9 g 1.2 g")
        .expect("a range counts as one co-reagent token");
    assert_eq!(pairs[0].co_reagent_note, "0.5-0.9 g");
    assert_eq!(pairs[1].co_reagent_note, "1.2 g");
}

#[test]
fn classifier_uses_keyword_precedence() {
    assert_eq!(
        classify_reactants("MoO3 powder 0.4 g", "S powder 0.8 g"),
        vec!["MoO3 powder".to_string(), "S powder".to_string()]
    );
    assert_eq!(
        classify_reactants("MoCl5 0.01 g", "H2S 10 sccm"),
        vec!["MoCl5 powder".to_string(), "H2S".to_string()]
    );
    assert_eq!(
        classify_reactants("MoO3 nanoribbons", "S powder"),
        vec!["MoO3 nanoribbons".to_string(), "S powder".to_string()]
    );
    assert_eq!(
        classify_reactants("MoS2 powder 0.1 g", "S powder"),
        vec!["MoS2 powder".to_string()]
    );
    assert_eq!(
        classify_reactants("Single source (NH4)2MoS4", "S powder"),
        vec!["MoO3 powder".to_string()]
    );
    assert_eq!(
        classify_reactants("MoO3 powder", ""),
        vec!["MoO3 powder".to_string()]
    );
}

#[test]
fn record_id_is_stable_and_distinguishes_sub_rows() {
    let base = record_id("10.1/x", "table3", 4, None);
    assert_eq!(base, record_id("10.1/x", "table3", 4, None));
    assert_eq!(base.len(), 16);
    assert!(base.chars().all(|ch| ch.is_ascii_hexdigit()));

    let first = record_id("10.1/x", "table3", 4, Some(1));
    let second = record_id("10.1/x", "table3", 4, Some(2));
    assert_ne!(first, second);
    assert_ne!(first, base);
    assert_ne!(base, record_id("", "table3", 4, None));
}

#[test]
fn confidence_applies_additive_penalties_and_clamps() {
    let resolved = Condition {
        temperature_c: Some(650.0),
        pressure_torr: Some(760.0),
        growth_time_min: Some(15.0),
        ..Condition::default()
    };
    assert_close(confidence(&resolved, &[]), 0.90);
    assert_close(confidence(&resolved, &[Flag::AmbiguousValue]), 0.80);

    let unresolved = Condition::default();
    assert_close(
        confidence(
            &unresolved,
            &[Flag::TemperatureProfileUnparsed, Flag::RangeValueUnresolved],
        ),
        0.90 - 0.45 - 0.12 - 0.08,
    );
    assert_close(
        confidence(
            &unresolved,
            &[
                Flag::TemperatureProfileUnparsed,
                Flag::RangeValueUnresolved,
                Flag::AmbiguousValue,
                Flag::AmbiguousValue,
            ],
        ),
        0.90 - 0.45 - 0.12 - 0.08 - 0.10,
    );
}

#[test]
fn score_appends_provenance_after_parse_flags() {
    let condition = Condition::default();
    let quality = score(&condition, vec![Flag::PressureMissing], "56", true);

    assert_eq!(
        quality.flags,
        vec![
            Flag::PressureMissing,
            Flag::ReviewTableRow,
            Flag::CitedRef("56".to_string()),
            Flag::RowSplitIntoMultipleConditions,
        ]
    );
    assert_eq!(
        quality.missing_required_fields,
        vec![
            "material".to_string(),
            "growth_method".to_string(),
            "temperature_C".to_string()
        ]
    );

    let uncited = score(&condition, Vec::new(), "", false);
    assert_eq!(uncited.flags, vec![Flag::ReviewTableRow]);
}

#[test]
fn flags_serialize_as_vocabulary_strings() {
    let flags = vec![
        Flag::PressureAssumedAmbient,
        Flag::ReviewTableRow,
        Flag::CitedRef("14".to_string()),
    ];
    assert_eq!(
        serde_json::to_string(&flags).expect("flags serialize"),
        r#"["pressure_assumed_ambient","review_table_row","cited_ref_14"]"#
    );

    let cited = Flag::CitedRef("14".to_string());
    assert_eq!(cited.as_str(), "cited_ref");
    assert_eq!(cited.to_string(), "cited_ref_14");
}

#[test]
fn reference_row_builds_expected_record() {
    let records = builder()
        .row_to_records(&reference_row(), &paper(), "cvde201500060_table3", 1)
        .expect("row has required columns");
    assert_eq!(records.len(), 1);

    let record = &records[0];
    let condition = &record.condition;
    assert_eq!(condition.material.as_deref(), Some("MoS2"));
    assert_eq!(condition.growth_method.as_deref(), Some("TVD CVD"));
    assert_eq!(condition.substrate.as_deref(), Some("SiO2/Si face-down"));
    assert_eq!(condition.temperature_c, Some(650.0));
    assert_eq!(condition.growth_time_min, Some(15.0));
    assert_eq!(condition.pressure_torr, Some(760.0));
    assert_eq!(condition.carrier_gas, vec!["N2".to_string()]);
    assert_eq!(condition.gas_flows_sccm.get("N2"), Some(1.0));
    assert_eq!(
        condition.reactants,
        vec!["MoO3 powder".to_string(), "S powder".to_string()]
    );
    assert_eq!(
        condition.notes.as_deref(),
        Some("Mo source cell: MoO3 powder 0.4 g S source cell: S powder 0.8 g Cited ref: 14.")
    );

    assert_eq!(
        record.quality.flags,
        vec![
            Flag::PressureAssumedAmbient,
            Flag::ReviewTableRow,
            Flag::CitedRef("14".to_string()),
        ]
    );
    assert_close(record.quality.confidence, 0.90);
    assert!(record.quality.missing_required_fields.is_empty());

    assert_eq!(record.evidence.temperature_c, vec!["650 C 15 min".to_string()]);
    assert_eq!(record.evidence.growth_time_min, vec!["650 C 15 min".to_string()]);
    assert_eq!(record.evidence.pressure_torr, vec!["ambient".to_string()]);
    assert_eq!(
        record.evidence.reactants,
        vec!["MoO3 powder 0.4 g".to_string(), "S powder 0.8 g".to_string()]
    );
    assert_eq!(
        record.record_id,
        record_id("10.1002/cvde.201500060", "cvde201500060_table3", 1, None)
    );
    assert_eq!(record.paper, paper());
    assert_eq!(record.outcomes, crate::model::Outcomes::default());
}

#[test]
fn multi_load_row_splits_into_positional_records() {
    let mut cells = reference_row();
    cells.insert("Mo source".to_string(), "0.2 g 0.4 g".to_string());
    cells.insert("Sulfur source".to_string(), "0.5 g 0.9 g".to_string());

    let records = builder()
        .row_to_records(&cells, &paper(), "table3", 7)
        .expect("row has required columns");
    assert_eq!(records.len(), 2);

    for record in &records {
        assert!(
            record
                .quality
                .flags
                .contains(&Flag::RowSplitIntoMultipleConditions)
        );
    }
    assert_ne!(records[0].record_id, records[1].record_id);
    assert_eq!(records[0].record_id, record_id("10.1002/cvde.201500060", "table3", 7, Some(1)));

    let first_notes = records[0].condition.notes.as_deref().unwrap_or_default();
    assert!(first_notes.contains("paired list: 0.2 g"));
    assert!(first_notes.contains("paired list: 0.5 g"));
    let second_notes = records[1].condition.notes.as_deref().unwrap_or_default();
    assert!(second_notes.contains("paired list: 0.4 g"));
    assert!(second_notes.contains("paired list: 0.9 g"));
}

#[test]
fn mismatched_loads_stay_one_unsplit_record() {
    let mut cells = reference_row();
    cells.insert("Mo source".to_string(), "0.2 g 0.4 g".to_string());
    cells.insert("Sulfur source".to_string(), "0.5 g 0.9 g 1.2 g".to_string());

    let records = builder()
        .row_to_records(&cells, &paper(), "table3", 7)
        .expect("row has required columns");
    assert_eq!(records.len(), 1);
    assert!(
        !records[0]
            .quality
            .flags
            .contains(&Flag::RowSplitIntoMultipleConditions)
    );
    assert_eq!(records[0].record_id, record_id("10.1002/cvde.201500060", "table3", 7, None));
}

#[test]
fn qualitative_cells_raise_dedicated_flags() {
    let cells = row(&[
        ("Mo source", "MoO3 powder –"),
        ("Sulfur source", "S rich ∼<0.1 g"),
        ("Temp. Time", "780–650 °C 30–60 min"),
        ("Pressure", "–"),
        ("Carrier gas Flow rate", "Ar"),
        ("Ref", ""),
    ]);

    let records = builder()
        .row_to_records(&cells, &Map::new(), "table3", 2)
        .expect("row has required columns");
    let quality = &records[0].quality;

    assert_eq!(
        quality.flags,
        vec![
            Flag::TemperatureProfileUnparsed,
            Flag::RangeValueUnresolved,
            Flag::PressureMissing,
            Flag::GasFlowUnparsed,
            Flag::InequalityValuePresent,
            Flag::SulfurAmountVague,
            Flag::MoSourceAmountMissing,
            Flag::ApproximateValuePresent,
            Flag::ReviewTableRow,
        ]
    );
    assert_close(quality.confidence, 0.90 - 0.45 - 0.08 - 0.12);
    assert_eq!(
        quality.missing_required_fields,
        vec!["temperature_C".to_string()]
    );

    let record = &records[0];
    assert_eq!(record.condition.substrate, None);
    assert!(record.condition.carrier_gas.is_empty());
    assert!(record.condition.gas_flows_sccm.is_empty());
    assert_eq!(record.evidence.pressure_torr, vec!["–".to_string()]);
    assert_eq!(record.evidence.gas_flows_sccm, vec!["Ar".to_string()]);
}

#[test]
fn missing_mo_source_column_is_a_structural_error() {
    let cells = row(&[("Sulfur source", "S powder 0.8 g"), ("Ref", "14")]);

    let err = builder()
        .row_to_records(&cells, &paper(), "table3", 3)
        .expect_err("required column is absent");
    assert!(err.to_string().contains("Mo source"));
    assert!(err.to_string().contains("row 3"));
}

#[test]
fn empty_context_fields_are_reported_missing() {
    let context = TableContext {
        material: None,
        growth_method: None,
        ..TableContext::default()
    };
    let builder = RecordBuilder::new(context).expect("builder patterns compile");

    let records = builder
        .row_to_records(&reference_row(), &paper(), "table3", 1)
        .expect("row has required columns");
    assert_eq!(
        records[0].quality.missing_required_fields,
        vec!["material".to_string(), "growth_method".to_string()]
    );
}

#[test]
fn repeated_builds_serialize_identically() {
    let builder = builder();
    let mut cells = reference_row();
    cells.insert("Carrier gas Flow rate".to_string(), "Ar14 sccm H2/2 sccm".to_string());

    let first = builder
        .row_to_records(&cells, &paper(), "table3", 5)
        .expect("row has required columns");
    let second = builder
        .row_to_records(&cells, &paper(), "table3", 5)
        .expect("row has required columns");

    assert_eq!(
        serde_json::to_string(&first).expect("records serialize"),
        serde_json::to_string(&second).expect("records serialize")
    );
}

#[test]
fn record_serializes_with_schema_field_names() {
    let records = builder()
        .row_to_records(&reference_row(), &paper(), "table3", 1)
        .expect("row has required columns");
    let value = serde_json::to_value(&records[0]).expect("record serializes");

    assert_eq!(value["condition"]["temperature_C"], json!(650.0));
    assert_eq!(value["condition"]["pressure_Torr"], json!(760.0));
    assert_eq!(value["condition"]["gas_flows_sccm"], json!({"N2": 1.0}));
    assert_eq!(value["condition"]["anneal"]["atmosphere"], Value::Null);
    assert_eq!(value["outcomes"]["mobility_cm2_Vs"], Value::Null);
    assert_eq!(value["evidence"]["growth_method"], json!(["Table 3 (TVD growth parameters)"]));
    assert_eq!(value["quality"]["flags"][2], json!("cited_ref_14"));
    assert_eq!(value["paper"]["year"], json!(2015));
}

#[test]
fn tokenizer_splits_tabs_and_falls_back_to_spaces() {
    let tokenizer = TableTokenizer::new().expect("delimiter regexes compile");
    let block = "Mo source\tSulfur source\tRef\n\
                 MoO3 powder 0.4 g\tS powder 0.8 g\t14\n\
                 \n\
                 MoO3 0.1 g  S powder  21\n\
                 broken line\n";

    let table = tokenizer.parse(block).expect("table has a header");
    assert_eq!(table.header, vec!["Mo source", "Sulfur source", "Ref"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0]["Sulfur source"], "S powder 0.8 g");
    assert_eq!(table.rows[1]["Mo source"], "MoO3 0.1 g");
    assert_eq!(table.rows[1]["Ref"], "21");
    assert_eq!(table.skipped_lines, vec![3]);
}

#[test]
fn tokenizer_rejects_empty_block() {
    let tokenizer = TableTokenizer::new().expect("delimiter regexes compile");
    assert!(tokenizer.parse(" \n\t\n").is_err());
}
