/// Mo-source species, first matching keyword wins.
const MO_SOURCE_SPECIES: [(&str, &str); 3] = [
    ("MoCl5", "MoCl5 powder"),
    ("MoS2", "MoS2 powder"),
    ("nanoribbons", "MoO3 nanoribbons"),
];

const DEFAULT_MO_SOURCE: &str = "MoO3 powder";

/// Markers of a precursor that already carries its own sulfur.
const SINGLE_SOURCE_MARKERS: [&str; 2] = ["Single source", "MoS2 powder"];

const GAS_SULFUR: &str = "H2S";
const SOLID_SULFUR: &str = "S powder";

/// Reactant labels for one row, Mo source first.
pub fn classify_reactants(mo_cell: &str, sulfur_cell: &str) -> Vec<String> {
    let mut reactants = Vec::with_capacity(2);

    let mo_label = MO_SOURCE_SPECIES
        .iter()
        .find(|(keyword, _)| mo_cell.contains(keyword))
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_MO_SOURCE);
    reactants.push(mo_label.to_string());

    let single_source = SINGLE_SOURCE_MARKERS
        .iter()
        .any(|marker| mo_cell.contains(marker));
    if !single_source {
        if sulfur_cell.contains(GAS_SULFUR) {
            reactants.push(GAS_SULFUR.to_string());
        } else if !sulfur_cell.is_empty() {
            reactants.push(SOLID_SULFUR.to_string());
        }
    }

    reactants
}
