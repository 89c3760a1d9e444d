/// Unsigned decimal with optional exponent. ASCII digits only so captures always parse as
/// `f64`. A leading dash is left to the range patterns, never read as a sign.
pub const FLOAT: &str = r"[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?";

/// Range separators between two numbers: hyphen or en-dash.
pub const RANGE_DASH: &str = r"[–-]";

pub const MISSING_SENTINELS: [&str; 3] = ["-", "–", "—"];

pub const APPROX_MARKERS: [char; 2] = ['∼', '~'];

pub fn normalize_cell(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}

pub fn is_missing_sentinel(cell: &str) -> bool {
    let cell = cell.trim();
    MISSING_SENTINELS.iter().any(|sentinel| *sentinel == cell)
}

pub fn has_approx_marker(cell: &str) -> bool {
    cell.contains(APPROX_MARKERS)
}

pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
