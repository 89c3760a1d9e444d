use sha2::{Digest, Sha256};

const RECORD_ID_LEN: usize = 16;
const ID_SEPARATOR: &str = "||";

/// Content-addressed record id over paper DOI, table, row and (for split rows) sub-row.
pub fn record_id(doi: &str, table_id: &str, row_index: usize, sub_index: Option<usize>) -> String {
    let mut row_key = format!("{table_id}_r{row_index}");
    if let Some(sub_index) = sub_index {
        row_key.push_str(&format!("_{sub_index}"));
    }

    let mut hasher = Sha256::new();
    hasher.update(doi.as_bytes());
    hasher.update(ID_SEPARATOR.as_bytes());
    hasher.update(row_key.as_bytes());

    let mut id = format!("{:x}", hasher.finalize());
    id.truncate(RECORD_ID_LEN);
    id
}
