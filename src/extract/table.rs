use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use regex::Regex;

use super::patterns::normalize_cell;

/// One table row keyed by header text.
pub type TableRow = HashMap<String, String>;

#[derive(Debug, Default)]
pub struct ParsedTable {
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
    /// 1-based positions among non-blank data lines dropped for having too few cells.
    pub skipped_lines: Vec<usize>,
}

pub struct TableTokenizer {
    tab_split: Regex,
    space_split: Regex,
}

impl TableTokenizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            tab_split: Regex::new(r"\t+").context("failed to compile tab delimiter regex")?,
            space_split: Regex::new(r"\s{2,}").context("failed to compile space delimiter regex")?,
        })
    }

    /// Splits a pasted table block into header and rows. Lines that lost their tabs fall
    /// back to runs of two or more spaces.
    pub fn parse(&self, block: &str) -> Result<ParsedTable> {
        let mut lines = block
            .lines()
            .filter(|line| !normalize_cell(line).is_empty())
            .map(str::trim);

        let Some(header_line) = lines.next() else {
            bail!("table block has no header line");
        };
        let header = self
            .tab_split
            .split(header_line)
            .map(|name| name.to_string())
            .collect::<Vec<String>>();

        let mut table = ParsedTable {
            header,
            ..ParsedTable::default()
        };

        for (offset, line) in lines.enumerate() {
            let mut cells = self.tab_split.split(line).collect::<Vec<&str>>();
            if cells.len() == 1 {
                cells = self.space_split.split(line).collect();
            }

            if cells.len() < table.header.len() {
                table.skipped_lines.push(offset + 1);
                continue;
            }

            let row = table
                .header
                .iter()
                .zip(cells)
                .map(|(name, cell)| (name.clone(), cell.to_string()))
                .collect::<TableRow>();
            table.rows.push(row);
        }

        Ok(table)
    }
}
