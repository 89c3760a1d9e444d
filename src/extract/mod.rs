//! Cell parsing and record assembly for synthesis-parameter tables.
//!
//! Nothing in here performs I/O or logs; every extractor returns a total result for any
//! input text and reports what it could not resolve through flags.

mod builder;
mod classify;
mod gas_flow;
mod identity;
mod mass;
mod patterns;
mod pressure;
mod quantity;
mod scoring;
mod split;
mod table;
mod temp_time;
#[cfg(test)]
mod tests;

pub use builder::{RecordBuilder, TableContext};
pub use gas_flow::GasFlows;
pub use quantity::{Extractor, Flag};
pub use table::TableTokenizer;
