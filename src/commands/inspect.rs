use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::{CellField, InspectArgs};
use crate::extract::{Extractor, RecordBuilder, TableContext};

pub fn run(args: InspectArgs) -> Result<()> {
    let builder = RecordBuilder::new(TableContext::default())?;

    info!(field = args.field.as_str(), "inspecting cell");

    match args.field {
        CellField::Mass => write_json(&builder.masses().extract(&args.cell)),
        CellField::TempTime => write_json(&builder.temp_time().extract(&args.cell)),
        CellField::Pressure => write_json(&builder.pressure().extract(&args.cell)),
        CellField::GasFlow => write_json(&builder.gas_flow().extract(&args.cell)),
    }
}

fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, value)
        .context("failed to serialize inspect json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
