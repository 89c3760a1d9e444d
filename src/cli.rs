use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "synthtab",
    version,
    about = "Normalize CVD synthesis-parameter tables into structured records"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Extract(ExtractArgs),
    Inspect(InspectArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long, default_value = ".cache/synthtab")]
    pub cache_root: PathBuf,

    /// Tab-delimited table block, header line first.
    #[arg(long)]
    pub table_path: PathBuf,

    /// JSON object with paper metadata (`doi`, `title`, ...), passed through to every record.
    #[arg(long)]
    pub paper_meta_path: PathBuf,

    #[arg(long)]
    pub table_id: String,

    #[arg(long)]
    pub output_path: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    /// Abort on the first structurally malformed row instead of skipping it.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    #[arg(long, default_value = "MoS2")]
    pub material: String,

    #[arg(long, default_value = "TVD CVD")]
    pub growth_method: String,

    #[arg(long, default_value = "Table 3 (TVD growth parameters)")]
    pub method_evidence: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CellField {
    Mass,
    TempTime,
    Pressure,
    GasFlow,
}

impl CellField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mass => "mass",
            Self::TempTime => "temp-time",
            Self::Pressure => "pressure",
            Self::GasFlow => "gas-flow",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[arg(long, value_enum)]
    pub field: CellField,

    #[arg(long)]
    pub cell: String,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/synthtab")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}
