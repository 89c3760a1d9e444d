use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::ExtractArgs;
use crate::extract::{RecordBuilder, TableContext, TableTokenizer};
use crate::model::{
    ExtractCounts, ExtractPaths, ExtractRunManifest, InputHash, PaperMeta, Record,
};
use crate::util::{now_utc_string, sha256_file, utc_compact_string, write_json_pretty, write_jsonl};

const MANIFEST_VERSION: u32 = 1;

mod run;

pub use run::run;

use run::*;

pub fn default_manifest_path(cache_root: &Path) -> PathBuf {
    cache_root.join("manifests").join("extract_run.json")
}
