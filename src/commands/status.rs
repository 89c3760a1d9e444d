use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::extract::default_manifest_path;
use crate::model::ExtractRunManifest;

#[derive(Debug, Deserialize)]
struct RecordQuality {
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct RecordSummary {
    quality: RecordQuality,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| default_manifest_path(&args.cache_root));

    info!(cache_root = %args.cache_root.display(), "status requested");

    if !manifest_path.exists() {
        warn!(path = %manifest_path.display(), "extract run manifest missing");
        return Ok(());
    }

    let raw = fs::read(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    let manifest: ExtractRunManifest = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

    info!(
        run_id = %manifest.run_id,
        status = %manifest.status,
        table_id = %manifest.table_id,
        started_at = %manifest.started_at,
        updated_at = %manifest.updated_at,
        rows_read = manifest.counts.rows_read,
        rows_skipped = manifest.counts.rows_skipped,
        rows_split = manifest.counts.rows_split,
        records_written = manifest.counts.records_written,
        records_missing_required = manifest.counts.records_missing_required,
        warnings = manifest.warnings.len(),
        "loaded extract run manifest"
    );

    for (flag, count) in &manifest.flag_counts {
        info!(flag = %flag, count = *count, "flag count");
    }

    let output_path = Path::new(&manifest.paths.output_path);
    if !output_path.exists() {
        warn!(path = %output_path.display(), "record output missing");
        return Ok(());
    }

    let (records, mean_confidence) = summarize_records(output_path)?;
    info!(
        path = %output_path.display(),
        records,
        mean_confidence = mean_confidence.unwrap_or_default(),
        "record output status"
    );

    Ok(())
}

fn summarize_records(path: &Path) -> Result<(usize, Option<f64>)> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let mut count = 0usize;
    let mut total = 0.0f64;
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: RecordSummary = serde_json::from_str(line).with_context(|| {
            format!("failed to parse line {} of {}", index + 1, path.display())
        })?;
        count += 1;
        total += record.quality.confidence;
    }

    let mean = (count > 0).then(|| total / count as f64);
    Ok((count, mean))
}
