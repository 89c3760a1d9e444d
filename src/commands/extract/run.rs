use super::*;

pub fn run(args: ExtractArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("extract-{}", utc_compact_string(started_ts));

    let output_path = args.output_path.clone().unwrap_or_else(|| {
        args.cache_root
            .join("extractions")
            .join(format!("{}.jsonl", args.table_id))
    });
    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| default_manifest_path(&args.cache_root));

    info!(
        table = %args.table_path.display(),
        table_id = %args.table_id,
        run_id = %run_id,
        "starting extract"
    );

    let table_text = fs::read_to_string(&args.table_path)
        .with_context(|| format!("failed to read {}", args.table_path.display()))?;
    let paper = load_paper_meta(&args.paper_meta_path)?;

    let builder = RecordBuilder::new(table_context(&args))?;
    let tokenizer = TableTokenizer::new()?;
    let extraction = extract_table(
        &builder,
        &tokenizer,
        &table_text,
        &paper,
        &args.table_id,
        args.strict,
    )?;

    write_jsonl(&output_path, &extraction.records)?;
    info!(
        path = %output_path.display(),
        records = extraction.records.len(),
        "wrote records"
    );

    let source_hashes = vec![
        InputHash {
            path: args.table_path.display().to_string(),
            sha256: sha256_file(&args.table_path)?,
        },
        InputHash {
            path: args.paper_meta_path.display().to_string(),
            sha256: sha256_file(&args.paper_meta_path)?,
        },
    ];

    let manifest = ExtractRunManifest {
        manifest_version: MANIFEST_VERSION,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_extract_command(&args),
        table_id: args.table_id.clone(),
        paths: ExtractPaths {
            cache_root: args.cache_root.display().to_string(),
            table_path: args.table_path.display().to_string(),
            paper_meta_path: args.paper_meta_path.display().to_string(),
            output_path: output_path.display().to_string(),
            manifest_path: manifest_path.display().to_string(),
        },
        flag_counts: flag_counts(&extraction.records),
        mean_confidence: mean_confidence(&extraction.records),
        counts: extraction.counts,
        source_hashes,
        warnings: extraction.warnings,
    };

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote extract run manifest");
    info!(
        rows = manifest.counts.rows_read,
        skipped = manifest.counts.rows_skipped,
        records = manifest.counts.records_written,
        "extract completed"
    );

    Ok(())
}

#[derive(Debug, Default)]
pub(super) struct TableExtraction {
    pub(super) records: Vec<Record>,
    pub(super) counts: ExtractCounts,
    pub(super) warnings: Vec<String>,
}

/// Builds records for every row of `table_text`, numbering rows from 1 in table order.
pub(super) fn extract_table(
    builder: &RecordBuilder,
    tokenizer: &TableTokenizer,
    table_text: &str,
    paper: &PaperMeta,
    table_id: &str,
    strict: bool,
) -> Result<TableExtraction> {
    let table = tokenizer.parse(table_text)?;
    let mut extraction = TableExtraction::default();

    for line in &table.skipped_lines {
        let message = format!(
            "table line {line} has fewer cells than the {}-column header",
            table.header.len()
        );
        if strict {
            bail!(message);
        }
        warn!(line = *line, "skipping malformed table line");
        extraction.warnings.push(message);
        extraction.counts.rows_skipped += 1;
    }

    for (offset, row) in table.rows.iter().enumerate() {
        let row_index = offset + 1;
        extraction.counts.rows_read += 1;

        let records = match builder.row_to_records(row, paper, table_id, row_index) {
            Ok(records) => records,
            Err(err) if !strict => {
                warn!(row = row_index, error = %err, "skipping row");
                extraction.warnings.push(err.to_string());
                extraction.counts.rows_skipped += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        if records.len() > 1 {
            extraction.counts.rows_split += 1;
        }
        extraction.counts.records_missing_required += records
            .iter()
            .filter(|record| !record.quality.missing_required_fields.is_empty())
            .count();
        extraction.counts.records_written += records.len();
        extraction.records.extend(records);
    }

    Ok(extraction)
}

fn load_paper_meta(path: &Path) -> Result<PaperMeta> {
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let paper: PaperMeta = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse paper metadata object {}", path.display()))?;
    Ok(paper)
}

/// An empty override leaves the field unset so it shows up as missing.
pub(super) fn table_context(args: &ExtractArgs) -> TableContext {
    let non_empty = |value: &str| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    TableContext {
        material: non_empty(&args.material),
        growth_method: non_empty(&args.growth_method),
        method_evidence: args.method_evidence.trim().to_string(),
    }
}

pub(super) fn flag_counts(records: &[Record]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::<String, usize>::new();
    for record in records {
        for flag in &record.quality.flags {
            *counts.entry(flag.to_string()).or_default() += 1;
        }
    }
    counts
}

pub(super) fn mean_confidence(records: &[Record]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total = records
        .iter()
        .map(|record| record.quality.confidence)
        .sum::<f64>();
    Some(total / records.len() as f64)
}

pub(super) fn render_extract_command(args: &ExtractArgs) -> String {
    let defaults = TableContext::default();
    let mut command = vec![
        "synthtab".to_string(),
        "extract".to_string(),
        "--cache-root".to_string(),
        args.cache_root.display().to_string(),
        "--table-path".to_string(),
        args.table_path.display().to_string(),
        "--paper-meta-path".to_string(),
        args.paper_meta_path.display().to_string(),
        "--table-id".to_string(),
        args.table_id.clone(),
    ];

    if let Some(path) = &args.output_path {
        command.push("--output-path".to_string());
        command.push(path.display().to_string());
    }
    if let Some(path) = &args.manifest_path {
        command.push("--manifest-path".to_string());
        command.push(path.display().to_string());
    }
    if args.strict {
        command.push("--strict".to_string());
    }
    if defaults.material.as_deref() != Some(args.material.as_str()) {
        command.push("--material".to_string());
        command.push(format!("{:?}", args.material));
    }
    if defaults.growth_method.as_deref() != Some(args.growth_method.as_str()) {
        command.push("--growth-method".to_string());
        command.push(format!("{:?}", args.growth_method));
    }
    if defaults.method_evidence != args.method_evidence {
        command.push("--method-evidence".to_string());
        command.push(format!("{:?}", args.method_evidence));
    }

    command.join(" ")
}
