use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::{info, info_span};

use cra_taxonomy::{TaxonomyRegistry, load_consultations_csv, load_taxonomy_csv};

use crate::cli::AnalyzeArgs;
use crate::pipeline::{AnalysisOptions, load_batches, run_analysis, write_analytics_json};
use crate::summary::apply_table_style;
use crate::types::AnalysisResult;

pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalysisResult> {
    let registry = build_registry(args)?;

    let ingest_span = info_span!("ingest");
    let (record_batch, accounting_batch) = ingest_span.in_scope(|| -> Result<_> {
        let records = load_batches(&args.records)?;
        // Without a dedicated accounting file the accounting stream is
        // resolved from the record batches themselves.
        let accounting = match &args.accounting {
            Some(path) => load_batches(std::slice::from_ref(path))?,
            None => records.clone(),
        };
        Ok((records, accounting))
    })?;

    let options = AnalysisOptions {
        from: args.from,
        to: args.to,
        skip_transitions: args.no_transitions,
    };
    let result = run_analysis(&record_batch, &accounting_batch, &registry, options);

    if !args.no_report {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| Path::new(".").to_path_buf());
        let path = write_analytics_json(&output_dir, &result)?;
        info!(path = %path.display(), "wrote analytics report");
        let validation_path =
            cra_validate::write_report_json(&output_dir, &result.validation)?;
        info!(path = %validation_path.display(), "wrote validation report");
    }
    Ok(result)
}

fn build_registry(args: &AnalyzeArgs) -> Result<TaxonomyRegistry> {
    let mut registry = TaxonomyRegistry::default();
    if let Some(path) = &args.taxonomy {
        registry.nodes = load_taxonomy_csv(path)
            .with_context(|| format!("load taxonomy table: {}", path.display()))?;
    }
    if let Some(path) = &args.consultations {
        registry.consultations = load_consultations_csv(path)
            .with_context(|| format!("load consultation table: {}", path.display()))?;
    }
    Ok(registry)
}

pub fn run_taxonomy() -> Result<()> {
    let registry = TaxonomyRegistry::default();

    let mut table = Table::new();
    table.set_header(vec!["Specialty", "Main", "Procedures"]);
    apply_table_style(&mut table);
    for node in &registry.nodes {
        table.add_row(vec![
            Cell::new(node.specialty.label()),
            Cell::new(node.specialty.main_category().as_str()),
            Cell::new(node.procedures.join(", ")),
        ]);
    }
    println!("{table}");

    let mut consultations = Table::new();
    consultations.set_header(vec!["Consultation", "Specialty", "Subcategory", "Manual"]);
    apply_table_style(&mut consultations);
    for entry in &registry.consultations {
        consultations.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(entry.specialty.label()),
            Cell::new(&entry.subcategory),
            Cell::new(if entry.requires_manual_classification {
                "yes"
            } else {
                "-"
            }),
        ]);
    }
    println!();
    println!("{consultations}");
    Ok(())
}
