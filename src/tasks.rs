//! Batch steps: load inputs from the data directory, run the pure transform,
//! write the outputs and print an operator summary.
//!
//! Each step is safe to rerun; a second run over its own output rewrites
//! identical files.

use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, warn};

use crate::config::DataPaths;
use crate::constants::{
    AGENCY_MATCHUPS, BRAIN_DRAIN_COLLECTION, COMPARISONS_INDEX_FILE, SAMPLE_SIZE,
    SEPARATIONS_BY_LOCATION,
};
use crate::error::Result;
use crate::pipeline::processing::comparisons::{build_comparisons, SkippedMatchup};
use crate::pipeline::processing::enrich::{StateEnricher, StateEnrichment};
use crate::pipeline::processing::export::{
    agencies_table, occupations_table, separations_table, state_impact_table, CsvTable,
};
use crate::pipeline::processing::families::rollup_families;
use crate::pipeline::processing::format::{format_grouped, format_number};
use crate::pipeline::processing::normalize::{
    normalize_locations, resolve_names, GeoNormalization, NameResolutionSummary, ResolverChain,
};
use crate::pipeline::ReferenceData;
use crate::storage::{
    ensure_dir, list_json_files, read_json, write_json, write_text, AggregateDocument, DetailFile,
    WriteOutcome,
};
use crate::types::{
    AgencyListEntry, CodedRecord, LocationEntry, OccupationEntry, SeparationsDataset,
    StateImpactEntry, StateSeparations, StateSummary,
};

#[derive(Debug, Clone)]
pub struct NamesReport {
    pub summary: NameResolutionSummary,
    /// First records after resolution, as `(code, name)`.
    pub samples: Vec<(String, String)>,
    pub outcome: WriteOutcome,
}

/// Resolve display names for every record of `brain-drain.json`.
pub fn fix_brain_drain_names(paths: &DataPaths) -> Result<NamesReport> {
    let reference = ReferenceData::load(paths)?;
    let chain = ResolverChain::standard(&reference);

    let path = paths.brain_drain();
    let mut document = AggregateDocument::load(&path)?;
    let mut records: Vec<CodedRecord> = document.records(BRAIN_DRAIN_COLLECTION)?;

    let summary = resolve_names(&mut records, &chain);
    document.replace_records(BRAIN_DRAIN_COLLECTION, &records)?;
    let outcome = document.save(&path)?;

    let samples: Vec<(String, String)> = records
        .iter()
        .take(SAMPLE_SIZE)
        .map(|r| {
            (
                r.code().unwrap_or_default().to_string(),
                r.name().unwrap_or_default().to_string(),
            )
        })
        .collect();

    info!(
        total = summary.total,
        exact = summary.exact,
        parent_fallback = summary.parent_fallback,
        not_found = summary.not_found,
        "resolved brain drain names"
    );
    println!("\n📊 Name resolution for {}:", path.display());
    println!("   Records: {}", summary.total);
    println!("   Exact matches: {}", summary.exact);
    println!("   Parent fallbacks: {}", summary.parent_fallback);
    println!("   Not found: {}", summary.not_found);
    println!("   Sample:");
    for (code, name) in &samples {
        println!("     {} -> {}", code, name);
    }
    println!("   Output: {}", describe(outcome));

    Ok(NamesReport {
        summary,
        samples,
        outcome,
    })
}

#[derive(Debug, Clone)]
pub struct GeographyReport {
    pub normalization: GeoNormalization,
    pub outcome: WriteOutcome,
}

/// Replace raw location codes in `geographic-impact.json` with state
/// abbreviations.
pub fn fix_geographic_separations(paths: &DataPaths) -> Result<GeographyReport> {
    let path = paths.geographic_impact();
    let mut document = AggregateDocument::load(&path)?;
    let entries: Vec<LocationEntry> = document.records(SEPARATIONS_BY_LOCATION)?;

    let normalization = normalize_locations(entries);
    document.replace_records(SEPARATIONS_BY_LOCATION, &normalization.entries)?;
    let outcome = document.save(&path)?;

    println!("\n📊 Geographic normalization for {}:", path.display());
    println!("   Mapped: {}", normalization.mapped);
    if normalization.already_normalized > 0 {
        println!("   Already normalized: {}", normalization.already_normalized);
    }
    println!("   Dropped: {}", normalization.dropped.len());
    for dropped in &normalization.dropped {
        println!("     {} ({} separations)", dropped.code, dropped.separations);
    }
    if !normalization.unknown.is_empty() {
        println!("   Unknown codes kept: {}", normalization.unknown.join(", "));
    }
    println!("   Entries written: {}", normalization.entries.len());
    println!("   Output: {}", describe(outcome));

    Ok(GeographyReport {
        normalization,
        outcome,
    })
}

#[derive(Debug, Clone)]
pub struct EnrichmentReport {
    pub national_avg_salary: f64,
    pub states: Vec<StateEnrichment>,
    pub written: usize,
}

/// Add national comparisons, separations and a narrative to every
/// `state-detail/*.json` file.
pub fn enrich_state_details(paths: &DataPaths) -> Result<EnrichmentReport> {
    let states: Vec<StateSummary> = read_json(&paths.states())?;

    let geo = AggregateDocument::load(&paths.geographic_impact())?;
    let entries: Vec<LocationEntry> = geo.records(SEPARATIONS_BY_LOCATION)?;
    let mut separations: Vec<StateSeparations> = Vec::with_capacity(entries.len());
    let mut raw_codes = 0;
    for entry in entries {
        match entry {
            LocationEntry::Normalized(state) => separations.push(state),
            LocationEntry::Coded { .. } => raw_codes += 1,
        }
    }
    if raw_codes > 0 {
        warn!(
            "{} location entries still carry raw codes; run the geography step first",
            raw_codes
        );
    }

    let enricher = StateEnricher::new(&states, &separations)?;
    println!(
        "\n📊 National average salary: ${}",
        format_grouped(enricher.national_avg_salary)
    );

    let mut report = EnrichmentReport {
        national_avg_salary: enricher.national_avg_salary,
        states: Vec::new(),
        written: 0,
    };

    for path in list_json_files(&paths.state_detail_dir())? {
        let mut detail = DetailFile::load(&path)?;
        let enrichment = enricher.enrich(&mut detail)?;
        if detail.save(&path)? == WriteOutcome::Written {
            report.written += 1;
        }
        println!(
            "   ✓ {}: {} separations, {}{}% vs national",
            enrichment.code,
            format_grouped(enrichment.separations),
            if enrichment.salary_vs_national > 0.0 { "+" } else { "" },
            format_number(enrichment.salary_vs_national)
        );
        report.states.push(enrichment);
    }

    info!(
        states = report.states.len(),
        written = report.written,
        "enriched state details"
    );
    println!("   Enriched {} state files", report.states.len());
    Ok(report)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: &'static str,
    pub rows: usize,
    pub outcome: WriteOutcome,
}

/// Flatten the agency, occupation, separation and state-impact datasets into
/// CSV files under `csv/`.
pub fn generate_csv_exports(paths: &DataPaths) -> Result<Vec<ExportedFile>> {
    let agencies: Vec<AgencyListEntry> = read_json(&paths.agency_list())?;
    let occupations: Vec<OccupationEntry> = read_json(&paths.occupations())?;
    let separations: SeparationsDataset = read_json(&paths.separations())?;
    let state_impact: Vec<StateImpactEntry> = read_json(&paths.state_impact())?;

    let tables = [
        agencies_table(&agencies),
        occupations_table(&occupations),
        separations_table(&separations),
        state_impact_table(&state_impact),
    ];

    let dir = paths.csv_dir();
    ensure_dir(&dir)?;

    println!("\n📊 CSV exports in {}:", dir.display());
    tables
        .iter()
        .map(|table| -> Result<ExportedFile> {
            let exported = write_table(&dir, table)?;
            println!("   ✓ {}: {} rows", exported.file_name, exported.rows);
            Ok(exported)
        })
        .collect()
}

fn write_table(dir: &Path, table: &CsvTable) -> Result<ExportedFile> {
    let outcome = write_text(&dir.join(table.file_name), &table.to_csv_string()?)?;
    Ok(ExportedFile {
        file_name: table.file_name,
        rows: table.rows.len(),
        outcome,
    })
}

#[derive(Debug, Clone)]
pub struct FamiliesReport {
    pub families: usize,
    pub occupations: usize,
    pub outcome: WriteOutcome,
}

/// Roll `occupations.json` up into `occupation-families.json`.
pub fn generate_occupation_families(paths: &DataPaths) -> Result<FamiliesReport> {
    let occupations: Vec<OccupationEntry> = read_json(&paths.occupations())?;
    let families = rollup_families(&occupations);
    let outcome = write_json(&paths.occupation_families(), &families)?;

    let report = FamiliesReport {
        families: families.len(),
        occupations: families.iter().map(|f| f.occupation_count).sum(),
        outcome,
    };
    println!(
        "\n📊 Generated {} occupation families covering {} occupations",
        report.families, report.occupations
    );
    Ok(report)
}

#[derive(Debug, Clone)]
pub struct ComparisonsReport {
    pub written: Vec<String>,
    pub skipped: Vec<SkippedMatchup>,
}

/// Write one file per agency matchup plus `comparisons/index.json`.
pub fn generate_comparisons(paths: &DataPaths) -> Result<ComparisonsReport> {
    let agencies: Vec<Map<String, Value>> = read_json(&paths.agency_risk())?;
    let set = build_comparisons(&agencies, AGENCY_MATCHUPS);

    let dir = paths.comparisons_dir();
    ensure_dir(&dir)?;
    for comparison in &set.comparisons {
        write_json(&dir.join(format!("{}.json", comparison.slug)), comparison)?;
    }
    write_json(&dir.join(COMPARISONS_INDEX_FILE), &set.index())?;

    println!(
        "\n📊 Generated {} comparison files in {}",
        set.comparisons.len(),
        dir.display()
    );
    for skipped in &set.skipped {
        println!("   ⚠ Skipped {}: {} not found", skipped.slug, skipped.missing_code);
    }

    Ok(ComparisonsReport {
        written: set.comparisons.iter().map(|c| c.slug.clone()).collect(),
        skipped: set.skipped,
    })
}

/// Run every step in dependency order: names, geography, enrichment,
/// families, comparisons, export.
pub fn run_all(paths: &DataPaths) -> Result<()> {
    info!(data_dir = %paths.root().display(), "running all steps");
    fix_brain_drain_names(paths)?;
    fix_geographic_separations(paths)?;
    enrich_state_details(paths)?;
    generate_occupation_families(paths)?;
    generate_comparisons(paths)?;
    generate_csv_exports(paths)?;
    println!("\n✅ All steps completed");
    Ok(())
}

fn describe(outcome: WriteOutcome) -> &'static str {
    match outcome {
        WriteOutcome::Written => "written",
        WriteOutcome::Unchanged => "unchanged",
    }
}
