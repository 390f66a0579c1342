use crate::config::ExtractConfig;
use crate::core::extract::{
    default_output_path, run_extract, ExtractMode, ExtractOutcome, ExtractSummary,
};
use crate::core::gaps::{run_gaps, GapOptions, GapReport};
use crate::error::PrepResult;
use crate::types::ProjectedRecord;
use colored::Colorize;
use std::path::PathBuf;

/// Load the alias configuration, applying a language override
fn load_config(
    config: Option<PathBuf>,
    languages: Option<Vec<String>>,
) -> PrepResult<ExtractConfig> {
    let config = match config {
        Some(path) => ExtractConfig::load(&path)?,
        None => ExtractConfig::default(),
    };
    Ok(match languages {
        Some(languages) if !languages.is_empty() => config.with_languages(languages),
        _ => config,
    })
}

/// Execute the extract command
pub fn extract(
    input: PathBuf,
    output: Option<PathBuf>,
    languages: Option<Vec<String>>,
    all_rows: bool,
    config: Option<PathBuf>,
    verbose: bool,
) -> PrepResult<()> {
    let config = load_config(config, languages)?;
    let output = output.unwrap_or_else(|| default_output_path(&input));

    println!("{}", "🟡 memoQ Prep - Highlight Extraction".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "🔍 Scanning for yellow-highlighted cells...".cyan());
    }

    match run_extract(&input, &output, &config, all_rows)? {
        ExtractOutcome::Written(summary) => print_extract_summary(&summary, &config, verbose),
        ExtractOutcome::NoHighlights => {
            println!("{}", "⚠️  No yellow-highlighted cells found".yellow().bold());
            println!("   Use --all to export every row instead.\n");
        }
        ExtractOutcome::NoRecords { highlighted_rows } => {
            println!(
                "{}",
                format!(
                    "⚠️  {} highlighted rows, none with source text",
                    highlighted_rows
                )
                .yellow()
                .bold()
            );
            println!("   No file written.\n");
        }
    }

    Ok(())
}

fn print_extract_summary(summary: &ExtractSummary, config: &ExtractConfig, verbose: bool) {
    println!(
        "   Found {} yellow cells in {} rows",
        summary.highlighted_cells, summary.highlighted_rows
    );
    println!(
        "   Source column: {}",
        summary.roles.source.header.bold()
    );
    for (code, column) in &summary.roles.targets {
        println!("   {} column: {}", code, column.header);
    }
    for code in &summary.roles.missing_targets {
        println!("   {}", format!("{} column not found", code).yellow());
    }
    if let Some(category) = &summary.roles.category {
        println!("   Category column: {}", category.header);
    }
    println!();

    if verbose {
        println!("{}", "📋 Segments:".cyan());
        for (idx, record) in summary.records.iter().enumerate() {
            println!("   {}. {}", idx + 1, describe_record(record));
        }
        println!();
    }

    if summary.mode == ExtractMode::AllRows {
        println!(
            "{}",
            "🔄 No highlighted segments, exported all rows".yellow()
        );
    }

    println!(
        "{}",
        format!("✅ Prepared {} segments", summary.records.len())
            .bold()
            .green()
    );
    println!("   File: {}", summary.output.display());
    println!(
        "   Columns: {} → Source, targets {}\n",
        config.source.join("/"),
        config.languages.join(", ")
    );
}

/// One-line description of a record for verbose output
fn describe_record(record: &ProjectedRecord) -> String {
    let highlights: Vec<String> = record
        .targets
        .iter()
        .filter(|t| !t.value.is_blank())
        .map(|t| format!("{}='{}'", t.code, t.value))
        .collect();
    let highlights = if highlights.is_empty() {
        "no target text".to_string()
    } else {
        highlights.join(" | ")
    };
    format!(
        "Row {}: Source '{}' | {}",
        record.sheet_row, record.source, highlights
    )
}

/// Execute the gaps command
pub fn gaps(
    input: PathBuf,
    source: String,
    targets: Vec<String>,
    output_dir: PathBuf,
    verbose: bool,
) -> PrepResult<()> {
    println!("{}", "📚 memoQ Prep - Missing Translations".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output_dir.display());

    let options = GapOptions::new(&source, &targets, output_dir);
    let report = run_gaps(&input, &options)?;
    print_gap_report(&report, &options, verbose);
    Ok(())
}

fn print_gap_report(report: &GapReport, options: &GapOptions, verbose: bool) {
    let analysis = &report.analysis;
    println!(
        "   Entries with {}: {}",
        options.source_language, analysis.source_entries
    );
    if verbose {
        println!(
            "   {} term column: {}",
            options.source_language, analysis.source.position
        );
    }
    for language in &analysis.missing_columns {
        println!("   {}", format!("No '{}' column", language).yellow());
    }

    println!("\n{}", "Missing translations:".bold());
    for gaps in &analysis.languages {
        if gaps.missing_rows.is_empty() {
            println!("   {}: {}", gaps.language, "all entries translated ✓".green());
        } else {
            println!("   {}: {} entries missing", gaps.language, gaps.missing_rows.len());
        }
    }
    println!();

    if report.files.is_empty() {
        println!("{}", "✅ All translations are complete, no files created".bold().green());
        return;
    }
    for file in &report.files {
        println!("   {} → {} ({} entries)", file.language, file.path.display(), file.rows);
    }
    println!(
        "{}",
        format!("\n✅ Created {} file(s)", report.files.len())
            .bold()
            .green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellValue, TargetField};

    #[test]
    fn test_describe_record() {
        let record = ProjectedRecord {
            sheet_row: 4,
            category: None,
            source: CellValue::text("Speichern"),
            targets: vec![
                TargetField { code: "FR".into(), value: CellValue::text("Enregistrer") },
                TargetField { code: "IT".into(), value: CellValue::Empty },
            ],
        };
        assert_eq!(
            describe_record(&record),
            "Row 4: Source 'Speichern' | FR='Enregistrer'"
        );
    }

    #[test]
    fn test_load_config_language_override() {
        let config = load_config(None, Some(vec!["en".into()])).unwrap();
        assert_eq!(config.languages, vec!["EN"]);
        let config = load_config(None, Some(vec![])).unwrap();
        assert_eq!(config.languages, vec!["FR", "IT", "EN"]);
    }

    #[test]
    fn test_extract_missing_input_errors() {
        let result = extract(PathBuf::from("nonexistent.xlsx"), None, None, false, None, false);
        assert!(result.is_err());
    }
}
